use serde::{Deserialize, Serialize};

/// Geographic record for a zip code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub county: String,
}

impl Location {
    /// "City, ST"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}
