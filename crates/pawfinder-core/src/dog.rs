//! Dog records as served by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a dog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(String);

impl DogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An immutable dog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub breed: String,
    #[serde(rename = "age")]
    pub age_years: u32,
    pub zip_code: String,
    #[serde(rename = "img")]
    pub image_url: String,
}

impl Dog {
    /// "1 year" / "3 years", as shown on a dog card.
    pub fn age_label(&self) -> String {
        if self.age_years == 1 {
            "1 year".to_string()
        } else {
            format!("{} years", self.age_years)
        }
    }
}
