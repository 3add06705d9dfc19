//! Application configuration model (`config.toml`).

use serde::{Deserialize, Serialize};

use crate::error::{PawError, Result};
use crate::search::{DEFAULT_PAGE_SIZE, SortOrder};

/// Catalog service the client talks to when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Starting point of a fresh search session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub page_size: u32,
    /// `<field>:<asc|desc>`
    pub sort: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortOrder::default().to_string(),
        }
    }
}

impl SearchSettings {
    pub fn sort_order(&self) -> Result<SortOrder> {
        self.sort.parse()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `pawfinder_application=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(PawError::config("api.base_url must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(PawError::config("api.timeout_secs must be greater than zero"));
        }
        if self.search.page_size == 0 {
            return Err(PawError::config("search.page_size must be greater than zero"));
        }
        self.search
            .sort_order()
            .map_err(|e| PawError::config(format!("search.sort: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.page_size, 24);
        assert_eq!(config.search.sort, "breed:asc");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[search]\npage_size = 48\n").unwrap();
        assert_eq!(config.search.page_size, 48);
        assert_eq!(config.search.sort, "breed:asc");
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn rejects_bad_sort() {
        let mut config = AppConfig::default();
        config.search.sort = "fluffiness:asc".to_string();
        assert!(matches!(config.validate(), Err(PawError::Config(_))));
    }
}
