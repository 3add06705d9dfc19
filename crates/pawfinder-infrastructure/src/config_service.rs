//! Configuration service implementation.
//!
//! Loads the application configuration from the configuration file
//! (~/.config/pawfinder/config.toml) and applies environment overrides.

use std::path::{Path, PathBuf};

use pawfinder_core::config::AppConfig;
use pawfinder_core::error::{PawError, Result};

use crate::paths::PawPaths;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "PAWFINDER_API_URL";

/// Loads and saves [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path`, or the default config file location when `None`.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PawPaths::config_file().map_err(|e| PawError::config(e.to_string()))?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, falling back to defaults if the file is missing,
    /// then applies environment overrides and validates the result.
    pub fn load(&self) -> Result<AppConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", self.path.display());
            AppConfig::default()
        };

        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            tracing::debug!("{} overrides api.base_url", ENV_API_URL);
            config.api.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Writes `config` to the file, creating the parent directory.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(service.load_with_env(no_env).unwrap(), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&dir.path().join("nested/config.toml"))).unwrap();

        let mut config = AppConfig::default();
        config.search.page_size = 100;
        config.search.sort = "age:desc".to_string();
        service.save(&config).unwrap();

        assert_eq!(service.load_with_env(no_env).unwrap(), config);
    }

    #[test]
    fn env_overrides_base_url() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&dir.path().join("config.toml"))).unwrap();

        let config = service
            .load_with_env(|key| (key == ENV_API_URL).then(|| "http://localhost:8080".to_string()))
            .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\npage_size = 0\n").unwrap();
        let service = ConfigService::new(Some(&path)).unwrap();
        assert!(matches!(service.load_with_env(no_env), Err(PawError::Config(_))));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            service.load_with_env(no_env),
            Err(PawError::Serialization { .. })
        ));
    }
}
