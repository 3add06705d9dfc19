//! Path management for pawfinder configuration files.
//!
//! ```text
//! ~/.config/pawfinder/         # Config directory (platform default)
//! ├── config.toml              # Application configuration
//! └── history.txt              # REPL history
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "pawfinder";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path management for pawfinder.
pub struct PawPaths;

impl PawPaths {
    /// Returns the pawfinder configuration directory (e.g. `~/.config/pawfinder/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the REPL history file.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("history.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_config_dir() {
        // Some CI sandboxes have no home directory at all.
        let Ok(dir) = PawPaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(PawPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(PawPaths::history_file().unwrap(), dir.join("history.txt"));
    }
}
