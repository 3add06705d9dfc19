//! Error types for the Pawfinder client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Pawfinder workspace.
///
/// Every variant carries a message that can be shown to the user as-is.
/// None of them are fatal: the user may always retry the action that failed.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PawError {
    /// Transport failure (connection refused, DNS, timeout)
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// The catalog service answered with a non-2xx status
    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    /// The service rejected the session cookie, or no login happened yet
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Match requested with no favorites, or the service returned no usable match
    #[error("No match: {0}")]
    EmptyMatchResult(String),

    /// Response belonged to a request that a newer one superseded
    #[error("Response superseded by a newer request")]
    StaleResponse,

    /// A coordinator operation failed; the session kept its last good page
    #[error("Failed to fetch dogs: {0}")]
    SearchFailed(#[source] Box<PawError>),

    /// The dog fetch did not return every id of the page
    #[error("Dog records missing from catalog response: {}", .missing.join(", "))]
    IncompleteHydration { missing: Vec<String> },

    /// Rejected filter, sort or page size input
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PawError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NetworkFailure error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Creates a ServiceError error
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::ServiceError {
            status,
            message: message.into(),
        }
    }

    /// Creates an EmptyMatchResult error
    pub fn empty_match(message: impl Into<String>) -> Self {
        Self::EmptyMatchResult(message.into())
    }

    /// Creates an InvalidFilter error
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter(message.into())
    }

    /// Creates a NotAuthenticated error
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::NotAuthenticated(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wraps a failure of a coordinator operation.
    pub fn search_failed(cause: PawError) -> Self {
        Self::SearchFailed(Box::new(cause))
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }

    /// Check if this is a non-2xx service answer
    pub fn is_service(&self) -> bool {
        matches!(self, Self::ServiceError { .. })
    }

    /// Check if this is an EmptyMatchResult error
    pub fn is_empty_match(&self) -> bool {
        matches!(self, Self::EmptyMatchResult(_))
    }

    /// Check if this is a StaleResponse error
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResponse)
    }

    /// Check if the session needs a (re-)login.
    ///
    /// Looks through `SearchFailed` so callers can react to the root cause.
    pub fn is_not_authenticated(&self) -> bool {
        match self {
            Self::NotAuthenticated(_) => true,
            Self::SearchFailed(cause) => cause.is_not_authenticated(),
            _ => false,
        }
    }

    /// Stale responses are discarded without telling the user.
    pub fn is_silent(&self) -> bool {
        self.is_stale()
    }

    /// Short message suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::SearchFailed(_) => "Failed to fetch dogs. Please try again later.".to_string(),
            Self::NetworkFailure { .. } | Self::ServiceError { .. } => {
                "The catalog service is unavailable. Please try again later.".to_string()
            }
            Self::NotAuthenticated(_) => "Please log in first.".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for PawError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::UNAUTHORIZED => {
                Self::NotAuthenticated(err.to_string())
            }
            Some(status) => Self::ServiceError {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            },
            None => Self::NetworkFailure {
                message: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for PawError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PawError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PawError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PawError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PawError>`.
pub type Result<T> = std::result::Result<T, PawError>;
