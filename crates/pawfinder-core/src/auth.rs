//! Identity for a browsing session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PawError, Result};

/// Login form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        if name.is_empty() {
            return Err(PawError::not_authenticated("a name is required to log in"));
        }
        if !email.contains('@') {
            return Err(PawError::not_authenticated(format!("'{email}' is not an email address")));
        }
        Ok(Self { name, email })
    }
}

/// The identity held while logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub name: String,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Login and logout against the catalog service.
///
/// A successful login leaves a session cookie in the implementor's HTTP
/// client; later catalog calls ride on it.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    async fn logout(&self) -> Result<()>;
}
