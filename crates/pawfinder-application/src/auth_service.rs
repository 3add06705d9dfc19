//! Authentication state for the browsing session.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use pawfinder_core::error::{PawError, Result};
use pawfinder_core::{AuthGateway, AuthSession, Credentials};

/// Tracks who is logged in. Nothing is persisted: a new process starts
/// logged out.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: RwLock<Option<AuthSession>>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            session: RwLock::new(None),
        }
    }

    pub async fn login(&self, name: &str, email: &str) -> Result<AuthSession> {
        let credentials = Credentials::new(name, email)?;
        self.gateway.login(&credentials).await?;

        let session = AuthSession {
            name: credentials.name,
            email: credentials.email,
            logged_in_at: Utc::now(),
        };
        tracing::info!(name = %session.name, "logged in");
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Logs out remotely; the local identity is dropped only if that succeeds.
    pub async fn logout(&self) -> Result<()> {
        self.gateway.logout().await?;
        *self.session.write().await = None;
        tracing::info!("logged out");
        Ok(())
    }

    /// Forgets the local identity, e.g. after the service answered 401.
    pub async fn invalidate(&self) {
        *self.session.write().await = None;
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// The current identity, or `NotAuthenticated`.
    pub async fn require(&self) -> Result<AuthSession> {
        self.current()
            .await
            .ok_or_else(|| PawError::not_authenticated("log in to browse dogs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockGateway {
        logins: Mutex<Vec<Credentials>>,
        fail_logout: bool,
    }

    impl MockGateway {
        fn new(fail_logout: bool) -> Self {
            Self {
                logins: Mutex::new(Vec::new()),
                fail_logout,
            }
        }
    }

    #[async_trait]
    impl AuthGateway for MockGateway {
        async fn login(&self, credentials: &Credentials) -> Result<()> {
            self.logins.lock().unwrap().push(credentials.clone());
            Ok(())
        }

        async fn logout(&self) -> Result<()> {
            if self.fail_logout {
                Err(PawError::network("offline"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn login_then_logout() {
        let gateway = Arc::new(MockGateway::new(false));
        let auth = AuthService::new(gateway.clone());
        assert!(auth.require().await.unwrap_err().is_not_authenticated());

        let session = auth.login("Ada", "ada@example.com").await.unwrap();
        assert_eq!(session.name, "Ada");
        assert!(auth.is_authenticated().await);
        assert_eq!(gateway.logins.lock().unwrap().len(), 1);

        auth.logout().await.unwrap();
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn invalid_credentials_never_reach_the_service() {
        let gateway = Arc::new(MockGateway::new(false));
        let auth = AuthService::new(gateway.clone());
        assert!(auth.login("Ada", "nope").await.is_err());
        assert!(gateway.logins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_logout_keeps_identity() {
        let auth = AuthService::new(Arc::new(MockGateway::new(true)));
        auth.login("Ada", "ada@example.com").await.unwrap();
        assert!(auth.logout().await.is_err());
        assert!(auth.is_authenticated().await);

        auth.invalidate().await;
        assert!(!auth.is_authenticated().await);
    }
}
