//! HttpCatalogClient - REST implementation of the dog catalog service.
//!
//! Authentication is cookie based: `POST /auth/login` sets a session cookie
//! that the client's cookie store replays on every later call.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

use pawfinder_core::config::ApiSettings;
use pawfinder_core::error::{PawError, Result};
use pawfinder_core::search::{PageRequest, PageResult};
use pawfinder_core::{AuthGateway, CatalogService, Credentials, Dog, DogId, Location, MatchResponse};

/// Catalog client talking to the remote service over HTTPS.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
    email: &'a str,
}

impl HttpCatalogClient {
    /// Creates a client with its own cookie store.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| PawError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns non-2xx answers into errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            PawError::network(format!("{} request failed: {}", what, e))
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PawError::not_authenticated(format!(
                "{} rejected the session (401)",
                what
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PawError::service(status.as_u16(), format!("{}: {}", what, error_text)));
        }

        Ok(response)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn list_breeds(&self) -> Result<Vec<String>> {
        tracing::debug!("GET /dogs/breeds");
        let response = self
            .send(self.client.get(self.url("/dogs/breeds")), "list breeds")
            .await?;
        Ok(response.json::<Vec<String>>().await?)
    }

    async fn search_dogs(&self, request: &PageRequest) -> Result<PageResult> {
        let pairs = request.query_pairs();
        tracing::debug!(query = ?pairs, "GET /dogs/search");
        let response = self
            .send(
                self.client.get(self.url("/dogs/search")).query(&pairs),
                "search dogs",
            )
            .await?;
        Ok(response.json::<PageResult>().await?)
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>> {
        tracing::debug!(count = ids.len(), "POST /dogs");
        let response = self
            .send(self.client.post(self.url("/dogs")).json(ids), "fetch dogs")
            .await?;
        Ok(response.json::<Vec<Dog>>().await?)
    }

    async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>> {
        tracing::debug!(count = zip_codes.len(), "POST /locations");
        let response = self
            .send(
                self.client.post(self.url("/locations")).json(zip_codes),
                "fetch locations",
            )
            .await?;
        // Unknown zip codes come back as `null` entries.
        let locations = response.json::<Vec<Option<Location>>>().await?;
        Ok(locations.into_iter().flatten().collect())
    }

    async fn compute_match(&self, ids: &[DogId]) -> Result<MatchResponse> {
        tracing::debug!(count = ids.len(), "POST /dogs/match");
        let response = self
            .send(self.client.post(self.url("/dogs/match")).json(ids), "match")
            .await?;
        Ok(response.json::<MatchResponse>().await?)
    }
}

#[async_trait]
impl AuthGateway for HttpCatalogClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        tracing::debug!(name = %credentials.name, "POST /auth/login");
        let body = LoginRequest {
            name: &credentials.name,
            email: &credentials.email,
        };
        self.send(self.client.post(self.url("/auth/login")).json(&body), "login")
            .await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        tracing::debug!("POST /auth/logout");
        self.send(self.client.post(self.url("/auth/logout")), "logout")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = HttpCatalogClient::new("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.url("/dogs/breeds"), "http://localhost:9000/dogs/breeds");
    }

    #[test]
    fn builds_from_settings() {
        let client = HttpCatalogClient::from_settings(&ApiSettings::default()).unwrap();
        assert_eq!(client.base_url(), pawfinder_core::config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn login_body_uses_form_field_names() {
        let body = LoginRequest {
            name: "Ada",
            email: "ada@example.com",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"name": "Ada", "email": "ada@example.com"})
        );
    }
}
