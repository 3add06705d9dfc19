//! Wiring of the application services for one CLI process.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use pawfinder_application::{
    AuthService, FavoritesStore, LocationCache, MatchService, SearchCoordinator, SearchSession,
};
use pawfinder_core::config::AppConfig;
use pawfinder_core::{CatalogService, Dog, Location, PawError};
use pawfinder_infrastructure::HttpCatalogClient;

/// Every service the commands need, sharing one HTTP client (and so one
/// session cookie).
pub struct App {
    pub catalog: Arc<dyn CatalogService>,
    pub auth: AuthService,
    pub search: SearchCoordinator,
    pub favorites: FavoritesStore,
    pub matcher: MatchService,
    pub locations: Arc<LocationCache>,
}

impl App {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Arc::new(HttpCatalogClient::from_settings(&config.api)?);
        tracing::debug!(base_url = client.base_url(), "catalog client ready");

        let catalog: Arc<dyn CatalogService> = client.clone();
        let locations = Arc::new(LocationCache::new(catalog.clone()));
        let session = SearchSession::from_settings(&config.search)?;

        Ok(Self {
            auth: AuthService::new(client),
            search: SearchCoordinator::new(catalog.clone(), locations.clone(), session),
            favorites: FavoritesStore::new(),
            matcher: MatchService::new(catalog.clone(), locations.clone()),
            locations,
            catalog,
        })
    }

    /// Drops the local identity when the service no longer accepts the
    /// session cookie.
    pub async fn note_error(&self, error: &PawError) {
        if error.is_not_authenticated() {
            self.auth.invalidate().await;
        }
    }
}

/// Locations already cached for `dogs`, keyed by zip code. Never goes to the
/// network: missing entries are filled in by the background prefetch.
pub async fn cached_locations<'a, I>(cache: &LocationCache, dogs: I) -> HashMap<String, Location>
where
    I: IntoIterator<Item = &'a Dog>,
{
    let mut locations = HashMap::new();
    for dog in dogs {
        if locations.contains_key(&dog.zip_code) {
            continue;
        }
        if let Some(location) = cache.get(&dog.zip_code).await {
            locations.insert(dog.zip_code.clone(), location);
        }
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pawfinder_core::error::Result as PawResult;
    use pawfinder_core::search::{PageRequest, PageResult};
    use pawfinder_core::{DogId, MatchResponse};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingCatalog {
        location_fetches: Mutex<usize>,
    }

    #[async_trait]
    impl CatalogService for CountingCatalog {
        async fn list_breeds(&self) -> PawResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn search_dogs(&self, _request: &PageRequest) -> PawResult<PageResult> {
            Ok(PageResult::default())
        }

        async fn fetch_dogs(&self, _ids: &[DogId]) -> PawResult<Vec<Dog>> {
            Ok(Vec::new())
        }

        async fn fetch_locations(&self, zip_codes: &[String]) -> PawResult<Vec<Location>> {
            *self.location_fetches.lock().unwrap() += 1;
            Ok(zip_codes
                .iter()
                .map(|zip| Location {
                    zip_code: zip.clone(),
                    latitude: 0.0,
                    longitude: 0.0,
                    city: "Springfield".to_string(),
                    state: "IL".to_string(),
                    county: "Sangamon".to_string(),
                })
                .collect())
        }

        async fn compute_match(&self, _ids: &[DogId]) -> PawResult<MatchResponse> {
            Ok(MatchResponse { matched: None })
        }
    }

    fn dog(id: &str, zip: &str) -> Dog {
        Dog {
            id: DogId::from(id),
            name: "Rex".to_string(),
            breed: "Akita".to_string(),
            age_years: 3,
            zip_code: zip.to_string(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn cached_locations_never_fetch() {
        let catalog = Arc::new(CountingCatalog::default());
        let cache = LocationCache::new(catalog.clone());
        cache.ensure(&["62701".to_string()]).await.unwrap();

        let dogs = [dog("a", "62701"), dog("b", "10001"), dog("c", "62701")];
        let locations = cached_locations(&cache, &dogs).await;

        assert_eq!(locations.len(), 1);
        assert_eq!(locations["62701"].city, "Springfield");
        assert_eq!(*catalog.location_fetches.lock().unwrap(), 1);
    }
}
