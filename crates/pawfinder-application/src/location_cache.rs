//! Read-through cache of zip code locations.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use pawfinder_core::error::Result;
use pawfinder_core::{CatalogService, Location};

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Location>,
    in_flight: HashSet<String>,
}

/// Locations keyed by zip code, fetched from the catalog on demand.
///
/// A zip code that is cached, or already being fetched, is never requested
/// again. Locations are kept for the whole browsing session.
pub struct LocationCache {
    catalog: Arc<dyn CatalogService>,
    state: Mutex<CacheState>,
}

impl LocationCache {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Makes sure the given zip codes are cached.
    ///
    /// Only the misses go out, in a single batch. Returns how many locations
    /// were added. Calling it again with the same input is a no-op.
    pub async fn ensure(&self, zip_codes: &[String]) -> Result<usize> {
        let misses: Vec<String> = {
            let mut state = self.state.lock().await;
            let wanted: BTreeSet<&String> = zip_codes
                .iter()
                .filter(|zip| !zip.trim().is_empty())
                .filter(|zip| !state.entries.contains_key(*zip) && !state.in_flight.contains(*zip))
                .collect();
            let misses: Vec<String> = wanted.into_iter().cloned().collect();
            state.in_flight.extend(misses.iter().cloned());
            misses
        };

        if misses.is_empty() {
            return Ok(0);
        }

        tracing::debug!(count = misses.len(), "fetching locations");
        let fetched = self.catalog.fetch_locations(&misses).await;

        let mut state = self.state.lock().await;
        for zip in &misses {
            state.in_flight.remove(zip);
        }
        let locations = fetched?;
        let added = locations.len();
        for location in locations {
            state.entries.insert(location.zip_code.clone(), location);
        }
        Ok(added)
    }

    /// Runs [`ensure`](Self::ensure) in the background; failures are only logged.
    pub fn prefetch(self: &Arc<Self>, zip_codes: Vec<String>) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = cache.ensure(&zip_codes).await {
                tracing::warn!("Location prefetch failed: {}", e);
            }
        })
    }

    pub async fn get(&self, zip_code: &str) -> Option<Location> {
        self.state.lock().await.entries.get(zip_code).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
