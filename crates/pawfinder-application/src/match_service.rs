//! Picking one dog among the user's favorites.

use std::collections::BTreeSet;
use std::sync::Arc;

use pawfinder_core::error::{PawError, Result};
use pawfinder_core::{CatalogService, Dog, FavoriteSet};

use crate::location_cache::LocationCache;

/// Asks the catalog for a match among a favorite set.
pub struct MatchService {
    catalog: Arc<dyn CatalogService>,
    locations: Arc<LocationCache>,
}

impl MatchService {
    pub fn new(catalog: Arc<dyn CatalogService>, locations: Arc<LocationCache>) -> Self {
        Self { catalog, locations }
    }

    /// Returns the matched dog, taken from `favorites` (no re-fetch).
    ///
    /// # Errors
    ///
    /// `EmptyMatchResult` when `favorites` is empty (no request is sent), when
    /// the service picks nobody, or when it picks an id outside the set.
    pub async fn find_match(&self, favorites: &FavoriteSet) -> Result<Dog> {
        if favorites.is_empty() {
            return Err(PawError::empty_match(
                "Please add some dogs to your favorites first",
            ));
        }

        let response = self.catalog.compute_match(&favorites.ids()).await?;
        let Some(id) = response.matched else {
            return Err(PawError::empty_match(
                "No match found. Try adding more dogs to your favorites",
            ));
        };

        let dog = favorites.get(&id).cloned().ok_or_else(|| {
            PawError::empty_match(format!("Matched dog {} not found in favorites", id))
        })?;
        tracing::info!(id = %dog.id, name = %dog.name, "match found");
        Ok(dog)
    }

    /// Warms the location cache for every favorite, in the background.
    pub fn prefetch_locations(&self, favorites: &FavoriteSet) {
        let zip_codes: Vec<String> = favorites
            .iter()
            .map(|dog| dog.zip_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !zip_codes.is_empty() {
            self.locations.prefetch(zip_codes);
        }
    }
}
