//! Catalog service trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dog::{Dog, DogId};
use crate::error::Result;
use crate::location::Location;
use crate::search::{PageRequest, PageResult};

/// Body of a `POST /dogs/match` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match", default)]
    pub matched: Option<DogId>,
}

/// The remote dog catalog.
///
/// Search, ranking and matching all happen on the service side; implementors
/// only move requests and responses.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns every breed name the catalog knows, in service order.
    async fn list_breeds(&self) -> Result<Vec<String>>;

    /// Runs one page query.
    async fn search_dogs(&self, request: &PageRequest) -> Result<PageResult>;

    /// Fetches dog records by id.
    ///
    /// The returned order is not guaranteed to follow `ids`.
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>>;

    /// Fetches location records for zip codes.
    async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>>;

    /// Asks the service to pick one dog among `ids`.
    async fn compute_match(&self, ids: &[DogId]) -> Result<MatchResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_response_tolerates_missing_match() {
        let found: MatchResponse = serde_json::from_str(r#"{"match":"B"}"#).unwrap();
        assert_eq!(found.matched, Some(DogId::from("B")));

        let empty: MatchResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.matched.is_none());
    }
}
