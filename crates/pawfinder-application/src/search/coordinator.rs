use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use pawfinder_core::error::{PawError, Result};
use pawfinder_core::search::{
    FilterState, PageRequest, PaginationInfo, SortDirection, SortField, SortOrder,
};
use pawfinder_core::CatalogService;

use super::cursor::decode_cursor;
use super::session::{LoadedPage, SearchSession};
use crate::location_cache::LocationCache;

/// Page navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// What an operation did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A new page was committed
    Committed(PaginationInfo),
    /// A newer operation started before this one finished; its response was dropped
    Superseded,
    /// Nothing to do (no cursor in that direction, or results already held)
    Unchanged,
}

impl SearchOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Turns filter, sort, page-size and paging intents into catalog queries.
///
/// Every operation stamps the session with a new generation token before it
/// goes to the network and commits only if the token is still current when
/// the response arrives. Overlapping operations therefore resolve to the one
/// started last, whatever order the responses come back in.
pub struct SearchCoordinator {
    catalog: Arc<dyn CatalogService>,
    locations: Arc<LocationCache>,
    session: Mutex<SearchSession>,
    breeds: RwLock<Option<Vec<String>>>,
}

impl SearchCoordinator {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        locations: Arc<LocationCache>,
        session: SearchSession,
    ) -> Self {
        Self {
            catalog,
            locations,
            session: Mutex::new(session),
            breeds: RwLock::new(None),
        }
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> SearchSession {
        self.session.lock().await.clone()
    }

    pub fn locations(&self) -> &Arc<LocationCache> {
        &self.locations
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Applies a breed set and age bounds, restarting at page 1.
    ///
    /// The zip code restriction and the sort order the user chose last are
    /// kept, even if the search that carried them is still in flight.
    pub async fn apply_filters<I, S>(
        &self,
        breeds: I,
        age_min: Option<u32>,
        age_max: Option<u32>,
    ) -> Result<SearchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restart(|intended, page_size| {
            let filters = FilterState::new(breeds, age_min, age_max, intended.sort)?
                .with_zip_codes(intended.zip_codes.iter().cloned());
            Ok((filters, page_size))
        })
        .await
    }

    /// Restricts results to the given zip codes (empty lifts the restriction),
    /// restarting at page 1.
    pub async fn restrict_zip_codes<I, S>(&self, zip_codes: I) -> Result<SearchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restart(|intended, page_size| {
            Ok((intended.clone().with_zip_codes(zip_codes), page_size))
        })
        .await
    }

    /// Replaces every filter, sort order included, with one query.
    pub async fn replace_filters(&self, filters: FilterState) -> Result<SearchOutcome> {
        self.restart(|_, page_size| Ok((filters, page_size))).await
    }

    /// Clears every filter but keeps the sort order and page size.
    pub async fn reset_filters(&self) -> Result<SearchOutcome> {
        self.restart(|intended, page_size| {
            Ok((FilterState::default().with_sort(intended.sort), page_size))
        })
        .await
    }

    /// Re-sorts the chosen filters and restarts at page 1.
    pub async fn change_sort_order(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> Result<SearchOutcome> {
        self.restart(|intended, page_size| {
            let filters = intended.clone().with_sort(SortOrder::new(field, direction));
            Ok((filters, page_size))
        })
        .await
    }

    /// Switches page size; cursors are relative to a page size, so paging
    /// restarts at page 1.
    pub async fn change_page_size(&self, page_size: u32) -> Result<SearchOutcome> {
        self.restart(|intended, _| Ok((intended.clone(), page_size)))
            .await
    }

    /// Moves one page forward or back along the service's cursors.
    ///
    /// A no-op when the last result has no cursor in that direction.
    pub async fn change_page(&self, direction: PageDirection) -> Result<SearchOutcome> {
        let (token, request, target_page) = {
            let mut session = self.session.lock().await;
            let (Some(result), Some(base)) = (session.last_page_result(), session.last_page_request())
            else {
                return Ok(SearchOutcome::Unchanged);
            };

            let (raw, target_page) = match direction {
                PageDirection::Next => (result.next_cursor.as_deref(), session.current_page() + 1),
                PageDirection::Prev => (
                    result.prev_cursor.as_deref(),
                    session.current_page().saturating_sub(1).max(1),
                ),
            };
            let Some(raw) = raw else {
                return Ok(SearchOutcome::Unchanged);
            };
            let Some(cursor) = decode_cursor(raw) else {
                tracing::warn!(?direction, raw, "Ignoring unparsable pagination cursor");
                return Ok(SearchOutcome::Unchanged);
            };
            let request = base.at_cursor(cursor);
            (session.begin(), request, target_page)
        };
        self.run(token, request, target_page).await
    }

    /// Restores the page last shown when the search view is entered again.
    ///
    /// Replays the stored request (cursor included) instead of starting over,
    /// so the user lands on the same page. Does nothing when the page is
    /// still held or nothing was ever requested.
    pub async fn resume(&self) -> Result<SearchOutcome> {
        let (token, request, page) = {
            let mut session = self.session.lock().await;
            if !session.needs_rehydration() {
                return Ok(SearchOutcome::Unchanged);
            }
            let Some(request) = session.last_page_request().cloned() else {
                return Ok(SearchOutcome::Unchanged);
            };
            (session.begin(), request, session.current_page())
        };
        tracing::debug!(page, "rehydrating search view");
        self.run(token, request, page).await
    }

    /// Releases the held page when the search view is left.
    ///
    /// The request, page number and filters stay so `resume` can restore them.
    pub async fn suspend(&self) {
        self.session.lock().await.release_page();
    }

    // ============================================================================
    // Breeds
    // ============================================================================

    /// Breed names, fetched once per session.
    pub async fn breeds(&self) -> Result<Vec<String>> {
        if let Some(breeds) = self.breeds.read().await.as_ref() {
            return Ok(breeds.clone());
        }
        let fetched = self.catalog.list_breeds().await?;
        *self.breeds.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// Breed names containing `query`, ignoring case.
    pub async fn breeds_matching(&self, query: &str) -> Result<Vec<String>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .breeds()
            .await?
            .into_iter()
            .filter(|breed| breed.to_lowercase().contains(&needle))
            .collect())
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Records a new first-page query built from the intended filters and
    /// page size, then runs it. Invalid input fails before anything changes.
    async fn restart<F>(&self, build: F) -> Result<SearchOutcome>
    where
        F: FnOnce(&FilterState, u32) -> Result<(FilterState, u32)>,
    {
        let (token, request) = {
            let mut session = self.session.lock().await;
            let (filters, page_size) =
                build(session.intended_filters(), session.intended_page_size())?;
            let request = session.intend(filters, page_size)?;
            (session.begin(), request)
        };
        self.run(token, request, 1).await
    }

    async fn run(&self, token: u64, request: PageRequest, target_page: u32) -> Result<SearchOutcome> {
        tracing::debug!(token, cursor = ?request.cursor, sort = %request.filters.sort, "issuing page request");

        let loaded = self.load_page(&request).await;
        match self.settle(token, request, loaded, target_page).await {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_silent() => {
                tracing::debug!(token, "{}", e);
                Ok(SearchOutcome::Superseded)
            }
            Err(e) => Err(e),
        }
    }

    /// Searches, then hydrates the hits. Empty pages skip the dog fetch.
    async fn load_page(&self, request: &PageRequest) -> Result<LoadedPage> {
        let result = self.catalog.search_dogs(request).await?;
        if result.result_ids.is_empty() {
            return Ok(LoadedPage::empty(result));
        }
        let fetched = self.catalog.fetch_dogs(&result.result_ids).await?;
        LoadedPage::hydrate(result, fetched)
    }

    /// Commits `loaded` if `token` is still current.
    async fn settle(
        &self,
        token: u64,
        request: PageRequest,
        loaded: Result<LoadedPage>,
        target_page: u32,
    ) -> Result<SearchOutcome> {
        let mut session = self.session.lock().await;
        if !session.is_current(token) {
            return Err(PawError::StaleResponse);
        }

        match loaded {
            Ok(page) => {
                let zip_codes = page.zip_codes();
                session.commit(request, page, target_page);
                let info = session
                    .pagination()
                    .ok_or_else(|| PawError::internal("committed page has no result"))?;
                drop(session);

                tracing::info!(
                    page = info.current_page,
                    total_pages = info.total_pages,
                    total = info.total_results,
                    "search page ready"
                );
                if !zip_codes.is_empty() {
                    self.locations.prefetch(zip_codes);
                }
                Ok(SearchOutcome::Committed(info))
            }
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                session.fail(e.user_message());
                Err(PawError::search_failed(e))
            }
        }
    }
}
