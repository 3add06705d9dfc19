use std::collections::{BTreeSet, HashMap};

use pawfinder_core::config::SearchSettings;
use pawfinder_core::error::{PawError, Result};
use pawfinder_core::search::{
    DEFAULT_PAGE_SIZE, FilterState, PageRequest, PageResult, PaginationInfo, SortOrder,
};
use pawfinder_core::{Dog, DogId};

/// Where the coordinator stands with respect to its last operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No operation has completed yet
    #[default]
    Idle,
    /// A request is in flight
    Searching,
    /// A page is committed and on screen
    Ready { page: u32 },
    /// The last operation failed; the previous page (if any) is still held
    Failed { message: String },
}

/// A page result together with its hydrated dog records.
///
/// Can only be built by [`LoadedPage::hydrate`], which guarantees that
/// `dogs[i].id == result.result_ids[i]` for every `i`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoadedPage {
    result: PageResult,
    dogs: Vec<Dog>,
}

impl LoadedPage {
    /// A page with no hits; nothing to hydrate.
    pub(crate) fn empty(result: PageResult) -> Self {
        debug_assert!(result.result_ids.is_empty());
        Self {
            result,
            dogs: Vec::new(),
        }
    }

    /// Orders `fetched` after `result.result_ids`.
    ///
    /// The catalog does not promise any order for fetched records, so they
    /// are matched by id. Every id must be present.
    pub(crate) fn hydrate(result: PageResult, fetched: Vec<Dog>) -> Result<Self> {
        let by_id: HashMap<DogId, Dog> = fetched
            .into_iter()
            .map(|dog| (dog.id.clone(), dog))
            .collect();

        let mut dogs = Vec::with_capacity(result.result_ids.len());
        let mut missing = Vec::new();
        for id in &result.result_ids {
            match by_id.get(id) {
                Some(dog) => dogs.push(dog.clone()),
                None => missing.push(id.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(PawError::IncompleteHydration { missing });
        }
        Ok(Self { result, dogs })
    }

    /// Distinct zip codes of the page's dogs, sorted.
    pub(crate) fn zip_codes(&self) -> Vec<String> {
        self.dogs
            .iter()
            .map(|dog| dog.zip_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// State owned by a search coordinator for one browsing session.
///
/// Presentation code reads it through the accessors; every mutation goes
/// through the coordinator's operations.
#[derive(Debug, Clone)]
pub struct SearchSession {
    last_applied_filters: FilterState,
    page_size: u32,
    intended_filters: FilterState,
    intended_page_size: u32,
    last_page_request: Option<PageRequest>,
    last_page_result: Option<PageResult>,
    current_page: u32,
    resolved_dogs: Vec<Dog>,
    has_searched_once: bool,
    status: SearchStatus,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            last_applied_filters: FilterState::default(),
            page_size: DEFAULT_PAGE_SIZE,
            intended_filters: FilterState::default(),
            intended_page_size: DEFAULT_PAGE_SIZE,
            last_page_request: None,
            last_page_result: None,
            current_page: 1,
            resolved_dogs: Vec::new(),
            has_searched_once: false,
            status: SearchStatus::Idle,
            generation: 0,
        }
    }
}

impl SearchSession {
    /// An empty session starting from the given page size and sort order.
    pub fn new(page_size: u32, sort: SortOrder) -> Result<Self> {
        if page_size == 0 {
            return Err(PawError::invalid_filter("page size must be greater than zero"));
        }
        let filters = FilterState::default().with_sort(sort);
        Ok(Self {
            last_applied_filters: filters.clone(),
            page_size,
            intended_filters: filters,
            intended_page_size: page_size,
            ..Self::default()
        })
    }

    pub fn from_settings(settings: &SearchSettings) -> Result<Self> {
        Self::new(settings.page_size, settings.sort_order()?)
    }

    /// A session that knows which page to show but has not fetched it yet,
    /// e.g. a query handed over from another view. The coordinator's
    /// `resume` replays it.
    pub fn seeded(request: PageRequest, current_page: u32) -> Self {
        Self {
            last_applied_filters: request.filters.clone(),
            page_size: request.page_size,
            intended_filters: request.filters.clone(),
            intended_page_size: request.page_size,
            last_page_request: Some(request),
            current_page: current_page.max(1),
            ..Self::default()
        }
    }

    /// Filters of the page on screen.
    pub fn filters(&self) -> &FilterState {
        &self.last_applied_filters
    }

    /// Filters, sort order included, the user asked for last. Ahead of
    /// [`filters`](Self::filters) while a request is in flight or after it
    /// failed; every new first-page request is built from these.
    pub fn intended_filters(&self) -> &FilterState {
        &self.intended_filters
    }

    pub fn intended_page_size(&self) -> u32 {
        self.intended_page_size
    }

    pub fn sort_order(&self) -> SortOrder {
        self.last_applied_filters.sort
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn last_page_request(&self) -> Option<&PageRequest> {
        self.last_page_request.as_ref()
    }

    pub fn last_page_result(&self) -> Option<&PageResult> {
        self.last_page_result.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn resolved_dogs(&self) -> &[Dog] {
        &self.resolved_dogs
    }

    pub fn has_searched_once(&self) -> bool {
        self.has_searched_once
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Pagination figures derived from the last result and the current page size.
    pub fn pagination(&self) -> Option<PaginationInfo> {
        self.last_page_result
            .as_ref()
            .map(|result| PaginationInfo::derive(result, self.page_size, self.current_page))
    }

    /// Whether a stored request exists but its results are not held.
    pub(crate) fn needs_rehydration(&self) -> bool {
        self.last_page_request.is_some()
            && (!self.has_searched_once || self.last_page_result.is_none())
    }

    /// Validates a first-page query and records it as the user's current
    /// choice. Nothing is recorded when validation fails.
    pub(crate) fn intend(&mut self, filters: FilterState, page_size: u32) -> Result<PageRequest> {
        let request = PageRequest::first_page(filters, page_size)?;
        self.intended_filters = request.filters.clone();
        self.intended_page_size = request.page_size;
        Ok(request)
    }

    /// Stamps a new request; returns its generation token.
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = SearchStatus::Searching;
        self.generation
    }

    pub(crate) fn is_current(&self, token: u64) -> bool {
        self.generation == token
    }

    /// Replaces the page atomically and records the request that produced it.
    ///
    /// The intended filters are left alone: a newer choice may already be
    /// waiting behind this page.
    pub(crate) fn commit(&mut self, request: PageRequest, page: LoadedPage, page_number: u32) {
        let page_number = page_number.max(1);
        self.last_applied_filters = request.filters.clone();
        self.page_size = request.page_size;
        self.last_page_request = Some(request);
        self.last_page_result = Some(page.result);
        self.resolved_dogs = page.dogs;
        self.current_page = page_number;
        self.has_searched_once = true;
        self.status = SearchStatus::Ready { page: page_number };
    }

    /// Records a failure without touching the held page.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = SearchStatus::Failed {
            message: message.into(),
        };
    }

    /// Drops the held page (result and dogs together) but keeps the request.
    pub(crate) fn release_page(&mut self) {
        self.last_page_result = None;
        self.resolved_dogs.clear();
        self.status = SearchStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfinder_core::search::{SortDirection, SortField};

    fn dog(id: &str, zip: &str) -> Dog {
        Dog {
            id: DogId::from(id),
            name: id.to_uppercase(),
            breed: "Akita".to_string(),
            age_years: 4,
            zip_code: zip.to_string(),
            image_url: String::new(),
        }
    }

    fn result(ids: &[&str]) -> PageResult {
        PageResult {
            result_ids: ids.iter().map(|id| DogId::from(*id)).collect(),
            total_matches: ids.len() as u64,
            next_cursor: None,
            prev_cursor: None,
        }
    }

    #[test]
    fn hydrate_follows_result_order() {
        let page = LoadedPage::hydrate(
            result(&["b", "c", "a"]),
            vec![dog("a", "1"), dog("b", "2"), dog("c", "1")],
        )
        .unwrap();
        let ids: Vec<&str> = page.dogs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(page.zip_codes(), vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn hydrate_reports_missing_records() {
        let err = LoadedPage::hydrate(result(&["a", "b"]), vec![dog("a", "1")]).unwrap_err();
        match err {
            PawError::IncompleteHydration { missing } => assert_eq!(missing, vec!["b"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn commit_replaces_page_and_marks_searched() {
        let mut session = SearchSession::default();
        assert_eq!(session.status(), &SearchStatus::Idle);
        let token = session.begin();
        assert!(session.is_current(token));
        assert_eq!(session.status(), &SearchStatus::Searching);

        let request = PageRequest::first_page(FilterState::default(), 24).unwrap();
        let page = LoadedPage::hydrate(result(&["a"]), vec![dog("a", "1")]).unwrap();
        session.commit(request, page, 1);

        assert!(session.has_searched_once());
        assert_eq!(session.resolved_dogs().len(), 1);
        assert_eq!(session.status(), &SearchStatus::Ready { page: 1 });
        assert!(!session.needs_rehydration());
    }

    #[test]
    fn newer_token_supersedes_older() {
        let mut session = SearchSession::default();
        let first = session.begin();
        let second = session.begin();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn release_keeps_request_for_rehydration() {
        let mut session = SearchSession::default();
        let request = PageRequest::first_page(FilterState::default(), 24).unwrap();
        session.commit(request, LoadedPage::empty(result(&[])), 3);
        session.release_page();

        assert!(session.last_page_result().is_none());
        assert!(session.resolved_dogs().is_empty());
        assert!(session.has_searched_once());
        assert_eq!(session.current_page(), 3);
        assert!(session.needs_rehydration());
    }

    #[test]
    fn intent_runs_ahead_of_committed_page() {
        let mut session = SearchSession::default();
        let akita = FilterState::new(["Akita"], None, None, SortOrder::default()).unwrap();
        let request = session.intend(akita.clone(), 48).unwrap();

        assert_eq!(request.filters, akita);
        assert_eq!(session.intended_filters(), &akita);
        assert_eq!(session.intended_page_size(), 48);
        assert!(session.filters().breeds.is_empty());
        assert_eq!(session.page_size(), 24);

        assert!(session.intend(akita, 0).is_err());
        assert_eq!(session.intended_page_size(), 48);
    }

    #[test]
    fn new_session_uses_given_sort_and_size() {
        let sort = SortOrder::new(SortField::Age, SortDirection::Desc);
        let session = SearchSession::new(48, sort).unwrap();
        assert_eq!(session.page_size(), 48);
        assert_eq!(session.sort_order(), sort);
        assert_eq!(session.intended_filters().sort, sort);
        assert_eq!(session.intended_page_size(), 48);
        assert!(session.pagination().is_none());
        assert!(SearchSession::new(0, sort).is_err());
    }
}
