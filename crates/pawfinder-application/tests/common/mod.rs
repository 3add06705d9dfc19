#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use pawfinder_core::error::{PawError, Result};
use pawfinder_core::search::{PageRequest, PageResult, SortDirection, SortField};
use pawfinder_core::{CatalogService, Dog, DogId, Location, MatchResponse};

const BREEDS: [&str; 4] = ["Akita", "Beagle", "Corgi", "Dachshund"];
const NAMES: [&str; 5] = ["Biscuit", "Luna", "Max", "Pepper", "Rex"];
const ZIPS: [&str; 3] = ["10001", "60601", "94105"];

pub fn dog(index: usize) -> Dog {
    Dog {
        id: DogId::new(format!("dog-{index:03}")),
        name: NAMES[index % NAMES.len()].to_string(),
        breed: BREEDS[index % BREEDS.len()].to_string(),
        age_years: (index % 15) as u32,
        zip_code: ZIPS[index % ZIPS.len()].to_string(),
        image_url: format!("https://img.example/{index}.jpg"),
    }
}

pub fn dogs(count: usize) -> Vec<Dog> {
    (0..count).map(dog).collect()
}

#[derive(Default)]
struct Calls {
    searches: Vec<PageRequest>,
    dog_fetches: Vec<Vec<DogId>>,
    location_fetches: Vec<Vec<String>>,
    breed_lists: usize,
    matches: Vec<Vec<DogId>>,
}

#[derive(Default)]
struct Script {
    next_search_result: Option<PageResult>,
    next_search_gate: Option<Arc<Notify>>,
    next_search_error: Option<PawError>,
    drop_from_fetch: Option<DogId>,
    match_answer: Option<DogId>,
    next_location_gate: Option<Arc<Notify>>,
}

/// In-memory catalog with offset cursors (`from=<offset>`), scripted
/// overrides and gates for holding a search in flight.
pub struct MockCatalog {
    dogs: Vec<Dog>,
    calls: Mutex<Calls>,
    script: Mutex<Script>,
}

impl MockCatalog {
    pub fn new(dogs: Vec<Dog>) -> Arc<Self> {
        Arc::new(Self {
            dogs,
            calls: Mutex::new(Calls::default()),
            script: Mutex::new(Script::default()),
        })
    }

    /// Makes the next search return `result` verbatim.
    pub fn script_next_search(&self, result: PageResult) {
        self.script.lock().unwrap().next_search_result = Some(result);
    }

    /// Holds the next search until the returned gate is notified.
    pub fn gate_next_search(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script.lock().unwrap().next_search_gate = Some(gate.clone());
        gate
    }

    /// Holds the next location fetch until the returned gate is notified.
    pub fn gate_next_location_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script.lock().unwrap().next_location_gate = Some(gate.clone());
        gate
    }

    pub fn fail_next_search(&self, error: PawError) {
        self.script.lock().unwrap().next_search_error = Some(error);
    }

    /// Leaves `id` out of every dog fetch.
    pub fn drop_from_fetch(&self, id: DogId) {
        self.script.lock().unwrap().drop_from_fetch = Some(id);
    }

    pub fn answer_match(&self, id: DogId) {
        self.script.lock().unwrap().match_answer = Some(id);
    }

    pub fn searches(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().searches.clone()
    }

    pub fn last_search(&self) -> PageRequest {
        self.searches().last().cloned().expect("no search issued")
    }

    pub fn dog_fetch_count(&self) -> usize {
        self.calls.lock().unwrap().dog_fetches.len()
    }

    pub fn location_fetches(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().location_fetches.clone()
    }

    pub fn breed_list_count(&self) -> usize {
        self.calls.lock().unwrap().breed_lists
    }

    pub fn match_requests(&self) -> Vec<Vec<DogId>> {
        self.calls.lock().unwrap().matches.clone()
    }

    fn matches_filters(dog: &Dog, request: &PageRequest) -> bool {
        let filters = &request.filters;
        (filters.breeds.is_empty() || filters.breeds.contains(&dog.breed))
            && (filters.zip_codes.is_empty() || filters.zip_codes.contains(&dog.zip_code))
            && filters.age_min.is_none_or(|min| dog.age_years >= min)
            && filters.age_max.is_none_or(|max| dog.age_years <= max)
    }

    fn compute_page(&self, request: &PageRequest) -> Result<PageResult> {
        let mut hits: Vec<&Dog> = self
            .dogs
            .iter()
            .filter(|dog| Self::matches_filters(dog, request))
            .collect();

        let sort = request.filters.sort;
        hits.sort_by(|a, b| {
            let ordering = match sort.field {
                SortField::Breed => a.breed.cmp(&b.breed),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Age => a.age_years.cmp(&b.age_years),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });
        if sort.direction == SortDirection::Desc {
            hits.reverse();
        }

        let from = match &request.cursor {
            Some(cursor) => cursor
                .as_str()
                .parse::<usize>()
                .map_err(|_| PawError::service(400, format!("bad cursor {}", cursor.as_str())))?,
            None => 0,
        };
        let size = request.page_size as usize;
        let end = (from + size).min(hits.len());
        let page: Vec<DogId> = hits
            .get(from..end)
            .unwrap_or_default()
            .iter()
            .map(|dog| dog.id.clone())
            .collect();

        let link = |offset: usize| format!("/dogs/search?size={size}&from={offset}&sort={sort}");
        Ok(PageResult {
            result_ids: page,
            total_matches: hits.len() as u64,
            next_cursor: (from + size < hits.len()).then(|| link(from + size)),
            prev_cursor: (from > 0).then(|| link(from.saturating_sub(size))),
        })
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn list_breeds(&self) -> Result<Vec<String>> {
        self.calls.lock().unwrap().breed_lists += 1;
        Ok(BREEDS.iter().map(|b| b.to_string()).collect())
    }

    async fn search_dogs(&self, request: &PageRequest) -> Result<PageResult> {
        self.calls.lock().unwrap().searches.push(request.clone());
        let (scripted, gate, error) = {
            let mut script = self.script.lock().unwrap();
            (
                script.next_search_result.take(),
                script.next_search_gate.take(),
                script.next_search_error.take(),
            )
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = error {
            return Err(error);
        }
        match scripted {
            Some(result) => Ok(result),
            None => self.compute_page(request),
        }
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>> {
        self.calls.lock().unwrap().dog_fetches.push(ids.to_vec());
        let dropped = self.script.lock().unwrap().drop_from_fetch.clone();
        // Reverse order: callers must not rely on positions.
        Ok(ids
            .iter()
            .rev()
            .filter(|id| dropped.as_ref() != Some(*id))
            .filter_map(|id| self.dogs.iter().find(|dog| &dog.id == id).cloned())
            .collect())
    }

    async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>> {
        self.calls.lock().unwrap().location_fetches.push(zip_codes.to_vec());
        let gate = self.script.lock().unwrap().next_location_gate.take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(zip_codes
            .iter()
            .map(|zip| Location {
                zip_code: zip.clone(),
                latitude: 0.0,
                longitude: 0.0,
                city: format!("City {zip}"),
                state: "ZZ".to_string(),
                county: "County".to_string(),
            })
            .collect())
    }

    async fn compute_match(&self, ids: &[DogId]) -> Result<MatchResponse> {
        self.calls.lock().unwrap().matches.push(ids.to_vec());
        let answer = self.script.lock().unwrap().match_answer.clone();
        Ok(MatchResponse {
            matched: answer.or_else(|| ids.first().cloned()),
        })
    }
}
