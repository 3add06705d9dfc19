pub mod auth_service;
pub mod favorites_store;
pub mod location_cache;
pub mod match_service;
pub mod search;

pub use auth_service::AuthService;
pub use favorites_store::FavoritesStore;
pub use location_cache::LocationCache;
pub use match_service::MatchService;
pub use search::{PageDirection, SearchCoordinator, SearchOutcome, SearchSession, SearchStatus};
