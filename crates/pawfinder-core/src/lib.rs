pub mod auth;
pub mod catalog;
pub mod config;
pub mod dog;
pub mod error;
pub mod favorites;
pub mod location;
pub mod search;

// Re-export common error type
pub use error::PawError;

pub use auth::{AuthGateway, AuthSession, Credentials};
pub use catalog::{CatalogService, MatchResponse};
pub use dog::{Dog, DogId};
pub use favorites::FavoriteSet;
pub use location::Location;
