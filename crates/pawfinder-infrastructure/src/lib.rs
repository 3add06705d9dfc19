pub mod config_service;
pub mod http_catalog_client;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_catalog_client::HttpCatalogClient;
pub use crate::paths::PawPaths;
