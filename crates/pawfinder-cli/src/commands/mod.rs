pub mod breeds;
pub mod config;
pub mod matching;
pub mod search;
