//! Catalog search: filters, sort orders, page requests and page results.
//!
//! These are plain values. The state that ties them together across repeated
//! queries lives in the application layer's search coordinator.

pub mod model;

pub use model::{
    Cursor, DEFAULT_PAGE_SIZE, FilterState, PAGE_SIZE_OPTIONS, PageRequest, PageResult,
    PaginationInfo, SortDirection, SortField, SortOrder,
};
