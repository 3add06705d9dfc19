//! Search session coordination.
//!
//! This module keeps filters, sort order, page size and the service's opaque
//! pagination cursors consistent across repeated queries.

mod coordinator;
mod cursor;
mod session;

pub use coordinator::{PageDirection, SearchCoordinator, SearchOutcome};
pub use session::{SearchSession, SearchStatus};
