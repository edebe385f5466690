//! Base model repository - storage contract and in-memory query engine.
//!
//! This crate has no internal dependencies. Domain crates implement
//! [`Model`] for their entities and build a repository on top of
//! [`InMemoryRepository`] by supplying:
//! - a [`RecordFilter`] predicate for the free-text filter stage
//! - a [`SortableFields`] accessor map declaring which fields can be sorted
//!
//! `find` always runs filter → sort → paginate, in that order.

pub mod base;
pub mod error;
pub mod field;
pub mod memory;
pub mod query;

pub use base::{BaseRepository, Model, RecordFilter};
pub use error::{RepositoryError, RepositoryResult};
pub use field::{FieldAccessor, FieldValue, SortableFields};
pub use memory::InMemoryRepository;
pub use query::{FindInput, FindOutput, ParseSortDirError, SortDir, DEFAULT_PAGE, DEFAULT_PER_PAGE};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use base::MockRecordFilter;
