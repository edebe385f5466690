//! Base repository contract.
//!
//! [`BaseRepository`] is what every storage backend provides. [`Model`]
//! describes how a record type is created and patched, and [`RecordFilter`]
//! is the per-domain predicate behind `find`'s free-text filter.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepositoryResult;
use crate::query::{FindInput, FindOutput};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A record type a repository can store.
pub trait Model: Clone + Send + Sync + 'static {
    /// Partial record accepted by `create`. May carry its own identifier.
    type Draft: Send + 'static;

    /// Field-by-field replacement accepted by `update`.
    ///
    /// A patch never carries an identifier, so a record's identity is fixed
    /// once it is created.
    type Patch: Send + 'static;

    /// Unique identifier
    fn id(&self) -> Uuid;

    /// Identifier supplied by the caller, if any
    fn draft_id(draft: &Self::Draft) -> Option<Uuid>;

    /// Build the stored record from a draft and its final identifier
    fn from_draft(id: Uuid, draft: Self::Draft) -> Self;

    /// Overwrite every field present in `patch`, keep the rest
    fn merge(&mut self, patch: Self::Patch);
}

/// Free-text filter predicate supplied by each domain repository.
///
/// Only called with a non-empty filter; an absent or empty filter skips the
/// filter stage entirely.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait RecordFilter<M: Send + Sync + 'static>: Send + Sync {
    /// Whether `model` matches `filter`
    fn matches(&self, model: &M, filter: &str) -> bool;
}

/// Storage contract shared by every backend.
#[async_trait]
pub trait BaseRepository<M: Model>: Send + Sync {
    /// Store a new record, generating an identifier when the draft has none
    async fn create(&self, draft: M::Draft) -> M;

    /// Merge `patch` into an existing record
    async fn update(&self, id: Uuid, patch: M::Patch) -> RepositoryResult<M>;

    /// Remove a record permanently
    async fn delete(&self, id: Uuid) -> RepositoryResult<bool>;

    /// Find a record by identifier, failing when it does not exist
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<M>;

    /// Filter, sort and paginate the stored records
    async fn find(&self, input: FindInput) -> FindOutput<M>;
}
