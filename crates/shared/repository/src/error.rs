//! Repository errors.
//!
//! The only failure a repository raises is a missing record. Callers map it
//! to their own error types; it is never transient, so nothing retries it.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No stored record has the given identifier
    #[error("Model not found using ID {0}")]
    NotFound(Uuid),
}

impl RepositoryError {
    /// Identifier the failed operation was called with
    pub fn id(&self) -> Uuid {
        match self {
            RepositoryError::NotFound(id) => *id,
        }
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
