//! User Service Library
//!
//! User storage for the registry: the [`UsersRepository`] contract and its
//! in-memory implementation on the base query engine.

pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use crate::repository::{InMemoryUsersRepository, UserFilter, UsersRepository};
