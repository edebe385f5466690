//! Domain layer - Core business entities and value objects.
//!
//! This crate contains the user entity, its repository model mapping and the
//! password hashing capability. It has no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Argon2Hasher, Password, PasswordHasher};
pub use user::{NewUser, OnboardingStep, User, UserExtraData, UserPatch};

#[cfg(any(test, feature = "test-utils"))]
pub use password::{FakeHasher, MockPasswordHasher};
