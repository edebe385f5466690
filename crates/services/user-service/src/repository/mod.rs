//! Repository layer for user data access.

mod user_repository;

pub use user_repository::{
    user_sortable_fields, InMemoryUsersRepository, UserFilter, UsersRepository, FIELD_CREATED_AT,
    FIELD_EMAIL, FIELD_NAME, FIELD_UPDATED_AT,
};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserStore;
