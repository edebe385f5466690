//! User repository - in-memory implementation on the base query engine.

use async_trait::async_trait;
use uuid::Uuid;

use domain::{NewUser, User, UserPatch};
use repository::{
    BaseRepository, FieldValue, FindInput, FindOutput, InMemoryRepository, RecordFilter,
    RepositoryResult, SortableFields,
};

/// Sortable field: display name
pub const FIELD_NAME: &str = "name";

/// Sortable field: email address
pub const FIELD_EMAIL: &str = "email";

/// Sortable field: creation timestamp
pub const FIELD_CREATED_AT: &str = "created_at";

/// Sortable field: last update timestamp
pub const FIELD_UPDATED_AT: &str = "updated_at";

/// User repository trait for dependency injection.
///
/// Adds the lookups registration needs on top of the base contract. Unlike
/// `find_by_id`, these return `None` for a missing user instead of failing.
#[async_trait]
pub trait UsersRepository: BaseRepository<User> {
    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Find user by exact phone number
    async fn find_by_phone(&self, phone: &str) -> Option<User>;
}

/// Free-text user filter: case-insensitive substring of name or email.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter;

impl RecordFilter<User> for UserFilter {
    fn matches(&self, user: &User, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
    }
}

fn user_name(user: &User) -> FieldValue<'_> {
    FieldValue::Text(&user.name)
}

fn user_email(user: &User) -> FieldValue<'_> {
    FieldValue::Text(&user.email)
}

fn user_created_at(user: &User) -> FieldValue<'_> {
    user.created_at.into()
}

fn user_updated_at(user: &User) -> FieldValue<'_> {
    user.updated_at.into()
}

/// Fields `find` may sort users by
pub fn user_sortable_fields() -> SortableFields<User> {
    SortableFields::new()
        .field(FIELD_NAME, user_name)
        .field(FIELD_EMAIL, user_email)
        .field(FIELD_CREATED_AT, user_created_at)
        .field(FIELD_UPDATED_AT, user_updated_at)
}

/// In-memory implementation of [`UsersRepository`].
pub struct InMemoryUsersRepository {
    store: InMemoryRepository<User, UserFilter>,
}

impl InMemoryUsersRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Create a repository holding `users` in the given order
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            store: InMemoryRepository::with_items(UserFilter, user_sortable_fields(), users),
        }
    }

    /// Snapshot of every stored user, in insertion order
    pub async fn users(&self) -> Vec<User> {
        self.store.items().await
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User> for InMemoryUsersRepository {
    async fn create(&self, draft: NewUser) -> User {
        self.store.create(draft).await
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> RepositoryResult<User> {
        self.store.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.store.delete(id).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.store.find_by_id(id).await
    }

    async fn find(&self, input: FindInput) -> FindOutput<User> {
        self.store.find(input).await
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.store.find_first(|user| user.email == email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Option<User> {
        self.store
            .find_first(|user| user.phone.as_deref() == Some(phone))
            .await
    }
}

// Mock users repository for use case tests
#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub UserStore {}

    #[async_trait]
    impl BaseRepository<User> for UserStore {
        async fn create(&self, draft: NewUser) -> User;
        async fn update(&self, id: Uuid, patch: UserPatch) -> RepositoryResult<User>;
        async fn delete(&self, id: Uuid) -> RepositoryResult<bool>;
        async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User>;
        async fn find(&self, input: FindInput) -> FindOutput<User>;
    }

    #[async_trait]
    impl UsersRepository for UserStore {
        async fn find_by_email(&self, email: &str) -> Option<User>;
        async fn find_by_phone(&self, phone: &str) -> Option<User>;
    }
}
