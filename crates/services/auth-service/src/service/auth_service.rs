//! Authentication service - Handles user registration and credential checks.
//!
//! Depends only on the [`UsersRepository`] contract and a [`PasswordHasher`],
//! so both can be swapped for in-memory or mock versions in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{NewUser, PasswordHasher, User, MIN_NAME_LENGTH, MIN_PHONE_LENGTH};
use repository::BaseRepository;
use user_service_lib::UsersRepository;

// Verified against when the email is unknown so both paths pay for a compare.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserInput {
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = MIN_PHONE_LENGTH, message = "Phone is required"))]
    pub phone: String,
}

/// Registration result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserOutput {
    pub user_id: Uuid,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, input: RegisterUserInput) -> AppResult<RegisterUserOutput>;

    /// Check an email/password pair and return the matching user
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService over a users repository.
pub struct Authenticator {
    users: Arc<dyn UsersRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UsersRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegisterUserInput) -> AppResult<RegisterUserOutput> {
        input.validate()?;

        let (same_email, same_phone) = futures::join!(
            self.users.find_by_email(&input.email),
            self.users.find_by_phone(&input.phone),
        );

        if same_email.is_some() || same_phone.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let RegisterUserInput {
            name, email, phone, ..
        } = input;
        let user = self
            .users
            .create(NewUser {
                password_hash: Some(password_hash),
                phone: Some(phone),
                ..NewUser::new(name, email)
            })
            .await;

        info!(user_id = %user.id, "User registered");
        Ok(RegisterUserOutput { user_id: user.id })
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.users.find_by_email(email).await;

        let stored_hash = user
            .as_ref()
            .and_then(|u| u.password_hash.as_deref())
            .unwrap_or(DUMMY_HASH);
        let password_valid = self.hasher.compare(password, stored_hash);

        match user {
            Some(user) if password_valid && user.has_password() => Ok(user),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{DomainError, FakeHasher, MockPasswordHasher};
    use tokio_test::{assert_err, assert_ok};
    use user_service_lib::repository::MockUserStore;
    use user_service_lib::testing::sample_new_user_with;
    use user_service_lib::InMemoryUsersRepository;

    fn input(email: &str, phone: &str) -> RegisterUserInput {
        RegisterUserInput {
            name: "John Doe".to_string(),
            email: email.to_string(),
            password: "12345678".to_string(),
            phone: phone.to_string(),
        }
    }

    fn setup() -> (Arc<InMemoryUsersRepository>, Authenticator) {
        let repo = Arc::new(InMemoryUsersRepository::new());
        let service = Authenticator::new(repo.clone(), Arc::new(FakeHasher));
        (repo, service)
    }

    fn stored_user(email: &str, phone: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            email: email.to_string(),
            password_hash: Some("12345678-hashed".to_string()),
            phone: Some(phone.to_string()),
            extra_data: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_new_user() {
        let (repo, service) = setup();

        let output = assert_ok!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        let stored = assert_ok!(repo.find_by_id(output.user_id).await);
        assert_eq!(stored.email, "johndoe@example.com");
        assert_eq!(stored.phone.as_deref(), Some("15999999999"));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (repo, service) = setup();

        assert_ok!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        let users = repo.users().await;
        assert_eq!(users[0].password_hash.as_deref(), Some("12345678-hashed"));
    }

    #[tokio::test]
    async fn test_register_rejects_same_phone() {
        let (repo, service) = setup();
        assert_ok!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        let err = assert_err!(
            service
                .register(input("johndoe1@example.com", "15999999999"))
                .await
        );

        assert_eq!(err, AppError::Conflict("User".to_string()));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_same_email() {
        let (_repo, service) = setup();
        assert_ok!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        let err = assert_err!(
            service
                .register(input("johndoe@example.com", "15888888888"))
                .await
        );

        assert_eq!(err.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let (repo, service) = setup();

        let err = assert_err!(service.register(input("not-an-email", "1599")).await);
        assert!(matches!(err, AppError::Validation(_)));

        let err = assert_err!(service.register(input("jd@example.com", "")).await);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.user_message().contains("Phone is required"));

        let nameless = RegisterUserInput {
            name: String::new(),
            ..input("jd@example.com", "1599")
        };
        let err = assert_err!(service.register(nameless).await);
        assert!(err.user_message().contains("Name is required"));

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_conflict_skips_hash_and_create() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email == "johndoe@example.com")
            .times(1)
            .returning(|email| Some(stored_user(email, "15999999999")));
        store
            .expect_find_by_phone()
            .times(1)
            .returning(|_| None);
        store.expect_create().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let service = Authenticator::new(Arc::new(store), Arc::new(hasher));
        let err = assert_err!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        assert_eq!(err, AppError::conflict("User"));
    }

    #[tokio::test]
    async fn test_register_surfaces_hasher_failure() {
        let mut store = MockUserStore::new();
        store.expect_find_by_email().returning(|_| None);
        store.expect_find_by_phone().returning(|_| None);
        store.expect_create().never();

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(DomainError::password("Password must be at least 8 characters")));

        let service = Authenticator::new(Arc::new(store), Arc::new(hasher));
        let err = assert_err!(
            service
                .register(input("johndoe@example.com", "15999999999"))
                .await
        );

        assert_eq!(
            err,
            AppError::Validation("Password must be at least 8 characters".to_string())
        );
    }

    #[tokio::test]
    async fn test_authenticate() {
        let (repo, service) = setup();
        repo.create(sample_new_user_with(|u| {
            u.email = "johndoe@example.com".to_string();
        }))
        .await;

        let user = assert_ok!(service.authenticate("johndoe@example.com", "12345678").await);
        assert_eq!(user.email, "johndoe@example.com");

        let err = assert_err!(service.authenticate("johndoe@example.com", "wrong").await);
        assert_eq!(err, AppError::InvalidCredentials);

        let err = assert_err!(service.authenticate("nobody@example.com", "12345678").await);
        assert_eq!(err, AppError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_authenticate_user_without_password() {
        let (repo, service) = setup();
        repo.create(NewUser::new("No Password", "nopass@example.com"))
            .await;

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_compare().times(1).returning(|_, _| false);
        let mocked = Authenticator::new(repo.clone(), Arc::new(hasher));

        assert_err!(service.authenticate("nopass@example.com", "").await);
        assert_err!(mocked.authenticate("nopass@example.com", "x").await);
    }
}
