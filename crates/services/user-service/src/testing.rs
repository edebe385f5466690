//! Test factory for users.
//!
//! Every call yields a fresh name, email and phone so samples never collide
//! on the lookups registration checks.

use std::sync::atomic::{AtomicU64, Ordering};

use domain::{NewUser, User};
use repository::BaseRepository;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Build a unique registration-ready draft.
pub fn sample_new_user() -> NewUser {
    let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NewUser {
        password_hash: Some("12345678-hashed".to_string()),
        phone: Some(format!("1599{:07}", n)),
        ..NewUser::new(format!("User {}", n), format!("user{}@acme.com", n))
    }
}

/// Build a unique draft, letting the caller override any field.
pub fn sample_new_user_with<F>(overrides: F) -> NewUser
where
    F: FnOnce(&mut NewUser),
{
    let mut draft = sample_new_user();
    overrides(&mut draft);
    draft
}

/// Persist `count` unique users into `repo`.
pub async fn create_users<R>(repo: &R, count: usize) -> Vec<User>
where
    R: BaseRepository<User> + ?Sized,
{
    let mut users = Vec::with_capacity(count);
    for _ in 0..count {
        users.push(repo.create(sample_new_user()).await);
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUsersRepository, UsersRepository};

    #[test]
    fn test_samples_are_unique() {
        let first = sample_new_user();
        let second = sample_new_user();

        assert_ne!(first.name, second.name);
        assert_ne!(first.email, second.email);
        assert_ne!(first.phone, second.phone);
    }

    #[test]
    fn test_overrides_apply() {
        let draft = sample_new_user_with(|u| {
            u.email = "fixed@acme.com".to_string();
            u.phone = None;
        });

        assert_eq!(draft.email, "fixed@acme.com");
        assert!(draft.phone.is_none());
        assert!(draft.name.starts_with("User "));
    }

    #[tokio::test]
    async fn test_create_users_persists() {
        let repo = InMemoryUsersRepository::new();
        let users = create_users(&repo, 3).await;

        assert_eq!(repo.len().await, 3);
        let found = repo.find_by_email(&users[1].email).await;
        assert_eq!(found.map(|u| u.id), Some(users[1].id));
    }
}
