//! Password hashing - Domain layer password handling.
//!
//! [`PasswordHasher`] is the capability registration depends on.
//! [`Argon2Hasher`] is the production implementation, built on the
//! [`Password`] value object.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Turns plain-text passwords into digests and checks them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password for storage
    fn hash(&self, plain_text: &str) -> DomainResult<String>;

    /// Check a plain-text password against a stored digest
    fn compare(&self, plain_text: &str, hashed: &str) -> bool;
}

/// Password value object that handles hashing and verification.
///
/// Value object - immutable, compared by value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns a password error if the plain text is shorter than
    /// [`MIN_PASSWORD_LENGTH`] or hashing fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Argon2id hasher with default parameters and a random salt per hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> DomainResult<String> {
        Password::new(plain_text).map(Password::into_string)
    }

    fn compare(&self, plain_text: &str, hashed: &str) -> bool {
        Password::from_hash(hashed).verify(plain_text)
    }
}

/// Deterministic hasher for tests: appends `-hashed` to the plain text.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeHasher;

#[cfg(any(test, feature = "test-utils"))]
impl PasswordHasher for FakeHasher {
    fn hash(&self, plain_text: &str) -> DomainResult<String> {
        Ok(format!("{}-hashed", plain_text))
    }

    fn compare(&self, plain_text: &str, hashed: &str) -> bool {
        format!("{}-hashed", plain_text) == hashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_password_too_short() {
        let result = Password::new("short");
        assert!(matches!(result, Err(DomainError::Password(_))));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::from_hash("secret-digest");
        assert!(!format!("{:?}", password).contains("secret-digest"));
    }

    #[test]
    fn test_argon2_hasher_compare() {
        let hasher = Argon2Hasher;
        let digest = hasher.hash("12345678").unwrap();

        assert_ne!(digest, "12345678");
        assert!(hasher.compare("12345678", &digest));
        assert!(!hasher.compare("87654321", &digest));
        assert!(!hasher.compare("12345678", "not-a-phc-string"));
    }

    #[test]
    fn test_fake_hasher() {
        let hasher = FakeHasher;

        assert_eq!(hasher.hash("12345678").unwrap(), "12345678-hashed");
        assert!(hasher.compare("12345678", "12345678-hashed"));
        assert!(!hasher.compare("12345678", "12345678"));
    }
}
