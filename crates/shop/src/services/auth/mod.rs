//! Authentication service.
//!
//! Registration and login with Argon2id password hashing, plus the
//! append-only login history updated on every successful sign-in.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::PgPool;

use clover_core::{Email, UserName};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{LoginRecord, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration and login. Holds no state of its own; the
/// session is the caller's concern.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// The confirmation is compared before anything touches the store, and
    /// only the Argon2id hash of the password is persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidUserName` / `AuthError::InvalidEmail` on
    /// malformed input, `AuthError::WeakPassword` if the password is too
    /// short, and `AuthError::UserAlreadyExists` if the user name is taken.
    pub async fn register(
        &self,
        user_name: &str,
        password: &str,
        password_confirm: &str,
        email: &str,
    ) -> Result<User, AuthError> {
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let user_name = UserName::parse(user_name)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&user_name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Verify credentials and record the sign-in.
    ///
    /// On a correct password the `{now, user_agent}` record is appended to
    /// the user's login history and persisted before the user is returned,
    /// so the returned value already contains the new entry. A wrong
    /// password leaves the history untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user name is unknown and
    /// `AuthError::InvalidCredentials` on a wrong password. A verified
    /// password with a failed history write is `AuthError::HistoryWrite`.
    pub async fn login(
        &self,
        user_name: &str,
        password: &str,
        user_agent: &str,
    ) -> Result<User, AuthError> {
        let user_name = UserName::parse(user_name)?;

        let (mut user, password_hash) = self
            .users
            .get_with_password_hash(&user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &password_hash)?;

        user.login_history.push(LoginRecord {
            date_time: Utc::now(),
            user_agent: user_agent.to_owned(),
        });

        self.users
            .update_login_history(user.id, &user.login_history)
            .await
            .map_err(AuthError::HistoryWrite)?;

        Ok(user)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_never_the_plaintext() {
        let hash = hash_password("pw1pw1pw1").unwrap();
        assert_ne!(hash, "pw1pw1pw1");
        // PHC string format
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Fresh salt every time
        let a = hash_password("pw1pw1pw1").unwrap();
        let b = hash_password("pw1pw1pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }
}
