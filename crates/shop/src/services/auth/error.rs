//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid user name format.
    #[error("invalid user name: {0}")]
    InvalidUserName(#[from] clover_core::UserNameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] clover_core::EmailError),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Invalid credentials (wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Credentials verified but appending the login history failed.
    ///
    /// Distinct from credential failures: the password was right, the
    /// history write was not persisted, and no session is established.
    #[error("failed to record login history: {0}")]
    HistoryWrite(#[source] RepositoryError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
