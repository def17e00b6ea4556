//! User repository for database operations.
//!
//! Queries use the runtime sqlx API with explicit row types; rows are mapped
//! into the domain types from [`crate::models::user`].

use sqlx::PgPool;
use sqlx::types::Json;

use clover_core::{Email, UserId, UserName};

use super::RepositoryError;
use crate::models::user::{LoginRecord, User};

/// Row shape shared by the user queries.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    user_name: UserName,
    email: Email,
    login_history: Json<Vec<LoginRecord>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            email: row.email,
            login_history: row.login_history.0,
        }
    }
}

/// Row shape for credential verification.
#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        user_name: &UserName,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r"
            SELECT id, user_name, email, login_history, password_hash
            FROM users
            WHERE user_name = $1
            ",
        )
        .bind(user_name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (User::from(r.user), r.password_hash)))
    }

    /// Create a new user with an already-hashed password and an empty login
    /// history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_name: &UserName,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (user_name, email, password_hash, login_history)
            VALUES ($1, $2, $3, '[]'::jsonb)
            RETURNING id, user_name, email, login_history
            ",
        )
        .bind(user_name.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("user name already taken".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User::from(row))
    }

    /// Replace a user's login history with the given sequence.
    ///
    /// The caller appends the new record to the history it already holds and
    /// passes the whole sequence; the column is overwritten in one statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_login_history(
        &self,
        id: UserId,
        history: &[LoginRecord],
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET login_history = $2
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(Json(history))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
