//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clover_core::{Email, UserId, UserName};

/// A registered shop user.
///
/// The password is stored only as an Argon2id hash, handled separately from
/// this type by the user repository.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login identifier, unique and immutable after registration.
    pub user_name: UserName,
    /// Contact email address.
    pub email: Email,
    /// Append-only record of successful sign-ins, oldest first.
    pub login_history: Vec<LoginRecord>,
}

/// One successful sign-in.
///
/// Serialized into the user's `login_history` JSONB column and into the
/// session snapshot shown on the history page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRecord {
    /// When the sign-in happened.
    pub date_time: DateTime<Utc>,
    /// The client's User-Agent header at sign-in.
    pub user_agent: String,
}
