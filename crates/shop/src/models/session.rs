//! Session-related types.
//!
//! Types stored in the session for authentication state. The session payload
//! has two independent keys: the cart and the signed-in user snapshot.

use serde::{Deserialize, Serialize};

use clover_core::{Email, UserName};

use crate::models::user::{LoginRecord, User};

/// Session-stored user identity.
///
/// A snapshot taken at login time. The history page renders from this
/// snapshot rather than re-fetching the user, so logins from other sessions
/// only appear after the next sign-in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Login identifier.
    pub user_name: UserName,
    /// Contact email address.
    pub email: Email,
    /// Login history as of this sign-in, oldest first.
    pub login_history: Vec<LoginRecord>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            login_history: user.login_history.clone(),
        }
    }
}

/// Session keys for per-visitor state.
pub mod session_keys {
    /// Key for storing the signed-in user snapshot.
    pub const CURRENT_USER: &str = "user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
