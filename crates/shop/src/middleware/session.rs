//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session
//! carries the visitor's cart and, after login, the current-user snapshot.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::Key, service::SignedCookie};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ShopConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "clover_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Shop configuration (cookie signing secret, HTTPS detection)
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ShopConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    // Create the PostgreSQL session store
    // Note: The sessions table must be created via migration
    let store = PostgresStore::new(pool.clone());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    // Cookie signing key derived from the configured secret
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_signed(key)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
