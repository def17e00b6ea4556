//! Integration tests for Clover Market.
//!
//! These tests drive a running shop server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p clover-cli -- migrate
//!
//! # Start the server
//! cargo run -p clover-shop
//!
//! # Run the integration tests against it
//! cargo test -p clover-integration-tests -- --ignored
//! ```

/// Base URL for the shop (configurable via environment).
#[must_use]
pub fn shop_base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// HTTP client with a cookie store, so the session survives across requests.
///
/// The user agent is caller-chosen: the auth tests use a unique one per run
/// and count its occurrences on the login-history page.
#[must_use]
pub fn session_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(user_agent)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique user name for this test run.
#[must_use]
pub fn fresh_user_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
