//! HTTP route handlers for the shop.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /shop
//! GET  /health                 - Health check
//!
//! # Shop (public)
//! GET  /shop                   - Published items, optional ?category=N filter
//! GET  /shop/{id}              - Single item with related published items
//!
//! # Items (requires auth)
//! GET  /items                  - All items, optional ?minDate= filter
//! GET  /items/add              - New item form
//! POST /items/add              - Create item (multipart, optional feature image)
//! GET  /items/delete/{id}      - Delete item
//!
//! # Categories (requires auth)
//! GET  /categories             - Category list
//! GET  /categories/add         - New category form
//! POST /categories/add         - Create category
//! GET  /categories/delete/{id} - Delete category
//!
//! # Auth
//! GET  /register               - Registration page
//! POST /register               - Register action
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Destroy session
//! GET  /userHistory            - Login history from session snapshot (requires auth)
//!
//! # Cart (session state transitions)
//! GET  /cart                   - Cart page with total
//! POST /cart/add               - Append a line
//! POST /cart/clear             - Empty the cart
//! POST /cart/checkout          - Empty the cart, confirmation page
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod items;
pub mod shop;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/{id}", get(shop::show))
}

/// Create the item management routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index))
        .route("/add", get(items::add_form).post(items::add))
        .route("/delete/{id}", get(items::delete))
}

/// Create the category management routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/add", get(categories::add_form).post(categories::add))
        .route("/delete/{id}", get(categories::delete))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/userHistory", get(auth::history))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the shop.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home redirects to the shop page
        .route("/", get(|| async { Redirect::to("/shop") }))
        // Public shop
        .nest("/shop", shop_routes())
        // Store management
        .nest("/items", item_routes())
        .nest("/categories", category_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Auth
        .merge(auth_routes())
}

/// Custom 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            message: "Page Not Found".to_string(),
        },
    )
}
