//! Cart route handlers.
//!
//! The cart is session state: handlers load it from the session, apply the
//! pure [`Cart`] operations, and store it back. The data store is never
//! involved.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use clover_core::{ItemId, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::cart::{Cart, CartLine};
use crate::models::session_keys;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i32(),
            name: line.name.clone(),
            price: line.price.display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().display(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, empty if absent.
async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the cart back into the session.
async fn store_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("saving cart to session: {e}")))
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(rename = "itemId")]
    pub item_id: i32,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "itemPrice")]
    pub item_price: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Checkout confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub message: String,
}

/// Display the cart page with the running total.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add a line to the cart.
///
/// Appends unconditionally: adding the same item twice yields two lines,
/// each counted independently in the total.
#[instrument(skip(session, form))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let price = Price::parse(&form.item_price)
        .map_err(|e| AppError::Validation(format!("invalid item price: {e}")))?;

    let mut cart = load_cart(&session).await;
    cart.add_line(ItemId::new(form.item_id), form.item_name, price);
    store_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    store_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Check out: empty the cart and confirm.
///
/// No payment, no inventory effects; the same state transition as `clear`
/// plus a confirmation page. Checkout is the one cart operation that
/// requires a signed-in user.
#[instrument(skip(session))]
pub async fn checkout(RequireAuth(_user): RequireAuth, session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    store_cart(&session, &cart).await?;

    Ok(CheckoutTemplate {
        message: "Your order has been placed successfully!".to_string(),
    }
    .into_response())
}
