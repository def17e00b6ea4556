//! Integration tests for the session cart.
//!
//! These tests require a running shop server; the cart never touches the
//! catalog tables, so no seed data is needed.
//!
//! Run with: cargo test -p clover-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

use clover_integration_tests::{fresh_user_name, session_client, shop_base_url};

/// Test helper: add a line to the cart.
async fn add_line(client: &Client, id: &str, name: &str, price: &str) {
    let base_url = shop_base_url();
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[("itemId", id), ("itemName", name), ("itemPrice", price)])
        .send()
        .await
        .expect("Failed to add to cart");

    // Redirects to /cart, which the client follows
    assert_eq!(resp.status(), StatusCode::OK);
}

/// Test helper: fetch the cart page body.
async fn cart_page(client: &Client) -> String {
    let base_url = shop_base_url();
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to fetch cart");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.expect("Failed to read response")
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_empty_cart_shows_zero_lines() {
    let client = session_client("clover-cart-test");
    let body = cart_page(&client).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_same_item_twice_doubles_the_total() {
    let client = session_client("clover-cart-test");

    add_line(&client, "42", "Widget", "9.99").await;
    add_line(&client, "42", "Widget", "9.99").await;

    let body = cart_page(&client).await;
    // Two independent lines, total = 19.98
    assert_eq!(body.matches("Widget").count(), 2);
    assert!(body.contains("$19.98"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_clear_empties_the_cart() {
    let client = session_client("clover-cart-test");
    let base_url = shop_base_url();

    add_line(&client, "42", "Widget", "9.99").await;
    add_line(&client, "7", "Gadget", "3.50").await;

    let resp = client
        .post(format!("{base_url}/cart/clear"))
        .send()
        .await
        .expect("Failed to clear cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = cart_page(&client).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_checkout_confirms_and_empties_the_cart() {
    let client = session_client("clover-cart-test");
    let base_url = shop_base_url();

    // Checkout is auth-gated; register and sign in first
    let user_name = fresh_user_name("shopper");
    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("userName", user_name.as_str()),
            ("password", "pw1pw1pw1"),
            ("password2", "pw1pw1pw1"),
            ("email", "shopper@example.com"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("userName", user_name.as_str()), ("password", "pw1pw1pw1")])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);

    add_line(&client, "42", "Widget", "9.99").await;

    let resp = client
        .post(format!("{base_url}/cart/checkout"))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your order has been placed successfully!"));

    let body = cart_page(&client).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_checkout_requires_login() {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");
    let base_url = shop_base_url();

    let resp = client
        .post(format!("{base_url}/cart/checkout"))
        .send()
        .await
        .expect("Failed to post");

    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_bad_price_is_a_validation_failure() {
    let client = session_client("clover-cart-test");
    let base_url = shop_base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[
            ("itemId", "42"),
            ("itemName", "Widget"),
            ("itemPrice", "not-a-price"),
        ])
        .send()
        .await
        .expect("Failed to post");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was added
    let body = cart_page(&client).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_carts_are_per_session() {
    let first = session_client("clover-cart-test-a");
    let second = session_client("clover-cart-test-b");

    add_line(&first, "42", "Widget", "9.99").await;

    let body = cart_page(&second).await;
    assert!(body.contains("Your cart is empty"));
}
