//! Integration tests for the catalog: shop listing, management routes, and
//! auth gating.
//!
//! These tests require a running shop server with migrations applied. The
//! management-flow tests create their own user and data.
//!
//! Run with: cargo test -p clover-integration-tests -- --ignored

use reqwest::{Client, StatusCode, multipart};

use clover_integration_tests::{fresh_user_name, session_client, shop_base_url};

/// Test helper: register and log in a fresh user, returning the client.
async fn signed_in_client() -> Client {
    let client = session_client("clover-catalog-test");
    let base_url = shop_base_url();
    let user_name = fresh_user_name("manager");

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("userName", user_name.as_str()),
            ("password", "pw1pw1pw1"),
            ("password2", "pw1pw1pw1"),
            ("email", "manager@example.com"),
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

    client
}

/// Test helper: create an item through the multipart form.
async fn create_item(client: &Client, title: &str, price: &str, published: bool) {
    let base_url = shop_base_url();
    let mut form = multipart::Form::new()
        .text("title", title.to_owned())
        .text("body", format!("Body text for {title}"))
        .text("price", price.to_owned())
        .text("category", String::new());
    if published {
        form = form.text("published", "on");
    }

    let resp = client
        .post(format!("{base_url}/items/add"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_shop_page_renders() {
    let client = session_client("clover-catalog-test");
    let base_url = shop_base_url();

    let resp = client
        .get(format!("{base_url}/shop"))
        .send()
        .await
        .expect("Failed to fetch shop");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Shop"));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_unpublished_items_stay_off_the_shop_page() {
    let client = signed_in_client().await;
    let base_url = shop_base_url();

    let published = fresh_user_name("published-item");
    let draft = fresh_user_name("draft-item");
    create_item(&client, &published, "5.00", true).await;
    create_item(&client, &draft, "5.00", false).await;

    let body = client
        .get(format!("{base_url}/shop"))
        .send()
        .await
        .expect("Failed to fetch shop")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains(&published));
    assert!(!body.contains(&draft));

    // The management table shows both
    let body = client
        .get(format!("{base_url}/items"))
        .send()
        .await
        .expect("Failed to fetch items")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains(&published));
    assert!(body.contains(&draft));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_category_filter_composes_with_published() {
    let client = signed_in_client().await;
    let base_url = shop_base_url();

    // Fresh category
    let category_name = fresh_user_name("category");
    let resp = client
        .post(format!("{base_url}/categories/add"))
        .form(&[("name", category_name.as_str())])
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), StatusCode::OK);

    // Find its id on the categories page
    let body = client
        .get(format!("{base_url}/categories"))
        .send()
        .await
        .expect("Failed to fetch categories")
        .text()
        .await
        .expect("Failed to read response");
    let category_id = body
        .lines()
        .skip_while(|line| !line.contains(&category_name))
        .find_map(|line| {
            line.split("/categories/delete/")
                .nth(1)
                .and_then(|rest| rest.split('"').next())
                .map(ToOwned::to_owned)
        })
        .expect("category id not found on page");

    // One published item inside the category, one outside
    let inside = fresh_user_name("inside");
    let outside = fresh_user_name("outside");
    let form = multipart::Form::new()
        .text("title", inside.clone())
        .text("price", "5.00")
        .text("published", "on")
        .text("category", category_id.clone());
    client
        .post(format!("{base_url}/items/add"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create item");
    create_item(&client, &outside, "5.00", true).await;

    let body = client
        .get(format!("{base_url}/shop?category={category_id}"))
        .send()
        .await
        .expect("Failed to fetch filtered shop")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains(&inside));
    assert!(!body.contains(&outside));
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_delete_missing_item_returns_not_found() {
    let client = signed_in_client().await;
    let base_url = shop_base_url();

    let resp = client
        .get(format!("{base_url}/items/delete/99999999"))
        .send()
        .await
        .expect("Failed to send delete");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_management_routes_redirect_anonymous_visitors() {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");
    let base_url = shop_base_url();

    for path in ["/items", "/items/add", "/categories", "/categories/add"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to fetch");
        assert!(
            resp.status().is_redirection(),
            "{path} should redirect anonymous visitors"
        );
    }
}

#[tokio::test]
#[ignore = "Requires a running shop server"]
async fn test_unknown_route_gets_the_404_page() {
    let client = session_client("clover-catalog-test");
    let base_url = shop_base_url();

    let resp = client
        .get(format!("{base_url}/no-such-page"))
        .send()
        .await
        .expect("Failed to fetch");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Page Not Found"));
}
