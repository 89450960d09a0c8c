//! Cart, deferred add-to-cart and checkout over HTTP.

use axum::http::StatusCode;
use pocket_shop_integration_tests::{Browser, test_app};

async fn signed_in_browser() -> Browser {
    let mut browser = Browser::new(test_app());
    browser.sign_up("shopper@example.com", "pw").await;
    browser
}

#[tokio::test]
async fn test_add_signed_out_defers_until_login() {
    let mut browser = Browser::new(test_app());
    browser.sign_up("ada@example.com", "pw").await;
    browser.post_form("/logout", &[]).await;

    let response = browser.post_form("/cart/add", &[("id", "p2")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let cart = browser.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));

    let login = browser.get("/login").await;
    assert!(login.body.contains("Please log in first."));

    browser
        .post_form("/login", &[("email", "ada@example.com"), ("password", "pw")])
        .await;
    let cart = browser.get("/cart").await;
    assert!(cart.body.contains("Bluetooth Headphones"));
    assert!(cart.body.contains("Cart (1)"));

    // The deferred action runs once.
    browser.post_form("/logout", &[]).await;
    browser
        .post_form("/login", &[("email", "ada@example.com"), ("password", "pw")])
        .await;
    let cart = browser.get("/cart").await;
    assert_eq!(cart.body.matches("class=\"cart-row\"").count(), 1);
}

#[tokio::test]
async fn test_signup_resumes_deferred_add() {
    let mut browser = Browser::new(test_app());
    browser.post_form("/cart/add", &[("id", "p5")]).await;
    browser.sign_up("new@example.com", "pw").await;

    let cart = browser.get("/cart").await;
    assert!(cart.body.contains("Smart Watch"));
    assert!(!browser.get("/login").await.body.contains("Please log in first."));
}

#[tokio::test]
async fn test_add_redirects_back_to_same_origin_referer() {
    let mut browser = signed_in_browser().await;

    let response = browser
        .post_form_with(
            "/cart/add",
            &[("id", "p1")],
            &[("referer", "http://127.0.0.1:3000/products?q=shirt")],
        )
        .await;
    assert_eq!(response.location.as_deref(), Some("/products?q=shirt"));

    let response = browser
        .post_form_with("/cart/add", &[("id", "p1")], &[("referer", "https://evil.example.com/")])
        .await;
    assert_eq!(response.location.as_deref(), Some("/cart"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut browser = signed_in_browser().await;
    let response = browser.post_form("/cart/add", &[("id", "p99")]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_total_and_quantity_updates() {
    let mut browser = signed_in_browser().await;
    browser.post_form("/cart/add", &[("id", "p1")]).await;
    browser.post_form("/cart/add", &[("id", "p2")]).await;

    let response = browser
        .post_form("/cart/update", &[("index", "0"), ("qty", "2")])
        .await;
    assert_eq!(response.location.as_deref(), Some("/cart"));

    let cart = browser.get("/cart").await;
    assert!(cart.body.contains("Total: $70.00"));
    assert!(cart.body.contains("Cart (3)"));

    for raw in ["0", "-5", "abc"] {
        browser
            .post_form("/cart/update", &[("index", "1"), ("qty", raw)])
            .await;
        let cart = browser.get("/cart").await;
        assert!(cart.body.contains("Total: $70.00"), "qty {raw:?} should store 1");
    }
}

#[tokio::test]
async fn test_same_product_twice_makes_two_rows() {
    let mut browser = signed_in_browser().await;
    browser.post_form("/cart/add", &[("id", "p3")]).await;
    browser.post_form("/cart/add", &[("id", "p3")]).await;

    let cart = browser.get("/cart").await;
    assert_eq!(cart.body.matches("class=\"cart-row\"").count(), 2);
    assert!(cart.body.contains("Total: $50.00"));
}

#[tokio::test]
async fn test_remove_line() {
    let mut browser = signed_in_browser().await;
    browser.post_form("/cart/add", &[("id", "p1")]).await;
    browser.post_form("/cart/add", &[("id", "p4")]).await;

    browser.post_form("/cart/remove", &[("index", "0")]).await;
    let cart = browser.get("/cart").await;
    assert!(!cart.body.contains("Cotton T-Shirt"));
    assert!(cart.body.contains("Denim Jacket"));

    // Out of range is a no-op.
    browser.post_form("/cart/remove", &[("index", "7")]).await;
    assert!(browser.get("/cart").await.body.contains("Denim Jacket"));

    browser.post_form("/cart/remove", &[("index", "0")]).await;
    assert!(browser.get("/cart").await.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let mut browser = Browser::new(test_app());

    let response = browser.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = browser
        .post_form("/checkout", &[("name", "Ada"), ("address", "1 Loop"), ("card", "4242")])
        .await;
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let mut browser = signed_in_browser().await;
    browser.post_form("/cart/add", &[("id", "p6")]).await;

    let form = browser.get("/checkout").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Order total: $30.00"));

    let response = browser
        .post_form("/checkout", &[("name", "Ada"), ("address", "1 Loop"), ("card", "4242")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Order placed (demo). Redirecting to home..."));
    assert!(response.body.contains("Cart (0)"));

    assert!(browser.get("/cart").await.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_rejects_blank_fields() {
    let mut browser = signed_in_browser().await;
    browser.post_form("/cart/add", &[("id", "p6")]).await;

    let response = browser
        .post_form("/checkout", &[("name", " "), ("address", "1 Loop"), ("card", "4242")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(browser.get("/cart").await.body.contains("Handmade Vase"));
}
