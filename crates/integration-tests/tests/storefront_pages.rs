//! Page rendering and catalog queries over HTTP.

use axum::http::StatusCode;
use pocket_shop_integration_tests::{Browser, test_app};

#[tokio::test]
async fn test_health() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/health").await;
    let id = response.request_id.unwrap_or_default();
    assert_eq!(id.len(), 36, "expected a UUID, got {id:?}");
}

#[tokio::test]
async fn test_home_shows_preview_and_login_link() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("id=\"previewGrid\""));
    assert!(response.body.contains("Cotton T-Shirt"));
    assert!(response.body.contains("Denim Jacket"));
    assert!(!response.body.contains("Smart Watch"));
    assert!(response.body.contains("Login / Signup"));
    assert!(response.body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_listing_filters_by_category() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/products?q=&category=electronics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Bluetooth Headphones"));
    assert!(response.body.contains("Smart Watch"));
    assert!(!response.body.contains("Wooden Bowl"));
    assert!(response.body.contains("value=\"electronics\" selected"));

    let headphones = response.body.find("Bluetooth Headphones").unwrap_or(usize::MAX);
    let watch = response.body.find("Smart Watch").unwrap_or(0);
    assert!(headphones < watch, "catalog order is kept");
}

#[tokio::test]
async fn test_listing_search_is_case_insensitive() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/products?q=%20WOODEN%20").await;

    assert!(response.body.contains("Wooden Bowl"));
    assert!(!response.body.contains("Cotton T-Shirt"));
}

#[tokio::test]
async fn test_listing_unknown_category_shows_everything() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/products?category=toys").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Cotton T-Shirt"));
    assert!(response.body.contains("Handmade Vase"));
}

#[tokio::test]
async fn test_listing_without_matches() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/products?q=submarine").await;
    assert!(response.body.contains("No products match your search."));
}

#[tokio::test]
async fn test_product_detail_with_related() {
    let mut browser = Browser::new(test_app());
    let response = browser.get("/product?id=p3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Wooden Bowl - Pocket Shop</title>"));
    assert!(response.body.contains("Handmade wooden bowl."));
    assert!(response.body.contains("id=\"relatedGrid\""));
}

#[tokio::test]
async fn test_product_detail_unknown_id_falls_back_to_first() {
    let mut browser = Browser::new(test_app());

    let response = browser.get("/product?id=nope").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Cotton T-Shirt - Pocket Shop</title>"));

    let response = browser.get("/product").await;
    assert!(response.body.contains("<title>Cotton T-Shirt - Pocket Shop</title>"));
}

#[tokio::test]
async fn test_signed_in_email_is_escaped() {
    let mut browser = Browser::new(test_app());
    browser.sign_up("<b>bold</b>@example.com", "pw").await;

    let response = browser.get("/").await;
    assert!(response.body.contains("Signed in as"));
    assert!(response.body.contains("&lt;b&gt;bold"));
    assert!(!response.body.contains("<b>bold</b>"));
}
