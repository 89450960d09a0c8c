//! Integration tests for Pocket Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Page rendering, catalog queries, escaping
//! - `storefront_auth` - Signup, login, logout and their error slots
//! - `storefront_cart` - Cart mutations, deferred add, checkout
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`.
//! A [`Browser`] keeps the session cookie between requests, so each
//! `Browser` is one storage scope.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use pocket_shop_storefront::{app, catalog::Catalog, config::StorefrontConfig, state::AppState};

/// Build the storefront router with the demo catalog and local config.
///
/// # Panics
///
/// Panics if the built-in catalog or local config is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_app() -> Router {
    let config = StorefrontConfig::local().expect("local config is valid");
    let catalog = Catalog::demo().expect("demo catalog is valid");
    app(AppState::new(config, catalog))
}

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

/// One browser talking to a shared router.
///
/// Routers cloned from the same [`test_app`] share their session store, so
/// two `Browser`s on clones of one router model two browsers on one server.
pub struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// Send a form POST.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.post_form_with(uri, fields, &[]).await
    }

    /// Send a form POST with extra request headers.
    pub async fn post_form_with(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder, Body::from(encode_form(fields))).await
    }

    #[allow(clippy::expect_used)]
    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = header_string(&response, header::LOCATION.as_str());
        let request_id = header_string(&response, "x-request-id");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            location,
            request_id,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Sign up through the form and assert it succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the signup is rejected.
    pub async fn sign_up(&mut self, email: &str, password: &str) {
        let response = self
            .post_form("/signup", &[("email", email), ("password", password)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "signup failed: {}", response.body);
    }
}

fn header_string(response: &axum::response::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
