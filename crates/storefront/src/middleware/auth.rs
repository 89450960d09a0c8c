//! Authentication extractors.
//!
//! Provides an extractor for routes that only make sense for a signed-in
//! shopper.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use pocket_shop_core::Email;

use super::storage::BrowserStorage;
use crate::error::AppError;

/// Extractor that requires a signed-in shopper.
///
/// If nobody is signed in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn checkout(RequireShopper { email, .. }: RequireShopper) -> impl IntoResponse {
///     format!("Checking out as {email}")
/// }
/// ```
pub struct RequireShopper {
    /// The signed-in email.
    pub email: Email,
    /// The storage scope the email was read from.
    pub storage: BrowserStorage,
}

/// Error returned when a signed-in shopper is required.
pub enum AuthRejection {
    /// Nobody is signed in.
    RedirectToLogin,
    /// The storage scope could not be loaded.
    Storage(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Storage(err) => err.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireShopper
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let storage = BrowserStorage::from_request_parts(parts, state)
            .await
            .map_err(AuthRejection::Storage)?;

        let email = storage
            .shopper()
            .current_user()
            .cloned()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self { email, storage })
    }
}
