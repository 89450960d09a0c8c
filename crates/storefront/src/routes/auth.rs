//! Authentication route handlers.
//!
//! Login and signup share one page with two forms. A failed attempt
//! re-renders the page with the message in that form's error slot and
//! commits nothing. A successful attempt replays any add-to-cart that was
//! deferred while signed out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::config::StorefrontConfig;
use crate::error::{AppError, Result, auth_status, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::BrowserStorage;
use crate::models::Session;
use crate::routes::render_header;
use crate::services::{AuthError, CartStore, CredentialStore};
use crate::state::AppState;
use crate::storage::{KeyValueStore, MemoryStore, keys};

/// Shown above the forms when an add-to-cart is waiting for login.
const PENDING_NOTICE: &str = "Please log in first. Your item will be added to the cart afterwards.";

/// Login and signup form data.
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// Which of the two forms was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthForm {
    Login,
    Signup,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub header_html: String,
    pub notice: Option<String>,
    pub login_email: String,
    pub login_error: Option<String>,
    pub signup_email: String,
    pub signup_error: Option<String>,
}

impl LoginTemplate {
    fn new(header_html: String, notice: Option<String>) -> Self {
        Self {
            header_html,
            notice,
            login_email: String::new(),
            login_error: None,
            signup_email: String::new(),
            signup_error: None,
        }
    }
}

fn pending_notice(storage: &mut BrowserStorage) -> Option<String> {
    CartStore::new(storage.store_mut())
        .pending_action()
        .map(|_| PENDING_NOTICE.to_string())
}

/// Display the login and signup forms.
#[instrument(skip_all)]
pub async fn login_page(mut storage: BrowserStorage) -> Result<LoginTemplate> {
    let notice = pending_notice(&mut storage);
    Ok(LoginTemplate::new(render_header(&mut storage)?, notice))
}

/// Log in.
///
/// On success, goes to the stored post-login redirect when it points at this
/// storefront, otherwise home.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    mut storage: BrowserStorage,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let mut session = storage.shopper();
    let result = CredentialStore::new(storage.store_mut()).log_in(&mut session, &form.email, &form.password);

    if let Err(err) = result {
        return reject(storage, AuthForm::Login, &form.email, err);
    }

    let target = post_login_target(state.config(), storage.store());

    complete(&state, storage, &session).await?;
    Ok(Redirect::to(&target).into_response())
}

/// Where a successful login lands: the stored `postLoginRedirect` when it
/// stays on this storefront, otherwise `/`.
fn post_login_target(config: &StorefrontConfig, store: &MemoryStore) -> String {
    store
        .get(keys::POST_LOGIN_REDIRECT)
        .and_then(|target| config.local_redirect(&target))
        .unwrap_or_else(|| "/".to_string())
}

/// Create an account and sign it in.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    mut storage: BrowserStorage,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let mut session = storage.shopper();
    let result = CredentialStore::new(storage.store_mut()).sign_up(&mut session, &form.email, &form.password);

    if let Err(err) = result {
        return reject(storage, AuthForm::Signup, &form.email, err);
    }

    complete(&state, storage, &session).await?;
    Ok(Redirect::to("/").into_response())
}

/// Log out and go home.
#[instrument(skip_all)]
pub async fn logout(mut storage: BrowserStorage) -> Result<Redirect> {
    let mut session = storage.shopper();
    CredentialStore::new(storage.store_mut()).log_out(&mut session);
    storage.commit().await?;

    clear_sentry_user();
    Ok(Redirect::to("/"))
}

/// Replay the pending action and persist the signed-in scope.
async fn complete(state: &AppState, mut storage: BrowserStorage, session: &Session) -> Result<()> {
    CartStore::new(storage.store_mut()).resume_pending(session, state.catalog())?;
    storage.commit().await?;

    if let Some(email) = session.current_user() {
        set_sentry_user(email.as_str());
    }
    Ok(())
}

/// Re-render the login page with the error in the submitted form's slot.
///
/// The storage snapshot is dropped without committing.
fn reject(mut storage: BrowserStorage, form: AuthForm, email: &str, err: AuthError) -> Result<Response> {
    let err = match err {
        AuthError::Storage(e) => return Err(AppError::Storage(e)),
        other => other,
    };

    let notice = pending_notice(&mut storage);
    let mut page = LoginTemplate::new(render_header(&mut storage)?, notice);
    let message = Some(err.user_message().to_string());
    let email = email.trim().to_string();
    match form {
        AuthForm::Login => {
            page.login_email = email;
            page.login_error = message;
        }
        AuthForm::Signup => {
            page.signup_email = email;
            page.signup_error = message;
        }
    }

    tracing::debug!(?form, error = %err, "Authentication rejected");
    Ok((auth_status(&err), page).into_response())
}
