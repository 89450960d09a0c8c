//! Account commands.

use std::fmt::Write;

use pocket_shop_core::Email;
use pocket_shop_storefront::catalog::Catalog;
use pocket_shop_storefront::models::{LineItem, Session};
use pocket_shop_storefront::services::{CartStore, CredentialStore};
use pocket_shop_storefront::storage::KeyValueStore;

use super::CliError;

/// Create an account, sign in and replay any deferred add-to-cart.
///
/// # Errors
///
/// Returns `CliError::Auth` if the signup is rejected.
pub fn signup<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    email: &str,
    password: &str,
) -> Result<String, CliError> {
    let mut session = Session::load(&*store);
    CredentialStore::new(&mut *store).sign_up(&mut session, email, password)?;
    let resumed = CartStore::new(&mut *store).resume_pending(&session, catalog)?;
    Ok(greeting("Signed up", &session, resumed.as_ref()))
}

/// Sign in and replay any deferred add-to-cart.
///
/// # Errors
///
/// Returns `CliError::Auth` if the login is rejected.
pub fn login<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    email: &str,
    password: &str,
) -> Result<String, CliError> {
    let mut session = Session::load(&*store);
    CredentialStore::new(&mut *store).log_in(&mut session, email, password)?;
    let resumed = CartStore::new(&mut *store).resume_pending(&session, catalog)?;
    Ok(greeting("Logged in", &session, resumed.as_ref()))
}

pub fn logout<S: KeyValueStore + ?Sized>(store: &mut S) -> String {
    let mut session = Session::load(&*store);
    CredentialStore::new(&mut *store).log_out(&mut session);
    "Logged out.".to_string()
}

pub fn whoami<S: KeyValueStore + ?Sized>(store: &S) -> String {
    Session::load(store)
        .current_user()
        .map_or_else(|| "Not signed in.".to_string(), |email| email.to_string())
}

fn greeting(verb: &str, session: &Session, resumed: Option<&LineItem>) -> String {
    let email = session.current_user().map(Email::as_str).unwrap_or_default();
    let mut out = format!("{verb} as {email}.");
    if let Some(line) = resumed {
        let _ = write!(out, "\n{} added to cart.", line.name);
    }
    out
}
