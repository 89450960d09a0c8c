//! Credential store.
//!
//! Keeps the `users` map (normalized email → password digest) and moves the
//! session pointer on signup, login and logout.
//!
//! # Security
//!
//! Passwords are digested with a single unsalted SHA-256 round. That is only
//! acceptable because this is a demo shop whose whole state lives in the
//! shopper's own storage scope; a real deployment must use a salted,
//! memory-hard scheme such as argon2.

mod error;

pub use error::AuthError;

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use pocket_shop_core::Email;

use crate::models::Session;
use crate::storage::{KeyValueStore, keys, load_or_default, save_json};

/// Normalized email → lowercase hex SHA-256 of the password.
pub type CredentialMap = BTreeMap<Email, String>;

/// Credential store over one storage scope.
pub struct CredentialStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> CredentialStore<'a, S> {
    /// Create a credential store over `store`.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Register a new account and sign it in.
    ///
    /// Nothing is written unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the email or password is empty.
    /// Returns `AuthError::DuplicateEmail` if the normalized email already has an account.
    /// Returns `AuthError::Storage` if the credential map cannot be encoded.
    pub fn sign_up(
        &mut self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let email = validate_fields(email, password)?;

        let mut users = self.users();
        if users.contains_key(&email) {
            tracing::info!(email = %email, "Signup rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        users.insert(email.clone(), hash_password(password));
        save_json(&mut *self.store, keys::USERS, &users)?;
        session.begin(&mut *self.store, email);

        tracing::info!(users = users.len(), "Account created");
        Ok(())
    }

    /// Sign in an existing account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the email or password is empty.
    /// Returns `AuthError::UnknownEmail` if no account exists for the email.
    /// Returns `AuthError::WrongPassword` if the password digest does not match.
    pub fn log_in(
        &mut self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let email = validate_fields(email, password)?;

        let users = self.users();
        let stored = users.get(&email).ok_or(AuthError::UnknownEmail)?;

        if hash_password(password) != *stored {
            tracing::info!(email = %email, "Login rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        session.begin(&mut *self.store, email);
        tracing::debug!("Login succeeded");
        Ok(())
    }

    /// Sign out. The caller is expected to navigate home afterwards.
    pub fn log_out(&mut self, session: &mut Session) {
        session.end(&mut *self.store);
    }

    /// Whether the session has a signed-in shopper.
    #[must_use]
    pub const fn is_authenticated(&self, session: &Session) -> bool {
        session.is_authenticated()
    }

    /// The stored credential map; malformed data reads as empty.
    #[must_use]
    pub fn users(&self) -> CredentialMap {
        load_or_default(&*self.store, keys::USERS)
    }
}

/// Normalize the email and reject empty fields.
fn validate_fields(email: &str, password: &str) -> Result<Email, AuthError> {
    let email = Email::normalize(email)?;
    if password.is_empty() {
        return Err(AuthError::MissingField);
    }
    Ok(email)
}

/// Lowercase hex SHA-256 digest of the UTF-8 password bytes.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
