//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was left empty.
    #[error("missing field: email and password are required")]
    MissingField,

    /// Email is longer than the storage limit.
    #[error("invalid email: {0}")]
    InvalidEmail(pocket_shop_core::EmailError),

    /// Signup with an email that already has an account.
    #[error("email already registered")]
    DuplicateEmail,

    /// Login with an email that has no account.
    #[error("unknown email")]
    UnknownEmail,

    /// Login with the wrong password.
    #[error("wrong password")]
    WrongPassword,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message shown in the form's error slot.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField => "Email and password are required.",
            Self::InvalidEmail(_) => "Please enter a valid email address.",
            Self::DuplicateEmail => "This email is already registered.",
            Self::UnknownEmail => "No account found for this email.",
            Self::WrongPassword => "Wrong password.",
            Self::Storage(_) => "Something went wrong. Please try again.",
        }
    }
}

impl From<pocket_shop_core::EmailError> for AuthError {
    fn from(err: pocket_shop_core::EmailError) -> Self {
        match err {
            pocket_shop_core::EmailError::Empty => Self::MissingField,
            other => Self::InvalidEmail(other),
        }
    }
}
