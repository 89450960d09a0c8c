//! Subcommand implementations.
//!
//! Each command works against any [`KeyValueStore`] and returns the text to
//! print, so the commands can be tested against an in-memory store.
//!
//! [`KeyValueStore`]: pocket_shop_storefront::storage::KeyValueStore

pub mod account;
pub mod cart;
pub mod catalog;

use thiserror::Error;

use pocket_shop_core::PriceError;
use pocket_shop_storefront::services::AuthError;
use pocket_shop_storefront::storage::StorageError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The state file could not be read, decoded or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Signup or login was rejected.
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),

    /// The built-in catalog failed to load.
    #[error("catalog error: {0}")]
    Catalog(#[from] PriceError),

    /// No product with this ID.
    #[error("no product with id '{0}'")]
    UnknownProduct(String),

    /// No cart line at this 1-based position.
    #[error("no cart line at position {0}")]
    InvalidPosition(usize),

    /// The command needs a signed-in shopper.
    #[error("please log in first")]
    LoginRequired,
}

/// Convert a 1-based position from the command line to a cart index.
fn cart_index(position: usize) -> Result<usize, CliError> {
    position
        .checked_sub(1)
        .ok_or(CliError::InvalidPosition(position))
}
