//! Browser-scoped key-value storage.
//!
//! Every piece of shopper state lives in a flat string-keyed store, one store
//! per browser (or per CLI state file). Values are JSON except for the two
//! plain-string keys noted below.
//!
//! # Keys
//!
//! ```text
//! users              → {"<normalized email>": "<sha-256 hex>", ...}
//! currentUser        → plain string email (absent when signed out)
//! cart               → [{"id": "p1", "name": "...", "price": 15, "qty": 1}, ...]
//! postAction         → {"action": "addToCart", "id": "p1"}
//! postLoginRedirect  → plain string URL (written by an external producer)
//! ```
//!
//! # Malformed data
//!
//! A value that no longer decodes is never fatal to the caller. [`decode_json`]
//! reports it as [`StorageError::Malformed`]; [`load_or_default`] logs it and
//! substitutes the key's default (`{}` for maps, `[]` for lists).

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys.
pub mod keys {
    /// Credential map.
    pub const USERS: &str = "users";

    /// Session pointer (plain string).
    pub const CURRENT_USER: &str = "currentUser";

    /// Cart line items.
    pub const CART: &str = "cart";

    /// Pending action saved across a login redirect.
    pub const POST_ACTION: &str = "postAction";

    /// Where to go after a successful login (plain string).
    pub const POST_LOGIN_REDIRECT: &str = "postLoginRedirect";
}

/// A string-keyed, string-valued store.
///
/// Implementations are in-memory snapshots; backends that persist somewhere
/// else (a server session, a file) load the snapshot up front and commit it
/// after the request or command completes.
pub trait KeyValueStore {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);

    /// Delete `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// Decode the JSON value stored under `key`.
///
/// Returns `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the stored value is not valid JSON
/// for `T`.
pub fn decode_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Decode the JSON value under `key`, falling back to `T::default()` when the
/// key is absent or malformed.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match decode_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored value");
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if serialization fails.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(StorageError::Encode)?;
    store.set(key, raw);
    Ok(())
}
