//! Per-browser storage scope.
//!
//! The shopper's whole state (accounts, session pointer, cart, pending
//! action) is a [`MemoryStore`] snapshot kept inside the server-side session.
//! Handlers extract a [`BrowserStorage`], run store operations against the
//! snapshot, and [`commit`](BrowserStorage::commit) it once they are done.
//! Handlers that return early on a failure path skip the commit, so nothing
//! they touched is persisted.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::Session;
use crate::storage::MemoryStore;

/// Session key holding the storage snapshot.
pub const STORAGE_SESSION_KEY: &str = "storage";

/// One browser's storage snapshot, bound to its server-side session.
pub struct BrowserStorage {
    session: tower_sessions::Session,
    store: MemoryStore,
}

impl BrowserStorage {
    /// Load the snapshot from `session`. A fresh session starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session backend fails or the snapshot does
    /// not decode.
    pub async fn load(session: tower_sessions::Session) -> Result<Self, tower_sessions::session::Error> {
        let store = session
            .get::<MemoryStore>(STORAGE_SESSION_KEY)
            .await?
            .unwrap_or_default();
        Ok(Self { session, store })
    }

    /// The session pointer stored in this scope.
    #[must_use]
    pub fn shopper(&self) -> Session {
        Session::load(&self.store)
    }

    #[must_use]
    pub const fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    /// Write the snapshot back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn commit(self) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(STORAGE_SESSION_KEY, &self.store).await
    }
}

impl<S> FromRequestParts<S> for BrowserStorage
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<tower_sessions::Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Ok(Self::load(session).await?)
    }
}
