//! The signed-in shopper for one storage scope.

use pocket_shop_core::Email;

use crate::storage::{KeyValueStore, keys};

/// Session pointer for a storage scope.
///
/// A `Session` can only be obtained by loading it from the store it belongs
/// to, so each scope has exactly one pointer and every store operation that
/// needs it receives it explicitly. Only the credential store moves it.
///
/// The pointer is not checked against the credential map: a pointer whose
/// account has vanished still counts as signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    current_user: Option<Email>,
}

impl Session {
    /// Read the session pointer from `store`.
    ///
    /// A missing, blank or over-long stored value means signed out.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let current_user = store
            .get(keys::CURRENT_USER)
            .and_then(|raw| Email::normalize(&raw).ok());
        Self { current_user }
    }

    /// The signed-in email, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&Email> {
        self.current_user.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Point the session at `email` and persist it.
    pub(crate) fn begin<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, email: Email) {
        store.set(keys::CURRENT_USER, email.as_str().to_owned());
        self.current_user = Some(email);
    }

    /// Clear the pointer and persist that.
    pub(crate) fn end<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        store.remove(keys::CURRENT_USER);
        self.current_user = None;
    }
}
