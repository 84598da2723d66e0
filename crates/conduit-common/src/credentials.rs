//! Credential access for authenticated requests.
//!
//! The client never owns the user's token. It asks a [`CredentialAccessor`] for
//! the current token on every request, so logging in or out takes effect on the
//! next call without rebuilding the client.
//!
//! # Security
//!
//! Tokens are held as [`SecretString`] so they are redacted from `Debug` output
//! and zeroed on drop. Callers must use `expose_secret()` to read them.

use std::sync::RwLock;

use secrecy::SecretString;

/// Capability returning the stored authentication token, if any.
///
/// Closures returning `Option<SecretString>` implement this trait, which is the
/// easiest way to plug in an external token store:
///
/// ```
/// use conduit_common::CredentialAccessor;
/// use secrecy::SecretString;
///
/// let accessor = || Some(SecretString::new("jwt".into()));
/// assert!(accessor.credential().is_some());
/// ```
pub trait CredentialAccessor: Send + Sync {
    /// Returns the current token, or `None` when the user is signed out.
    fn credential(&self) -> Option<SecretString>;
}

impl<F> CredentialAccessor for F
where
    F: Fn() -> Option<SecretString> + Send + Sync,
{
    fn credential(&self) -> Option<SecretString> {
        self()
    }
}

/// In-memory, thread-safe token store.
///
/// Mirrors the save/get/destroy lifecycle of a browser-persisted JWT: the token
/// is saved after login and destroyed on logout.
#[derive(Default)]
pub struct TokenStore {
    token: RwLock<Option<SecretString>>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.save_token(token);
        store
    }

    /// Returns the stored token.
    pub fn token(&self) -> Option<SecretString> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stores `token`, replacing any previous one.
    pub fn save_token(&self, token: impl Into<String>) {
        let token = SecretString::new(token.into().into());
        match self.token.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    /// Removes the stored token.
    pub fn destroy_token(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Returns `true` if a token is stored.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

// Custom Debug implementation to avoid exposing the token
impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("token", &self.has_token().then_some("[REDACTED]"))
            .finish()
    }
}

impl CredentialAccessor for TokenStore {
    fn credential(&self) -> Option<SecretString> {
        self.token()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_empty_store() {
        let store = TokenStore::new();
        assert!(store.credential().is_none());
        assert!(!store.has_token());
    }

    #[test]
    fn test_save_and_destroy() {
        let store = TokenStore::new();
        store.save_token("first");
        assert_eq!(store.credential().unwrap().expose_secret(), "first");

        store.save_token("second");
        assert_eq!(store.token().unwrap().expose_secret(), "second");

        store.destroy_token();
        assert!(store.credential().is_none());
    }

    #[test]
    fn test_with_token() {
        let store = TokenStore::with_token("test-token");
        assert_eq!(store.credential().unwrap().expose_secret(), "test-token");
    }

    #[test]
    fn test_debug_redacts_token() {
        let store = TokenStore::with_token("super-secret");
        let debug = format!("{store:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_closure_accessor() {
        let none = || -> Option<SecretString> { None };
        assert!(none.credential().is_none());

        let some = || Some(SecretString::new("abc".into()));
        assert_eq!(some.credential().unwrap().expose_secret(), "abc");
    }

    #[test]
    fn test_shared_store_as_trait_object() {
        let store = Arc::new(TokenStore::new());
        let accessor: Arc<dyn CredentialAccessor> = store.clone();

        assert!(accessor.credential().is_none());
        store.save_token("after-login");
        assert_eq!(accessor.credential().unwrap().expose_secret(), "after-login");
    }
}
