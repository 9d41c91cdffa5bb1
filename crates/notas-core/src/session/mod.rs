//! Session context: the bearer token and where it is persisted.
//!
//! The token lives in an external string key-value store under a single fixed
//! key. A `Session` is handed to the gateway at construction and read on every
//! authenticated request, so nothing in the core keeps ambient token state.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Key the bearer token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token; blank values are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Auth("Session token must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("BearerToken")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// External string key-value store holding the session token.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local `TokenStore`, for tests and embedders without a keychain.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .values
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .values
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self
            .values
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Shared handle to the current session's credential.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// An unauthenticated session backed by a fresh `MemoryTokenStore`.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Current token; blank stored values count as absent.
    pub fn token(&self) -> Result<Option<BearerToken>> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .and_then(|raw| BearerToken::new(raw).ok()))
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    pub fn persist(&self, token: &BearerToken) -> Result<()> {
        self.store.set(TOKEN_KEY, token.expose())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_rejects_blank() {
        assert!(BearerToken::new("   ").is_err());
        assert_eq!(BearerToken::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn bearer_token_debug_redacts_value() {
        let token = BearerToken::new("secret-token").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn session_persist_and_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().unwrap());

        session.persist(&BearerToken::new("t1").unwrap()).unwrap();
        assert_eq!(session.token().unwrap().unwrap().expose(), "t1");

        session.clear().unwrap();
        assert!(session.token().unwrap().is_none());
    }

    #[test]
    fn sessions_sharing_a_store_see_the_same_token() {
        let store = MemoryTokenStore::new();
        let first = Session::new(store.clone());
        let second = Session::new(store.clone());

        first.persist(&BearerToken::new("shared").unwrap()).unwrap();
        assert_eq!(second.token().unwrap().unwrap().expose(), "shared");
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn blank_stored_value_counts_as_absent() {
        let store = MemoryTokenStore::new();
        store.set(TOKEN_KEY, "  ").unwrap();
        assert!(Session::new(store).token().unwrap().is_none());
    }
}
