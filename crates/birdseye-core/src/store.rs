//! Persistent token storage seam.
//!
//! The session layer keeps its authoritative token state in memory and
//! mirrors every mutation into a [`TokenStore`], so a session survives
//! process restarts. Implementations own their failure handling: a store
//! that cannot persist should log and carry on rather than fail the
//! session operation that triggered the write.

use std::collections::HashMap;
use std::sync::Mutex;

/// The three fixed keys a store must hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKey {
    /// Short-lived bearer token.
    Access,
    /// Long-lived refresh token.
    Refresh,
    /// Anti-forgery token.
    Csrf,
}

impl TokenKey {
    /// The storage key name, stable across implementations.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access_token",
            TokenKey::Refresh => "refresh_token",
            TokenKey::Csrf => "csrf_token",
        }
    }

    /// All keys, in a fixed order.
    pub const ALL: [TokenKey; 3] = [TokenKey::Access, TokenKey::Refresh, TokenKey::Csrf];
}

/// Key-value storage for session tokens.
pub trait TokenStore: Send + Sync {
    /// Read the stored value for a key, if any.
    fn get(&self, key: TokenKey) -> Option<String>;

    /// Store a value for a key, replacing any previous value.
    fn set(&self, key: TokenKey, value: &str);

    /// Remove the value for a key. Removing an absent key is a no-op.
    fn remove(&self, key: TokenKey);

    /// Remove all three keys.
    fn clear(&self) {
        for key in TokenKey::ALL {
            self.remove(key);
        }
    }
}

/// In-memory store. The default for library use and tests; sessions do
/// not survive the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: TokenKey) -> Option<String> {
        self.inner.lock().unwrap().get(&key).cloned()
    }

    fn set(&self, key: TokenKey, value: &str) {
        self.inner.lock().unwrap().insert(key, value.to_string());
    }

    fn remove(&self, key: TokenKey) {
        self.inner.lock().unwrap().remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(TokenKey::Access), None);

        store.set(TokenKey::Access, "tok");
        assert_eq!(store.get(TokenKey::Access), Some("tok".to_string()));

        store.remove(TokenKey::Access);
        assert_eq!(store.get(TokenKey::Access), None);
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let store = MemoryTokenStore::new();
        store.remove(TokenKey::Csrf);
        assert_eq!(store.get(TokenKey::Csrf), None);
    }

    #[test]
    fn clear_removes_all_keys() {
        let store = MemoryTokenStore::new();
        store.set(TokenKey::Access, "a");
        store.set(TokenKey::Refresh, "r");
        store.set(TokenKey::Csrf, "c");

        store.clear();

        for key in TokenKey::ALL {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn key_names_are_stable() {
        assert_eq!(TokenKey::Access.as_str(), "access_token");
        assert_eq!(TokenKey::Refresh.as_str(), "refresh_token");
        assert_eq!(TokenKey::Csrf.as_str(), "csrf_token");
    }
}
