//! Key/value persistence seam for the session and locale preference.
//!
//! # Design
//! - The browser's local storage sits behind [`KeyValueStore`] so core logic stays DOM-free.
//! - Stored values are plain strings (JSON for the user object) with no versioning.
//! - Undecodable entries read back as absent instead of failing startup.

use crate::core::auth::Session;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use terracasa_api_models::User;
use thiserror::Error;
use tracing::warn;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded signed-in user.
pub const USER_KEY: &str = "user";
/// Storage key for the active locale code.
pub const LANGUAGE_KEY: &str = "language";

/// Errors raised while persisting values.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected the write.
    #[error("storage write failed")]
    Write {
        /// Key being written.
        key: String,
        /// Backend-provided detail.
        detail: String,
    },
    /// The backing store rejected the removal.
    #[error("storage removal failed")]
    Remove {
        /// Key being removed.
        key: String,
        /// Backend-provided detail.
        detail: String,
    },
    /// The value could not be serialized.
    #[error("storage value encoding failed")]
    Encode {
        /// Key being written.
        key: String,
        /// Serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key/value store.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    ///
    /// # Errors
    /// Returns [`StorageError::Write`] when the store rejects the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete a value; missing keys are ignored.
    ///
    /// # Errors
    /// Returns [`StorageError::Remove`] when the store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared in-memory store; clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        store
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Restore the persisted session, if any.
#[must_use]
pub fn load_session(store: &dyn KeyValueStore) -> Option<Session> {
    let token = store
        .get(TOKEN_KEY)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())?;
    let user = store
        .get(USER_KEY)
        .and_then(|raw| serde_json::from_str::<User>(&raw).ok())?;
    Some(Session { token, user })
}

/// Persist a session.
///
/// # Errors
/// Returns [`StorageError`] when the user cannot be encoded or either write fails.
pub fn persist_session(store: &dyn KeyValueStore, session: &Session) -> Result<(), StorageError> {
    let user = serde_json::to_string(&session.user).map_err(|source| StorageError::Encode {
        key: USER_KEY.to_string(),
        source,
    })?;
    store.set(TOKEN_KEY, &session.token)?;
    store.set(USER_KEY, &user)
}

/// Drop the stored token and user; failures are logged and the next key is still tried.
pub fn clear_session(store: &dyn KeyValueStore) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(err) = store.remove(key) {
            warn!(key, error = %err, "stored session value not removed");
        }
    }
}

/// Stored locale code, trimmed; blank values read as absent.
#[must_use]
pub fn load_language(store: &dyn KeyValueStore) -> Option<String> {
    store
        .get(LANGUAGE_KEY)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
}

/// Persist the active locale code.
///
/// # Errors
/// Returns [`StorageError::Write`] when the store rejects the value.
pub fn persist_language(store: &dyn KeyValueStore, code: &str) -> Result<(), StorageError> {
    store.set(LANGUAGE_KEY, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::telemetry::{MemorySink, subscriber};
    use tracing::Level;

    /// Store whose token entry cannot be removed.
    struct StickyTokenStore(MemoryStore);

    impl KeyValueStore for StickyTokenStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if key == TOKEN_KEY {
                return Err(StorageError::Remove {
                    key: key.to_string(),
                    detail: "SecurityError".to_string(),
                });
            }
            self.0.remove(key)
        }
    }

    fn sample_session() -> Session {
        Session {
            token: "tok".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "ana@example.com".to_string(),
                ..User::default()
            },
        }
    }

    #[test]
    fn session_round_trips_through_store() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        persist_session(&store, &sample_session())?;
        assert_eq!(load_session(&store), Some(sample_session()));
        clear_session(&store);
        assert!(!store.contains(TOKEN_KEY));
        assert!(!store.contains(USER_KEY));
        assert_eq!(load_session(&store), None);
        Ok(())
    }

    #[test]
    fn failed_removal_is_logged_and_user_still_cleared() -> Result<(), StorageError> {
        let inner = MemoryStore::new();
        let store = StickyTokenStore(inner.clone());
        persist_session(&store, &sample_session())?;
        let sink = MemorySink::new();
        tracing::subscriber::with_default(subscriber(sink.clone(), Level::DEBUG), || {
            clear_session(&store);
        });
        assert!(inner.contains(TOKEN_KEY));
        assert!(!inner.contains(USER_KEY));
        let warnings = sink.lines_at(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("stored session value not removed"), "{}", warnings[0]);
        assert!(warnings[0].contains("key=\"token\""), "{}", warnings[0]);
        Ok(())
    }

    #[test]
    fn corrupt_user_reads_as_no_session() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
        assert_eq!(load_session(&store), None);
        let blank = MemoryStore::with_entries([(TOKEN_KEY, " "), (USER_KEY, "{}")]);
        assert_eq!(load_session(&blank), None);
    }

    #[test]
    fn language_is_trimmed() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        assert_eq!(load_language(&store), None);
        persist_language(&store, " de ")?;
        assert_eq!(load_language(&store), Some("de".to_string()));
        Ok(())
    }
}
