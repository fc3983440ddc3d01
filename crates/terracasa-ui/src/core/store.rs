//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Search pages keep their controllers here so results survive navigation.
//! - Session changes go through helpers that also update local storage.

use crate::core::auth::{AuthState, Session};
use crate::core::storage::{KeyValueStore, StorageError, clear_session, load_session, persist_session};
use crate::features::countries::state::CountriesState;
use crate::features::listing::state::ListingWizard;
use crate::features::network::state::NetworkState;
use crate::features::properties::state::PropertiesState;
use crate::i18n::TranslationProvider;
use terracasa_api_models::User;
use tracing::{info, warn};
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Authentication state.
    pub auth: AuthState,
    /// Active locale and bundles.
    pub i18n: TranslationProvider,
    /// Property search page.
    pub properties: PropertiesState,
    /// Partner network page.
    pub network: NetworkState,
    /// Country guides page.
    pub countries: CountriesState,
    /// Post-ad wizard.
    pub listing: ListingWizard,
}

impl AppStore {
    /// Restore the session persisted in `storage`.
    pub fn restore_session(&mut self, storage: &dyn KeyValueStore) {
        self.auth = AuthState::from_session(load_session(storage));
    }

    /// Adopt a freshly issued session and persist it.
    ///
    /// The in-memory state is updated even when persisting fails.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the session could not be written.
    pub fn sign_in(
        &mut self,
        storage: &dyn KeyValueStore,
        session: Session,
    ) -> Result<(), StorageError> {
        let persisted = persist_session(storage, &session);
        info!(user = %session.user.id, "signed in");
        self.auth = AuthState::from_session(Some(session));
        persisted
    }

    /// Forget the session everywhere.
    pub fn sign_out(&mut self, storage: &dyn KeyValueStore) {
        clear_session(storage);
        self.auth = AuthState::Anonymous;
        self.listing = ListingWizard::default();
    }

    /// Replace the cached user while keeping the token.
    pub fn update_user(&mut self, storage: &dyn KeyValueStore, user: User) {
        let AuthState::SignedIn(session) = &mut self.auth else {
            return;
        };
        session.user = user;
        if let Err(err) = persist_session(storage, session) {
            warn!(error = %err, "failed to persist updated user");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{MemoryStore, TOKEN_KEY, USER_KEY};

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "ana@example.com".to_string(),
                ..User::default()
            },
        }
    }

    #[test]
    fn sign_in_persists_and_restores() -> Result<(), StorageError> {
        let storage = MemoryStore::new();
        let mut store = AppStore::default();
        store.sign_in(&storage, session())?;
        assert!(store.auth.has_credentials());

        let mut restored = AppStore::default();
        restored.restore_session(&storage);
        assert_eq!(restored.auth, store.auth);
        Ok(())
    }

    #[test]
    fn sign_out_clears_storage_and_wizard() -> Result<(), StorageError> {
        let storage = MemoryStore::new();
        let mut store = AppStore::default();
        store.sign_in(&storage, session())?;
        store.listing.form.title = "Draft".to_string();
        store.sign_out(&storage);
        assert_eq!(store.auth, AuthState::Anonymous);
        assert!(!storage.contains(TOKEN_KEY));
        assert!(!storage.contains(USER_KEY));
        assert!(store.listing.form.title.is_empty());
        Ok(())
    }

    #[test]
    fn user_updates_keep_the_token() -> Result<(), StorageError> {
        let storage = MemoryStore::new();
        let mut store = AppStore::default();
        store.update_user(&storage, User::default());
        assert_eq!(store.auth, AuthState::Anonymous);

        store.sign_in(&storage, session())?;
        let mut user = session().user;
        user.base_city = Some("Porto".to_string());
        store.update_user(&storage, user);
        assert_eq!(store.auth.token(), Some("tok-1"));
        let restored = load_session(&storage).map(|s| s.user.base_city);
        assert_eq!(restored, Some(Some("Porto".to_string())));
        Ok(())
    }
}
