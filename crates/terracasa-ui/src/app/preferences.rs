//! Browser persistence for the session and locale preference.

use crate::core::storage::{KeyValueStore, StorageError};
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use tracing::warn;

/// [`KeyValueStore`] over `window.localStorage`, storing raw strings.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StorageError::Remove {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }
}

/// Browser UI language tag, e.g. `de-AT`.
pub(crate) fn browser_language() -> Option<String> {
    window().navigator().language()
}

/// Full-page navigation, used when the session is rejected mid-request.
pub(crate) fn redirect_to(path: &str) {
    if let Err(err) = window().location().set_href(path) {
        warn!(path, error = ?err, "redirect failed");
    }
}
