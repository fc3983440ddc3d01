//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The client reads the token from storage, so sign-in never rebuilds it.

use crate::core::config::UiConfig;
use crate::core::storage::KeyValueStore;
use crate::services::api::ApiClient;
use std::rc::Rc;
use yew::Callback;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    /// Create a new context from the resolved configuration.
    pub(crate) fn new(
        config: UiConfig,
        storage: Rc<dyn KeyValueStore>,
        on_unauthorized: Callback<()>,
    ) -> Self {
        Self {
            client: Rc::new(ApiClient::new(config, storage, on_unauthorized)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
