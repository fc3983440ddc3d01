//! Translation context handed to every view.

use crate::core::storage::KeyValueStore;
use crate::core::store::AppStore;
use crate::i18n::{LoadStep, LocaleCode, TranslationBundle, run_load};
use crate::services::bundles::HttpBundleSource;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::Dispatch;

/// Active bundle snapshot; views translate through it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct I18nCtx {
    /// Selected locale.
    pub locale: LocaleCode,
    /// Bundle used for lookups.
    pub bundle: Rc<TranslationBundle>,
    /// A bundle fetch is outstanding.
    pub loading: bool,
}

impl Default for I18nCtx {
    fn default() -> Self {
        let locale = crate::i18n::DEFAULT_LOCALE;
        Self {
            locale,
            bundle: Rc::new(TranslationBundle::empty(locale)),
            loading: true,
        }
    }
}

impl I18nCtx {
    /// Translate `key`.
    pub(crate) fn t(&self, key: &str) -> String {
        self.bundle.t(key)
    }

    /// Translate `key` with `{name}` parameters.
    pub(crate) fn tr(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.bundle.translate(key, params)
    }
}

/// Translation context, or an empty bundle outside the provider.
#[hook]
pub(crate) fn use_i18n() -> I18nCtx {
    use_context::<I18nCtx>().unwrap_or_default()
}

/// Fetch bundles for `step` until the provider in the store settles.
pub(crate) fn drive_locale_load(step: LoadStep) {
    if !matches!(step, LoadStep::Fetch(_)) {
        return;
    }
    yew::platform::spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        let source = HttpBundleSource::default();
        run_load(&source, step, |ticket, result| {
            let mut next = LoadStep::Stale;
            dispatch.reduce_mut(|store| next = store.i18n.complete(ticket, result));
            next
        })
        .await;
    });
}

/// Switch the UI language, persisting the choice.
pub(crate) fn change_language(code: &str, storage: &dyn KeyValueStore) {
    let mut step = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        step = store.i18n.change_language(code, storage);
    });
    if let Some(step) = step {
        drive_locale_load(step);
    }
}
