//! Locale selection, bundle caching and fallback.
//!
//! # Design
//! - The provider is a plain value owned by the app store; no global state.
//! - Loading is split into a synchronous [`TranslationProvider::load`] that answers from the
//!   cache or hands out a [`LoadTicket`], and [`TranslationProvider::complete`] that commits a
//!   fetched bundle. Tickets carry a generation so only the latest request commits.
//! - A failed non-default locale falls back to the default bundle while the requested locale
//!   stays selected; a failed default commits an empty bundle.

use super::{DEFAULT_LOCALE, I18nError, LocaleCode, TranslationBundle};
use crate::core::storage::{KeyValueStore, persist_language};
use async_trait::async_trait;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Pending fetch handed out by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    /// Locale whose bundle must be fetched.
    pub locale: LocaleCode,
    /// Provider generation at issue time.
    pub generation: u64,
}

/// What the caller must do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStep {
    /// The active bundle is settled.
    Ready,
    /// Fetch the ticket's bundle and pass it to [`TranslationProvider::complete`].
    Fetch(LoadTicket),
    /// The ticket was superseded by a newer load.
    Stale,
}

/// Origin of locale bundles.
#[async_trait(?Send)]
pub trait BundleSource {
    /// Fetch and parse the bundle for `locale`.
    async fn fetch(&self, locale: LocaleCode) -> Result<TranslationBundle, I18nError>;
}

/// Bundles compiled into the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedBundles;

#[async_trait(?Send)]
impl BundleSource for EmbeddedBundles {
    async fn fetch(&self, locale: LocaleCode) -> Result<TranslationBundle, I18nError> {
        TranslationBundle::embedded(locale)
    }
}

/// Active locale plus cached bundles.
#[derive(Clone, Debug)]
pub struct TranslationProvider {
    active: LocaleCode,
    bundle: Rc<TranslationBundle>,
    cache: HashMap<LocaleCode, Rc<TranslationBundle>>,
    loading: bool,
    generation: u64,
}

impl Default for TranslationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TranslationProvider {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active
            && self.loading == other.loading
            && self.generation == other.generation
            && (Rc::ptr_eq(&self.bundle, &other.bundle) || self.bundle == other.bundle)
    }
}

impl TranslationProvider {
    /// Provider on the default locale with an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: DEFAULT_LOCALE,
            bundle: Rc::new(TranslationBundle::empty(DEFAULT_LOCALE)),
            cache: HashMap::new(),
            loading: false,
            generation: 0,
        }
    }

    /// Pick the startup locale: user preference, then stored value, then default.
    ///
    /// Both candidates may be full language tags (`de-AT`); only the primary subtag counts.
    pub fn initialize(&mut self, user_pref: Option<&str>, stored: Option<&str>) -> LoadStep {
        let locale = [user_pref, stored]
            .into_iter()
            .flatten()
            .find_map(LocaleCode::from_lang_tag)
            .unwrap_or(DEFAULT_LOCALE);
        self.load(locale)
    }

    /// Activate `locale`, answering from the cache when possible.
    pub fn load(&mut self, locale: LocaleCode) -> LoadStep {
        self.generation = self.generation.wrapping_add(1);
        self.active = locale;
        if let Some(cached) = self.cache.get(&locale) {
            self.bundle = Rc::clone(cached);
            self.loading = false;
            return LoadStep::Ready;
        }
        self.loading = true;
        debug!(locale = locale.code(), "locale bundle requested");
        LoadStep::Fetch(LoadTicket {
            locale,
            generation: self.generation,
        })
    }

    /// [`Self::load`] for a raw code; unsupported codes load the default.
    pub fn load_code(&mut self, raw: &str) -> LoadStep {
        self.load(LocaleCode::parse(raw).unwrap_or(DEFAULT_LOCALE))
    }

    /// Commit the outcome of a fetch.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<TranslationBundle, I18nError>,
    ) -> LoadStep {
        if ticket.generation != self.generation {
            return LoadStep::Stale;
        }
        match result {
            Ok(bundle) => {
                let bundle = Rc::new(bundle);
                self.cache.insert(ticket.locale, Rc::clone(&bundle));
                self.bundle = bundle;
                self.loading = false;
                LoadStep::Ready
            }
            Err(err) if ticket.locale != DEFAULT_LOCALE => {
                warn!(
                    locale = ticket.locale.code(),
                    error = %err,
                    "locale bundle failed; falling back to default"
                );
                if let Some(cached) = self.cache.get(&DEFAULT_LOCALE) {
                    self.bundle = Rc::clone(cached);
                    self.loading = false;
                    return LoadStep::Ready;
                }
                self.generation = self.generation.wrapping_add(1);
                LoadStep::Fetch(LoadTicket {
                    locale: DEFAULT_LOCALE,
                    generation: self.generation,
                })
            }
            Err(err) => {
                error!(error = %err, "default locale bundle failed; rendering keys");
                self.bundle = Rc::new(TranslationBundle::empty(DEFAULT_LOCALE));
                self.loading = false;
                LoadStep::Ready
            }
        }
    }

    /// Switch to a supported locale and persist the choice.
    ///
    /// Returns `None` and changes nothing when `raw` is not supported.
    pub fn change_language(&mut self, raw: &str, store: &dyn KeyValueStore) -> Option<LoadStep> {
        let locale = LocaleCode::parse(raw)?;
        if let Err(err) = persist_language(store, locale.code()) {
            warn!(locale = locale.code(), error = %err, "failed to persist language");
        }
        Some(self.load(locale))
    }

    /// Translate through the active bundle.
    #[must_use]
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.bundle.translate(key, params)
    }

    /// Translate without parameters.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.bundle.t(key)
    }

    /// Selected locale.
    #[must_use]
    pub const fn active(&self) -> LocaleCode {
        self.active
    }

    /// Bundle currently used for lookups.
    #[must_use]
    pub fn bundle(&self) -> Rc<TranslationBundle> {
        Rc::clone(&self.bundle)
    }

    /// A fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether `locale` has been loaded before.
    #[must_use]
    pub fn is_cached(&self, locale: LocaleCode) -> bool {
        self.cache.contains_key(&locale)
    }
}

/// Drive fetches until the provider settles.
///
/// `apply` forwards each result to [`TranslationProvider::complete`], wherever the provider lives.
pub async fn run_load<S, F>(source: &S, mut step: LoadStep, mut apply: F) -> LoadStep
where
    S: BundleSource + ?Sized,
    F: FnMut(LoadTicket, Result<TranslationBundle, I18nError>) -> LoadStep,
{
    while let LoadStep::Fetch(ticket) = step {
        let result = source.fetch(ticket.locale).await;
        step = apply(ticket, result);
    }
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{LANGUAGE_KEY, MemoryStore};
    use std::cell::RefCell;
    use std::collections::HashSet;

    struct FlakySource {
        failing: HashSet<LocaleCode>,
        calls: RefCell<Vec<LocaleCode>>,
    }

    impl FlakySource {
        fn failing(locales: &[LocaleCode]) -> Self {
            Self {
                failing: locales.iter().copied().collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl BundleSource for FlakySource {
        async fn fetch(&self, locale: LocaleCode) -> Result<TranslationBundle, I18nError> {
            self.calls.borrow_mut().push(locale);
            if self.failing.contains(&locale) {
                Err(I18nError::Unavailable {
                    locale,
                    detail: "offline".to_string(),
                })
            } else {
                TranslationBundle::embedded(locale)
            }
        }
    }

    #[tokio::test]
    async fn initialize_prefers_user_then_storage() {
        let mut provider = TranslationProvider::new();
        let step = provider.initialize(Some("xx"), Some("tr"));
        let settled = run_load(&EmbeddedBundles, step, |ticket, result| {
            provider.complete(ticket, result)
        })
        .await;
        assert_eq!(settled, LoadStep::Ready);
        assert_eq!(provider.active(), LocaleCode::Tr);
        assert!(!provider.is_loading());
        assert_eq!(provider.bundle().locale(), LocaleCode::Tr);
    }

    #[tokio::test]
    async fn initialize_accepts_browser_language_tags() {
        let mut provider = TranslationProvider::new();
        let step = provider.initialize(None, Some("de-DE"));
        assert!(matches!(step, LoadStep::Fetch(ticket) if ticket.locale == LocaleCode::De));
        let settled = run_load(&EmbeddedBundles, step, |ticket, result| {
            provider.complete(ticket, result)
        })
        .await;
        assert_eq!(settled, LoadStep::Ready);
        assert_eq!(provider.active(), LocaleCode::De);
        assert_eq!(provider.t("nav.login"), "Anmelden");
    }

    #[tokio::test]
    async fn failed_locale_falls_back_to_default() {
        let source = FlakySource::failing(&[LocaleCode::Ru]);
        let mut provider = TranslationProvider::new();
        let step = provider.load(LocaleCode::Ru);
        run_load(&source, step, |ticket, result| provider.complete(ticket, result)).await;
        assert_eq!(provider.active(), LocaleCode::Ru);
        assert_eq!(provider.bundle().locale(), LocaleCode::En);
        assert!(!provider.is_cached(LocaleCode::Ru));
        assert_eq!(*source.calls.borrow(), vec![LocaleCode::Ru, LocaleCode::En]);
    }

    #[tokio::test]
    async fn failed_default_renders_keys() {
        let source = FlakySource::failing(&[LocaleCode::En, LocaleCode::De]);
        let mut provider = TranslationProvider::new();
        let step = provider.load(LocaleCode::De);
        let settled =
            run_load(&source, step, |ticket, result| provider.complete(ticket, result)).await;
        assert_eq!(settled, LoadStep::Ready);
        assert!(!provider.is_loading());
        assert!(provider.bundle().is_empty());
        assert_eq!(provider.t("nav.properties"), "nav.properties");
    }

    #[test]
    fn cached_locales_load_synchronously() -> Result<(), I18nError> {
        let mut provider = TranslationProvider::new();
        let LoadStep::Fetch(ticket) = provider.load(LocaleCode::Es) else {
            panic!("expected a fetch");
        };
        provider.complete(ticket, TranslationBundle::embedded(LocaleCode::Es));
        provider.load(LocaleCode::En);
        assert_eq!(provider.load(LocaleCode::Es), LoadStep::Ready);
        assert_eq!(provider.bundle().locale(), LocaleCode::Es);
        Ok(())
    }

    #[test]
    fn superseded_tickets_do_not_commit() -> Result<(), I18nError> {
        let mut provider = TranslationProvider::new();
        let LoadStep::Fetch(first) = provider.load(LocaleCode::De) else {
            panic!("expected a fetch");
        };
        let LoadStep::Fetch(second) = provider.load(LocaleCode::Fr) else {
            panic!("expected a fetch");
        };
        assert_eq!(
            provider.complete(second, TranslationBundle::embedded(LocaleCode::Fr)),
            LoadStep::Ready
        );
        assert_eq!(
            provider.complete(first, TranslationBundle::embedded(LocaleCode::De)),
            LoadStep::Stale
        );
        assert_eq!(provider.bundle().locale(), LocaleCode::Fr);
        assert_eq!(provider.active(), LocaleCode::Fr);
        Ok(())
    }

    #[test]
    fn unsupported_language_change_is_a_no_op() {
        let store = MemoryStore::new();
        let mut provider = TranslationProvider::new();
        let before = provider.clone();
        assert_eq!(provider.change_language("klingon", &store), None);
        assert_eq!(provider, before);
        assert!(!store.contains(LANGUAGE_KEY));

        assert!(matches!(
            provider.change_language("DE", &store),
            Some(LoadStep::Fetch(_))
        ));
        assert_eq!(store.get(LANGUAGE_KEY), Some("de".to_string()));
        assert_eq!(provider.active(), LocaleCode::De);
    }
}
