//! Translation bundles fetched from the static `/i18n` directory.

use crate::i18n::{BundleSource, I18nError, LocaleCode, TranslationBundle};
use async_trait::async_trait;
use gloo_net::http::Request;

/// Fetches `{base}/{code}.json`.
#[derive(Clone, Debug)]
pub struct HttpBundleSource {
    base: String,
}

impl HttpBundleSource {
    /// Source rooted at `base` (e.g. `/i18n`).
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HttpBundleSource {
    fn default() -> Self {
        Self::new("/i18n")
    }
}

#[async_trait(?Send)]
impl BundleSource for HttpBundleSource {
    async fn fetch(&self, locale: LocaleCode) -> Result<TranslationBundle, I18nError> {
        let unavailable = |detail: String| I18nError::Unavailable { locale, detail };
        let url = format!("{}/{}.json", self.base, locale.code());
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        if !response.ok() {
            return Err(unavailable(format!("status {}", response.status())));
        }
        let raw = response
            .text()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        TranslationBundle::parse(locale, &raw)
    }
}
