//! Lightweight JSON-backed translations with per-locale bundles.
//!
//! Bundles are nested JSON objects addressed by dotted keys
//! (`network.heroTitle`). Missing keys render as the key itself so gaps are
//! visible in the UI instead of silently blank.

pub mod provider;

pub use provider::{
    BundleSource, EmbeddedBundles, LoadStep, LoadTicket, TranslationProvider, run_load,
};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Supported UI locales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// German.
    De,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Russian.
    Ru,
    /// Turkish.
    Tr,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 6] {
        [Self::En, Self::De, Self::Es, Self::Fr, Self::Ru, Self::Tr]
    }

    #[must_use]
    /// Lowercase code used for storage and bundle file names.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Ru => "ru",
            Self::Tr => "tr",
        }
    }

    #[must_use]
    /// Native display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::Ru => "Русский",
            Self::Tr => "Türkçe",
        }
    }

    #[must_use]
    /// Exact supported code, case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::all()
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(raw))
    }

    #[must_use]
    /// Match a BCP 47 tag (`de-AT`) on its primary subtag.
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let base = tag.split(['-', '_']).next().unwrap_or_default();
        Self::parse(base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Errors raised while obtaining a locale bundle.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The bundle could not be fetched.
    #[error("locale bundle unavailable")]
    Unavailable {
        /// Requested locale.
        locale: LocaleCode,
        /// Transport detail.
        detail: String,
    },
    /// The bundle is not valid JSON.
    #[error("locale bundle is not valid json")]
    Parse {
        /// Requested locale.
        locale: LocaleCode,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The bundle root is not an object.
    #[error("locale bundle root must be an object")]
    NotAnObject {
        /// Requested locale.
        locale: LocaleCode,
    },
}

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationBundle {
    locale: LocaleCode,
    tree: Value,
}

impl TranslationBundle {
    /// Parse a bundle from JSON text.
    ///
    /// # Errors
    /// Returns [`I18nError::Parse`] for invalid JSON and [`I18nError::NotAnObject`]
    /// when the root is not an object.
    pub fn parse(locale: LocaleCode, raw: &str) -> Result<Self, I18nError> {
        let tree = serde_json::from_str(raw).map_err(|source| I18nError::Parse { locale, source })?;
        Self::from_value(locale, tree)
    }

    /// Wrap an already parsed tree.
    ///
    /// # Errors
    /// Returns [`I18nError::NotAnObject`] when the root is not an object.
    pub fn from_value(locale: LocaleCode, tree: Value) -> Result<Self, I18nError> {
        if tree.is_object() {
            Ok(Self { locale, tree })
        } else {
            Err(I18nError::NotAnObject { locale })
        }
    }

    /// Bundle compiled into the binary.
    ///
    /// # Errors
    /// Returns [`I18nError`] if the embedded JSON is malformed.
    pub fn embedded(locale: LocaleCode) -> Result<Self, I18nError> {
        Self::parse(locale, raw_locale(locale))
    }

    /// Bundle without strings; every key renders as itself.
    #[must_use]
    pub fn empty(locale: LocaleCode) -> Self {
        Self {
            locale,
            tree: Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    /// Locale backing this bundle.
    pub const fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Whether the bundle holds no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.as_object().is_none_or(serde_json::Map::is_empty)
    }

    /// Raw template at a dotted path, when it resolves to a string.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut node = &self.tree;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        node.as_str()
    }

    /// Translate `key`, substituting `{name}` placeholders from `params`.
    #[must_use]
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.lookup(key)
            .map_or_else(|| key.to_string(), |template| interpolate(template, params))
    }

    /// Translate `key` without parameters.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }

    /// Dotted paths of every string leaf, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.tree, String::new(), &mut keys);
        keys.sort();
        keys
    }
}

fn collect_keys(node: &Value, prefix: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                collect_keys(child, path, out);
            }
        }
        Value::String(_) => out.push(prefix),
        _ => {}
    }
}

/// Replace each `{name}` with its parameter in one pass.
///
/// Unknown placeholders stay verbatim and substituted values are not rescanned.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        if name.contains('{') {
            out.push('{');
            rest = after;
            continue;
        }
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::De => include_str!("../../i18n/de.json"),
        LocaleCode::Es => include_str!("../../i18n/es.json"),
        LocaleCode::Fr => include_str!("../../i18n/fr.json"),
        LocaleCode::Ru => include_str!("../../i18n/ru.json"),
        LocaleCode::Tr => include_str!("../../i18n/tr.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_parse_exactly() {
        assert_eq!(LocaleCode::parse(" DE "), Some(LocaleCode::De));
        assert_eq!(LocaleCode::parse("it"), None);
        assert_eq!(LocaleCode::parse("de-AT"), None);
        assert_eq!(LocaleCode::from_lang_tag("de-AT"), Some(LocaleCode::De));
        assert_eq!(LocaleCode::from_lang_tag("pt_BR"), None);
    }

    #[test]
    fn missing_key_renders_as_key() -> Result<(), I18nError> {
        let bundle = TranslationBundle::embedded(LocaleCode::Fr)?;
        assert_eq!(bundle.t("no.such.key"), "no.such.key");
        assert_eq!(bundle.t("nav"), "nav");
        assert_eq!(TranslationBundle::empty(LocaleCode::En).t("nav.home"), "nav.home");
        Ok(())
    }

    #[test]
    fn interpolation_is_single_pass() {
        let params = [("count", "{name}"), ("name", "Ana")];
        assert_eq!(
            interpolate("{count} results for {name}, {name}!", &params),
            "{name} results for Ana, Ana!"
        );
        assert_eq!(interpolate("{missing} {", &params), "{missing} {");
        assert_eq!(interpolate("{{name}}", &params), "{Ana}");
    }

    #[test]
    fn bundles_must_be_objects() {
        assert!(matches!(
            TranslationBundle::parse(LocaleCode::En, "[1]"),
            Err(I18nError::NotAnObject { .. })
        ));
        assert!(matches!(
            TranslationBundle::parse(LocaleCode::En, "{"),
            Err(I18nError::Parse { .. })
        ));
    }

    #[test]
    fn bundles_load_all_locales() -> Result<(), I18nError> {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::embedded(locale)?;
            assert_eq!(bundle.locale(), locale);
            assert!(!bundle.is_empty());
            assert_ne!(bundle.t("nav.properties"), "nav.properties");
        }
        Ok(())
    }
}
