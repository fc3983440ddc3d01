//! Inline form validation.
//!
//! Errors are collected per field as translation keys so views can render
//! them in the active locale. Backend field errors are merged in verbatim.

use crate::core::logic::FilterError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use terracasa_api_models::FieldErrorEntry;

static EMAIL: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Key for a missing required value.
pub const REQUIRED: &str = "validation.required";
/// Key for a malformed email address.
pub const INVALID_EMAIL: &str = "validation.email";
/// Key for a password below the minimum length.
pub const PASSWORD_TOO_SHORT: &str = "validation.passwordLength";
/// Key for mismatched password confirmation.
pub const PASSWORD_MISMATCH: &str = "validation.passwordMatch";
/// Key for a URL that is not http(s).
pub const INVALID_URL: &str = "validation.url";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Per-field validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<String, String>,
}

impl FieldErrors {
    /// No errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error per field wins.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.entries
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Whether `field` has an error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clear the error for one field, e.g. after the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.entries.remove(field);
    }

    /// `(field, message)` pairs ordered by field.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Merge field errors returned by the backend.
    pub fn merge_backend(&mut self, entries: &[FieldErrorEntry]) {
        for entry in entries {
            self.insert(&entry.field, &entry.message);
        }
    }

    /// Record a normalization failure.
    pub fn push_filter_error(&mut self, error: &FilterError) {
        self.insert(error.field(), error.message_key());
    }

    /// Record [`REQUIRED`] when `value` is blank; returns whether it was present.
    pub fn require(&mut self, field: &str, value: &str) -> bool {
        let present = !value.trim().is_empty();
        if !present {
            self.insert(field, REQUIRED);
        }
        present
    }

    /// Require a well-formed email address.
    pub fn require_email(&mut self, field: &str, value: &str) {
        if self.require(field, value) && !is_valid_email(value) {
            self.insert(field, INVALID_EMAIL);
        }
    }

    /// Require a password of at least [`MIN_PASSWORD_LENGTH`] characters.
    pub fn require_password(&mut self, field: &str, value: &str) {
        if self.require(field, value) && value.chars().count() < MIN_PASSWORD_LENGTH {
            self.insert(field, PASSWORD_TOO_SHORT);
        }
    }

    /// `Ok` when no errors were recorded.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Whether `value` looks like an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(value.trim()))
}

/// Whether `value` is an absolute http(s) URL.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("email", REQUIRED);
        errors.insert("email", INVALID_EMAIL);
        assert_eq!(errors.get("email"), Some(REQUIRED));
        errors.clear("email");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn email_and_password_rules() {
        let mut errors = FieldErrors::new();
        errors.require_email("email", "ana@example");
        errors.require_password("password", "short");
        errors.require_email("backup", " ");
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
        assert_eq!(errors.get("password"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(errors.get("backup"), Some(REQUIRED));
        assert!(is_valid_email(" ana@example.com "));
    }

    #[test]
    fn backend_errors_merge_verbatim() {
        let mut errors = FieldErrors::new();
        errors.merge_backend(&[FieldErrorEntry {
            field: "title".to_string(),
            message: "Title too long".to_string(),
        }]);
        assert_eq!(errors.iter().collect::<Vec<_>>(), vec![("title", "Title too long")]);
    }

    #[test]
    fn urls_must_be_http() {
        assert!(is_http_url("https://cdn.terracasa.eu/a.png"));
        assert!(!is_http_url("ftp://x"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("javascript:alert(1)"));
    }
}
