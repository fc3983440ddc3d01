//! Pure form-normalization helpers shared by the search and listing forms.
//!
//! Form inputs arrive as raw strings. These helpers trim, parse and convert
//! them into typed optional values, treating only blank input as absent so
//! that an explicit `0` survives normalization.

use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;

static NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?"));

/// Errors raised while normalizing filter or form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A required value is blank.
    #[error("value required")]
    Required {
        /// Form field name.
        field: &'static str,
    },
    /// The value is not a number.
    #[error("invalid number")]
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// The value is below zero.
    #[error("negative value")]
    Negative {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// A range minimum exceeds its maximum.
    #[error("range minimum exceeds maximum")]
    InvertedRange {
        /// Field holding the minimum.
        min_field: &'static str,
        /// Field holding the maximum.
        max_field: &'static str,
    },
    /// A select received a value outside its options.
    #[error("unknown option")]
    UnknownOption {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
}

impl FilterError {
    /// Field the error should be shown next to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidNumber { field, .. }
            | Self::Negative { field, .. }
            | Self::UnknownOption { field, .. } => *field,
            Self::InvertedRange { min_field, .. } => *min_field,
        }
    }

    /// Translation key for the inline message.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Required { .. } => "validation.required",
            Self::InvalidNumber { .. } => "validation.number",
            Self::Negative { .. } => "validation.nonNegative",
            Self::InvertedRange { .. } => "validation.range",
            Self::UnknownOption { .. } => "validation.option",
        }
    }
}

/// Trimmed text, or `None` when blank.
#[must_use]
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Upper-cased, trimmed country code, or `None` when blank.
#[must_use]
pub fn normalize_country_code(raw: &str) -> Option<String> {
    normalize_text(raw).map(|code| code.to_ascii_uppercase())
}

/// Parse an optional non-negative decimal.
///
/// # Errors
/// Returns [`FilterError::InvalidNumber`] for unparsable input and
/// [`FilterError::Negative`] for values below zero.
pub fn parse_optional_f64(field: &'static str, raw: &str) -> Result<Option<f64>, FilterError> {
    let Some(text) = normalize_text(raw) else {
        return Ok(None);
    };
    let value = text
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FilterError::InvalidNumber {
            field,
            value: text.clone(),
        })?;
    if value < 0.0 {
        return Err(FilterError::Negative { field, value: text });
    }
    Ok(Some(value))
}

/// Parse an optional non-negative integer.
///
/// # Errors
/// Returns [`FilterError::Negative`] for a leading minus sign and
/// [`FilterError::InvalidNumber`] for anything else that is not a `u32`.
pub fn parse_optional_u32(field: &'static str, raw: &str) -> Result<Option<u32>, FilterError> {
    let Some(text) = normalize_text(raw) else {
        return Ok(None);
    };
    if text.starts_with('-') {
        return Err(FilterError::Negative { field, value: text });
    }
    text.parse::<u32>()
        .map(Some)
        .map_err(|_| FilterError::InvalidNumber { field, value: text })
}

/// Convert an optional major-unit amount (e.g. euros) into minor units, rounded.
///
/// # Errors
/// Propagates [`parse_optional_f64`] failures and rejects amounts that do not fit in `i64`.
#[allow(clippy::cast_possible_truncation)]
pub fn major_to_minor_units(field: &'static str, raw: &str) -> Result<Option<i64>, FilterError> {
    let Some(amount) = parse_optional_f64(field, raw)? else {
        return Ok(None);
    };
    let minor = (amount * 100.0).round();
    if minor >= 9.0e18 {
        return Err(FilterError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        });
    }
    Ok(Some(minor as i64))
}

/// Reject a range whose minimum exceeds its maximum.
///
/// # Errors
/// Returns [`FilterError::InvertedRange`] when both bounds are set and `min > max`.
pub fn check_range<T: PartialOrd>(
    min_field: &'static str,
    min: Option<T>,
    max_field: &'static str,
    max: Option<T>,
) -> Result<(), FilterError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FilterError::InvertedRange {
            min_field,
            max_field,
        }),
        _ => Ok(()),
    }
}

/// First number found in free text (`"approx. 2,5 km"` → `2.5`).
#[must_use]
pub fn extract_number(raw: &str) -> Option<f64> {
    let pattern = NUMBER.as_ref().ok()?;
    let found = pattern.find(raw)?;
    found.as_str().replace(',', ".").parse().ok()
}

/// Ordered query-string builder.
///
/// Only `None` is dropped; explicit zeros and `false` values are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter when present.
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `key` was pushed.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no parameters were pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    /// Percent-encoded `k=v&k=v` string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path?query`, or `path` when empty.
    #[must_use]
    pub fn with_path(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_country_normalization() {
        assert_eq!(normalize_text("  "), None);
        assert_eq!(normalize_text(" Valencia "), Some("Valencia".to_string()));
        assert_eq!(normalize_country_code(" es "), Some("ES".to_string()));
        assert_eq!(normalize_country_code(""), None);
    }

    #[test]
    fn minor_units_keep_zero_and_round() -> Result<(), FilterError> {
        assert_eq!(major_to_minor_units("minPrice", "1000")?, Some(100_000));
        assert_eq!(major_to_minor_units("minPrice", "0")?, Some(0));
        assert_eq!(major_to_minor_units("minPrice", "19.999")?, Some(2000));
        assert_eq!(major_to_minor_units("minPrice", " ")?, None);
        Ok(())
    }

    #[test]
    fn invalid_numbers_are_reported_per_field() {
        assert_eq!(
            major_to_minor_units("maxPrice", "lots"),
            Err(FilterError::InvalidNumber {
                field: "maxPrice",
                value: "lots".to_string()
            })
        );
        let err = parse_optional_u32("bedrooms", "-1");
        assert!(matches!(err, Err(FilterError::Negative { field: "bedrooms", .. })));
        assert_eq!(parse_optional_u32("bedrooms", "0"), Ok(Some(0)));
        assert!(parse_optional_f64("area", "NaN").is_err());
    }

    #[test]
    fn ranges_must_not_be_inverted() {
        assert!(check_range("min", Some(5), "max", Some(4)).is_err());
        assert!(check_range("min", Some(4), "max", Some(4)).is_ok());
        assert!(check_range::<u32>("min", None, "max", Some(1)).is_ok());
        let err = FilterError::InvertedRange {
            min_field: "minAreaSqm",
            max_field: "maxAreaSqm",
        };
        assert_eq!(err.field(), "minAreaSqm");
        assert_eq!(err.message_key(), "validation.range");
    }

    #[test]
    fn numbers_are_extracted_from_free_text() {
        assert_eq!(extract_number("approx. 300 m"), Some(300.0));
        assert_eq!(extract_number("2,5 km to the marina"), Some(2.5));
        assert_eq!(extract_number("15 min, 20 by bus"), Some(15.0));
        assert_eq!(extract_number("walking distance"), None);
    }

    #[test]
    fn query_params_keep_order_and_encode() {
        let mut params = QueryParams::new();
        params
            .push("sort", "newest")
            .push_opt("city", Some("Sant Joan d'Alacant"))
            .push_opt::<u32>("bedrooms", None)
            .push_opt("minPriceCents", Some(0))
            .push_opt("hasPool", Some(false));
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("minPriceCents"), Some("0"));
        assert!(!params.contains("bedrooms"));
        assert_eq!(
            params.with_path("/properties"),
            "/properties?sort=newest&city=Sant%20Joan%20d%27Alacant&minPriceCents=0&hasPool=false"
        );
        assert_eq!(QueryParams::new().with_path("/partners"), "/partners");
    }
}
