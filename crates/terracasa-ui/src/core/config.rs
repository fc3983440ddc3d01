//! Build-time UI configuration.
//!
//! # Design
//! - Values are resolved once at startup and passed around explicitly.
//! - The API base URL is baked in at compile time via `TERRACASA_API_BASE_URL`.
//! - Page sizes and the featured rating are constants read by the search profiles.

use tracing::Level;

/// Base URL used when no override is compiled in.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// Page size for the property search.
pub const PROPERTIES_PAGE_SIZE: u32 = 6;
/// Page size for the partner network search.
pub const PARTNERS_PAGE_SIZE: u32 = 24;
/// Page size for partner reviews.
pub const REVIEWS_PAGE_SIZE: u32 = 10;
/// Minimum rating for partners shown before any explicit search.
pub const FEATURED_PARTNER_MIN_RATING: f64 = 4.5;
/// Route the API client redirects to after a 401.
pub const LOGIN_ROUTE: &str = "/login";

/// Resolved UI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// API root without a trailing slash.
    pub api_base_url: String,
    /// Login route path.
    pub login_route: String,
    /// Maximum level forwarded to the log sink.
    pub log_level: Level,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl UiConfig {
    /// Configuration from the compile-time environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("TERRACASA_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Configuration pointing at an explicit API root.
    #[must_use]
    pub fn with_base_url(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            api_base_url,
            login_route: LOGIN_ROUTE.to_string(),
            log_level: default_log_level(),
        }
    }

    /// Absolute URL for an API path (with or without a leading slash).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// `debug` for debug builds, `info` otherwise.
#[must_use]
pub const fn default_log_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let config = UiConfig::with_base_url(" https://api.terracasa.eu/api/ ");
        assert_eq!(config.api_base_url, "https://api.terracasa.eu/api");
        assert_eq!(
            config.endpoint("/properties"),
            "https://api.terracasa.eu/api/properties"
        );
        assert_eq!(config.endpoint("me"), "https://api.terracasa.eu/api/me");
    }

    #[test]
    fn blank_base_url_uses_default() {
        let config = UiConfig::with_base_url("   ");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn search_profiles_page_with_configured_sizes() {
        use crate::core::search::SearchController;
        use crate::features::network::state::PartnerSearch;
        use crate::features::partners::state::ReviewFeed;
        use crate::features::properties::state::PropertySearch;

        assert_eq!(SearchController::<PropertySearch>::new().page_size(), PROPERTIES_PAGE_SIZE);
        assert_eq!(SearchController::<PartnerSearch>::new().page_size(), PARTNERS_PAGE_SIZE);
        assert_eq!(SearchController::<ReviewFeed>::new().page_size(), REVIEWS_PAGE_SIZE);
    }
}
