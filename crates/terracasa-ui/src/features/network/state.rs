//! Partner filter form, query and client-side refinements.

use crate::core::config::{FEATURED_PARTNER_MIN_RATING, PARTNERS_PAGE_SIZE};
use crate::core::logic::{FilterError, QueryParams, normalize_country_code, normalize_text};
use crate::core::search::{FilterForm, SearchController, SearchProfile, SearchQuery};
use terracasa_api_models::PartnerSummary;

/// Service categories offered in the filter, as `(value, label key)`.
pub const SERVICE_CATEGORIES: [(&str, &str); 8] = [
    ("Real Estate Agent", "network.categories.realEstateAgent"),
    ("Architect", "network.categories.architect"),
    ("Lawyer", "network.categories.lawyer"),
    ("Notary", "network.categories.notary"),
    ("Tax Advisor", "network.categories.taxAdvisor"),
    ("Financial Advisor", "network.categories.financialAdvisor"),
    ("Appraiser", "network.categories.appraiser"),
    ("Construction Company", "network.categories.constructionCompany"),
];

/// Raw partner filter inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartnerFilterForm {
    /// Country code.
    pub country: String,
    /// City name.
    pub city: String,
    /// Service category value.
    pub service_category: String,
    /// Spoken language code.
    pub language: String,
    /// Client-side refinements.
    pub refinements: PartnerRefinements,
}

/// Toggles applied to received partners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartnerRefinements {
    /// Only verified partners.
    pub verified_only: bool,
    /// Only partners rated at or above the featured threshold.
    pub top_rated: bool,
    /// Only partners who can start immediately.
    pub immediately_available: bool,
    /// Only partners reachable around the clock.
    pub available_247: bool,
}

/// Normalized partner filters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartnerQuery {
    /// Upper-case country code.
    pub country: Option<String>,
    /// Trimmed city.
    pub city: Option<String>,
    /// Service category.
    pub service_category: Option<String>,
    /// Lower-case language code.
    pub language: Option<String>,
    /// Minimum average rating, applied client-side.
    pub min_rating: Option<f64>,
    /// Only verified partners.
    pub verified_only: bool,
    /// Only immediately available partners.
    pub immediately_available: bool,
    /// Only partners available around the clock.
    pub available_247: bool,
}

impl PartnerQuery {
    /// Whether `partner` passes the client-side refinements.
    #[must_use]
    pub fn accepts(&self, partner: &PartnerSummary) -> bool {
        self.min_rating
            .is_none_or(|min| partner.rating_average >= min)
            && (!self.verified_only || partner.is_verified)
            && (!self.immediately_available || partner.is_immediately_available)
            && (!self.available_247 || partner.is_available247)
    }
}

impl FilterForm for PartnerFilterForm {
    type Query = PartnerQuery;

    fn normalize(&self) -> Result<PartnerQuery, FilterError> {
        let refinements = self.refinements;
        Ok(PartnerQuery {
            country: normalize_country_code(&self.country),
            city: normalize_text(&self.city),
            service_category: normalize_text(&self.service_category),
            language: normalize_text(&self.language).map(|code| code.to_ascii_lowercase()),
            min_rating: refinements.top_rated.then_some(FEATURED_PARTNER_MIN_RATING),
            verified_only: refinements.verified_only,
            immediately_available: refinements.immediately_available,
            available_247: refinements.available_247,
        })
    }
}

impl SearchQuery for PartnerQuery {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("country", self.country.as_deref())
            .push_opt("city", self.city.as_deref())
            .push_opt("serviceCategory", self.service_category.as_deref())
            .push_opt("language", self.language.as_deref());
        params
    }
}

/// Partner search profile; the baseline shows featured partners only.
#[derive(Clone, Copy, Debug)]
pub struct PartnerSearch;

impl SearchProfile for PartnerSearch {
    type Form = PartnerFilterForm;
    type Query = PartnerQuery;
    type Item = PartnerSummary;

    const NAME: &'static str = "partners";
    const DEFAULT_PAGE_SIZE: u32 = PARTNERS_PAGE_SIZE;

    fn baseline() -> PartnerQuery {
        PartnerQuery {
            min_rating: Some(FEATURED_PARTNER_MIN_RATING),
            ..PartnerQuery::default()
        }
    }

    fn transform(query: &PartnerQuery, items: Vec<PartnerSummary>) -> Vec<PartnerSummary> {
        items
            .into_iter()
            .filter(|partner| query.accepts(partner))
            .collect()
    }
}

/// Controller for the network page.
pub type NetworkState = SearchController<PartnerSearch>;

/// `City, CC` location line for a partner card.
#[must_use]
pub fn partner_location(partner: &PartnerSummary) -> Option<String> {
    let parts: Vec<&str> = [partner.base_city.as_deref(), partner.base_country.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Initials shown when a partner has no avatar.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(id: &str, rating: f64, verified: bool) -> PartnerSummary {
        PartnerSummary {
            id: id.to_string(),
            display_name: format!("Partner {id}"),
            rating_average: rating,
            is_verified: verified,
            ..PartnerSummary::default()
        }
    }

    #[test]
    fn baseline_keeps_top_rated_partners() {
        let items = vec![partner("a", 4.9, false), partner("b", 4.4, true), partner("c", 4.5, false)];
        let kept = PartnerSearch::transform(&PartnerSearch::baseline(), items);
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(PartnerSearch::baseline().to_params().is_empty());
    }

    #[test]
    fn refinements_filter_client_side() -> Result<(), FilterError> {
        let form = PartnerFilterForm {
            country: " tr".to_string(),
            language: "DE".to_string(),
            refinements: PartnerRefinements {
                verified_only: true,
                ..PartnerRefinements::default()
            },
            ..PartnerFilterForm::default()
        };
        let query = form.normalize()?;
        let params = query.to_params();
        assert_eq!(params.get("country"), Some("TR"));
        assert_eq!(params.get("language"), Some("de"));
        assert!(!params.contains("verifiedOnly"));
        let kept = PartnerSearch::transform(&query, vec![partner("a", 3.0, true), partner("b", 5.0, false)]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
        Ok(())
    }

    #[test]
    fn explicit_search_without_toggles_keeps_everyone() -> Result<(), FilterError> {
        let query = PartnerFilterForm::default().normalize()?;
        assert_eq!(query.min_rating, None);
        assert!(query.accepts(&partner("x", 0.0, false)));
        Ok(())
    }

    #[test]
    fn location_and_initials() {
        let mut card = partner("a", 4.0, false);
        assert_eq!(partner_location(&card), None);
        card.base_city = Some("Antalya".to_string());
        card.base_country = Some("TR".to_string());
        assert_eq!(partner_location(&card), Some("Antalya, TR".to_string()));
        assert_eq!(initials("ana maría ruiz"), "AM");
        assert_eq!(initials(""), "");
    }
}
