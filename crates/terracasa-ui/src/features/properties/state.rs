//! Property search form, query and display helpers.

use crate::core::logic::{
    FilterError, QueryParams, check_range, major_to_minor_units, normalize_country_code,
    normalize_text, parse_optional_u32,
};
use crate::core::config::PROPERTIES_PAGE_SIZE;
use crate::core::search::{FilterForm, SearchController, SearchProfile, SearchQuery};
use terracasa_api_models::{Furnishing, PropertyAge, PropertySort, PropertySummary, PropertyType};

/// Raw property filter inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyFilterForm {
    /// Country code as typed or selected.
    pub country: String,
    /// City name.
    pub city: String,
    /// Property type wire value.
    pub property_type: String,
    /// Minimum price in major units.
    pub min_price: String,
    /// Maximum price in major units.
    pub max_price: String,
    /// Minimum bedrooms.
    pub bedrooms: String,
    /// Minimum living area.
    pub min_area_sqm: String,
    /// Maximum living area.
    pub max_area_sqm: String,
    /// Sort wire value; blank means newest.
    pub sort: String,
    /// Secondary filters.
    pub advanced: AdvancedPropertyFilters,
}

/// Secondary property filters shown in the "more filters" panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvancedPropertyFilters {
    /// Age bracket wire value.
    pub property_age: String,
    /// Sea view required.
    pub has_sea_view: bool,
    /// Pool required.
    pub has_pool: bool,
    /// Garden required.
    pub has_garden: bool,
    /// Parking required.
    pub has_parking: bool,
    /// Elevator required.
    pub has_elevator: bool,
    /// Furnishing wire value.
    pub furnished: String,
}

impl AdvancedPropertyFilters {
    /// Number of secondary filters in use, for the panel badge.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let selects = [&self.property_age, &self.furnished]
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .count();
        let toggles = [
            self.has_sea_view,
            self.has_pool,
            self.has_garden,
            self.has_parking,
            self.has_elevator,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count();
        selects + toggles
    }
}

/// Normalized property filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyQuery {
    /// Upper-case country code.
    pub country: Option<String>,
    /// Trimmed city.
    pub city: Option<String>,
    /// Property category.
    pub property_type: Option<PropertyType>,
    /// Minimum price in minor units.
    pub min_price_cents: Option<i64>,
    /// Maximum price in minor units.
    pub max_price_cents: Option<i64>,
    /// Minimum bedrooms.
    pub min_bedrooms: Option<u32>,
    /// Minimum living area.
    pub min_area_sqm: Option<u32>,
    /// Maximum living area.
    pub max_area_sqm: Option<u32>,
    /// Sort order.
    pub sort: PropertySort,
    /// Age bracket.
    pub property_age: Option<PropertyAge>,
    /// Sea view required.
    pub has_sea_view: bool,
    /// Pool required.
    pub has_pool: bool,
    /// Garden required.
    pub has_garden: bool,
    /// Parking required.
    pub has_parking: bool,
    /// Elevator required.
    pub has_elevator: bool,
    /// Furnishing level.
    pub furnished: Option<Furnishing>,
}

fn parse_select<T>(
    field: &'static str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, FilterError> {
    let Some(text) = normalize_text(raw) else {
        return Ok(None);
    };
    parse(&text)
        .map(Some)
        .ok_or(FilterError::UnknownOption { field, value: text })
}

impl FilterForm for PropertyFilterForm {
    type Query = PropertyQuery;

    fn normalize(&self) -> Result<PropertyQuery, FilterError> {
        let min_price_cents = major_to_minor_units("minPrice", &self.min_price)?;
        let max_price_cents = major_to_minor_units("maxPrice", &self.max_price)?;
        check_range("minPrice", min_price_cents, "maxPrice", max_price_cents)?;
        let min_area_sqm = parse_optional_u32("minAreaSqm", &self.min_area_sqm)?;
        let max_area_sqm = parse_optional_u32("maxAreaSqm", &self.max_area_sqm)?;
        check_range("minAreaSqm", min_area_sqm, "maxAreaSqm", max_area_sqm)?;
        let advanced = &self.advanced;
        Ok(PropertyQuery {
            country: normalize_country_code(&self.country),
            city: normalize_text(&self.city),
            property_type: parse_select("propertyType", &self.property_type, PropertyType::parse)?,
            min_price_cents,
            max_price_cents,
            min_bedrooms: parse_optional_u32("bedrooms", &self.bedrooms)?,
            min_area_sqm,
            max_area_sqm,
            sort: parse_select("sort", &self.sort, PropertySort::parse)?.unwrap_or_default(),
            property_age: parse_select("propertyAge", &advanced.property_age, PropertyAge::parse)?,
            has_sea_view: advanced.has_sea_view,
            has_pool: advanced.has_pool,
            has_garden: advanced.has_garden,
            has_parking: advanced.has_parking,
            has_elevator: advanced.has_elevator,
            furnished: parse_select("furnished", &advanced.furnished, Furnishing::parse)?,
        })
    }
}

impl SearchQuery for PropertyQuery {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("country", self.country.as_deref())
            .push_opt("city", self.city.as_deref())
            .push_opt("propertyType", self.property_type.map(PropertyType::as_str))
            .push_opt("minPriceCents", self.min_price_cents)
            .push_opt("maxPriceCents", self.max_price_cents)
            .push_opt("minBedrooms", self.min_bedrooms)
            .push_opt("minAreaSqm", self.min_area_sqm)
            .push_opt("maxAreaSqm", self.max_area_sqm)
            .push("sort", self.sort.as_str())
            .push_opt("propertyAge", self.property_age.map(PropertyAge::as_str))
            .push_opt("hasSeaView", self.has_sea_view.then_some(true))
            .push_opt("hasPool", self.has_pool.then_some(true))
            .push_opt("hasGarden", self.has_garden.then_some(true))
            .push_opt("hasParking", self.has_parking.then_some(true))
            .push_opt("hasElevator", self.has_elevator.then_some(true))
            .push_opt("furnished", self.furnished.map(Furnishing::as_str));
        params
    }
}

/// Property search profile: newest first, six per page.
#[derive(Clone, Copy, Debug)]
pub struct PropertySearch;

impl SearchProfile for PropertySearch {
    type Form = PropertyFilterForm;
    type Query = PropertyQuery;
    type Item = PropertySummary;

    const NAME: &'static str = "properties";
    const DEFAULT_PAGE_SIZE: u32 = PROPERTIES_PAGE_SIZE;

    fn baseline() -> PropertyQuery {
        PropertyQuery::default()
    }
}

/// Controller for the properties page.
pub type PropertiesState = SearchController<PropertySearch>;

/// Whole-unit price with thousands separators (`€1,250,000`).
#[must_use]
pub fn format_price(price_cents: i64, currency: &str) -> String {
    let rounded = (price_cents.unsigned_abs() + 50) / 100;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if price_cents < 0 && rounded > 0 { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}"),
        None => format!("{sign}{} {grouped}", currency.trim().to_ascii_uppercase()),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.trim().to_ascii_uppercase().as_str() {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "TRY" => Some("₺"),
        _ => None,
    }
}

/// Countries with listings, as `(code, English name)`.
pub const LISTING_COUNTRIES: [(&str, &str); 9] = [
    ("TR", "Turkey"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("IT", "Italy"),
    ("GR", "Greece"),
    ("PT", "Portugal"),
    ("HR", "Croatia"),
    ("CY", "Cyprus"),
    ("MT", "Malta"),
];

/// English country name for a code; unknown codes are returned as given.
#[must_use]
pub fn country_name(code: &str) -> String {
    let upper = code.trim().to_ascii_uppercase();
    LISTING_COUNTRIES
        .iter()
        .find(|(known, _)| *known == upper)
        .map_or_else(|| code.to_string(), |(_, name)| (*name).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_converts() -> Result<(), FilterError> {
        let form = PropertyFilterForm {
            country: " es ".to_string(),
            min_price: "1000".to_string(),
            city: "   ".to_string(),
            ..PropertyFilterForm::default()
        };
        let params = form.normalize()?.to_params();
        assert_eq!(params.get("country"), Some("ES"));
        assert_eq!(params.get("minPriceCents"), Some("100000"));
        assert!(!params.contains("city"));
        assert!(!params.contains("maxPriceCents"));
        assert_eq!(params.get("sort"), Some("newest"));
        Ok(())
    }

    #[test]
    fn zero_values_are_sent() -> Result<(), FilterError> {
        let form = PropertyFilterForm {
            min_price: "0".to_string(),
            bedrooms: "0".to_string(),
            ..PropertyFilterForm::default()
        };
        let params = form.normalize()?.to_params();
        assert_eq!(params.get("minPriceCents"), Some("0"));
        assert_eq!(params.get("minBedrooms"), Some("0"));
        Ok(())
    }

    #[test]
    fn advanced_toggles_only_send_true() -> Result<(), FilterError> {
        let form = PropertyFilterForm {
            advanced: AdvancedPropertyFilters {
                has_pool: true,
                furnished: "semi-furnished".to_string(),
                property_age: "5-10".to_string(),
                ..AdvancedPropertyFilters::default()
            },
            sort: "price_asc".to_string(),
            property_type: "villa".to_string(),
            ..PropertyFilterForm::default()
        };
        assert_eq!(form.advanced.active_count(), 3);
        let params = form.normalize()?.to_params();
        assert_eq!(params.get("hasPool"), Some("true"));
        assert!(!params.contains("hasGarden"));
        assert_eq!(params.get("furnished"), Some("semi-furnished"));
        assert_eq!(params.get("propertyAge"), Some("5-10"));
        assert_eq!(params.get("sort"), Some("price_asc"));
        assert_eq!(params.get("propertyType"), Some("villa"));
        Ok(())
    }

    #[test]
    fn inverted_ranges_and_bad_options_are_rejected() {
        let prices = PropertyFilterForm {
            min_price: "500".to_string(),
            max_price: "100".to_string(),
            ..PropertyFilterForm::default()
        };
        assert!(matches!(
            prices.normalize(),
            Err(FilterError::InvertedRange { min_field: "minPrice", .. })
        ));
        let kind = PropertyFilterForm {
            property_type: "castle".to_string(),
            ..PropertyFilterForm::default()
        };
        assert_eq!(
            kind.normalize().err().map(|err| err.field()),
            Some("propertyType")
        );
    }

    #[test]
    fn prices_format_in_whole_units() {
        assert_eq!(format_price(125_000_000, "EUR"), "€1,250,000");
        assert_eq!(format_price(99_950, "usd"), "$1,000");
        assert_eq!(format_price(4_900, "CHF"), "CHF 49");
        assert_eq!(format_price(0, "EUR"), "€0");
        assert_eq!(format_price(-150_000, "GBP"), "-£1,500");
    }

    #[test]
    fn country_names_fall_back_to_code() {
        assert_eq!(country_name("es"), "Spain");
        assert_eq!(country_name("DE"), "DE");
    }
}
