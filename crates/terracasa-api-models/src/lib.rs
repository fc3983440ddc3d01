#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the TerraCasa marketplace API.
//!
//! The backend wraps every payload in an [`Envelope`]; list endpoints may add
//! [`Pagination`] metadata alongside the data. Request bodies serialize with
//! camelCase keys and omit unset optional fields so the server never receives
//! empty strings for values the user left blank.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response wrapper returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Payload for successful responses.
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Error message for failed responses.
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Alternative message field used by some handlers.
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Paging metadata for list endpoints.
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// HTTP status echoed in the body.
    pub status_code: Option<u16>,
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page", alias = "currentPage")]
    /// One-based page number served.
    pub page: u32,
    #[serde(default, alias = "limit")]
    /// Requested page size.
    pub items_per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Total matching items when the server counts them.
    pub total_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Total pages when the server counts them.
    pub total_pages: Option<u32>,
    #[serde(default)]
    /// Whether another page follows this one.
    pub has_next_page: bool,
    #[serde(default)]
    /// Whether a page precedes this one.
    pub has_previous_page: bool,
}

const fn first_page() -> u32 {
    1
}

impl Pagination {
    /// Metadata for an unpaginated list served as a single page.
    #[must_use]
    pub const fn single_page(page: u32, items_per_page: u32) -> Self {
        Self {
            page,
            items_per_page,
            total_items: None,
            total_pages: None,
            has_next_page: false,
            has_previous_page: page > 1,
        }
    }
}

/// Field-level error reported by the backend validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldErrorEntry {
    /// Request field that failed validation.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

/// Error body shape for non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Primary error message.
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Secondary message field.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Per-field validation failures.
    pub errors: Vec<FieldErrorEntry>,
}

impl ErrorBody {
    /// Read an error body from arbitrary JSON, ignoring fields with unexpected types.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(ToString::to_string)
        };
        let errors = value
            .get("errors")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        let field = entry.get("field")?.as_str()?;
                        let message = entry.get("message")?.as_str()?;
                        Some(FieldErrorEntry {
                            field: field.to_string(),
                            message: message.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            error: text("error"),
            message: text("message"),
            errors,
        }
    }

    /// Preferred display message: `error`, then `message`.
    #[must_use]
    pub fn display_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Property categories accepted by search and listing endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Apartment or flat.
    Apartment,
    /// Detached or terraced house.
    House,
    /// Villa.
    Villa,
    /// Building plot.
    Land,
    /// Commercial unit.
    Commercial,
    /// Anything else.
    Other,
}

impl PropertyType {
    /// All property types in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Apartment,
            Self::House,
            Self::Villa,
            Self::Land,
            Self::Commercial,
            Self::Other,
        ]
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Land => "land",
            Self::Commercial => "commercial",
            Self::Other => "other",
        }
    }

    /// Parse a wire value; blank or unknown input yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Sort orders supported by the property search endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertySort {
    /// Most recently published first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Promoted listings first.
    Top,
}

impl PropertySort {
    /// All sort orders in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Newest, Self::PriceAsc, Self::PriceDesc, Self::Top]
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Top => "top",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::all().into_iter().find(|sort| sort.as_str() == raw.trim())
    }
}

/// Furnishing level used by listings and advanced search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Furnishing {
    /// Fully furnished.
    Furnished,
    /// Partly furnished.
    SemiFurnished,
    /// Empty.
    Unfurnished,
}

impl Furnishing {
    /// All furnishing levels.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Furnished, Self::SemiFurnished, Self::Unfurnished]
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Furnished => "furnished",
            Self::SemiFurnished => "semi-furnished",
            Self::Unfurnished => "unfurnished",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::all().into_iter().find(|level| level.as_str() == raw.trim())
    }
}

/// Building age bracket used by advanced search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyAge {
    /// New construction.
    #[serde(rename = "new")]
    New,
    /// Zero to five years.
    #[serde(rename = "0-5")]
    UpToFive,
    /// Five to ten years.
    #[serde(rename = "5-10")]
    FiveToTen,
    /// Ten to twenty years.
    #[serde(rename = "10-20")]
    TenToTwenty,
    /// Older than twenty years.
    #[serde(rename = "20+")]
    OverTwenty,
}

impl PropertyAge {
    /// All brackets, youngest first.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::New,
            Self::UpToFive,
            Self::FiveToTen,
            Self::TenToTwenty,
            Self::OverTwenty,
        ]
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::UpToFive => "0-5",
            Self::FiveToTen => "5-10",
            Self::TenToTwenty => "10-20",
            Self::OverTwenty => "20+",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::all().into_iter().find(|age| age.as_str() == raw.trim())
    }
}

/// Moderation state of a partner's listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Saved but not submitted.
    Draft,
    /// Waiting for moderation.
    PendingReview,
    /// Visible in search.
    Published,
    /// Rejected by moderation.
    Rejected,
    /// Withdrawn by the partner.
    Archived,
}

impl ListingStatus {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Published => "published",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
        }
    }
}

/// Property card data returned by search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    /// Listing identifier.
    pub id: String,
    /// Listing headline.
    pub title: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
    #[serde(default)]
    /// City or region.
    pub city: Option<String>,
    #[serde(default)]
    /// Property category.
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    /// Asking price in minor currency units.
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    /// ISO 4217 currency code.
    pub currency: String,
    #[serde(default)]
    /// Bedroom count.
    pub bedrooms: Option<u32>,
    #[serde(default)]
    /// Bathroom count.
    pub bathrooms: Option<u32>,
    #[serde(default)]
    /// Living area in square metres.
    pub area_sqm: Option<u32>,
    #[serde(default)]
    /// Card image.
    pub primary_image_url: Option<String>,
    #[serde(default)]
    /// Moderation state when served to the owner.
    pub status: Option<ListingStatus>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// Full property record returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    /// Card fields.
    pub summary: PropertySummary,
    #[serde(default)]
    /// Long-form description.
    pub description: Option<String>,
    #[serde(default)]
    /// District or neighbourhood.
    pub district: Option<String>,
    #[serde(default)]
    /// Gallery images.
    pub image_urls: Vec<String>,
    #[serde(default)]
    /// Owning partner identifier.
    pub partner_id: Option<String>,
    #[serde(default)]
    /// Free-form structured sections (details, location, legal, ...).
    pub details: Option<Value>,
}

/// Partner card data returned by the network search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerSummary {
    /// Partner identifier.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Professional role, e.g. "Lawyer".
    pub role_title: Option<String>,
    /// Company name.
    pub company_name: Option<String>,
    /// Home country code.
    pub base_country: Option<String>,
    /// Home city.
    pub base_city: Option<String>,
    /// Avatar image.
    pub avatar_url: Option<String>,
    /// Average review rating (0-5).
    pub rating_average: f64,
    /// Number of reviews.
    pub rating_count: u32,
    /// Identity verified by the platform.
    pub is_verified: bool,
    /// Currently accepting work.
    pub is_available: bool,
    /// Can start immediately.
    pub is_immediately_available: bool,
    /// Reachable around the clock.
    pub is_available247: bool,
    /// Spoken language codes.
    pub languages: Vec<String>,
}

/// Country list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166 alpha-2 code.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Country landing-page overview.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryOverview {
    /// ISO 3166 alpha-2 code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Short introduction.
    pub summary: Option<String>,
    /// Capital city.
    pub capital: Option<String>,
    /// Local currency code.
    pub currency: Option<String>,
    /// Official languages.
    pub languages: Vec<String>,
}

/// Editorial section of a country guide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CountrySection {
    /// Stable section key.
    pub key: String,
    /// Section heading.
    pub title: String,
    /// Section body text.
    pub body: String,
}

/// Authenticated user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// User identifier.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Company name.
    pub company_name: Option<String>,
    /// Professional role.
    pub role_title: Option<String>,
    /// Home country code.
    pub base_country: Option<String>,
    /// Home city.
    pub base_city: Option<String>,
    /// Avatar image.
    pub avatar_url: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Account role (e.g. `partner`, `admin`).
    pub role: Option<String>,
    /// Preferred UI language code.
    pub language: Option<String>,
}

impl User {
    /// Name shown in the navbar: full name, else email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Response to login and registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Signed-in user.
    pub user: User,
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Company name.
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Professional role.
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Home country code.
    pub base_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Home city.
    pub base_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Avatar image.
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Contact phone.
    pub phone: Option<String>,
}

/// `PUT /auth/change-password` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// `POST /auth/forgot-password` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgotPasswordRequest {
    /// Account email.
    pub email: String,
}

/// `POST /auth/verify-code` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCodeRequest {
    /// Account email.
    pub email: String,
    /// Code received by email.
    pub code: String,
}

/// `PATCH /me` body. Unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Avatar image.
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Company name.
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Professional role.
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Home country code.
    pub base_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Home city.
    pub base_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Contact phone.
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Preferred UI language code.
    pub language: Option<String>,
}

/// `POST /partners/{id}/contact` lead form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPartnerRequest {
    /// Sender name.
    pub name: String,
    /// Reply-to email.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional phone number.
    pub phone: Option<String>,
    /// Message body.
    pub message: String,
}

/// Partner review as listed on the profile page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    /// Review identifier.
    pub id: String,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Author user id.
    pub author_id: Option<String>,
    /// Author display name.
    pub author_name: Option<String>,
    /// Creation timestamp as served (RFC 3339).
    pub created_at: Option<String>,
}

/// Review create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Star rating, 1-5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
}

/// Monetary amount in major units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Money {
    /// Amount in major units.
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Plain yes/no answer serialized as a string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    /// Affirmative.
    Yes,
    /// Negative.
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// `POST /properties` body assembled by the listing wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    /// Listing headline.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
    /// City or region.
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// District or neighbourhood.
    pub district: Option<String>,
    /// Property category.
    pub property_type: PropertyType,
    /// Asking price in major units.
    pub price: Money,
    /// Asking price in minor units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Bedroom count.
    pub bedrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bathroom count.
    pub bathrooms: Option<u32>,
    /// Living area in square metres.
    pub area_sqm: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Plot area in square metres.
    pub plot_area_sqm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Construction year.
    pub year_built: Option<u16>,
    /// Building details.
    pub details: PropertyDetailsDraft,
    /// Surroundings and distances.
    pub location_details: LocationDetailsDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Legal and economic notes.
    pub legal_economic: Option<LegalEconomicDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Target audience flags.
    pub audience: Option<AudienceDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Investment figures.
    pub investment: Option<InvestmentDraft>,
    /// Verification and consent.
    pub verification: VerificationDraft,
}

/// Building details group of a [`PropertyDraft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetailsDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Land registry area in square metres.
    pub land_registry_area_sqm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Construction year.
    pub year_built: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Condition label.
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Garage spaces.
    pub garage_spaces: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Balconies and terraces.
    pub balcony_terrace_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Pool description.
    pub pool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bathroom count.
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bathrooms with a toilet.
    pub bathrooms_with_toilet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Separate toilets.
    pub separate_toilets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Energy certificate, present when class or consumption is known.
    pub energy_certificate: Option<EnergyCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Availability note.
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Furnishing level.
    pub furnishing: Option<Furnishing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Habitable all year.
    pub all_year_habitable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Rooms with air conditioning.
    pub air_conditioning_rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Heating type.
    pub heating_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Solar installation.
    pub solar_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Elevator present.
    pub elevator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Caretaker on site.
    pub caretaker_service: Option<bool>,
}

/// Energy performance certificate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnergyCertificate {
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    /// Efficiency class, e.g. "B".
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Consumption in kWh per square metre and year.
    pub consumption_kwh_per_sqm_a: Option<f64>,
}

/// Location group of a [`PropertyDraft`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetailsDraft {
    /// Sea or lake view.
    pub sea_lake_view: YesNo,
    /// Mountain view.
    pub mountain_view: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Direct waterfront note.
    pub direct_waterfront: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Beach access note.
    pub beach_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Distance to the beach in metres.
    pub distance_to_beach_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Distance to the nearest ski area in kilometres.
    pub distance_to_ski_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Nearby infrastructure, present when any distance is known.
    pub infrastructure: Option<InfrastructureDraft>,
}

/// Distances to amenities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Marina, km.
    pub distance_to_marina_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Golf course, km.
    pub distance_to_golf_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Airport, minutes.
    pub distance_to_airport_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Restaurants, minutes.
    pub distance_to_restaurants_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Supermarket, minutes.
    pub distance_to_supermarket_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Hospital, minutes.
    pub distance_to_hospital_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Schools, minutes.
    pub distance_to_schools_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Public transport description.
    pub public_transport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Internet quality note.
    pub internet_quality: Option<String>,
}

impl InfrastructureDraft {
    /// Whether no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Legal and economic notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LegalEconomicDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Foreign buyers allowed.
    pub foreigners_can_buy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Second-home use allowed.
    pub second_home_allowed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Local advisor recommended.
    pub local_advisor_recommended: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tax benefits.
    pub tax_benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Local financing options.
    pub local_financing_options: Option<String>,
}

/// Target audience flags; only affirmative flags are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AudienceDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Free-text audience note.
    pub popular_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Expat friendly.
    pub expat_friendly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Digital nomad friendly.
    pub digital_nomad_friendly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Pets allowed.
    pub pet_friendly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Family friendly.
    pub family_friendly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Senior friendly.
    pub senior_friendly: Option<bool>,
}

/// Investment figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tenancy note.
    pub currently_rented: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Expected gross yield in percent.
    pub expected_yield_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Management service available.
    pub property_management_available: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Ready for short-term rental.
    pub airbnb_ready: Option<bool>,
}

/// Verification and consent group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDraft {
    /// Address checked by the partner.
    pub address_verified: bool,
    /// Terms accepted.
    pub consent_accepted: bool,
    /// Paid premium review requested.
    pub premium_review_purchased: bool,
    /// Number of images attached to the listing.
    pub image_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_keeps_pagination_metadata() -> anyhow::Result<()> {
        let body = json!({
            "data": [{ "id": "p1", "title": "Sea villa", "country": "ES", "priceCents": 12_500_000 }],
            "pagination": { "page": 1, "itemsPerPage": 6, "hasNextPage": true }
        });
        let envelope: Envelope<Vec<PropertySummary>> = serde_json::from_value(body)?;
        let pagination = envelope.pagination.ok_or_else(|| anyhow::anyhow!("no pagination"))?;
        assert!(pagination.has_next_page);
        assert_eq!(pagination.items_per_page, 6);
        let items = envelope.data.unwrap_or_default();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].currency, "EUR");
        assert_eq!(items[0].price_cents, 12_500_000);
        Ok(())
    }

    #[test]
    fn pagination_defaults_to_first_page() -> anyhow::Result<()> {
        let pagination: Pagination = serde_json::from_value(json!({}))?;
        assert_eq!(pagination.page, 1);
        assert!(!pagination.has_next_page);
        let single = Pagination::single_page(3, 10);
        assert!(single.has_previous_page);
        assert!(!single.has_next_page);
        Ok(())
    }

    #[test]
    fn error_body_is_lenient_about_types() {
        let body = ErrorBody::from_json(&json!({
            "error": { "code": 42 },
            "message": "Email already registered",
            "errors": [
                { "field": "email", "message": "taken" },
                { "field": 3 }
            ]
        }));
        assert_eq!(body.error, None);
        assert_eq!(body.display_message(), Some("Email already registered"));
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field, "email");
    }

    #[test]
    fn error_body_prefers_error_over_message() {
        let body = ErrorBody::from_json(&json!({ "error": "Invalid credentials", "message": "x" }));
        assert_eq!(body.display_message(), Some("Invalid credentials"));
        assert_eq!(ErrorBody::from_json(&json!({ "error": "  " })).display_message(), None);
    }

    #[test]
    fn wire_enums_parse_their_own_labels() {
        assert_eq!(PropertyType::parse(" Villa "), Some(PropertyType::Villa));
        assert_eq!(PropertyType::parse(""), None);
        assert_eq!(PropertySort::parse("price_desc"), Some(PropertySort::PriceDesc));
        assert_eq!(Furnishing::parse("semi-furnished"), Some(Furnishing::SemiFurnished));
        assert_eq!(PropertyAge::parse("20+"), Some(PropertyAge::OverTwenty));
        assert_eq!(PropertySort::default(), PropertySort::Newest);
    }

    #[test]
    fn partner_fields_default_when_missing() -> anyhow::Result<()> {
        let partner: PartnerSummary = serde_json::from_value(json!({
            "id": "x",
            "displayName": "Ana Ruiz",
            "ratingAverage": 4.7,
            "isVerified": true
        }))?;
        assert!(partner.is_verified);
        assert!(!partner.is_available247);
        assert_eq!(partner.rating_count, 0);
        assert!(partner.languages.is_empty());
        Ok(())
    }

    #[test]
    fn user_display_name_falls_back_to_email() {
        let mut user = User {
            email: "ana@example.com".to_string(),
            ..User::default()
        };
        assert_eq!(user.display_name(), "ana@example.com");
        user.first_name = Some("Ana".to_string());
        user.last_name = Some(" Ruiz ".to_string());
        assert_eq!(user.display_name(), "Ana Ruiz");
    }

    #[test]
    fn request_bodies_omit_unset_fields() -> anyhow::Result<()> {
        let update = ProfileUpdate {
            base_city: Some("Valencia".to_string()),
            ..ProfileUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update)?, json!({ "baseCity": "Valencia" }));

        let register = RegisterRequest {
            email: "a@b.co".to_string(),
            password: "secret123".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            ..RegisterRequest::default()
        };
        let value = serde_json::to_value(&register)?;
        assert!(value.get("companyName").is_none());
        assert_eq!(value["firstName"], "A");
        Ok(())
    }

    #[test]
    fn energy_certificate_uses_reserved_class_key() -> anyhow::Result<()> {
        let cert = EnergyCertificate {
            class: Some("B".to_string()),
            consumption_kwh_per_sqm_a: None,
        };
        assert_eq!(serde_json::to_value(&cert)?, json!({ "class": "B" }));
        assert_eq!(serde_json::to_value(YesNo::from(true))?, json!("yes"));
        Ok(())
    }
}
