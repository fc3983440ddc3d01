//! Post-ad wizard: raw inputs, per-section validation and draft assembly.

use crate::core::http::ApiError;
use crate::core::logic::{
    FilterError, extract_number, major_to_minor_units, normalize_country_code, normalize_text,
    parse_optional_f64, parse_optional_u32,
};
use crate::core::validation::{FieldErrors, REQUIRED};
use terracasa_api_models::{
    AudienceDraft, EnergyCertificate, Furnishing, InfrastructureDraft, InvestmentDraft,
    LegalEconomicDraft, LocationDetailsDraft, Money, PropertyDetailsDraft, PropertyDraft,
    PropertyType, VerificationDraft, YesNo,
};

/// Maximum number of images attached to one listing.
pub const MAX_LISTING_IMAGES: usize = 20;
/// Currency every listing is priced in.
pub const LISTING_CURRENCY: &str = "EUR";
/// Key for a missing consent checkbox.
pub const CONSENT_REQUIRED: &str = "validation.consent";
/// Key for too many images.
pub const TOO_MANY_IMAGES: &str = "validation.maxImages";

/// Wizard sections in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListingSection {
    /// Title, location, type, price and size.
    #[default]
    Basics,
    /// Rooms, condition, energy and equipment.
    Details,
    /// Views, distances and infrastructure.
    Location,
    /// Who the property suits.
    Audience,
    /// Rental, yield and legal notes.
    Investment,
    /// Images, checks and consent.
    Verification,
}

impl ListingSection {
    /// All sections in order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Basics,
            Self::Details,
            Self::Location,
            Self::Audience,
            Self::Investment,
            Self::Verification,
        ]
    }

    /// Zero-based position.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Section after this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Details),
            Self::Details => Some(Self::Location),
            Self::Location => Some(Self::Audience),
            Self::Audience => Some(Self::Investment),
            Self::Investment => Some(Self::Verification),
            Self::Verification => None,
        }
    }

    /// Section before this one.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Basics => None,
            Self::Details => Some(Self::Basics),
            Self::Location => Some(Self::Details),
            Self::Audience => Some(Self::Location),
            Self::Investment => Some(Self::Audience),
            Self::Verification => Some(Self::Investment),
        }
    }

    /// Translation key of the section heading.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Basics => "postAd.sections.basics",
            Self::Details => "postAd.sections.details",
            Self::Location => "postAd.sections.location",
            Self::Audience => "postAd.sections.audience",
            Self::Investment => "postAd.sections.investment",
            Self::Verification => "postAd.sections.verification",
        }
    }
}

/// Raw wizard inputs. Text stays as typed until the section is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingForm {
    // basics
    /// Listing title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Country code.
    pub country: String,
    /// City.
    pub city: String,
    /// District or neighbourhood.
    pub district: String,
    /// Property type value.
    pub property_type: String,
    /// Asking price in major units.
    pub price: String,
    /// Bedroom count.
    pub bedrooms: String,
    /// Living area in square metres.
    pub area_sqm: String,

    // details
    /// Bathroom count.
    pub bathrooms: String,
    /// Plot area in square metres.
    pub plot_area_sqm: String,
    /// Construction year.
    pub year_built: String,
    /// Condition note.
    pub condition: String,
    /// Garage spaces.
    pub garage_spaces: String,
    /// Balconies and terraces.
    pub balcony_terrace_count: String,
    /// Pool description.
    pub pool: String,
    /// Bathrooms with toilet.
    pub bathrooms_with_toilet: String,
    /// Separate toilets.
    pub separate_toilets: String,
    /// Energy class letter.
    pub energy_class: String,
    /// Energy use in kWh/m²a.
    pub energy_consumption: String,
    /// Availability note.
    pub availability: String,
    /// Furnishing value.
    pub furnishing: String,
    /// `yes`, `no` or blank.
    pub all_year_habitable: String,
    /// Rooms with air conditioning.
    pub air_conditioning_rooms: String,
    /// Heating type.
    pub heating_type: String,
    /// Solar installation note.
    pub solar_system: String,
    /// Elevator note.
    pub elevator: String,
    /// Caretaker on site.
    pub caretaker_service: bool,

    // location
    /// Sea or lake view.
    pub sea_lake_view: bool,
    /// Mountain view.
    pub mountain_view: bool,
    /// Waterfront note.
    pub direct_waterfront: String,
    /// Beach access note.
    pub beach_access: String,
    /// Beach distance, free text in metres.
    pub distance_to_beach: String,
    /// Ski area distance, free text in km.
    pub distance_to_ski: String,
    /// Marina distance, free text in km.
    pub distance_to_marina: String,
    /// Golf distance, free text in km.
    pub distance_to_golf: String,
    /// Airport distance, free text in minutes.
    pub distance_to_airport: String,
    /// Restaurants distance, free text in minutes.
    pub distance_to_restaurants: String,
    /// Supermarket distance, free text in minutes.
    pub distance_to_supermarket: String,
    /// Hospital distance, free text in minutes.
    pub distance_to_hospital: String,
    /// Schools distance, free text in minutes.
    pub distance_to_schools: String,
    /// Public transport kind.
    pub public_transport: String,
    /// Minutes to public transport.
    pub public_transport_minutes: String,
    /// Internet quality note.
    pub internet_quality: String,

    // audience
    /// Free-text audience note.
    pub popular_with: String,
    /// Expat friendly.
    pub expat_friendly: bool,
    /// Digital nomad friendly.
    pub digital_nomad_friendly: bool,
    /// Pets allowed.
    pub pet_friendly: bool,
    /// Family friendly.
    pub family_friendly: bool,
    /// Senior friendly.
    pub senior_friendly: bool,

    // investment and legal
    /// Tenancy note.
    pub currently_rented: String,
    /// Expected yield in percent.
    pub expected_yield: String,
    /// Management service note.
    pub property_management_available: String,
    /// Ready for short-term rental.
    pub airbnb_ready: bool,
    /// Foreign buyers allowed.
    pub foreigners_can_buy: String,
    /// Second-home use allowed.
    pub second_home_allowed: String,
    /// Local advisor recommended.
    pub local_advisor_recommended: String,
    /// Tax benefits.
    pub tax_benefits: String,
    /// Local financing options.
    pub local_financing_options: String,

    // verification
    /// Selected image file names.
    pub images: Vec<String>,
    /// Address checked.
    pub address_verified: bool,
    /// Terms accepted.
    pub consent_accepted: bool,
    /// Premium review requested.
    pub premium_review_purchased: bool,
}

struct Basics {
    property_type: Option<PropertyType>,
    price: Option<f64>,
    price_cents: Option<i64>,
    bedrooms: Option<u32>,
    area_sqm: Option<u32>,
}

struct Details {
    draft: PropertyDetailsDraft,
    bathrooms: Option<u32>,
    plot_area_sqm: Option<u32>,
    year_built: Option<u16>,
}

fn record<T>(errors: &mut FieldErrors, parsed: Result<Option<T>, FilterError>) -> Option<T> {
    parsed.unwrap_or_else(|err| {
        errors.push_filter_error(&err);
        None
    })
}

fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}

impl ListingForm {
    /// Attach images, refusing the whole batch when it would exceed the limit.
    ///
    /// Returns whether the images were added.
    pub fn add_images(&mut self, names: impl IntoIterator<Item = String>) -> bool {
        let names: Vec<String> = names.into_iter().collect();
        if self.images.len() + names.len() > MAX_LISTING_IMAGES {
            return false;
        }
        self.images.extend(names);
        true
    }

    /// Detach the image at `index`; out-of-range indexes are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Errors for one section.
    #[must_use]
    pub fn validate_section(&self, section: ListingSection) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match section {
            ListingSection::Basics => {
                self.basics(&mut errors);
            }
            ListingSection::Details => {
                self.details(&mut errors);
            }
            ListingSection::Location | ListingSection::Audience => {}
            ListingSection::Investment => {
                self.investment(&mut errors);
            }
            ListingSection::Verification => {
                self.verification(&mut errors);
            }
        }
        errors
    }

    /// First section that fails validation.
    #[must_use]
    pub fn first_invalid_section(&self) -> Option<ListingSection> {
        ListingSection::all()
            .into_iter()
            .find(|section| !self.validate_section(*section).is_empty())
    }

    /// Assemble the request body.
    ///
    /// Optional groups are present only when at least one of their fields is set.
    ///
    /// # Errors
    /// Returns every field error across all sections.
    pub fn to_draft(&self) -> Result<PropertyDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let basics = self.basics(&mut errors);
        let details = self.details(&mut errors);
        let location_details = self.location();
        let audience = self.audience();
        let (investment, legal_economic) = self.investment(&mut errors);
        let verification = self.verification(&mut errors);
        let (Some(property_type), Some(price), Some(price_cents), Some(bedrooms), Some(area_sqm)) = (
            basics.property_type,
            basics.price,
            basics.price_cents,
            basics.bedrooms,
            basics.area_sqm,
        ) else {
            return Err(errors);
        };
        errors.into_result()?;
        Ok(PropertyDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            country: normalize_country_code(&self.country).unwrap_or_default(),
            city: self.city.trim().to_string(),
            district: normalize_text(&self.district),
            property_type,
            price: Money {
                amount: price,
                currency: LISTING_CURRENCY.to_string(),
            },
            price_cents,
            currency: LISTING_CURRENCY.to_string(),
            bedrooms,
            bathrooms: details.bathrooms,
            area_sqm,
            plot_area_sqm: details.plot_area_sqm,
            year_built: details.year_built,
            details: details.draft,
            location_details,
            legal_economic,
            audience,
            investment,
            verification,
        })
    }

    fn basics(&self, errors: &mut FieldErrors) -> Basics {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("country", &self.country),
            ("city", &self.city),
        ] {
            errors.require(field, value);
        }
        let property_type = if errors.require("propertyType", &self.property_type) {
            let parsed = PropertyType::parse(self.property_type.trim());
            if parsed.is_none() {
                errors.insert("propertyType", "validation.option");
            }
            parsed
        } else {
            None
        };
        let price = record(errors, parse_optional_f64("price", &self.price));
        let price_cents = price.and_then(|_| record(errors, major_to_minor_units("price", &self.price)));
        let bedrooms = record(errors, parse_optional_u32("bedrooms", &self.bedrooms));
        let area_sqm = record(errors, parse_optional_u32("areaSqm", &self.area_sqm));
        for (field, present) in [
            ("price", price.is_some()),
            ("bedrooms", bedrooms.is_some()),
            ("areaSqm", area_sqm.is_some()),
        ] {
            if !present {
                errors.insert(field, REQUIRED);
            }
        }
        Basics {
            property_type,
            price,
            price_cents,
            bedrooms,
            area_sqm,
        }
    }

    fn details(&self, errors: &mut FieldErrors) -> Details {
        let mut count = |field: &'static str, raw: &str| record(errors, parse_optional_u32(field, raw));
        let bathrooms = count("bathrooms", &self.bathrooms);
        let plot_area_sqm = count("plotAreaSqm", &self.plot_area_sqm);
        let year = count("yearBuilt", &self.year_built);
        let garage_spaces = count("garageSpaces", &self.garage_spaces);
        let balcony_terrace_count = count("balconyTerraceCount", &self.balcony_terrace_count);
        let bathrooms_with_toilet = count("bathroomsWithToilet", &self.bathrooms_with_toilet);
        let separate_toilets = count("separateToilets", &self.separate_toilets);
        let air_conditioning_rooms = count("airConditioningRooms", &self.air_conditioning_rooms);

        let year_built = year.and_then(|year| u16::try_from(year).ok());
        if year.is_some() && year_built.is_none() {
            errors.insert("yearBuilt", "validation.number");
        }
        let consumption = record(
            errors,
            parse_optional_f64("energyConsumption", &self.energy_consumption),
        );
        let energy_class = normalize_text(&self.energy_class).map(|class| class.to_ascii_uppercase());
        let energy_certificate = (energy_class.is_some() || consumption.is_some()).then(|| {
            EnergyCertificate {
                class: energy_class,
                consumption_kwh_per_sqm_a: consumption,
            }
        });
        let furnishing = normalize_text(&self.furnishing).and_then(|raw| {
            let parsed = Furnishing::parse(&raw);
            if parsed.is_none() {
                errors.insert("furnishing", "validation.option");
            }
            parsed
        });
        let all_year_habitable = match self.all_year_habitable.trim() {
            "" => None,
            "yes" => Some(true),
            "no" => Some(false),
            _ => {
                errors.insert("allYearHabitable", "validation.option");
                None
            }
        };
        Details {
            draft: PropertyDetailsDraft {
                land_registry_area_sqm: plot_area_sqm,
                year_built,
                condition: normalize_text(&self.condition),
                garage_spaces,
                balcony_terrace_count,
                pool: normalize_text(&self.pool),
                bathrooms,
                bathrooms_with_toilet,
                separate_toilets,
                energy_certificate,
                availability: normalize_text(&self.availability),
                furnishing,
                all_year_habitable,
                air_conditioning_rooms,
                heating_type: normalize_text(&self.heating_type),
                solar_system: normalize_text(&self.solar_system),
                elevator: normalize_text(&self.elevator),
                caretaker_service: flag(self.caretaker_service),
            },
            bathrooms,
            plot_area_sqm,
            year_built,
        }
    }

    fn location(&self) -> LocationDetailsDraft {
        let public_transport = match (
            normalize_text(&self.public_transport),
            normalize_text(&self.public_transport_minutes),
        ) {
            (Some(kind), Some(minutes)) => Some(format!("{kind}, {minutes}")),
            (kind, _) => kind,
        };
        let infrastructure = InfrastructureDraft {
            distance_to_marina_km: extract_number(&self.distance_to_marina),
            distance_to_golf_km: extract_number(&self.distance_to_golf),
            distance_to_airport_minutes: extract_number(&self.distance_to_airport),
            distance_to_restaurants_minutes: extract_number(&self.distance_to_restaurants),
            distance_to_supermarket_minutes: extract_number(&self.distance_to_supermarket),
            distance_to_hospital_minutes: extract_number(&self.distance_to_hospital),
            distance_to_schools_minutes: extract_number(&self.distance_to_schools),
            public_transport,
            internet_quality: normalize_text(&self.internet_quality),
        };
        LocationDetailsDraft {
            sea_lake_view: YesNo::from(self.sea_lake_view),
            mountain_view: YesNo::from(self.mountain_view),
            direct_waterfront: normalize_text(&self.direct_waterfront),
            beach_access: normalize_text(&self.beach_access),
            distance_to_beach_meters: extract_number(&self.distance_to_beach),
            distance_to_ski_km: extract_number(&self.distance_to_ski),
            infrastructure: (!infrastructure.is_empty()).then_some(infrastructure),
        }
    }

    fn audience(&self) -> Option<AudienceDraft> {
        let audience = AudienceDraft {
            popular_with: normalize_text(&self.popular_with),
            expat_friendly: flag(self.expat_friendly),
            digital_nomad_friendly: flag(self.digital_nomad_friendly),
            pet_friendly: flag(self.pet_friendly),
            family_friendly: flag(self.family_friendly),
            senior_friendly: flag(self.senior_friendly),
        };
        (audience != AudienceDraft::default()).then_some(audience)
    }

    fn investment(
        &self,
        errors: &mut FieldErrors,
    ) -> (Option<InvestmentDraft>, Option<LegalEconomicDraft>) {
        let investment = InvestmentDraft {
            currently_rented: normalize_text(&self.currently_rented),
            expected_yield_percent: record(
                errors,
                parse_optional_f64("expectedYield", &self.expected_yield),
            ),
            property_management_available: normalize_text(&self.property_management_available),
            airbnb_ready: flag(self.airbnb_ready),
        };
        let legal = LegalEconomicDraft {
            foreigners_can_buy: normalize_text(&self.foreigners_can_buy),
            second_home_allowed: normalize_text(&self.second_home_allowed),
            local_advisor_recommended: normalize_text(&self.local_advisor_recommended),
            tax_benefits: normalize_text(&self.tax_benefits),
            local_financing_options: normalize_text(&self.local_financing_options),
        };
        (
            (investment != InvestmentDraft::default()).then_some(investment),
            (legal != LegalEconomicDraft::default()).then_some(legal),
        )
    }

    fn verification(&self, errors: &mut FieldErrors) -> VerificationDraft {
        if !self.consent_accepted {
            errors.insert("consentAccepted", CONSENT_REQUIRED);
        }
        if self.images.len() > MAX_LISTING_IMAGES {
            errors.insert("images", TOO_MANY_IMAGES);
        }
        VerificationDraft {
            address_verified: self.address_verified,
            consent_accepted: self.consent_accepted,
            premium_review_purchased: self.premium_review_purchased,
            image_count: u32::try_from(self.images.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Wizard navigation and submission state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingWizard {
    /// Raw inputs.
    pub form: ListingForm,
    section: ListingSection,
    furthest: ListingSection,
    errors: FieldErrors,
    submitting: bool,
    submitted: bool,
    error: Option<ApiError>,
}

impl ListingWizard {
    /// Wizard at the first section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance when the current section is valid; otherwise keep it and show its errors.
    ///
    /// Returns whether the wizard moved.
    pub fn next(&mut self) -> bool {
        let errors = self.form.validate_section(self.section);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors = FieldErrors::new();
        let Some(next) = self.section.next() else {
            return false;
        };
        self.section = next;
        self.furthest = self.furthest.max(next);
        true
    }

    /// Go back one section; never blocked by validation.
    pub fn previous(&mut self) {
        if let Some(previous) = self.section.previous() {
            self.section = previous;
            self.errors = FieldErrors::new();
        }
    }

    /// Jump to an already reached section.
    ///
    /// Returns whether the jump happened.
    pub fn go_to(&mut self, section: ListingSection) -> bool {
        if section > self.furthest {
            return false;
        }
        self.section = section;
        self.errors = FieldErrors::new();
        true
    }

    /// Validate everything and hand out the draft to send.
    ///
    /// On failure the wizard jumps to the first invalid section.
    ///
    /// # Errors
    /// Returns all field errors when any section is invalid.
    pub fn begin_submit(&mut self) -> Result<PropertyDraft, FieldErrors> {
        self.error = None;
        match self.form.to_draft() {
            Ok(draft) => {
                self.errors = FieldErrors::new();
                self.submitting = true;
                Ok(draft)
            }
            Err(errors) => {
                if let Some(section) = self.form.first_invalid_section() {
                    self.section = section;
                    self.furthest = self.furthest.max(section);
                }
                self.errors.clone_from(&errors);
                Err(errors)
            }
        }
    }

    /// Record the server's answer to a submission.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.submitted = true;
                self.error = None;
            }
            Err(err) => {
                self.errors.merge_backend(err.field_errors());
                self.error = Some(err);
            }
        }
    }

    /// Section on screen.
    #[must_use]
    pub const fn section(&self) -> ListingSection {
        self.section
    }

    /// Furthest section reached.
    #[must_use]
    pub const fn furthest(&self) -> ListingSection {
        self.furthest
    }

    /// Inline errors for the section on screen.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Forget the inline error for `field` once it is edited.
    pub fn clear_error(&mut self, field: &str) {
        self.errors.clear(field);
        self.error = None;
    }

    /// A submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The listing was accepted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Last submission failure.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terracasa_api_models::FieldErrorEntry;

    fn basics() -> ListingForm {
        ListingForm {
            title: "Sea view villa".to_string(),
            description: "Five minutes from the beach".to_string(),
            country: "es".to_string(),
            city: "Jávea".to_string(),
            property_type: "villa".to_string(),
            price: "850000".to_string(),
            bedrooms: "4".to_string(),
            area_sqm: "210".to_string(),
            ..ListingForm::default()
        }
    }

    #[test]
    fn wizard_refuses_to_pass_invalid_basics() {
        let mut wizard = ListingWizard::new();
        assert!(!wizard.next());
        assert_eq!(wizard.section(), ListingSection::Basics);
        assert_eq!(wizard.errors().get("title"), Some(REQUIRED));
        assert_eq!(wizard.errors().get("price"), Some(REQUIRED));

        wizard.form = basics();
        assert!(wizard.next());
        assert_eq!(wizard.section(), ListingSection::Details);
        assert!(wizard.errors().is_empty());
        wizard.previous();
        assert_eq!(wizard.section(), ListingSection::Basics);
        assert!(wizard.go_to(ListingSection::Details));
        assert!(!wizard.go_to(ListingSection::Verification));
    }

    #[test]
    fn malformed_numbers_block_their_section() {
        let mut form = basics();
        form.bedrooms = "four".to_string();
        form.year_built = "99999".to_string();
        assert_eq!(
            form.validate_section(ListingSection::Basics).get("bedrooms"),
            Some("validation.number")
        );
        assert_eq!(
            form.validate_section(ListingSection::Details).get("yearBuilt"),
            Some("validation.number")
        );
        assert!(form.validate_section(ListingSection::Location).is_empty());
    }

    #[test]
    fn oversized_price_is_rejected_instead_of_saturating() {
        let mut form = basics();
        form.price = "1e20".to_string();
        assert_eq!(
            form.validate_section(ListingSection::Basics).get("price"),
            Some("validation.number")
        );
        assert!(form.to_draft().is_err());

        form.price = "850000.505".to_string();
        assert!(form.validate_section(ListingSection::Basics).get("price").is_none());
    }

    #[test]
    fn draft_omits_unset_groups() -> Result<(), FieldErrors> {
        let mut form = basics();
        form.consent_accepted = true;
        let draft = form.to_draft()?;
        assert_eq!(draft.country, "ES");
        assert_eq!(draft.price_cents, 85_000_000);
        assert_eq!(draft.price.currency, "EUR");
        assert_eq!(draft.details.energy_certificate, None);
        assert_eq!(draft.location_details.infrastructure, None);
        assert_eq!(draft.location_details.sea_lake_view, YesNo::No);
        assert_eq!(draft.audience, None);
        assert_eq!(draft.investment, None);
        assert_eq!(draft.legal_economic, None);
        Ok(())
    }

    #[test]
    fn draft_keeps_set_groups_and_first_numbers() -> Result<(), FieldErrors> {
        let mut form = basics();
        form.consent_accepted = true;
        form.energy_class = "b".to_string();
        form.distance_to_beach = "approx. 300 m".to_string();
        form.distance_to_marina = "2,5 km".to_string();
        form.public_transport = "Bus".to_string();
        form.public_transport_minutes = "5 min".to_string();
        form.pet_friendly = true;
        form.expected_yield = "4.5".to_string();
        form.furnishing = "semi-furnished".to_string();
        let draft = form.to_draft()?;
        let certificate = draft.details.energy_certificate.clone().unwrap_or_default();
        assert_eq!(certificate.class.as_deref(), Some("B"));
        assert_eq!(certificate.consumption_kwh_per_sqm_a, None);
        assert_eq!(draft.location_details.distance_to_beach_meters, Some(300.0));
        let infrastructure = draft.location_details.infrastructure.unwrap_or_default();
        assert_eq!(infrastructure.distance_to_marina_km, Some(2.5));
        assert_eq!(infrastructure.public_transport.as_deref(), Some("Bus, 5 min"));
        let audience = draft.audience.unwrap_or_default();
        assert_eq!(audience.pet_friendly, Some(true));
        assert_eq!(audience.expat_friendly, None);
        assert_eq!(
            draft.investment.and_then(|investment| investment.expected_yield_percent),
            Some(4.5)
        );
        assert_eq!(draft.details.furnishing, Some(Furnishing::SemiFurnished));
        Ok(())
    }

    #[test]
    fn images_are_capped() {
        let mut form = basics();
        assert!(form.add_images((0..15).map(|i| format!("img-{i}.jpg"))));
        assert!(!form.add_images((0..6).map(|i| format!("more-{i}.jpg"))));
        assert_eq!(form.images.len(), 15);
        assert!(form.add_images((0..5).map(|i| format!("more-{i}.jpg"))));
        form.remove_image(0);
        form.remove_image(99);
        assert_eq!(form.images.len(), 19);
    }

    #[test]
    fn submission_requires_consent_and_jumps_to_it() {
        let mut wizard = ListingWizard::new();
        wizard.form = basics();
        let errors = wizard.begin_submit().err().unwrap_or_default();
        assert_eq!(errors.get("consentAccepted"), Some(CONSENT_REQUIRED));
        assert_eq!(wizard.section(), ListingSection::Verification);
        assert!(!wizard.is_submitting());

        wizard.form.consent_accepted = true;
        assert!(wizard.begin_submit().is_ok());
        assert!(wizard.is_submitting());
        wizard.finish_submit(Err(ApiError::Backend {
            status: 422,
            message: "Invalid listing".to_string(),
            field_errors: vec![FieldErrorEntry {
                field: "title".to_string(),
                message: "Title already used".to_string(),
            }],
        }));
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.errors().get("title"), Some("Title already used"));
        wizard.finish_submit(Ok(()));
        assert!(wizard.is_submitted());
        assert_eq!(wizard.error(), None);
    }
}
