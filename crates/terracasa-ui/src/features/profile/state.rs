//! Editable profile form seeded from the cached user.

use crate::core::logic::{normalize_country_code, normalize_text};
use crate::core::validation::{FieldErrors, INVALID_URL, is_http_url};
use crate::i18n::LocaleCode;
use terracasa_api_models::{ListingStatus, ProfileUpdate, User};

/// Profile inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Avatar image URL.
    pub avatar_url: String,
    /// Company name.
    pub company_name: String,
    /// Professional role.
    pub role_title: String,
    /// Home country code.
    pub base_country: String,
    /// Home city.
    pub base_city: String,
    /// Contact phone.
    pub phone: String,
    /// Preferred UI language code.
    pub language: String,
}

impl ProfileForm {
    /// Form holding the user's current values.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            avatar_url: text(&user.avatar_url),
            company_name: text(&user.company_name),
            role_title: text(&user.role_title),
            base_country: text(&user.base_country),
            base_city: text(&user.base_city),
            phone: text(&user.phone),
            language: text(&user.language),
        }
    }

    /// Validate into a `PATCH /me` body; blank fields are omitted.
    ///
    /// # Errors
    /// Returns field errors for a non-http(s) avatar or an unsupported language.
    pub fn to_update(&self) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let avatar_url = normalize_text(&self.avatar_url);
        if avatar_url.as_deref().is_some_and(|url| !is_http_url(url)) {
            errors.insert("avatarUrl", INVALID_URL);
        }
        let language = match normalize_text(&self.language) {
            Some(raw) => match LocaleCode::parse(&raw) {
                Some(locale) => Some(locale.code().to_string()),
                None => {
                    errors.insert("language", "validation.option");
                    None
                }
            },
            None => None,
        };
        errors.into_result()?;
        Ok(ProfileUpdate {
            avatar_url,
            company_name: normalize_text(&self.company_name),
            role_title: normalize_text(&self.role_title),
            base_country: normalize_country_code(&self.base_country),
            base_city: normalize_text(&self.base_city),
            phone: normalize_text(&self.phone),
            language,
        })
    }
}

/// Cached user with a successful update applied.
#[must_use]
pub fn apply_update(user: &User, update: &ProfileUpdate) -> User {
    let mut next = user.clone();
    let merge = |slot: &mut Option<String>, value: &Option<String>| {
        if value.is_some() {
            slot.clone_from(value);
        }
    };
    merge(&mut next.avatar_url, &update.avatar_url);
    merge(&mut next.company_name, &update.company_name);
    merge(&mut next.role_title, &update.role_title);
    merge(&mut next.base_country, &update.base_country);
    merge(&mut next.base_city, &update.base_city);
    merge(&mut next.phone, &update.phone);
    merge(&mut next.language, &update.language);
    next
}

/// Status filters offered above the partner's own listings; `None` shows all.
pub const LISTING_STATUS_FILTERS: [Option<ListingStatus>; 4] = [
    None,
    Some(ListingStatus::Draft),
    Some(ListingStatus::PendingReview),
    Some(ListingStatus::Published),
];

/// Whether a listing in `status` can be sent to moderation.
#[must_use]
pub const fn can_submit(status: Option<ListingStatus>) -> bool {
    matches!(
        status,
        None | Some(ListingStatus::Draft | ListingStatus::Rejected)
    )
}

/// Translation key for a listing status badge.
#[must_use]
pub const fn status_key(status: Option<ListingStatus>) -> &'static str {
    match status {
        None | Some(ListingStatus::Draft) => "profile.listings.status.draft",
        Some(ListingStatus::PendingReview) => "profile.listings.status.pendingReview",
        Some(ListingStatus::Published) => "profile.listings.status.published",
        Some(ListingStatus::Rejected) => "profile.listings.status.rejected",
        Some(ListingStatus::Archived) => "profile.listings.status.archived",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            company_name: Some("Costa Homes".to_string()),
            base_country: Some("ES".to_string()),
            ..User::default()
        }
    }

    #[test]
    fn blank_fields_are_omitted() -> Result<(), FieldErrors> {
        let mut form = ProfileForm::from_user(&user());
        assert_eq!(form.company_name, "Costa Homes");
        form.company_name = "  ".to_string();
        form.base_city = " Alicante ".to_string();
        form.base_country = "pt".to_string();
        let update = form.to_update()?;
        assert_eq!(update.company_name, None);
        assert_eq!(update.base_city.as_deref(), Some("Alicante"));
        assert_eq!(update.base_country.as_deref(), Some("PT"));
        assert_eq!(update.avatar_url, None);
        Ok(())
    }

    #[test]
    fn avatar_and_language_are_checked() {
        let form = ProfileForm {
            avatar_url: "ftp://example.com/me.png".to_string(),
            language: "klingon".to_string(),
            ..ProfileForm::default()
        };
        let errors = form.to_update().err().unwrap_or_default();
        assert_eq!(errors.get("avatarUrl"), Some(INVALID_URL));
        assert_eq!(errors.get("language"), Some("validation.option"));

        let ok = ProfileForm {
            avatar_url: "https://cdn.example.com/me.png".to_string(),
            language: "DE".to_string(),
            ..ProfileForm::default()
        };
        assert_eq!(
            ok.to_update().map(|update| update.language),
            Ok(Some("de".to_string()))
        );
    }

    #[test]
    fn only_drafts_and_rejections_can_be_submitted() {
        assert!(can_submit(None));
        assert!(can_submit(Some(ListingStatus::Rejected)));
        assert!(!can_submit(Some(ListingStatus::Published)));
        assert_eq!(
            status_key(Some(ListingStatus::PendingReview)),
            "profile.listings.status.pendingReview"
        );
    }

    #[test]
    fn updates_merge_into_cached_user() {
        let update = ProfileUpdate {
            base_city: Some("Lisbon".to_string()),
            ..ProfileUpdate::default()
        };
        let merged = apply_update(&user(), &update);
        assert_eq!(merged.base_city.as_deref(), Some("Lisbon"));
        assert_eq!(merged.company_name.as_deref(), Some("Costa Homes"));
    }
}
