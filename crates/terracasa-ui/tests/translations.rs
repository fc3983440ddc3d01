use terracasa_api_models::{Furnishing, PropertyAge, PropertySort, PropertyType};
use terracasa_ui::core::validation::{
    INVALID_EMAIL, INVALID_URL, PASSWORD_MISMATCH, PASSWORD_TOO_SHORT, REQUIRED,
};
use terracasa_ui::features::listing::state::{CONSENT_REQUIRED, ListingSection, TOO_MANY_IMAGES};
use terracasa_ui::features::network::state::SERVICE_CATEGORIES;
use terracasa_ui::features::profile::state::{LISTING_STATUS_FILTERS, status_key};
use terracasa_ui::i18n::{DEFAULT_LOCALE, I18nError, LocaleCode, TranslationBundle};

fn bundles() -> Result<Vec<TranslationBundle>, I18nError> {
    LocaleCode::all()
        .into_iter()
        .map(TranslationBundle::embedded)
        .collect()
}

#[test]
fn every_locale_defines_the_same_keys() -> Result<(), I18nError> {
    let reference = TranslationBundle::embedded(DEFAULT_LOCALE)?.keys();
    assert!(!reference.is_empty());
    for bundle in bundles()? {
        assert_eq!(
            bundle.keys(),
            reference,
            "{} drifted from {}",
            bundle.locale().code(),
            DEFAULT_LOCALE.code()
        );
    }
    Ok(())
}

#[test]
fn keys_produced_in_code_resolve() -> Result<(), I18nError> {
    let mut keys: Vec<String> = [
        REQUIRED,
        INVALID_EMAIL,
        PASSWORD_TOO_SHORT,
        PASSWORD_MISMATCH,
        INVALID_URL,
        CONSENT_REQUIRED,
        TOO_MANY_IMAGES,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    keys.extend(ListingSection::all().map(|section| section.title_key().to_string()));
    keys.extend(SERVICE_CATEGORIES.iter().map(|(_, key)| (*key).to_string()));
    keys.extend(LISTING_STATUS_FILTERS.iter().map(|status| status_key(*status).to_string()));
    keys.extend(PropertyType::all().map(|kind| format!("properties.types.{}", kind.as_str())));
    keys.extend(PropertySort::all().map(|sort| format!("properties.sort.{}", sort.as_str())));
    keys.extend(PropertyAge::all().map(|age| format!("properties.age.{}", age.as_str())));
    keys.extend(Furnishing::all().map(|level| format!("properties.furnishing.{}", level.as_str())));

    for bundle in bundles()? {
        for key in &keys {
            assert!(
                bundle.lookup(key).is_some(),
                "{} is missing {key}",
                bundle.locale().code()
            );
        }
    }
    Ok(())
}

#[test]
fn placeholders_survive_translation() -> Result<(), I18nError> {
    for bundle in bundles()? {
        let text = bundle.translate("network.reviewCount", &[("count", "12")]);
        assert!(text.contains("12"), "{}: {text}", bundle.locale().code());
        assert!(!text.contains('{'));

        let text = bundle.translate("postAd.imageCount", &[("count", "3"), ("max", "20")]);
        assert!(text.contains('3') && text.contains("20"));
    }
    Ok(())
}

#[test]
fn locales_are_actually_translated() -> Result<(), I18nError> {
    let english = TranslationBundle::embedded(LocaleCode::En)?;
    let german = TranslationBundle::embedded(LocaleCode::De)?;
    assert_ne!(english.t("nav.login"), german.t("nav.login"));
    assert_eq!(german.t("nav.login"), "Anmelden");
    Ok(())
}
