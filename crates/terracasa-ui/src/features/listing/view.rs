//! Post-ad wizard page.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{CheckboxField, SelectField, TextField};
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::listing::state::{ListingForm, ListingSection, ListingWizard, MAX_LISTING_IMAGES};
use crate::features::properties::state::LISTING_COUNTRIES;
use terracasa_api_models::{Furnishing, PropertyType};
use tracing::{info, warn};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::{Dispatch, use_selector};

type TextSetter = fn(&mut ListingForm, String);
type FlagSetter = fn(&mut ListingForm, bool);

fn edit_text(field: &'static str, apply: TextSetter) -> Callback<String> {
    Callback::from(move |value: String| {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            apply(&mut store.listing.form, value);
            store.listing.clear_error(field);
        });
    })
}

fn edit_flag(field: &'static str, apply: FlagSetter) -> Callback<bool> {
    Callback::from(move |value: bool| {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            apply(&mut store.listing.form, value);
            store.listing.clear_error(field);
        });
    })
}

/// Renders inputs for one section against the current errors.
struct SectionCtx<'a> {
    i18n: &'a I18nCtx,
    errors: &'a FieldErrors,
}

impl SectionCtx<'_> {
    fn label(&self, field: &str) -> String {
        self.i18n.t(&format!("postAd.fields.{field}"))
    }

    fn error(&self, field: &str) -> Option<AttrValue> {
        self.errors.get(field).map(|key| AttrValue::from(self.i18n.t(key)))
    }

    fn input(&self, field: &'static str, input_type: &'static str, value: &str, apply: TextSetter) -> Html {
        html! {
            <TextField id={format!("listing-{field}")} input_type={input_type} label={self.label(field)}
                value={value.to_string()} error={self.error(field)} on_input={edit_text(field, apply)} />
        }
    }

    fn text(&self, field: &'static str, value: &str, apply: TextSetter) -> Html {
        self.input(field, "text", value, apply)
    }

    fn number(&self, field: &'static str, value: &str, apply: TextSetter) -> Html {
        self.input(field, "number", value, apply)
    }

    fn required(&self, field: &'static str, value: &str, apply: TextSetter) -> Html {
        html! {
            <TextField id={format!("listing-{field}")} label={self.label(field)} required=true
                value={value.to_string()} error={self.error(field)} on_input={edit_text(field, apply)} />
        }
    }

    fn flag(&self, field: &'static str, checked: bool, apply: FlagSetter) -> Html {
        html! {
            <CheckboxField id={format!("listing-{field}")} label={self.label(field)} checked={checked}
                error={self.error(field)} on_toggle={edit_flag(field, apply)} />
        }
    }

    fn select(&self, field: &'static str, value: &str, options: Vec<(String, String)>, apply: TextSetter) -> Html {
        html! {
            <SelectField id={format!("listing-{field}")} label={self.label(field)} value={value.to_string()}
                options={options} placeholder={self.i18n.t("common.select")}
                error={self.error(field)} on_change={edit_text(field, apply)} />
        }
    }
}

#[function_component(PostAdPage)]
pub(crate) fn post_ad_page() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let signed_in = use_selector(|store: &AppStore| store.auth.has_credentials());
    let wizard = use_selector(|store: &AppStore| store.listing.clone());

    if !*signed_in {
        return html! {
            <section class="page post-ad-page">
                <EmptyState title={i18n.t("postAd.signedOut.title")} description={i18n.t("postAd.signedOut.description")}>
                    <Link<Route> to={Route::Login} classes="btn btn-primary">{i18n.t("nav.login")}</Link<Route>>
                    <Link<Route> to={Route::Register} classes="btn btn-ghost">{i18n.t("nav.register")}</Link<Route>>
                </EmptyState>
            </section>
        };
    }
    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    if wizard.is_submitted() {
        let on_again = Callback::from(|_| {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.listing = ListingWizard::new());
        });
        return html! {
            <section class="page post-ad-page">
                <EmptyState title={i18n.t("postAd.success.title")} description={i18n.t("postAd.success.description")} icon="✓">
                    <Link<Route> to={Route::Profile} classes="btn btn-primary">{i18n.t("postAd.success.toProfile")}</Link<Route>>
                    <button type="button" class="btn btn-ghost" onclick={on_again}>{i18n.t("postAd.success.again")}</button>
                </EmptyState>
            </section>
        };
    }

    let on_next = Callback::from(|_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            store.listing.next();
        });
    });
    let on_previous = Callback::from(|_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.listing.previous());
    });
    let on_submit = {
        let client = api.client.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut draft = None;
            Dispatch::<AppStore>::new().reduce_mut(|store| draft = Some(store.listing.begin_submit()));
            let Some(Ok(draft)) = draft else {
                return;
            };
            let client = client.clone();
            yew::platform::spawn_local(async move {
                let result = client.create_property(&draft).await;
                match &result {
                    Ok(()) => info!(title = %draft.title, "listing submitted"),
                    Err(err) => warn!(error = %err, "listing submission failed"),
                }
                Dispatch::<AppStore>::new().reduce_mut(|store| store.listing.finish_submit(result));
            });
        })
    };
    let on_dismiss = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.listing.clear_error(""));
    });

    let current = wizard.section();
    let furthest = wizard.furthest();
    let ctx = SectionCtx {
        i18n: &i18n,
        errors: wizard.errors(),
    };
    let steps = ListingSection::all().into_iter().map(|section| {
        let reachable = section <= furthest;
        let onclick = Callback::from(move |_| {
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                store.listing.go_to(section);
            });
        });
        html! {
            <li class={classes!("step", (section <= current).then_some("step-primary"))}>
                <button type="button" class="btn btn-link btn-xs" disabled={!reachable} {onclick}>
                    {i18n.t(section.title_key())}
                </button>
            </li>
        }
    });
    let body = match current {
        ListingSection::Basics => basics(&ctx, &wizard.form),
        ListingSection::Details => details(&ctx, &wizard.form),
        ListingSection::Location => location(&ctx, &wizard.form),
        ListingSection::Audience => audience(&ctx, &wizard.form),
        ListingSection::Investment => investment(&ctx, &wizard.form),
        ListingSection::Verification => verification(&ctx, &wizard.form),
    };
    let is_last = current.next().is_none();

    html! {
        <section class="page post-ad-page">
            <header class="page-header">
                <h1>{i18n.t("postAd.title")}</h1>
                <p class="muted">{i18n.t("postAd.subtitle")}</p>
            </header>
            <ul class="steps">{for steps}</ul>
            {wizard.error().map(|err| html! {
                <ErrorBanner message={api_error_message(err)} on_dismiss={on_dismiss.clone()} />
            }).unwrap_or_default()}
            <form class="panel wizard" onsubmit={on_submit}>
                <h2>{i18n.t(current.title_key())}</h2>
                {body}
                <div class="wizard-actions">
                    <button type="button" class="btn btn-ghost" disabled={current.previous().is_none()} onclick={on_previous}>
                        {i18n.t("postAd.previous")}
                    </button>
                    {if is_last {
                        html! {
                            <button type="submit" class="btn btn-primary" disabled={wizard.is_submitting()}>
                                {i18n.t("postAd.submit")}
                            </button>
                        }
                    } else {
                        html! {
                            <button type="button" class="btn btn-primary" onclick={on_next}>
                                {i18n.t("postAd.next")}
                            </button>
                        }
                    }}
                </div>
            </form>
        </section>
    }
}

fn basics(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    let countries: Vec<(String, String)> = LISTING_COUNTRIES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
    let types: Vec<(String, String)> = PropertyType::all()
        .into_iter()
        .map(|kind| (kind.as_str().to_string(), ctx.i18n.t(&format!("properties.types.{}", kind.as_str()))))
        .collect();
    html! {
        <div class="form-grid">
            {ctx.required("title", &form.title, |form, value| form.title = value)}
            <TextField id="listing-description" label={ctx.label("description")} multiline=true required=true
                value={form.description.clone()} error={ctx.error("description")}
                on_input={edit_text("description", |form, value| form.description = value)} />
            {ctx.select("country", &form.country, countries, |form, value| form.country = value)}
            {ctx.required("city", &form.city, |form, value| form.city = value)}
            {ctx.text("district", &form.district, |form, value| form.district = value)}
            {ctx.select("propertyType", &form.property_type, types, |form, value| form.property_type = value)}
            {ctx.number("price", &form.price, |form, value| form.price = value)}
            {ctx.number("bedrooms", &form.bedrooms, |form, value| form.bedrooms = value)}
            {ctx.number("areaSqm", &form.area_sqm, |form, value| form.area_sqm = value)}
        </div>
    }
}

fn details(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    let furnishing: Vec<(String, String)> = Furnishing::all()
        .into_iter()
        .map(|level| (level.as_str().to_string(), ctx.i18n.t(&format!("properties.furnishing.{}", level.as_str()))))
        .collect();
    let yes_no = vec![
        ("yes".to_string(), ctx.i18n.t("common.yes")),
        ("no".to_string(), ctx.i18n.t("common.no")),
    ];
    html! {
        <div class="form-grid">
            {ctx.number("bathrooms", &form.bathrooms, |form, value| form.bathrooms = value)}
            {ctx.number("plotAreaSqm", &form.plot_area_sqm, |form, value| form.plot_area_sqm = value)}
            {ctx.number("yearBuilt", &form.year_built, |form, value| form.year_built = value)}
            {ctx.text("condition", &form.condition, |form, value| form.condition = value)}
            {ctx.number("garageSpaces", &form.garage_spaces, |form, value| form.garage_spaces = value)}
            {ctx.number("balconyTerraceCount", &form.balcony_terrace_count, |form, value| form.balcony_terrace_count = value)}
            {ctx.text("pool", &form.pool, |form, value| form.pool = value)}
            {ctx.number("bathroomsWithToilet", &form.bathrooms_with_toilet, |form, value| form.bathrooms_with_toilet = value)}
            {ctx.number("separateToilets", &form.separate_toilets, |form, value| form.separate_toilets = value)}
            {ctx.text("energyClass", &form.energy_class, |form, value| form.energy_class = value)}
            {ctx.number("energyConsumption", &form.energy_consumption, |form, value| form.energy_consumption = value)}
            {ctx.text("availability", &form.availability, |form, value| form.availability = value)}
            {ctx.select("furnishing", &form.furnishing, furnishing, |form, value| form.furnishing = value)}
            {ctx.select("allYearHabitable", &form.all_year_habitable, yes_no, |form, value| form.all_year_habitable = value)}
            {ctx.number("airConditioningRooms", &form.air_conditioning_rooms, |form, value| form.air_conditioning_rooms = value)}
            {ctx.text("heatingType", &form.heating_type, |form, value| form.heating_type = value)}
            {ctx.text("solarSystem", &form.solar_system, |form, value| form.solar_system = value)}
            {ctx.text("elevator", &form.elevator, |form, value| form.elevator = value)}
            {ctx.flag("caretakerService", form.caretaker_service, |form, on| form.caretaker_service = on)}
        </div>
    }
}

fn location(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    html! {
        <div class="form-grid">
            {ctx.flag("seaLakeView", form.sea_lake_view, |form, on| form.sea_lake_view = on)}
            {ctx.flag("mountainView", form.mountain_view, |form, on| form.mountain_view = on)}
            {ctx.text("directWaterfront", &form.direct_waterfront, |form, value| form.direct_waterfront = value)}
            {ctx.text("beachAccess", &form.beach_access, |form, value| form.beach_access = value)}
            {ctx.text("distanceToBeach", &form.distance_to_beach, |form, value| form.distance_to_beach = value)}
            {ctx.text("distanceToSki", &form.distance_to_ski, |form, value| form.distance_to_ski = value)}
            {ctx.text("distanceToMarina", &form.distance_to_marina, |form, value| form.distance_to_marina = value)}
            {ctx.text("distanceToGolf", &form.distance_to_golf, |form, value| form.distance_to_golf = value)}
            {ctx.text("distanceToAirport", &form.distance_to_airport, |form, value| form.distance_to_airport = value)}
            {ctx.text("distanceToRestaurants", &form.distance_to_restaurants, |form, value| form.distance_to_restaurants = value)}
            {ctx.text("distanceToSupermarket", &form.distance_to_supermarket, |form, value| form.distance_to_supermarket = value)}
            {ctx.text("distanceToHospital", &form.distance_to_hospital, |form, value| form.distance_to_hospital = value)}
            {ctx.text("distanceToSchools", &form.distance_to_schools, |form, value| form.distance_to_schools = value)}
            {ctx.text("publicTransport", &form.public_transport, |form, value| form.public_transport = value)}
            {ctx.number("publicTransportMinutes", &form.public_transport_minutes, |form, value| form.public_transport_minutes = value)}
            {ctx.text("internetQuality", &form.internet_quality, |form, value| form.internet_quality = value)}
        </div>
    }
}

fn audience(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    html! {
        <div class="form-grid">
            {ctx.text("popularWith", &form.popular_with, |form, value| form.popular_with = value)}
            {ctx.flag("expatFriendly", form.expat_friendly, |form, on| form.expat_friendly = on)}
            {ctx.flag("digitalNomadFriendly", form.digital_nomad_friendly, |form, on| form.digital_nomad_friendly = on)}
            {ctx.flag("petFriendly", form.pet_friendly, |form, on| form.pet_friendly = on)}
            {ctx.flag("familyFriendly", form.family_friendly, |form, on| form.family_friendly = on)}
            {ctx.flag("seniorFriendly", form.senior_friendly, |form, on| form.senior_friendly = on)}
        </div>
    }
}

fn investment(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    html! {
        <div class="form-grid">
            {ctx.text("currentlyRented", &form.currently_rented, |form, value| form.currently_rented = value)}
            {ctx.number("expectedYield", &form.expected_yield, |form, value| form.expected_yield = value)}
            {ctx.text("propertyManagementAvailable", &form.property_management_available, |form, value| form.property_management_available = value)}
            {ctx.flag("airbnbReady", form.airbnb_ready, |form, on| form.airbnb_ready = on)}
            <h3 class="form-subtitle">{ctx.i18n.t("postAd.legalTitle")}</h3>
            {ctx.text("foreignersCanBuy", &form.foreigners_can_buy, |form, value| form.foreigners_can_buy = value)}
            {ctx.text("secondHomeAllowed", &form.second_home_allowed, |form, value| form.second_home_allowed = value)}
            {ctx.text("localAdvisorRecommended", &form.local_advisor_recommended, |form, value| form.local_advisor_recommended = value)}
            {ctx.text("taxBenefits", &form.tax_benefits, |form, value| form.tax_benefits = value)}
            {ctx.text("localFinancingOptions", &form.local_financing_options, |form, value| form.local_financing_options = value)}
        </div>
    }
}

fn verification(ctx: &SectionCtx<'_>, form: &ListingForm) -> Html {
    let on_files = Callback::from(|event: Event| {
        let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        let names: Vec<String> = (0..files.length())
            .filter_map(|index| files.get(index))
            .map(|file| file.name())
            .collect();
        input.set_value("");
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            if store.listing.form.add_images(names) {
                store.listing.clear_error("images");
            } else {
                warn!(limit = MAX_LISTING_IMAGES, "image batch refused");
            }
        });
    });
    let images = form.images.iter().enumerate().map(|(index, name)| {
        let onclick = Callback::from(move |_| {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.listing.form.remove_image(index));
        });
        html! {
            <li key={format!("{index}-{name}")}>
                <span>{name.clone()}</span>
                <button type="button" class="btn btn-ghost btn-xs" aria-label={ctx.i18n.t("common.remove")} {onclick}>{"✕"}</button>
            </li>
        }
    });
    let count = form.images.len().to_string();
    let limit = MAX_LISTING_IMAGES.to_string();
    html! {
        <div class="form-grid">
            <label class="field" for="listing-images">
                <span class="field-label">{ctx.label("images")}</span>
                <input id="listing-images" type="file" class="file-input" accept="image/*" multiple=true
                    disabled={form.images.len() >= MAX_LISTING_IMAGES} onchange={on_files} />
                <span class="muted">{ctx.i18n.tr("postAd.imageCount", &[("count", count.as_str()), ("max", limit.as_str())])}</span>
                {ctx.error("images").map(|message| html! { <span class="field-error" role="alert">{message}</span> }).unwrap_or_default()}
            </label>
            <ul class="image-list">{for images}</ul>
            {ctx.flag("addressVerified", form.address_verified, |form, on| form.address_verified = on)}
            {ctx.flag("premiumReviewPurchased", form.premium_review_purchased, |form, on| form.premium_review_purchased = on)}
            {ctx.flag("consentAccepted", form.consent_accepted, |form, on| form.consent_accepted = on)}
        </div>
    }
}
