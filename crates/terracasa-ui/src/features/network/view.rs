//! Partner network page.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::app::search::{ControllerLens, spawn_search, with_controller};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{CheckboxField, SelectField, TextField};
use crate::core::search::SearchController;
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::network::state::{
    PartnerFilterForm, PartnerSearch, SERVICE_CATEGORIES, initials, partner_location,
};
use crate::features::partners::state::{format_rating, star_fill};
use crate::features::properties::state::LISTING_COUNTRIES;
use crate::i18n::LocaleCode;
use terracasa_api_models::PartnerSummary;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::{Dispatch, use_selector};

const LENS: ControllerLens<PartnerSearch> = network;

fn network(store: &mut AppStore) -> &mut SearchController<PartnerSearch> {
    &mut store.network
}

fn edit(apply: fn(&mut PartnerFilterForm, String)) -> Callback<String> {
    Callback::from(move |value: String| {
        Dispatch::<AppStore>::new().reduce_mut(|store| apply(&mut store.network.form, value));
    })
}

fn toggle(apply: fn(&mut PartnerFilterForm, bool)) -> Callback<bool> {
    Callback::from(move |value: bool| {
        Dispatch::<AppStore>::new().reduce_mut(|store| apply(&mut store.network.form, value));
    })
}

#[function_component(NetworkPage)]
pub(crate) fn network_page() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let state = use_selector(|store: &AppStore| store.network.clone());
    let errors = use_state(FieldErrors::new);

    {
        let api = api.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api) = api {
                    let request = with_controller(LENS, |controller| {
                        (!controller.has_searched()).then(|| controller.load_default())
                    })
                    .flatten();
                    if let Some(request) = request {
                        spawn_search(api.client, request, LENS);
                    }
                }
                || ()
            },
            (),
        );
    }

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let on_submit = {
        let client = api.client.clone();
        let errors = errors.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match with_controller(LENS, SearchController::search) {
                Some(Ok(request)) => {
                    errors.set(FieldErrors::new());
                    spawn_search(client.clone(), request, LENS);
                }
                Some(Err(err)) => {
                    let mut next = FieldErrors::new();
                    next.push_filter_error(&err);
                    errors.set(next);
                }
                None => {}
            }
        })
    };
    let on_reset = {
        let client = api.client.clone();
        Callback::from(move |_| {
            if let Some(request) = with_controller(LENS, SearchController::reset) {
                spawn_search(client.clone(), request, LENS);
            }
        })
    };
    let on_more = {
        let client = api.client.clone();
        Callback::from(move |_| {
            if let Some(request) = with_controller(LENS, SearchController::load_more).flatten() {
                spawn_search(client.clone(), request, LENS);
            }
        })
    };
    let on_dismiss = Callback::from(|()| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.network.dismiss_error());
    });

    let form = &state.form;
    let countries: Vec<(String, String)> = LISTING_COUNTRIES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
    let categories: Vec<(String, String)> = SERVICE_CATEGORIES
        .iter()
        .map(|(value, key)| ((*value).to_string(), i18n.t(key)))
        .collect();
    let languages: Vec<(String, String)> = LocaleCode::all()
        .into_iter()
        .map(|locale| (locale.code().to_string(), locale.label().to_string()))
        .collect();
    let featured = state.submitted().is_none_or(|query| query.min_rating.is_some());

    let results = if state.is_loading() {
        html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> }
    } else if state.is_empty() {
        html! {
            <EmptyState
                title={i18n.t("network.empty.title")}
                description={i18n.t("network.empty.description")}
                icon="☺"
            >
                <button type="button" class="btn btn-ghost" onclick={on_reset.clone()}>
                    {i18n.t("network.filters.reset")}
                </button>
            </EmptyState>
        }
    } else {
        html! {
            <div class="card-grid">
                {for state.items().iter().map(|partner| partner_card(&i18n, partner))}
            </div>
        }
    };

    html! {
        <section class="page network-page">
            <header class="page-header">
                <h1>{i18n.t("network.title")}</h1>
                <p class="muted">{i18n.t("network.subtitle")}</p>
            </header>
            <form class="filters" onsubmit={on_submit}>
                <SelectField id="partner-country" label={i18n.t("network.filters.country")}
                    value={form.country.clone()} options={countries}
                    placeholder={i18n.t("network.filters.any")}
                    on_change={edit(|form, value| form.country = value)} />
                <TextField id="partner-city" label={i18n.t("network.filters.city")}
                    value={form.city.clone()} error={errors.get("city").map(|key| AttrValue::from(i18n.t(key)))}
                    on_input={edit(|form, value| form.city = value)} />
                <SelectField id="service-category" label={i18n.t("network.filters.category")}
                    value={form.service_category.clone()} options={categories}
                    placeholder={i18n.t("network.filters.any")}
                    on_change={edit(|form, value| form.service_category = value)} />
                <SelectField id="partner-language" label={i18n.t("network.filters.language")}
                    value={form.language.clone()} options={languages}
                    placeholder={i18n.t("network.filters.any")}
                    on_change={edit(|form, value| form.language = value)} />
                <div class="refinements">
                    <CheckboxField id="verified-only" label={i18n.t("network.filters.verifiedOnly")}
                        checked={form.refinements.verified_only}
                        on_toggle={toggle(|form, on| form.refinements.verified_only = on)} />
                    <CheckboxField id="top-rated" label={i18n.t("network.filters.topRated")}
                        checked={form.refinements.top_rated}
                        on_toggle={toggle(|form, on| form.refinements.top_rated = on)} />
                    <CheckboxField id="immediately-available" label={i18n.t("network.filters.immediate")}
                        checked={form.refinements.immediately_available}
                        on_toggle={toggle(|form, on| form.refinements.immediately_available = on)} />
                    <CheckboxField id="available-247" label={i18n.t("network.filters.available247")}
                        checked={form.refinements.available_247}
                        on_toggle={toggle(|form, on| form.refinements.available_247 = on)} />
                </div>
                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary" disabled={state.is_loading()}>
                        {i18n.t("network.filters.search")}
                    </button>
                    <button type="button" class="btn btn-ghost" onclick={on_reset}>
                        {i18n.t("network.filters.reset")}
                    </button>
                </div>
            </form>
            {if featured {
                html! { <h2 class="section-title">{i18n.t("network.featured")}</h2> }
            } else {
                html! {}
            }}
            {state.error().map(|err| html! {
                <ErrorBanner message={api_error_message(err)} on_dismiss={on_dismiss.clone()} />
            }).unwrap_or_default()}
            {results}
            {if state.can_load_more() {
                html! {
                    <div class="load-more">
                        <button type="button" class="btn btn-outline" disabled={state.is_loading_more()} onclick={on_more}>
                            {i18n.t("network.loadMore")}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
        </section>
    }
}

pub(crate) fn rating_stars(rating: f64) -> Html {
    html! {
        <span class="stars" aria-label={format_rating(rating)}>
            {for star_fill(rating).into_iter().map(|filled| html! {
                <span class={classes!("star", filled.then_some("filled"))}>{if filled { "★" } else { "☆" }}</span>
            })}
        </span>
    }
}

pub(crate) fn partner_avatar(partner: &PartnerSummary) -> Html {
    match partner.avatar_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => html! { <img class="avatar" src={url.to_string()} alt={partner.display_name.clone()} /> },
        None => html! { <span class="avatar placeholder">{initials(&partner.display_name)}</span> },
    }
}

fn partner_card(i18n: &I18nCtx, partner: &PartnerSummary) -> Html {
    let subtitle: Vec<&str> = [partner.role_title.as_deref(), partner.company_name.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    html! {
        <article class="card partner-card" key={partner.id.clone()}>
            <Link<Route> to={Route::Partner { id: partner.id.clone() }} classes="card-link">
                {partner_avatar(partner)}
                <div class="card-body">
                    <h3 class="card-title">
                        {partner.display_name.clone()}
                        {if partner.is_verified {
                            html! { <span class="badge badge-success">{i18n.t("network.verified")}</span> }
                        } else {
                            html! {}
                        }}
                    </h3>
                    <p class="muted">{subtitle.join(" · ")}</p>
                    {partner_location(partner).map(|location| html! { <p>{location}</p> }).unwrap_or_default()}
                    <p class="rating">
                        {rating_stars(partner.rating_average)}
                        <span>{format_rating(partner.rating_average)}</span>
                        <span class="muted">
                            {i18n.tr("network.reviewCount", &[("count", partner.rating_count.to_string().as_str())])}
                        </span>
                    </p>
                    {if partner.languages.is_empty() {
                        html! {}
                    } else {
                        html! { <p class="languages">{partner.languages.join(", ").to_uppercase()}</p> }
                    }}
                </div>
            </Link<Route>>
        </article>
    }
}
