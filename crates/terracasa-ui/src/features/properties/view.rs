//! Properties search page.
//!
//! # Design
//! - The filter form lives in the store so it survives navigation.
//! - Invalid filters are reported inline and never reach the API.

use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::app::search::{ControllerLens, spawn_search, with_controller};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{CheckboxField, SelectField, TextField};
use crate::core::search::SearchController;
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::properties::state::{
    LISTING_COUNTRIES, PropertyFilterForm, PropertySearch, country_name, format_price,
};
use terracasa_api_models::{Furnishing, PropertyAge, PropertySort, PropertySummary, PropertyType};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const LENS: ControllerLens<PropertySearch> = properties;

fn properties(store: &mut AppStore) -> &mut SearchController<PropertySearch> {
    &mut store.properties
}

fn edit(apply: fn(&mut PropertyFilterForm, String)) -> Callback<String> {
    Callback::from(move |value: String| {
        Dispatch::<AppStore>::new().reduce_mut(|store| apply(&mut store.properties.form, value));
    })
}

fn toggle(apply: fn(&mut PropertyFilterForm, bool)) -> Callback<bool> {
    Callback::from(move |value: bool| {
        Dispatch::<AppStore>::new().reduce_mut(|store| apply(&mut store.properties.form, value));
    })
}

fn labelled<const N: usize, T: Copy>(
    i18n: &I18nCtx,
    prefix: &str,
    values: [T; N],
    wire: fn(T) -> &'static str,
) -> Vec<(String, String)> {
    values
        .into_iter()
        .map(|value| {
            let code = wire(value);
            (code.to_string(), i18n.t(&format!("{prefix}.{code}")))
        })
        .collect()
}

#[function_component(PropertiesPage)]
pub(crate) fn properties_page() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let state = use_selector(|store: &AppStore| store.properties.clone());
    let errors = use_state(FieldErrors::new);
    let advanced_open = use_state(|| false);

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
        let errors = errors.clone();
        Callback::from(move |_| {
            errors.set(FieldErrors::new());
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
        Dispatch::<AppStore>::new().reduce_mut(|store| store.properties.dismiss_error());
    });
    let toggle_advanced = {
        let advanced_open = advanced_open.clone();
        Callback::from(move |_| advanced_open.set(!*advanced_open))
    };

    let form = &state.form;
    let error_for = |field: &str| errors.get(field).map(|key| AttrValue::from(i18n.t(key)));
    let countries: Vec<(String, String)> = LISTING_COUNTRIES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
    let advanced_count = form.advanced.active_count();

    let advanced = if *advanced_open {
        let adv = &form.advanced;
        html! {
            <div class="advanced-filters">
                <SelectField
                    id="property-age"
                    label={i18n.t("properties.filters.propertyAge")}
                    value={adv.property_age.clone()}
                    options={labelled(&i18n, "properties.age", PropertyAge::all(), PropertyAge::as_str)}
                    placeholder={i18n.t("properties.filters.any")}
                    error={error_for("propertyAge")}
                    on_change={edit(|form, value| form.advanced.property_age = value)}
                />
                <SelectField
                    id="furnished"
                    label={i18n.t("properties.filters.furnished")}
                    value={adv.furnished.clone()}
                    options={labelled(&i18n, "properties.furnishing", Furnishing::all(), Furnishing::as_str)}
                    placeholder={i18n.t("properties.filters.any")}
                    error={error_for("furnished")}
                    on_change={edit(|form, value| form.advanced.furnished = value)}
                />
                <CheckboxField id="sea-view" label={i18n.t("properties.filters.seaView")} checked={adv.has_sea_view}
                    on_toggle={toggle(|form, on| form.advanced.has_sea_view = on)} />
                <CheckboxField id="pool" label={i18n.t("properties.filters.pool")} checked={adv.has_pool}
                    on_toggle={toggle(|form, on| form.advanced.has_pool = on)} />
                <CheckboxField id="garden" label={i18n.t("properties.filters.garden")} checked={adv.has_garden}
                    on_toggle={toggle(|form, on| form.advanced.has_garden = on)} />
                <CheckboxField id="parking" label={i18n.t("properties.filters.parking")} checked={adv.has_parking}
                    on_toggle={toggle(|form, on| form.advanced.has_parking = on)} />
                <CheckboxField id="elevator" label={i18n.t("properties.filters.elevator")} checked={adv.has_elevator}
                    on_toggle={toggle(|form, on| form.advanced.has_elevator = on)} />
            </div>
        }
    } else {
        html! {}
    };

    let results = if state.is_loading() {
        html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> }
    } else if state.is_empty() {
        html! {
            <EmptyState
                title={i18n.t("properties.empty.title")}
                description={i18n.t("properties.empty.description")}
                icon="⌂"
            >
                <button type="button" class="btn btn-ghost" onclick={on_reset.clone()}>
                    {i18n.t("properties.filters.reset")}
                </button>
            </EmptyState>
        }
    } else {
        html! {
            <div class="card-grid">
                {for state.items().iter().map(|property| property_card(&i18n, property))}
            </div>
        }
    };

    html! {
        <section class="page properties-page">
            <header class="page-header">
                <h1>{i18n.t("properties.title")}</h1>
                <p class="muted">{i18n.t("properties.subtitle")}</p>
            </header>
            <form class="filters" onsubmit={on_submit}>
                <SelectField
                    id="country"
                    label={i18n.t("properties.filters.country")}
                    value={form.country.clone()}
                    options={countries}
                    placeholder={i18n.t("properties.filters.any")}
                    on_change={edit(|form, value| form.country = value)}
                />
                <TextField id="city" label={i18n.t("properties.filters.city")} value={form.city.clone()}
                    on_input={edit(|form, value| form.city = value)} />
                <SelectField
                    id="property-type"
                    label={i18n.t("properties.filters.propertyType")}
                    value={form.property_type.clone()}
                    options={labelled(&i18n, "properties.types", PropertyType::all(), PropertyType::as_str)}
                    placeholder={i18n.t("properties.filters.any")}
                    error={error_for("propertyType")}
                    on_change={edit(|form, value| form.property_type = value)}
                />
                <TextField id="min-price" input_type="number" label={i18n.t("properties.filters.minPrice")}
                    value={form.min_price.clone()} error={error_for("minPrice")}
                    on_input={edit(|form, value| form.min_price = value)} />
                <TextField id="max-price" input_type="number" label={i18n.t("properties.filters.maxPrice")}
                    value={form.max_price.clone()} error={error_for("maxPrice")}
                    on_input={edit(|form, value| form.max_price = value)} />
                <TextField id="bedrooms" input_type="number" label={i18n.t("properties.filters.bedrooms")}
                    value={form.bedrooms.clone()} error={error_for("bedrooms")}
                    on_input={edit(|form, value| form.bedrooms = value)} />
                <TextField id="min-area" input_type="number" label={i18n.t("properties.filters.minArea")}
                    value={form.min_area_sqm.clone()} error={error_for("minAreaSqm")}
                    on_input={edit(|form, value| form.min_area_sqm = value)} />
                <TextField id="max-area" input_type="number" label={i18n.t("properties.filters.maxArea")}
                    value={form.max_area_sqm.clone()} error={error_for("maxAreaSqm")}
                    on_input={edit(|form, value| form.max_area_sqm = value)} />
                <SelectField
                    id="sort"
                    label={i18n.t("properties.filters.sort")}
                    value={form.sort.clone()}
                    options={labelled(&i18n, "properties.sort", PropertySort::all(), PropertySort::as_str)}
                    error={error_for("sort")}
                    on_change={edit(|form, value| form.sort = value)}
                />
                <button type="button" class="btn btn-ghost btn-sm" onclick={toggle_advanced}>
                    {i18n.t("properties.filters.more")}
                    {if advanced_count > 0 {
                        html! { <span class="badge">{advanced_count}</span> }
                    } else {
                        html! {}
                    }}
                </button>
                {advanced}
                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary" disabled={state.is_loading()}>
                        {i18n.t("properties.filters.search")}
                    </button>
                    <button type="button" class="btn btn-ghost" onclick={on_reset}>
                        {i18n.t("properties.filters.reset")}
                    </button>
                </div>
            </form>
            {state.error().map(|err| html! {
                <ErrorBanner message={api_error_message(err)} on_dismiss={on_dismiss.clone()} />
            }).unwrap_or_default()}
            {results}
            {if state.can_load_more() {
                html! {
                    <div class="load-more">
                        <button type="button" class="btn btn-outline" disabled={state.is_loading_more()} onclick={on_more}>
                            {if state.is_loading_more() { i18n.t("common.loading") } else { i18n.t("properties.loadMore") }}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
        </section>
    }
}

fn property_card(i18n: &I18nCtx, property: &PropertySummary) -> Html {
    let location = match property.city.as_deref() {
        Some(city) if !city.trim().is_empty() => format!("{city}, {}", country_name(&property.country)),
        _ => country_name(&property.country),
    };
    let facts: Vec<String> = [
        property
            .bedrooms
            .map(|count| i18n.tr("properties.card.bedrooms", &[("count", count.to_string().as_str())])),
        property
            .bathrooms
            .map(|count| i18n.tr("properties.card.bathrooms", &[("count", count.to_string().as_str())])),
        property
            .area_sqm
            .map(|area| i18n.tr("properties.card.area", &[("area", area.to_string().as_str())])),
    ]
    .into_iter()
    .flatten()
    .collect();
    html! {
        <article class="card property-card" key={property.id.clone()}>
            {property.primary_image_url.clone().map(|src| html! {
                <img class="card-image" src={src} alt={property.title.clone()} loading="lazy" />
            }).unwrap_or_else(|| html! { <div class="card-image placeholder" aria-hidden="true">{"⌂"}</div> })}
            <div class="card-body">
                {property.property_type.map(|kind| html! {
                    <span class="badge badge-outline">{i18n.t(&format!("properties.types.{}", kind.as_str()))}</span>
                }).unwrap_or_default()}
                <h3 class="card-title">{property.title.clone()}</h3>
                <p class="muted">{location}</p>
                <p class="price">{format_price(property.price_cents, &property.currency)}</p>
                <p class="facts">{facts.join(" · ")}</p>
            </div>
        </article>
    }
}
