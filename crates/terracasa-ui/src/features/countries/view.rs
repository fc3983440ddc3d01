//! Country guides page.

use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::core::store::AppStore;
use crate::features::countries::state::CountryGuide;
use crate::services::api::ApiClient;
use std::rc::Rc;
use tracing::debug;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn open_guide(client: Rc<ApiClient>, code: String) {
    let mut ticket = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| ticket = store.countries.select(&code));
    let Some(ticket) = ticket else {
        return;
    };
    yew::platform::spawn_local(async move {
        let result = client.country_guide(&ticket.code).await;
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            if !store.countries.apply(&ticket, result) {
                debug!(country = %ticket.code, "stale country guide dropped");
            }
        });
    });
}

#[function_component(CountriesPage)]
pub(crate) fn countries_page() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let state = use_selector(|store: &AppStore| store.countries.clone());

    {
        let api = api.clone();
        let loaded = !state.countries().is_empty();
        use_effect_with_deps(
            move |_| {
                if let (Some(api), false) = (api, loaded) {
                    yew::platform::spawn_local(async move {
                        let result = api.client.countries().await;
                        Dispatch::<AppStore>::new().reduce_mut(|store| store.countries.set_countries(result));
                    });
                }
                || ()
            },
            (),
        );
    }

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let list = state.countries().iter().map(|country| {
        let active = state.selected() == Some(country.code.as_str());
        let onclick = {
            let client = api.client.clone();
            let code = country.code.clone();
            Callback::from(move |_| open_guide(client.clone(), code.clone()))
        };
        html! {
            <li key={country.code.clone()}>
                <button type="button" class={classes!("country-link", active.then_some("active"))}
                    aria-pressed={active.to_string()} {onclick}>
                    <span class="country-code">{country.code.clone()}</span>
                    <span>{country.name.clone()}</span>
                </button>
            </li>
        }
    });

    let detail = if state.is_loading() {
        html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> }
    } else if let Some(err) = state.error() {
        let on_retry = {
            let client = api.client.clone();
            let code = state.selected().unwrap_or_default().to_string();
            Callback::from(move |()| open_guide(client.clone(), code.clone()))
        };
        html! { <ErrorBanner message={api_error_message(err)} on_dismiss={on_retry} /> }
    } else if let Some(guide) = state.guide() {
        guide_view(&i18n, guide, state.selected_name())
    } else {
        html! {
            <EmptyState title={i18n.t("countries.pick.title")} description={i18n.t("countries.pick.description")} icon="⌖" />
        }
    };

    html! {
        <section class="page countries-page">
            <header class="page-header">
                <h1>{i18n.t("countries.title")}</h1>
                <p class="muted">{i18n.t("countries.subtitle")}</p>
            </header>
            {state.list_error().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            <div class="countries-layout">
                <nav class="panel country-list" aria-label={i18n.t("countries.listLabel")}>
                    <ul>{for list}</ul>
                </nav>
                <div class="country-guide">{detail}</div>
            </div>
        </section>
    }
}

fn guide_view(i18n: &I18nCtx, guide: &CountryGuide, listed_name: Option<&str>) -> Html {
    let overview = &guide.overview;
    let name = if overview.name.trim().is_empty() {
        listed_name.unwrap_or(overview.code.as_str()).to_string()
    } else {
        overview.name.clone()
    };
    let facts = [
        ("countries.capital", overview.capital.clone()),
        ("countries.currency", overview.currency.clone()),
        (
            "countries.languages",
            (!overview.languages.is_empty()).then(|| overview.languages.join(", ")),
        ),
    ];
    html! {
        <article class="guide">
            <header class="panel guide-overview">
                <h2>{name}</h2>
                {overview.summary.clone().map(|summary| html! { <p>{summary}</p> }).unwrap_or_default()}
                <dl class="facts">
                    {for facts.into_iter().filter_map(|(key, value)| value.map(|value| html! {
                        <>
                            <dt>{i18n.t(key)}</dt>
                            <dd>{value}</dd>
                        </>
                    }))}
                </dl>
            </header>
            {if guide.sections.is_empty() {
                html! { <p class="muted">{i18n.t("countries.noSections")}</p> }
            } else {
                html! {
                    <>
                        {for guide.sections.iter().map(|section| html! {
                            <section class="panel guide-section" key={section.key.clone()}>
                                <h3>{section.title.clone()}</h3>
                                <p>{section.body.clone()}</p>
                            </section>
                        })}
                    </>
                }
            }}
        </article>
    }
}
