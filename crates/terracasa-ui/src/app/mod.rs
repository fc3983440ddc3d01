use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, change_language, drive_locale_load};
use crate::app::preferences::{BrowserStore, browser_language, redirect_to};
use crate::app::telemetry::ConsoleSink;
use crate::components::shell::AppShell;
use crate::core::config::UiConfig;
use crate::core::storage::{KeyValueStore, load_language};
use crate::core::store::AppStore;
use crate::core::telemetry::init_logging;
use crate::features::auth::state::AuthTab;
use crate::features::auth::view::AuthPage;
use crate::features::countries::view::CountriesPage;
use crate::features::listing::view::PostAdPage;
use crate::features::network::view::NetworkPage;
use crate::features::partners::view::PartnerPage;
use crate::features::profile::view::ProfilePage;
use crate::features::properties::view::PropertiesPage;
use crate::i18n::LocaleCode;
use home::HomePage;
pub(crate) use routes::Route;
use std::rc::Rc;
use tracing::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
mod home;
pub(crate) mod i18n;
pub(crate) mod preferences;
mod routes;
pub(crate) mod search;
mod telemetry;

#[function_component(TerraCasaApp)]
pub fn terracasa_app() -> Html {
    let config = use_memo(|_| UiConfig::from_env(), ());
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = {
        let login_route = config.login_route.clone();
        use_memo(
            move |config| {
                let on_unauthorized = Callback::from(move |()| {
                    warn!("session rejected; returning to login");
                    Dispatch::<AppStore>::new().reduce_mut(|store| store.sign_out(&BrowserStore));
                    redirect_to(&login_route);
                });
                let storage: Rc<dyn KeyValueStore> = Rc::new(BrowserStore);
                ApiCtx::new((**config).clone(), storage, on_unauthorized)
            },
            config,
        )
    };
    let i18n_ctx = use_selector(|store: &AppStore| I18nCtx {
        locale: store.i18n.active(),
        bundle: store.i18n.bundle(),
        loading: store.i18n.is_loading(),
    });
    let user_name = use_selector(|store: &AppStore| store.auth.user().map(|user| user.display_name()));

    {
        let dispatch = dispatch.clone();
        let client = api_ctx.client.clone();
        use_effect_with_deps(
            move |_| {
                let mut step = None;
                let mut signed_in = false;
                dispatch.reduce_mut(|store| {
                    store.restore_session(&BrowserStore);
                    signed_in = store.auth.has_credentials();
                    let user_pref = store.auth.user().and_then(|user| user.language.clone());
                    let stored = load_language(&BrowserStore).or_else(browser_language);
                    step = Some(store.i18n.initialize(user_pref.as_deref(), stored.as_deref()));
                });
                if let Some(step) = step {
                    drive_locale_load(step);
                }
                if signed_in {
                    yew::platform::spawn_local(async move {
                        match client.me().await {
                            Ok(user) => Dispatch::<AppStore>::new()
                                .reduce_mut(|store| store.update_user(&BrowserStore, user)),
                            Err(err) => warn!(error = %err, "profile refresh failed"),
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let on_locale = Callback::from(|locale: LocaleCode| change_language(locale.code(), &BrowserStore));
    let on_sign_out = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            info!("signed out");
            dispatch.reduce_mut(|store| store.sign_out(&BrowserStore));
        })
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<I18nCtx> context={(*i18n_ctx).clone()}>
                <BrowserRouter>
                    <AppShell user_name={(*user_name).clone()} on_locale={on_locale} on_sign_out={on_sign_out}>
                        <Switch<Route> render={switch} />
                    </AppShell>
                </BrowserRouter>
            </ContextProvider<I18nCtx>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Properties => html! { <PropertiesPage /> },
        Route::Network => html! { <NetworkPage /> },
        Route::Countries => html! { <CountriesPage /> },
        Route::Partner { id } => html! { <PartnerPage id={id} /> },
        Route::Login => html! { <AuthPage tab={AuthTab::Login} /> },
        Route::Register => html! { <AuthPage tab={AuthTab::Register} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::PostAd => html! { <PostAdPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

/// Entry point for the wasm bundle.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let level = UiConfig::from_env().log_level;
    if let Err(err) = init_logging(ConsoleSink, level) {
        gloo::console::warn!(err.to_string());
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<TerraCasaApp>::with_root(root).render();
    } else {
        yew::Renderer::<TerraCasaApp>::new().render();
    }
}
