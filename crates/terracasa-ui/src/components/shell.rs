//! Page chrome: navbar, content slot and footer.

use crate::app::Route;
use crate::app::i18n::use_i18n;
use crate::components::locale_menu::LocaleMenu;
use crate::i18n::LocaleCode;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    /// Name shown for the signed-in user; `None` when anonymous.
    pub user_name: Option<String>,
    pub on_locale: Callback<LocaleCode>,
    pub on_sign_out: Callback<()>,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let i18n = use_i18n();
    let active = use_route::<Route>().unwrap_or(Route::Home);
    let nav_open = use_state(|| false);
    let toggle_nav = {
        let nav_open = nav_open.clone();
        Callback::from(move |_| nav_open.set(!*nav_open))
    };
    let nav_item = |route: Route, key: &str| {
        let is_active = active == route;
        html! {
            <li>
                <Link<Route> to={route} classes={classes!("nav-link", is_active.then_some("active"))}>
                    {i18n.t(key)}
                </Link<Route>>
            </li>
        }
    };

    let account = match &props.user_name {
        Some(name) => {
            let on_sign_out = props.on_sign_out.clone();
            html! {
                <div class="account">
                    <Link<Route> to={Route::Profile} classes="btn btn-ghost btn-sm">{name.clone()}</Link<Route>>
                    <button type="button" class="btn btn-outline btn-sm" onclick={Callback::from(move |_| on_sign_out.emit(()))}>
                        {i18n.t("nav.logout")}
                    </button>
                </div>
            }
        }
        None => html! {
            <div class="account">
                <Link<Route> to={Route::Login} classes="btn btn-ghost btn-sm">{i18n.t("nav.login")}</Link<Route>>
                <Link<Route> to={Route::Register} classes="btn btn-primary btn-sm">{i18n.t("nav.register")}</Link<Route>>
            </div>
        },
    };

    html! {
        <div class="app-shell">
            <header class="navbar">
                <Link<Route> to={Route::Home} classes="brand">{"TerraCasa"}</Link<Route>>
                <button type="button" class="btn btn-ghost mobile-only" aria-label={i18n.t("nav.menu")} onclick={toggle_nav}>{"☰"}</button>
                <nav class={classes!("nav", (*nav_open).then_some("open"))}>
                    <ul>
                        {nav_item(Route::Properties, "nav.properties")}
                        {nav_item(Route::Countries, "nav.countries")}
                        {nav_item(Route::Network, "nav.network")}
                        {nav_item(Route::PostAd, "nav.postAd")}
                    </ul>
                </nav>
                <LocaleMenu locale={i18n.locale} busy={i18n.loading} on_select={props.on_locale.clone()} />
                {account}
            </header>
            <main class="content">
                { for props.children.iter() }
            </main>
            <footer class="footer">
                <div>
                    <strong>{"TerraCasa"}</strong>
                    <p class="muted">{i18n.t("footer.tagline")}</p>
                </div>
                <nav>
                    <Link<Route> to={Route::Properties}>{i18n.t("nav.properties")}</Link<Route>>
                    <Link<Route> to={Route::Countries}>{i18n.t("nav.countries")}</Link<Route>>
                    <Link<Route> to={Route::Network}>{i18n.t("nav.network")}</Link<Route>>
                </nav>
                <p class="muted">{i18n.t("footer.rights")}</p>
            </footer>
        </div>
    }
}
