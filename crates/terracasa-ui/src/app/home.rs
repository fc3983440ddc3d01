//! Landing page.

use crate::app::Route;
use crate::app::i18n::use_i18n;
use yew::prelude::*;
use yew_router::prelude::Link;

#[function_component(HomePage)]
pub(crate) fn home_page() -> Html {
    let i18n = use_i18n();
    let cards = [
        (Route::Properties, "⌂", "home.cards.properties"),
        (Route::Countries, "⌖", "home.cards.countries"),
        (Route::Network, "☺", "home.cards.network"),
        (Route::PostAd, "✎", "home.cards.postAd"),
    ];

    html! {
        <section class="page home-page">
            <div class="hero">
                <h1>{i18n.t("home.hero.title")}</h1>
                <p class="lead">{i18n.t("home.hero.subtitle")}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Properties} classes="btn btn-primary">{i18n.t("home.hero.browse")}</Link<Route>>
                    <Link<Route> to={Route::Network} classes="btn btn-outline">{i18n.t("home.hero.findPartner")}</Link<Route>>
                </div>
            </div>
            <div class="card-grid">
                {for cards.into_iter().map(|(route, icon, key)| html! {
                    <article class="card feature-card">
                        <Link<Route> to={route} classes="card-link">
                            <span class="feature-icon" aria-hidden="true">{icon}</span>
                            <h2 class="card-title">{i18n.t(&format!("{key}.title"))}</h2>
                            <p class="muted">{i18n.t(&format!("{key}.description"))}</p>
                        </Link<Route>>
                    </article>
                })}
            </div>
        </section>
    }
}
