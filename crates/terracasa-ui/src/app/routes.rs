//! Routing definitions for the TerraCasa UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/properties")]
    Properties,
    #[at("/network")]
    Network,
    #[at("/countries")]
    Countries,
    #[at("/partners/:id")]
    Partner { id: String },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/profile")]
    Profile,
    #[at("/post-ad")]
    PostAd,
    #[not_found]
    #[at("/404")]
    NotFound,
}
