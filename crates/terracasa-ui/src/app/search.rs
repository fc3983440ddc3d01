//! Glue between store-held search controllers and the API client.

use crate::core::search::{SearchBackend, SearchController, SearchOutcome, SearchProfile, SearchRequest, fetch_page};
use crate::core::store::AppStore;
use crate::services::api::ApiClient;
use std::rc::Rc;
use tracing::debug;
use yewdux::prelude::Dispatch;

/// Selects one controller inside the store.
pub(crate) type ControllerLens<P> = fn(&mut AppStore) -> &mut SearchController<P>;

/// Run `op` against the selected controller and return its result.
pub(crate) fn with_controller<P, R>(
    lens: ControllerLens<P>,
    op: impl FnOnce(&mut SearchController<P>) -> R,
) -> Option<R>
where
    P: SearchProfile,
{
    let mut out = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| out = Some(op(lens(store))));
    out
}

/// Fetch `request` and apply the response to the selected controller.
pub(crate) fn spawn_search<P>(
    client: Rc<ApiClient>,
    request: SearchRequest<P::Query>,
    lens: ControllerLens<P>,
) where
    P: SearchProfile,
    P::Query: 'static,
    P::Item: 'static,
    ApiClient: SearchBackend<P>,
{
    yew::platform::spawn_local(async move {
        let result = fetch_page::<P, _>(&*client, &request).await;
        let mut outcome = SearchOutcome::Stale;
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            outcome = lens(store).apply(&request, result);
        });
        debug!(profile = P::NAME, ?outcome, "search response applied");
    });
}
