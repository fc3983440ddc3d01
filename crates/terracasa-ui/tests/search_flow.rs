use async_trait::async_trait;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::VecDeque;
use terracasa_ui::core::http::{ApiError, Page, decode_page};
use terracasa_ui::core::search::{
    SearchBackend, SearchController, SearchOutcome, SearchProfile, SearchQuery, SearchRequest,
    fetch_page,
};
use terracasa_ui::features::network::state::{NetworkState, PartnerSearch};
use terracasa_ui::features::properties::state::{PropertiesState, PropertyFilterForm, PropertySearch};

/// Replays canned JSON bodies and records the query strings it was asked for.
#[derive(Default)]
struct ScriptedBackend {
    bodies: RefCell<VecDeque<Result<Value, ApiError>>>,
    seen: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    fn with(bodies: impl IntoIterator<Item = Result<Value, ApiError>>) -> Self {
        Self {
            bodies: RefCell::new(bodies.into_iter().collect()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn next_body(&self, query: String) -> Result<Value, ApiError> {
        self.seen.borrow_mut().push(query);
        self.bodies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::network("script exhausted")))
    }
}

#[async_trait(?Send)]
impl SearchBackend<PropertySearch> for ScriptedBackend {
    async fn fetch(
        &self,
        request: &SearchRequest<<PropertySearch as SearchProfile>::Query>,
    ) -> Result<Page<<PropertySearch as SearchProfile>::Item>, ApiError> {
        let body = self.next_body(request.params().to_query_string())?;
        decode_page(body, request.page, request.page_size)
    }
}

#[async_trait(?Send)]
impl SearchBackend<PartnerSearch> for ScriptedBackend {
    async fn fetch(
        &self,
        request: &SearchRequest<<PartnerSearch as SearchProfile>::Query>,
    ) -> Result<Page<<PartnerSearch as SearchProfile>::Item>, ApiError> {
        let body = self.next_body(request.query.to_params().to_query_string())?;
        decode_page(body, request.page, request.page_size)
    }
}

fn property(id: &str) -> Value {
    json!({ "id": id, "title": format!("Listing {id}"), "country": "ES", "priceCents": 10_000_000 })
}

fn partner(id: &str, rating: f64, verified: bool) -> Value {
    json!({ "id": id, "displayName": format!("Partner {id}"), "ratingAverage": rating, "isVerified": verified })
}

async fn run<P, B>(controller: &mut SearchController<P>, backend: &B, request: SearchRequest<P::Query>) -> SearchOutcome
where
    P: SearchProfile,
    B: SearchBackend<P>,
{
    let result = fetch_page::<P, B>(backend, &request).await;
    controller.apply(&request, result)
}

#[tokio::test]
async fn property_search_pages_through_results() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(json!({
            "data": [property("a"), property("b")],
            "pagination": { "page": 1, "itemsPerPage": 2, "totalPages": 2 }
        })),
        Ok(json!({
            "data": [property("c")],
            "pagination": { "page": 2, "itemsPerPage": 2, "totalPages": 2 }
        })),
    ]);
    let mut controller = PropertiesState::with_page_size(2);
    controller.form.country = "es".to_string();
    controller.form.min_price = "100000".to_string();

    let request = controller.search()?;
    let outcome = run(&mut controller, &backend, request).await;
    assert_eq!(outcome, SearchOutcome::Replaced { count: 2 });
    assert!(controller.can_load_more());

    let more = controller
        .load_more()
        .ok_or_else(|| anyhow::anyhow!("second page not offered"))?;
    let outcome = run(&mut controller, &backend, more).await;
    assert_eq!(outcome, SearchOutcome::Appended { added: 1 });
    assert!(!controller.can_load_more());
    let ids: Vec<&str> = controller.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);

    let seen = backend.seen.borrow();
    assert!(seen[0].contains("country=ES"));
    assert!(seen[0].contains("minPriceCents=10000000"));
    assert!(seen[0].contains("page=1"));
    assert!(seen[1].contains("page=2"));
    assert!(seen[1].contains("country=ES"));
    Ok(())
}

#[tokio::test]
async fn superseded_response_is_ignored() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(json!({ "data": [property("old")] })),
        Ok(json!({ "data": [property("new")] })),
    ]);
    let mut controller = PropertiesState::new();
    let first = controller.load_default();
    controller.form.city = "Málaga".to_string();
    let second = controller.search()?;

    let early = fetch_page::<PropertySearch, _>(&backend, &first).await;
    let late = fetch_page::<PropertySearch, _>(&backend, &second).await;
    assert_eq!(controller.apply(&second, late), SearchOutcome::Replaced { count: 1 });
    assert_eq!(controller.apply(&first, early), SearchOutcome::Stale);
    assert_eq!(controller.items()[0].id, "new");
    assert_eq!(
        controller.submitted().and_then(|query| query.city.as_deref()),
        Some("Málaga")
    );
    Ok(())
}

#[tokio::test]
async fn failed_search_keeps_previous_query_and_reports_error() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(json!({ "data": [property("a")], "pagination": { "page": 1, "hasNextPage": true } })),
        Err(ApiError::network("offline")),
    ]);
    let mut controller = PropertiesState::new();
    let request = controller.load_default();
    run(&mut controller, &backend, request).await;

    let more = controller
        .load_more()
        .ok_or_else(|| anyhow::anyhow!("load more unavailable"))?;
    assert_eq!(run(&mut controller, &backend, more).await, SearchOutcome::Failed);
    assert_eq!(controller.items().len(), 1);
    assert!(controller.error().is_some());
    controller.dismiss_error();
    assert!(controller.error().is_none());
    Ok(())
}

#[test]
fn invalid_filters_never_reach_the_backend() {
    let backend = ScriptedBackend::default();
    let mut controller = PropertiesState::new();
    controller.form.min_price = "500".to_string();
    controller.form.max_price = "100".to_string();
    assert!(controller.search().is_err());
    assert!(!controller.has_searched());
    assert!(backend.seen.borrow().is_empty());
}

#[tokio::test]
async fn partner_network_starts_with_featured_partners() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(json!({ "data": [partner("a", 4.9, true), partner("b", 3.8, true), partner("c", 4.5, false)] })),
        Ok(json!({ "data": [partner("a", 4.9, true), partner("b", 3.8, true), partner("c", 4.5, false)] })),
    ]);
    let mut controller = NetworkState::new();
    let request = controller.load_default();
    run(&mut controller, &backend, request).await;
    let ids: Vec<&str> = controller.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
    assert!(!controller.can_load_more());

    controller.form.refinements.verified_only = true;
    let request = controller.search()?;
    run(&mut controller, &backend, request).await;
    let ids: Vec<&str> = controller.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(!backend.seen.borrow()[1].contains("verified"));
    Ok(())
}

fn property_page(prefix: &str, page: u32, total_pages: u32) -> Value {
    let data: Vec<Value> = (0..6).map(|n| property(&format!("{prefix}{n}"))).collect();
    json!({
        "data": data,
        "pagination": { "page": page, "itemsPerPage": 6, "totalPages": total_pages }
    })
}

#[tokio::test]
async fn default_load_then_load_more_accumulates_two_pages() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([Ok(property_page("a", 1, 3)), Ok(property_page("b", 2, 3))]);
    let mut controller = PropertiesState::new();

    let request = controller.load_default();
    assert_eq!(
        request.params().to_query_string(),
        "sort=newest&page=1&itemsPerPage=6"
    );
    assert_eq!(
        run(&mut controller, &backend, request).await,
        SearchOutcome::Replaced { count: 6 }
    );
    assert!(controller.can_load_more());

    let more = controller
        .load_more()
        .ok_or_else(|| anyhow::anyhow!("second page not offered"))?;
    assert_eq!(
        run(&mut controller, &backend, more).await,
        SearchOutcome::Appended { added: 6 }
    );
    assert_eq!(controller.items().len(), 12);
    assert_eq!(controller.current_page(), 2);
    assert!(controller.can_load_more());
    Ok(())
}

#[tokio::test]
async fn reset_matches_a_fresh_default_load() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(property_page("a", 1, 3)),
        Ok(property_page("b", 2, 3)),
        Ok(property_page("a", 1, 3)),
        Ok(property_page("a", 1, 3)),
    ]);
    let mut controller = PropertiesState::new();
    let request = controller.load_default();
    run(&mut controller, &backend, request).await;
    let more = controller
        .load_more()
        .ok_or_else(|| anyhow::anyhow!("second page not offered"))?;
    run(&mut controller, &backend, more).await;

    controller.form.country = "pt".to_string();
    controller.form.advanced.has_pool = true;
    controller.form.advanced.has_sea_view = true;
    let request = controller.reset();
    assert_eq!(
        request.params().to_query_string(),
        "sort=newest&page=1&itemsPerPage=6"
    );
    assert_eq!(controller.form, PropertyFilterForm::default());
    run(&mut controller, &backend, request).await;

    let mut fresh = PropertiesState::new();
    let request = fresh.load_default();
    run(&mut fresh, &backend, request).await;

    assert_eq!(controller.items(), fresh.items());
    assert_eq!(controller.current_page(), 1);
    assert_eq!(controller.current_page(), fresh.current_page());
    assert_eq!(controller.can_load_more(), fresh.can_load_more());
    assert_eq!(controller.submitted(), fresh.submitted());
    let seen = backend.seen.borrow();
    assert_eq!(seen[2], seen[3]);
    Ok(())
}

#[tokio::test]
async fn failed_fresh_search_shows_the_placeholder() -> anyhow::Result<()> {
    let backend = ScriptedBackend::with([
        Ok(property_page("a", 1, 3)),
        Err(ApiError::network("offline")),
    ]);
    let mut controller = PropertiesState::new();
    let request = controller.load_default();
    run(&mut controller, &backend, request).await;
    assert!(!controller.is_empty());

    controller.form.city = "Porto".to_string();
    let request = controller.search()?;
    assert_eq!(run(&mut controller, &backend, request).await, SearchOutcome::Failed);
    assert!(controller.error().is_some());
    assert!(controller.items().is_empty());
    assert!(controller.is_empty());
    assert!(!controller.can_load_more());
    Ok(())
}
