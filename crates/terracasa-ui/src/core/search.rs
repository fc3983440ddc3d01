//! Generic paginated search state shared by the property, partner and review lists.
//!
//! # Design
//! - A [`SearchProfile`] ties a raw filter form, its normalized query and the result item type.
//! - [`SearchController`] owns the form, the last submitted query and the accumulated results.
//! - Every request carries a generation; responses from superseded requests are dropped.
//! - Transport lives behind [`SearchBackend`] so the controller is driven the same way in
//!   the browser and in tests.

use crate::core::http::{ApiError, Page};
use crate::core::logic::{FilterError, QueryParams};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, error};

/// Editable filter form; `Default` is the cleared form.
pub trait FilterForm: Clone + Default + PartialEq + fmt::Debug {
    /// Normalized query produced by the form.
    type Query;

    /// Trim, parse and convert the raw inputs.
    ///
    /// # Errors
    /// Returns [`FilterError`] for the first field that fails to parse.
    fn normalize(&self) -> Result<Self::Query, FilterError>;
}

/// Normalized filter set that can be sent to the backend.
pub trait SearchQuery: Clone + PartialEq + fmt::Debug {
    /// Filter parameters, excluding paging.
    fn to_params(&self) -> QueryParams;
}

/// Binds the types and defaults of one search surface.
pub trait SearchProfile: 'static {
    /// Raw form.
    type Form: FilterForm<Query = Self::Query>;
    /// Normalized query.
    type Query: SearchQuery;
    /// Result item.
    type Item: Clone + PartialEq + fmt::Debug;

    /// Name used in logs.
    const NAME: &'static str;
    /// Items requested per page.
    const DEFAULT_PAGE_SIZE: u32;

    /// Query applied before the user searches.
    fn baseline() -> Self::Query;

    /// Client-side post-processing of a received page.
    fn transform(_query: &Self::Query, items: Vec<Self::Item>) -> Vec<Self::Item> {
        items
    }
}

/// Whether a request replaces or extends the results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Page one of a new query.
    Fresh,
    /// Next page of the submitted query.
    More,
}

/// A request issued by the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest<Q> {
    /// Controller generation at issue time.
    pub generation: u64,
    /// Replace or append.
    pub kind: RequestKind,
    /// Filters to send.
    pub query: Q,
    /// One-based page.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl<Q: SearchQuery> SearchRequest<Q> {
    /// Filter parameters followed by `page` and `itemsPerPage`.
    #[must_use]
    pub fn params(&self) -> QueryParams {
        let mut params = self.query.to_params();
        params
            .push("page", self.page)
            .push("itemsPerPage", self.page_size);
        params
    }
}

/// Result of applying a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were replaced.
    Replaced {
        /// Items now shown.
        count: usize,
    },
    /// Results were extended.
    Appended {
        /// Items added.
        added: usize,
    },
    /// The request failed.
    Failed,
    /// A newer request superseded this one; nothing changed.
    Stale,
}

/// Paginated search state for one list surface.
pub struct SearchController<P: SearchProfile> {
    /// Pending user input.
    pub form: P::Form,
    submitted: Option<P::Query>,
    items: Vec<P::Item>,
    page: u32,
    page_size: u32,
    has_next_page: bool,
    loading: bool,
    loading_more: bool,
    has_searched: bool,
    error: Option<ApiError>,
    generation: u64,
}

impl<P: SearchProfile> Default for SearchController<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SearchProfile> Clone for SearchController<P> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
            submitted: self.submitted.clone(),
            items: self.items.clone(),
            page: self.page,
            page_size: self.page_size,
            has_next_page: self.has_next_page,
            loading: self.loading,
            loading_more: self.loading_more,
            has_searched: self.has_searched,
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

impl<P: SearchProfile> PartialEq for SearchController<P> {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
            && self.form == other.form
            && self.submitted == other.submitted
            && self.items == other.items
            && self.page == other.page
            && self.page_size == other.page_size
            && self.has_next_page == other.has_next_page
            && self.loading == other.loading
            && self.loading_more == other.loading_more
            && self.has_searched == other.has_searched
            && self.error == other.error
    }
}

impl<P: SearchProfile> fmt::Debug for SearchController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("profile", &P::NAME)
            .field("form", &self.form)
            .field("submitted", &self.submitted)
            .field("items", &self.items.len())
            .field("page", &self.page)
            .field("has_next_page", &self.has_next_page)
            .field("loading", &self.loading)
            .field("loading_more", &self.loading_more)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<P: SearchProfile> SearchController<P> {
    /// Controller using the profile's page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(P::DEFAULT_PAGE_SIZE)
    }

    /// Controller with an explicit page size (clamped to at least 1).
    #[must_use]
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            form: P::Form::default(),
            submitted: None,
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            has_next_page: false,
            loading: false,
            loading_more: false,
            has_searched: false,
            error: None,
            generation: 0,
        }
    }

    fn begin(&mut self, kind: RequestKind, query: P::Query, page: u32) -> SearchRequest<P::Query> {
        self.generation = self.generation.wrapping_add(1);
        self.has_searched = true;
        match kind {
            RequestKind::Fresh => {
                self.loading = true;
                self.loading_more = false;
            }
            RequestKind::More => self.loading_more = true,
        }
        SearchRequest {
            generation: self.generation,
            kind,
            query,
            page,
            page_size: self.page_size,
        }
    }

    /// Page-one request with the baseline query.
    pub fn load_default(&mut self) -> SearchRequest<P::Query> {
        self.begin(RequestKind::Fresh, P::baseline(), 1)
    }

    /// Page-one request with the normalized form.
    ///
    /// # Errors
    /// Returns [`FilterError`] when the form does not normalize; no request is issued.
    pub fn search(&mut self) -> Result<SearchRequest<P::Query>, FilterError> {
        let query = self.form.normalize()?;
        Ok(self.begin(RequestKind::Fresh, query, 1))
    }

    /// Replace the form, then [`Self::search`].
    ///
    /// # Errors
    /// Returns [`FilterError`] when the form does not normalize.
    pub fn search_with(&mut self, form: P::Form) -> Result<SearchRequest<P::Query>, FilterError> {
        self.form = form;
        self.search()
    }

    /// Next-page request for the submitted query, when one is available.
    pub fn load_more(&mut self) -> Option<SearchRequest<P::Query>> {
        if !self.can_load_more() {
            return None;
        }
        let query = self.submitted.clone()?;
        let next = self.page.saturating_add(1);
        Some(self.begin(RequestKind::More, query, next))
    }

    /// Clear the form and reload the baseline.
    pub fn reset(&mut self) -> SearchRequest<P::Query> {
        self.form = P::Form::default();
        self.load_default()
    }

    /// Apply a response to the request that produced it.
    pub fn apply(
        &mut self,
        request: &SearchRequest<P::Query>,
        result: Result<Page<P::Item>, ApiError>,
    ) -> SearchOutcome {
        if request.generation != self.generation {
            return SearchOutcome::Stale;
        }
        self.loading = false;
        self.loading_more = false;
        match (request.kind, result) {
            (RequestKind::Fresh, Ok(page)) => {
                self.items = P::transform(&request.query, page.items);
                self.submitted = Some(request.query.clone());
                self.page = request.page;
                self.has_next_page = page.has_next_page;
                self.error = None;
                SearchOutcome::Replaced {
                    count: self.items.len(),
                }
            }
            (RequestKind::More, Ok(page)) => {
                let added = P::transform(&request.query, page.items);
                let count = added.len();
                self.items.extend(added);
                self.page = request.page;
                self.has_next_page = page.has_next_page;
                self.error = None;
                SearchOutcome::Appended { added: count }
            }
            (RequestKind::Fresh, Err(err)) => {
                self.items.clear();
                self.has_next_page = false;
                self.error = Some(err);
                SearchOutcome::Failed
            }
            (RequestKind::More, Err(err)) => {
                self.error = Some(err);
                SearchOutcome::Failed
            }
        }
    }

    /// Accumulated results.
    #[must_use]
    pub fn items(&self) -> &[P::Item] {
        &self.items
    }

    /// Query of the last successful fresh search.
    #[must_use]
    pub const fn submitted(&self) -> Option<&P::Query> {
        self.submitted.as_ref()
    }

    /// Page of the last applied response.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page
    }

    /// Items per request.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether the server reported another page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// A fresh search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// A next-page request is in flight.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// At least one request has been issued.
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Error of the last failed request.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Drop the last error, e.g. when its banner is dismissed.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replace the first item matching `same`, or insert `item` at the top.
    pub fn upsert_item(&mut self, item: P::Item, same: impl Fn(&P::Item, &P::Item) -> bool) {
        match self.items.iter_mut().find(|existing| same(existing, &item)) {
            Some(existing) => *existing = item,
            None => self.items.insert(0, item),
        }
    }

    /// Drop every item matching `matches`.
    pub fn remove_items(&mut self, matches: impl Fn(&P::Item) -> bool) {
        self.items.retain(|item| !matches(item));
    }

    /// Show the empty-state placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && !self.loading_more && self.items.is_empty() && self.has_searched
    }

    /// Show the "load more" control.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.has_next_page && !self.loading && !self.loading_more
    }
}

/// Transport for one search profile.
#[async_trait(?Send)]
pub trait SearchBackend<P: SearchProfile> {
    /// Fetch the page described by `request`.
    async fn fetch(&self, request: &SearchRequest<P::Query>) -> Result<Page<P::Item>, ApiError>;
}

/// Fetch a page through `backend`, logging the request and any failure.
///
/// # Errors
/// Propagates the backend's [`ApiError`].
pub async fn fetch_page<P, B>(
    backend: &B,
    request: &SearchRequest<P::Query>,
) -> Result<Page<P::Item>, ApiError>
where
    P: SearchProfile,
    B: SearchBackend<P> + ?Sized,
{
    debug!(
        profile = P::NAME,
        page = request.page,
        generation = request.generation,
        "search request started"
    );
    let result = backend.fetch(request).await;
    if let Err(err) = &result {
        error!(
            profile = P::NAME,
            page = request.page,
            error = %err,
            "search request failed"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logic::parse_optional_u32;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct NumberForm {
        min: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct NumberQuery {
        min: Option<u32>,
    }

    impl FilterForm for NumberForm {
        type Query = NumberQuery;

        fn normalize(&self) -> Result<NumberQuery, FilterError> {
            Ok(NumberQuery {
                min: parse_optional_u32("min", &self.min)?,
            })
        }
    }

    impl SearchQuery for NumberQuery {
        fn to_params(&self) -> QueryParams {
            let mut params = QueryParams::new();
            params.push_opt("min", self.min);
            params
        }
    }

    struct Numbers;

    impl SearchProfile for Numbers {
        type Form = NumberForm;
        type Query = NumberQuery;
        type Item = u32;

        const NAME: &'static str = "numbers";
        const DEFAULT_PAGE_SIZE: u32 = 3;

        fn baseline() -> NumberQuery {
            NumberQuery { min: None }
        }
    }

    fn page(items: &[u32], has_next_page: bool) -> Page<u32> {
        Page {
            items: items.to_vec(),
            page: 1,
            has_next_page,
            total_items: None,
        }
    }

    #[test]
    fn request_params_append_paging() -> Result<(), FilterError> {
        let mut controller = SearchController::<Numbers>::new();
        controller.form.min = "0".to_string();
        let request = controller.search()?;
        assert_eq!(
            request.params().to_query_string(),
            "min=0&page=1&itemsPerPage=3"
        );
        Ok(())
    }

    #[test]
    fn fresh_then_more_accumulates() {
        let mut controller = SearchController::<Numbers>::new();
        let first = controller.load_default();
        assert!(controller.has_searched());
        assert!(!controller.is_empty());
        assert_eq!(
            controller.apply(&first, Ok(page(&[1, 2, 3], true))),
            SearchOutcome::Replaced { count: 3 }
        );
        let Some(more) = controller.load_more() else {
            panic!("expected a next page request");
        };
        assert_eq!(more.page, 2);
        assert!(!controller.can_load_more());
        assert_eq!(
            controller.apply(&more, Ok(page(&[4], false))),
            SearchOutcome::Appended { added: 1 }
        );
        assert_eq!(controller.items(), &[1, 2, 3, 4]);
        assert_eq!(controller.current_page(), 2);
        assert!(controller.load_more().is_none());
    }

    #[test]
    fn local_edits_update_results() {
        let mut controller = SearchController::<Numbers>::new();
        let first = controller.load_default();
        controller.apply(&first, Ok(page(&[10, 20, 30], false)));
        controller.upsert_item(21, |a, b| a / 10 == b / 10);
        controller.upsert_item(5, |a, b| a / 10 == b / 10);
        assert_eq!(controller.items(), &[5, 10, 21, 30]);
        controller.remove_items(|n| *n >= 21);
        assert_eq!(controller.items(), &[5, 10]);
    }

    #[test]
    fn superseded_responses_are_stale() {
        let mut controller = SearchController::<Numbers>::new();
        let old = controller.load_default();
        let new = controller.load_default();
        assert_eq!(controller.apply(&old, Ok(page(&[9], false))), SearchOutcome::Stale);
        assert!(controller.is_loading());
        assert_eq!(
            controller.apply(&new, Ok(page(&[], false))),
            SearchOutcome::Replaced { count: 0 }
        );
        assert!(controller.is_empty());
    }

    #[test]
    fn failures_differ_for_fresh_and_more() {
        let mut controller = SearchController::<Numbers>::new();
        let first = controller.load_default();
        controller.apply(&first, Ok(page(&[1, 2, 3], true)));
        let Some(more) = controller.load_more() else {
            panic!("expected a next page request");
        };
        controller.apply(&more, Err(ApiError::network("offline")));
        assert_eq!(controller.items(), &[1, 2, 3]);
        assert!(controller.has_next_page());
        assert!(controller.error().is_some());

        let fresh = controller.load_default();
        controller.apply(&fresh, Err(ApiError::network("offline")));
        assert!(controller.items().is_empty());
        assert!(!controller.can_load_more());
        assert!(controller.is_empty());
    }

    #[test]
    fn invalid_form_issues_no_request() {
        let mut controller = SearchController::<Numbers>::new();
        let before = controller.clone();
        let result = controller.search_with(NumberForm {
            min: "many".to_string(),
        });
        assert!(result.is_err());
        assert!(!controller.is_loading());
        assert_eq!(controller.items(), before.items());
        assert!(!controller.has_searched());
    }
}
