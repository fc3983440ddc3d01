//! Public partner profile with reviews and contact form.
//!
//! # Design
//! - The reviews controller is page-local; it is rebuilt whenever the partner id changes.
//! - Review edits are merged into the loaded feed instead of reloading it.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{SelectField, TextField};
use crate::core::http::ApiError;
use crate::core::search::{SearchRequest, fetch_page};
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::network::state::partner_location;
use crate::features::network::view::{partner_avatar, rating_stars};
use crate::features::partners::state::{
    ContactForm, ReviewFeed, ReviewForm, ReviewQuery, ReviewsState, format_rating, is_own_review,
    reviews_for,
};
use crate::services::api::ApiClient;
use std::cell::RefCell;
use std::rc::Rc;
use terracasa_api_models::{PartnerSummary, Review, User};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Clone, PartialEq)]
enum ProfileLoad {
    Loading,
    Loaded(PartnerSummary),
    Failed(ApiError),
}

type SharedReviews = Rc<RefCell<ReviewsState>>;

fn spawn_reviews(
    client: Rc<ApiClient>,
    reviews: SharedReviews,
    request: SearchRequest<ReviewQuery>,
    redraw: UseForceUpdateHandle,
) {
    yew::platform::spawn_local(async move {
        let result = fetch_page::<ReviewFeed, _>(&*client, &request).await;
        reviews.borrow_mut().apply(&request, result);
        redraw.force_update();
    });
}

#[derive(Properties, PartialEq)]
pub(crate) struct PartnerPageProps {
    pub id: AttrValue,
}

#[function_component(PartnerPage)]
pub(crate) fn partner_page(props: &PartnerPageProps) -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let user = use_selector(|store: &AppStore| store.auth.user().cloned());
    let profile = use_state(|| ProfileLoad::Loading);
    let current_id = use_mut_ref(String::new);

    {
        let api = api.clone();
        let profile = profile.clone();
        let current_id = current_id.clone();
        use_effect_with_deps(
            move |id: &AttrValue| {
                let id = id.to_string();
                *current_id.borrow_mut() = id.clone();
                profile.set(ProfileLoad::Loading);
                if let Some(api) = api {
                    let client = api.client;
                    yew::platform::spawn_local(async move {
                        let result = client.partner_profile(&id).await;
                        if *current_id.borrow() != id {
                            return;
                        }
                        profile.set(match result {
                            Ok(partner) => ProfileLoad::Loaded(partner),
                            Err(err) => ProfileLoad::Failed(err),
                        });
                    });
                }
                || ()
            },
            props.id.clone(),
        );
    }

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let header = match &*profile {
        ProfileLoad::Loading => html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> },
        ProfileLoad::Failed(err) => html! { <ErrorBanner message={api_error_message(err)} /> },
        ProfileLoad::Loaded(partner) => partner_header(&i18n, partner),
    };

    html! {
        <section class="page partner-page">
            <Link<Route> to={Route::Network} classes="btn btn-ghost btn-sm">{i18n.t("partner.back")}</Link<Route>>
            {header}
            <div class="partner-columns">
                <ReviewsPanel
                    client={api.client.clone()}
                    partner_id={props.id.clone()}
                    user={(*user).clone()}
                />
                <ContactPanel
                    client={api.client.clone()}
                    partner_id={props.id.clone()}
                    user={(*user).clone()}
                />
            </div>
        </section>
    }
}

fn partner_header(i18n: &I18nCtx, partner: &PartnerSummary) -> Html {
    let availability = [
        (partner.is_available, "partner.available"),
        (partner.is_immediately_available, "partner.immediate"),
        (partner.is_available247, "partner.available247"),
    ];
    html! {
        <header class="partner-header">
            {partner_avatar(partner)}
            <div>
                <h1>
                    {partner.display_name.clone()}
                    {if partner.is_verified {
                        html! { <span class="badge badge-success">{i18n.t("network.verified")}</span> }
                    } else {
                        html! {}
                    }}
                </h1>
                {partner.role_title.clone().map(|role| html! { <p class="muted">{role}</p> }).unwrap_or_default()}
                {partner.company_name.clone().map(|company| html! { <p>{company}</p> }).unwrap_or_default()}
                {partner_location(partner).map(|location| html! { <p>{location}</p> }).unwrap_or_default()}
                <p class="rating">
                    {rating_stars(partner.rating_average)}
                    <span>{format_rating(partner.rating_average)}</span>
                    <span class="muted">
                        {i18n.tr("network.reviewCount", &[("count", partner.rating_count.to_string().as_str())])}
                    </span>
                </p>
                <div class="badges">
                    {for availability.into_iter().filter(|(on, _)| *on).map(|(_, key)| html! {
                        <span class="badge badge-outline">{i18n.t(key)}</span>
                    })}
                </div>
            </div>
        </header>
    }
}

#[derive(Properties)]
struct ReviewsPanelProps {
    client: Rc<ApiClient>,
    partner_id: AttrValue,
    user: Option<User>,
}

impl PartialEq for ReviewsPanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
            && self.partner_id == other.partner_id
            && self.user == other.user
    }
}

#[function_component(ReviewsPanel)]
fn reviews_panel(props: &ReviewsPanelProps) -> Html {
    let i18n = use_i18n();
    let form = use_state(ReviewForm::default);
    let editing = use_state(|| None as Option<String>);
    let errors = use_state(FieldErrors::new);
    let saving = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);
    let reviews: SharedReviews = use_mut_ref(ReviewsState::new);
    let redraw = use_force_update();

    {
        let client = props.client.clone();
        let reviews = reviews.clone();
        let redraw = redraw.clone();
        let form = form.clone();
        let editing = editing.clone();
        use_effect_with_deps(
            move |partner_id: &AttrValue| {
                form.set(ReviewForm::default());
                editing.set(None);
                match reviews_for(partner_id) {
                    Ok((state, request)) => {
                        *reviews.borrow_mut() = state;
                        redraw.force_update();
                        spawn_reviews(client, reviews, request, redraw);
                    }
                    Err(err) => warn!(error = %err, "partner page opened without an id"),
                }
                || ()
            },
            props.partner_id.clone(),
        );
    }

    let user_id = props.user.as_ref().map(|user| user.id.clone());
    let query = ReviewQuery {
        partner_id: props.partner_id.to_string(),
    };

    let on_submit = {
        let client = props.client.clone();
        let query = query.clone();
        let reviews = reviews.clone();
        let redraw = redraw.clone();
        let form = form.clone();
        let editing = editing.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let failure = failure.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let body = match form.validate() {
                Ok(body) => body,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            failure.set(None);
            saving.set(true);
            let client = client.clone();
            let query = query.clone();
            let reviews = reviews.clone();
            let redraw = redraw.clone();
            let form = form.clone();
            let editing = editing.clone();
            let errors = errors.clone();
            let saving = saving.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                let result = match editing.as_deref() {
                    Some(review_id) => client.update_review(&query, review_id, &body).await,
                    None => client.create_review(&query, &body).await,
                };
                match result {
                    Ok(review) => {
                        reviews
                            .borrow_mut()
                            .upsert_item(review, |left, right| left.id == right.id);
                        form.set(ReviewForm::default());
                        editing.set(None);
                        redraw.force_update();
                    }
                    Err(err) => {
                        let mut found = FieldErrors::new();
                        found.merge_backend(err.field_errors());
                        errors.set(found);
                        failure.set(Some(err));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        let editing = editing.clone();
        let errors = errors.clone();
        Callback::from(move |review: Review| {
            form.set(ReviewForm::editing(&review));
            editing.set(Some(review.id));
            errors.set(FieldErrors::new());
        })
    };
    let on_cancel = {
        let form = form.clone();
        let editing = editing.clone();
        Callback::from(move |_| {
            form.set(ReviewForm::default());
            editing.set(None);
        })
    };
    let on_delete = {
        let client = props.client.clone();
        let query = query.clone();
        let reviews = reviews.clone();
        let redraw = redraw.clone();
        let failure = failure.clone();
        Callback::from(move |review_id: String| {
            let client = client.clone();
            let query = query.clone();
            let reviews = reviews.clone();
            let redraw = redraw.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.delete_review(&query, &review_id).await {
                    Ok(()) => {
                        reviews.borrow_mut().remove_items(|review| review.id == review_id);
                        redraw.force_update();
                    }
                    Err(err) => failure.set(Some(err)),
                }
            });
        })
    };
    let on_more = {
        let client = props.client.clone();
        let reviews = reviews.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let request = reviews.borrow_mut().load_more();
            if let Some(request) = request {
                redraw.force_update();
                spawn_reviews(client.clone(), reviews.clone(), request, redraw.clone());
            }
        })
    };

    let state = reviews.borrow();
    let ratings: Vec<(String, String)> = (1..=5u8)
        .rev()
        .map(|stars| (stars.to_string(), "★".repeat(usize::from(stars))))
        .collect();
    let error_for = |field: &str| errors.get(field).map(|key| AttrValue::from(i18n.t(key)));

    let list = if state.is_loading() {
        html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> }
    } else if state.is_empty() {
        html! { <EmptyState title={i18n.t("partner.reviews.empty")} icon="★" /> }
    } else {
        html! {
            <ul class="reviews">
                {for state.items().iter().map(|review| {
                    let own = is_own_review(review, user_id.as_deref());
                    let actions = if own {
                        let on_edit = on_edit.clone();
                        let on_delete = on_delete.clone();
                        let target = review.clone();
                        let review_id = review.id.clone();
                        html! {
                            <div class="review-actions">
                                <button type="button" class="btn btn-ghost btn-xs"
                                    onclick={Callback::from(move |_| on_edit.emit(target.clone()))}>
                                    {i18n.t("partner.reviews.edit")}
                                </button>
                                <button type="button" class="btn btn-ghost btn-xs text-error"
                                    onclick={Callback::from(move |_| on_delete.emit(review_id.clone()))}>
                                    {i18n.t("partner.reviews.delete")}
                                </button>
                            </div>
                        }
                    } else {
                        html! {}
                    };
                    html! {
                        <li class="review" key={review.id.clone()}>
                            {rating_stars(f64::from(review.rating))}
                            <strong>{review.author_name.clone().unwrap_or_else(|| i18n.t("partner.reviews.anonymous"))}</strong>
                            {review.created_at.as_deref().map(|stamp| html! {
                                <time class="muted">{stamp.get(..10).unwrap_or(stamp).to_string()}</time>
                            }).unwrap_or_default()}
                            {review.comment.clone().map(|comment| html! { <p>{comment}</p> }).unwrap_or_default()}
                            {actions}
                        </li>
                    }
                })}
            </ul>
        }
    };

    let editor = if props.user.is_some() {
        let on_rating = {
            let form = form.clone();
            Callback::from(move |value: String| {
                let mut next = (*form).clone();
                next.rating = value.parse().unwrap_or(0);
                form.set(next);
            })
        };
        let on_comment = {
            let form = form.clone();
            Callback::from(move |value: String| {
                let mut next = (*form).clone();
                next.comment = value;
                form.set(next);
            })
        };
        html! {
            <form class="review-form" onsubmit={on_submit}>
                <h3>{if editing.is_some() { i18n.t("partner.reviews.editTitle") } else { i18n.t("partner.reviews.writeTitle") }}</h3>
                <SelectField id="review-rating" label={i18n.t("partner.reviews.rating")}
                    value={form.rating.to_string()} options={ratings} error={error_for("rating")}
                    on_change={on_rating} />
                <TextField id="review-comment" label={i18n.t("partner.reviews.comment")} multiline=true
                    value={form.comment.clone()} error={error_for("comment")} required=true
                    on_input={on_comment} />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*saving}>
                        {i18n.t("partner.reviews.submit")}
                    </button>
                    {if editing.is_some() {
                        html! { <button type="button" class="btn btn-ghost" onclick={on_cancel}>{i18n.t("common.cancel")}</button> }
                    } else {
                        html! {}
                    }}
                </div>
            </form>
        }
    } else {
        html! {
            <p class="muted">
                <Link<Route> to={Route::Login}>{i18n.t("partner.reviews.signInToReview")}</Link<Route>>
            </p>
        }
    };

    html! {
        <section class="panel reviews-panel">
            <h2>{i18n.t("partner.reviews.title")}</h2>
            {state.error().or((*failure).as_ref()).map(|err| html! {
                <ErrorBanner message={api_error_message(err)} />
            }).unwrap_or_default()}
            {list}
            {if state.can_load_more() {
                html! {
                    <button type="button" class="btn btn-outline btn-sm" disabled={state.is_loading_more()} onclick={on_more}>
                        {i18n.t("partner.reviews.more")}
                    </button>
                }
            } else {
                html! {}
            }}
            {editor}
        </section>
    }
}

#[derive(Properties)]
struct ContactPanelProps {
    client: Rc<ApiClient>,
    partner_id: AttrValue,
    user: Option<User>,
}

impl PartialEq for ContactPanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
            && self.partner_id == other.partner_id
            && self.user == other.user
    }
}

fn contact_seed(user: Option<&User>) -> ContactForm {
    user.map_or_else(ContactForm::default, |user| {
        ContactForm::prefilled(&user.display_name(), &user.email, user.phone.as_deref())
    })
}

#[function_component(ContactPanel)]
fn contact_panel(props: &ContactPanelProps) -> Html {
    let i18n = use_i18n();
    let form = {
        let user = props.user.clone();
        use_state(move || contact_seed(user.as_ref()))
    };
    let errors = use_state(FieldErrors::new);
    let sending = use_state(|| false);
    let sent = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let on_submit = {
        let client = props.client.clone();
        let partner_id = props.partner_id.to_string();
        let form = form.clone();
        let errors = errors.clone();
        let sending = sending.clone();
        let sent = sent.clone();
        let failure = failure.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let body = match form.validate() {
                Ok(body) => body,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            failure.set(None);
            sending.set(true);
            let client = client.clone();
            let partner_id = partner_id.clone();
            let form = form.clone();
            let errors = errors.clone();
            let sending = sending.clone();
            let sent = sent.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.contact_partner(&partner_id, &body).await {
                    Ok(()) => {
                        let mut next = (*form).clone();
                        next.message.clear();
                        form.set(next);
                        sent.set(true);
                    }
                    Err(err) => {
                        let mut found = FieldErrors::new();
                        found.merge_backend(err.field_errors());
                        errors.set(found);
                        failure.set(Some(err));
                    }
                }
                sending.set(false);
            });
        })
    };

    let setter = |apply: fn(&mut ContactForm, String)| {
        let form = form.clone();
        let sent = sent.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            sent.set(false);
        })
    };
    let error_for = |field: &str| errors.get(field).map(|key| AttrValue::from(i18n.t(key)));

    html! {
        <section class="panel contact-panel">
            <h2>{i18n.t("partner.contact.title")}</h2>
            {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            {if *sent {
                html! { <div class="alert alert-success" role="status">{i18n.t("partner.contact.sent")}</div> }
            } else {
                html! {}
            }}
            <form onsubmit={on_submit}>
                <TextField id="contact-name" label={i18n.t("partner.contact.name")} required=true
                    value={form.name.clone()} error={error_for("name")}
                    on_input={setter(|form, value| form.name = value)} />
                <TextField id="contact-email" input_type="email" label={i18n.t("partner.contact.email")} required=true
                    value={form.email.clone()} error={error_for("email")}
                    on_input={setter(|form, value| form.email = value)} />
                <TextField id="contact-phone" input_type="tel" label={i18n.t("partner.contact.phone")}
                    value={form.phone.clone()} error={error_for("phone")}
                    on_input={setter(|form, value| form.phone = value)} />
                <TextField id="contact-message" label={i18n.t("partner.contact.message")} multiline=true required=true
                    value={form.message.clone()} error={error_for("message")}
                    on_input={setter(|form, value| form.message = value)} />
                <button type="submit" class="btn btn-primary" disabled={*sending}>
                    {i18n.t("partner.contact.send")}
                </button>
            </form>
        </section>
    }
}
