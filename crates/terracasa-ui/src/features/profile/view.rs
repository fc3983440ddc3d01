//! Profile page: account details, password change and own listings.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, use_i18n};
use crate::app::preferences::BrowserStore;
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{SelectField, TextField};
use crate::core::http::ApiError;
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::auth::state::ChangePasswordForm;
use crate::features::profile::state::{
    LISTING_STATUS_FILTERS, ProfileForm, apply_update, can_submit, status_key,
};
use crate::features::properties::state::{LISTING_COUNTRIES, country_name, format_price};
use crate::i18n::LocaleCode;
use crate::services::api::ApiClient;
use std::rc::Rc;
use terracasa_api_models::{ListingStatus, PropertySummary, User};
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::{Dispatch, use_selector};

fn error_text(i18n: &I18nCtx, errors: &FieldErrors, field: &str) -> Option<AttrValue> {
    errors.get(field).map(|key| AttrValue::from(i18n.t(key)))
}

#[function_component(ProfilePage)]
pub(crate) fn profile_page() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let user = use_selector(|store: &AppStore| store.auth.user().cloned());

    let Some(user) = (*user).clone() else {
        return html! {
            <section class="page profile-page">
                <EmptyState title={i18n.t("profile.signedOut.title")} description={i18n.t("profile.signedOut.description")}>
                    <Link<Route> to={Route::Login} classes="btn btn-primary">{i18n.t("nav.login")}</Link<Route>>
                </EmptyState>
            </section>
        };
    };
    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    html! {
        <section class="page profile-page">
            <header class="page-header">
                <h1>{user.display_name()}</h1>
                <p class="muted">{user.email.clone()}</p>
            </header>
            <div class="profile-columns">
                <ProfileEditor client={api.client.clone()} user={user.clone()} />
                <PasswordPanel client={api.client.clone()} />
            </div>
            <ListingsPanel client={api.client.clone()} />
        </section>
    }
}

#[derive(Properties)]
struct ClientProps {
    client: Rc<ApiClient>,
}

impl PartialEq for ClientProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

#[derive(Properties)]
struct EditorProps {
    client: Rc<ApiClient>,
    user: User,
}

impl PartialEq for EditorProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && self.user == other.user
    }
}

#[function_component(ProfileEditor)]
fn profile_editor(props: &EditorProps) -> Html {
    let i18n = use_i18n();
    let form = {
        let user = props.user.clone();
        use_state(move || ProfileForm::from_user(&user))
    };
    let errors = use_state(FieldErrors::new);
    let saving = use_state(|| false);
    let saved = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let on_submit = {
        let client = props.client.clone();
        let user = props.user.clone();
        let form = form.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let saved = saved.clone();
        let failure = failure.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let update = match form.to_update() {
                Ok(update) => update,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            failure.set(None);
            saving.set(true);
            let client = client.clone();
            let user = user.clone();
            let errors = errors.clone();
            let saving = saving.clone();
            let saved = saved.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.update_profile(&update).await {
                    Ok(fresh) => {
                        let merged = if fresh.id.is_empty() {
                            apply_update(&user, &update)
                        } else {
                            fresh
                        };
                        Dispatch::<AppStore>::new()
                            .reduce_mut(|store| store.update_user(&BrowserStore, merged));
                        if let Some(code) = update.language.as_deref() {
                            crate::app::i18n::change_language(code, &BrowserStore);
                        }
                        saved.set(true);
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
    let setter = |apply: fn(&mut ProfileForm, String)| {
        let form = form.clone();
        let saved = saved.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            saved.set(false);
        })
    };
    let countries: Vec<(String, String)> = LISTING_COUNTRIES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
    let languages: Vec<(String, String)> = LocaleCode::all()
        .into_iter()
        .map(|locale| (locale.code().to_string(), locale.label().to_string()))
        .collect();
    let err = |field: &str| error_text(&i18n, &errors, field);

    html! {
        <form class="panel profile-form" onsubmit={on_submit}>
            <h2>{i18n.t("profile.details.title")}</h2>
            {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            {if *saved {
                html! { <div class="alert alert-success" role="status">{i18n.t("profile.details.saved")}</div> }
            } else {
                html! {}
            }}
            <TextField id="profile-avatar" input_type="url" label={i18n.t("profile.fields.avatarUrl")}
                value={form.avatar_url.clone()} error={err("avatarUrl")}
                on_input={setter(|form, value| form.avatar_url = value)} />
            <TextField id="profile-company" label={i18n.t("auth.fields.companyName")}
                value={form.company_name.clone()} error={err("companyName")}
                on_input={setter(|form, value| form.company_name = value)} />
            <TextField id="profile-role" label={i18n.t("auth.fields.roleTitle")}
                value={form.role_title.clone()} error={err("roleTitle")}
                on_input={setter(|form, value| form.role_title = value)} />
            <SelectField id="profile-country" label={i18n.t("auth.fields.baseCountry")}
                value={form.base_country.clone()} options={countries}
                placeholder={i18n.t("common.select")} error={err("baseCountry")}
                on_change={setter(|form, value| form.base_country = value)} />
            <TextField id="profile-city" label={i18n.t("auth.fields.baseCity")}
                value={form.base_city.clone()} error={err("baseCity")}
                on_input={setter(|form, value| form.base_city = value)} />
            <TextField id="profile-phone" input_type="tel" label={i18n.t("auth.fields.phone")}
                value={form.phone.clone()} error={err("phone")}
                on_input={setter(|form, value| form.phone = value)} />
            <SelectField id="profile-language" label={i18n.t("profile.fields.language")}
                value={form.language.clone()} options={languages}
                placeholder={i18n.t("common.select")} error={err("language")}
                on_change={setter(|form, value| form.language = value)} />
            <button type="submit" class="btn btn-primary" disabled={*saving}>{i18n.t("common.save")}</button>
        </form>
    }
}

#[function_component(PasswordPanel)]
fn password_panel(props: &ClientProps) -> Html {
    let i18n = use_i18n();
    let form = use_state(ChangePasswordForm::default);
    let errors = use_state(FieldErrors::new);
    let saving = use_state(|| false);
    let changed = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let on_submit = {
        let client = props.client.clone();
        let form = form.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let changed = changed.clone();
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
            let form = form.clone();
            let errors = errors.clone();
            let saving = saving.clone();
            let changed = changed.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.change_password(&body).await {
                    Ok(()) => {
                        form.set(ChangePasswordForm::default());
                        changed.set(true);
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
    let setter = |apply: fn(&mut ChangePasswordForm, String)| {
        let form = form.clone();
        let changed = changed.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            changed.set(false);
        })
    };
    let err = |field: &str| error_text(&i18n, &errors, field);

    html! {
        <form class="panel password-form" onsubmit={on_submit}>
            <h2>{i18n.t("profile.password.title")}</h2>
            {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            {if *changed {
                html! { <div class="alert alert-success" role="status">{i18n.t("profile.password.changed")}</div> }
            } else {
                html! {}
            }}
            <TextField id="old-password" input_type="password" label={i18n.t("profile.password.old")} required=true
                value={form.old_password.clone()} error={err("oldPassword")}
                on_input={setter(|form, value| form.old_password = value)} />
            <TextField id="new-password" input_type="password" label={i18n.t("profile.password.new")} required=true
                value={form.new_password.clone()} error={err("newPassword")}
                on_input={setter(|form, value| form.new_password = value)} />
            <TextField id="confirm-password" input_type="password" label={i18n.t("auth.fields.confirmPassword")} required=true
                value={form.confirm_password.clone()} error={err("confirmPassword")}
                on_input={setter(|form, value| form.confirm_password = value)} />
            <button type="submit" class="btn btn-primary" disabled={*saving}>{i18n.t("profile.password.submit")}</button>
        </form>
    }
}

#[derive(Clone, PartialEq)]
enum ListingsLoad {
    Loading,
    Loaded(Vec<PropertySummary>),
    Failed(ApiError),
}

#[function_component(ListingsPanel)]
fn listings_panel(props: &ClientProps) -> Html {
    let i18n = use_i18n();
    let filter = use_state(|| None as Option<ListingStatus>);
    let listings = use_state(|| ListingsLoad::Loading);
    let generation = use_mut_ref(|| 0u64);
    let reload = use_state(|| 0u32);
    let action_error = use_state(|| None as Option<ApiError>);

    {
        let client = props.client.clone();
        let listings = listings.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |(status, _): &(Option<ListingStatus>, u32)| {
                let status = *status;
                let issued = {
                    let mut current = generation.borrow_mut();
                    *current = current.wrapping_add(1);
                    *current
                };
                listings.set(ListingsLoad::Loading);
                yew::platform::spawn_local(async move {
                    let result = client.my_properties(status).await;
                    if *generation.borrow() != issued {
                        return;
                    }
                    listings.set(match result {
                        Ok(items) => ListingsLoad::Loaded(items),
                        Err(err) => ListingsLoad::Failed(err),
                    });
                });
                || ()
            },
            (*filter, *reload),
        );
    }

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |value: String| {
            filter.set(LISTING_STATUS_FILTERS.into_iter().flatten().find(|status| status.as_str() == value));
        })
    };
    let run_action = {
        let client = props.client.clone();
        let reload = reload.clone();
        let action_error = action_error.clone();
        Callback::from(move |(id, submit): (String, bool)| {
            let client = client.clone();
            let reload = reload.clone();
            let action_error = action_error.clone();
            action_error.set(None);
            yew::platform::spawn_local(async move {
                let result = if submit {
                    client.submit_property(&id).await
                } else {
                    client.delete_property(&id).await
                };
                match result {
                    Ok(()) => reload.set(reload.wrapping_add(1)),
                    Err(err) => action_error.set(Some(err)),
                }
            });
        })
    };

    let options: Vec<(String, String)> = LISTING_STATUS_FILTERS
        .into_iter()
        .flatten()
        .map(|status| (status.as_str().to_string(), i18n.t(status_key(Some(status)))))
        .collect();
    let selected = (*filter).map(ListingStatus::as_str).unwrap_or_default();

    let body = match &*listings {
        ListingsLoad::Loading => html! { <div class="loading-panel" aria-busy="true">{i18n.t("common.loading")}</div> },
        ListingsLoad::Failed(err) => html! { <ErrorBanner message={api_error_message(err)} /> },
        ListingsLoad::Loaded(items) if items.is_empty() => html! {
            <EmptyState title={i18n.t("profile.listings.empty")} icon="⌂">
                <Link<Route> to={Route::PostAd} classes="btn btn-primary">{i18n.t("nav.postAd")}</Link<Route>>
            </EmptyState>
        },
        ListingsLoad::Loaded(items) => html! {
            <table class="table listings-table">
                <thead>
                    <tr>
                        <th>{i18n.t("profile.listings.columns.title")}</th>
                        <th>{i18n.t("profile.listings.columns.location")}</th>
                        <th>{i18n.t("profile.listings.columns.price")}</th>
                        <th>{i18n.t("profile.listings.columns.status")}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for items.iter().map(|item| listing_row(&i18n, item, &run_action))}
                </tbody>
            </table>
        },
    };

    html! {
        <section class="panel listings-panel">
            <div class="panel-header">
                <h2>{i18n.t("profile.listings.title")}</h2>
                <SelectField id="listing-status" label={i18n.t("profile.listings.filter")}
                    value={selected} options={options}
                    placeholder={i18n.t("profile.listings.all")}
                    on_change={on_filter} />
            </div>
            {(*action_error).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            {body}
        </section>
    }
}

fn listing_row(i18n: &I18nCtx, item: &PropertySummary, run_action: &Callback<(String, bool)>) -> Html {
    let location = match item.city.as_deref() {
        Some(city) => format!("{city}, {}", country_name(&item.country)),
        None => country_name(&item.country),
    };
    let submit = can_submit(item.status).then(|| {
        let run_action = run_action.clone();
        let id = item.id.clone();
        html! {
            <button type="button" class="btn btn-primary btn-xs"
                onclick={Callback::from(move |_| run_action.emit((id.clone(), true)))}>
                {i18n.t("profile.listings.submit")}
            </button>
        }
    });
    let delete = {
        let run_action = run_action.clone();
        let id = item.id.clone();
        html! {
            <button type="button" class="btn btn-ghost btn-xs text-error"
                onclick={Callback::from(move |_| run_action.emit((id.clone(), false)))}>
                {i18n.t("profile.listings.delete")}
            </button>
        }
    };
    html! {
        <tr key={item.id.clone()}>
            <td>{item.title.clone()}</td>
            <td>{location}</td>
            <td>{format_price(item.price_cents, &item.currency)}</td>
            <td><span class="badge">{i18n.t(status_key(item.status))}</span></td>
            <td class="row-actions">{submit.unwrap_or_default()}{delete}</td>
        </tr>
    }
}
