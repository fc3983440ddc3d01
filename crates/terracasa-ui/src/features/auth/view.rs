//! Login and registration pages with the password recovery dialog.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::i18n::{I18nCtx, drive_locale_load, use_i18n};
use crate::app::preferences::BrowserStore;
use crate::components::error_banner::{ErrorBanner, api_error_message};
use crate::components::field::{SelectField, TextField};
use crate::core::auth::Session;
use crate::core::http::ApiError;
use crate::core::store::AppStore;
use crate::core::validation::FieldErrors;
use crate::features::auth::state::{AuthTab, LoginForm, RecoveryForm, RecoveryStep, RegisterForm};
use crate::features::properties::state::LISTING_COUNTRIES;
use terracasa_api_models::AuthResponse;
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

/// Store the new session, adopt the user's language and open the profile.
fn complete_sign_in(response: AuthResponse, navigator: Option<&Navigator>) {
    let language = response.user.language.clone();
    let mut step = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        if let Err(err) = store.sign_in(&BrowserStore, Session::from(response)) {
            warn!(error = %err, "session kept in memory only");
        }
        step = language.as_deref().map(|code| store.i18n.load_code(code));
    });
    if let Some(step) = step {
        drive_locale_load(step);
    }
    if let Some(navigator) = navigator {
        navigator.push(&Route::Profile);
    }
}

fn error_text(i18n: &I18nCtx, errors: &FieldErrors, field: &str) -> Option<AttrValue> {
    errors.get(field).map(|key| AttrValue::from(i18n.t(key)))
}

fn merged_errors(err: &ApiError) -> FieldErrors {
    let mut found = FieldErrors::new();
    found.merge_backend(err.field_errors());
    found
}

#[derive(Properties, PartialEq)]
pub(crate) struct AuthPageProps {
    pub tab: AuthTab,
}

#[function_component(AuthPage)]
pub(crate) fn auth_page(props: &AuthPageProps) -> Html {
    let i18n = use_i18n();
    let recovery_open = use_state(|| false);
    let open_recovery = {
        let recovery_open = recovery_open.clone();
        Callback::from(move |()| recovery_open.set(true))
    };
    let close_recovery = {
        let recovery_open = recovery_open.clone();
        Callback::from(move |()| recovery_open.set(false))
    };
    let tab_link = |tab: AuthTab, route: Route, key: &str| {
        html! {
            <Link<Route> to={route} classes={classes!("tab", (props.tab == tab).then_some("tab-active"))}>
                {i18n.t(key)}
            </Link<Route>>
        }
    };

    html! {
        <section class="page auth-page">
            <div class="tabs" role="tablist">
                {tab_link(AuthTab::Login, Route::Login, "auth.login.tab")}
                {tab_link(AuthTab::Register, Route::Register, "auth.register.tab")}
            </div>
            {match props.tab {
                AuthTab::Login => html! { <LoginPanel on_forgot={open_recovery} /> },
                AuthTab::Register => html! { <RegisterPanel /> },
            }}
            {if *recovery_open {
                html! { <RecoveryDialog on_close={close_recovery} /> }
            } else {
                html! {}
            }}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct LoginPanelProps {
    on_forgot: Callback<()>,
}

#[function_component(LoginPanel)]
fn login_panel(props: &LoginPanelProps) -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let form = use_state(LoginForm::default);
    let errors = use_state(FieldErrors::new);
    let busy = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let on_submit = {
        let client = api.client.clone();
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
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
            busy.set(true);
            let client = client.clone();
            let navigator = navigator.clone();
            let errors = errors.clone();
            let busy = busy.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.login(&body).await {
                    Ok(response) => complete_sign_in(response, navigator.as_ref()),
                    Err(err) => {
                        errors.set(merged_errors(&err));
                        failure.set(Some(err));
                    }
                }
                busy.set(false);
            });
        })
    };
    let setter = |apply: fn(&mut LoginForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_forgot = {
        let on_forgot = props.on_forgot.clone();
        Callback::from(move |_| on_forgot.emit(()))
    };

    html! {
        <form class="panel auth-form" onsubmit={on_submit}>
            <h1>{i18n.t("auth.login.title")}</h1>
            {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            <TextField id="login-email" input_type="email" label={i18n.t("auth.fields.email")} required=true
                value={form.email.clone()} error={error_text(&i18n, &errors, "email")}
                on_input={setter(|form, value| form.email = value)} />
            <TextField id="login-password" input_type="password" label={i18n.t("auth.fields.password")} required=true
                value={form.password.clone()} error={error_text(&i18n, &errors, "password")}
                on_input={setter(|form, value| form.password = value)} />
            <button type="button" class="btn btn-link btn-sm" onclick={on_forgot}>
                {i18n.t("auth.login.forgot")}
            </button>
            <button type="submit" class="btn btn-primary" disabled={*busy}>
                {i18n.t("auth.login.submit")}
            </button>
        </form>
    }
}

#[function_component(RegisterPanel)]
fn register_panel() -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let form = use_state(RegisterForm::default);
    let errors = use_state(FieldErrors::new);
    let busy = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let on_submit = {
        let client = api.client.clone();
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
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
            busy.set(true);
            let client = client.clone();
            let navigator = navigator.clone();
            let errors = errors.clone();
            let busy = busy.clone();
            let failure = failure.clone();
            yew::platform::spawn_local(async move {
                match client.register(&body).await {
                    Ok(response) => complete_sign_in(response, navigator.as_ref()),
                    Err(err) => {
                        errors.set(merged_errors(&err));
                        failure.set(Some(err));
                    }
                }
                busy.set(false);
            });
        })
    };
    let setter = |apply: fn(&mut RegisterForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let countries: Vec<(String, String)> = LISTING_COUNTRIES
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
    let err = |field: &str| error_text(&i18n, &errors, field);

    html! {
        <form class="panel auth-form" onsubmit={on_submit}>
            <h1>{i18n.t("auth.register.title")}</h1>
            {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
            <div class="form-grid">
                <TextField id="register-first-name" label={i18n.t("auth.fields.firstName")} required=true
                    value={form.first_name.clone()} error={err("firstName")}
                    on_input={setter(|form, value| form.first_name = value)} />
                <TextField id="register-last-name" label={i18n.t("auth.fields.lastName")} required=true
                    value={form.last_name.clone()} error={err("lastName")}
                    on_input={setter(|form, value| form.last_name = value)} />
                <TextField id="register-email" input_type="email" label={i18n.t("auth.fields.email")} required=true
                    value={form.email.clone()} error={err("email")}
                    on_input={setter(|form, value| form.email = value)} />
                <TextField id="register-phone" input_type="tel" label={i18n.t("auth.fields.phone")}
                    value={form.phone.clone()} error={err("phone")}
                    on_input={setter(|form, value| form.phone = value)} />
                <TextField id="register-password" input_type="password" label={i18n.t("auth.fields.password")} required=true
                    value={form.password.clone()} error={err("password")}
                    on_input={setter(|form, value| form.password = value)} />
                <TextField id="register-confirm" input_type="password" label={i18n.t("auth.fields.confirmPassword")} required=true
                    value={form.confirm_password.clone()} error={err("confirmPassword")}
                    on_input={setter(|form, value| form.confirm_password = value)} />
                <TextField id="register-company" label={i18n.t("auth.fields.companyName")}
                    value={form.company_name.clone()} error={err("companyName")}
                    on_input={setter(|form, value| form.company_name = value)} />
                <TextField id="register-role" label={i18n.t("auth.fields.roleTitle")}
                    value={form.role_title.clone()} error={err("roleTitle")}
                    on_input={setter(|form, value| form.role_title = value)} />
                <SelectField id="register-country" label={i18n.t("auth.fields.baseCountry")}
                    value={form.base_country.clone()} options={countries}
                    placeholder={i18n.t("common.select")} error={err("baseCountry")}
                    on_change={setter(|form, value| form.base_country = value)} />
                <TextField id="register-city" label={i18n.t("auth.fields.baseCity")}
                    value={form.base_city.clone()} error={err("baseCity")}
                    on_input={setter(|form, value| form.base_city = value)} />
            </div>
            <button type="submit" class="btn btn-primary" disabled={*busy}>
                {i18n.t("auth.register.submit")}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct RecoveryDialogProps {
    on_close: Callback<()>,
}

#[function_component(RecoveryDialog)]
fn recovery_dialog(props: &RecoveryDialogProps) -> Html {
    let i18n = use_i18n();
    let api = use_context::<ApiCtx>();
    let form = use_state(RecoveryForm::default);
    let errors = use_state(FieldErrors::new);
    let busy = use_state(|| false);
    let failure = use_state(|| None as Option<ApiError>);

    let Some(api) = api else {
        return html! { <ErrorBanner message={i18n.t("common.missingApi")} /> };
    };

    let on_submit = {
        let client = api.client.clone();
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let failure = failure.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let current = (*form).clone();
            let client = client.clone();
            let form = form.clone();
            let errors = errors.clone();
            let busy = busy.clone();
            let failure = failure.clone();
            match current.step {
                RecoveryStep::RequestCode => {
                    let body = match current.request_code() {
                        Ok(body) => body,
                        Err(found) => {
                            errors.set(found);
                            return;
                        }
                    };
                    errors.set(FieldErrors::new());
                    failure.set(None);
                    busy.set(true);
                    yew::platform::spawn_local(async move {
                        match client.forgot_password(&body).await {
                            Ok(()) => {
                                let mut next = current;
                                next.advance();
                                form.set(next);
                            }
                            Err(err) => failure.set(Some(err)),
                        }
                        busy.set(false);
                    });
                }
                RecoveryStep::EnterCode => {
                    let body = match current.verify_code() {
                        Ok(body) => body,
                        Err(found) => {
                            errors.set(found);
                            return;
                        }
                    };
                    errors.set(FieldErrors::new());
                    failure.set(None);
                    busy.set(true);
                    yew::platform::spawn_local(async move {
                        match client.verify_code(&body).await {
                            Ok(()) => {
                                let mut next = current;
                                next.advance();
                                form.set(next);
                            }
                            Err(err) => {
                                errors.set(merged_errors(&err));
                                failure.set(Some(err));
                            }
                        }
                        busy.set(false);
                    });
                }
                RecoveryStep::Verified => {}
            }
        })
    };
    let setter = |apply: fn(&mut RecoveryForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let body = match form.step {
        RecoveryStep::RequestCode => html! {
            <>
                <p class="muted">{i18n.t("auth.recovery.requestHint")}</p>
                <TextField id="recovery-email" input_type="email" label={i18n.t("auth.fields.email")} required=true
                    value={form.email.clone()} error={error_text(&i18n, &errors, "email")}
                    on_input={setter(|form, value| form.email = value)} />
                <button type="submit" class="btn btn-primary" disabled={*busy}>{i18n.t("auth.recovery.send")}</button>
            </>
        },
        RecoveryStep::EnterCode => html! {
            <>
                <p class="muted">{i18n.tr("auth.recovery.codeHint", &[("email", form.email.trim())])}</p>
                <TextField id="recovery-code" label={i18n.t("auth.fields.code")} required=true
                    value={form.code.clone()} error={error_text(&i18n, &errors, "code")}
                    on_input={setter(|form, value| form.code = value)} />
                <button type="submit" class="btn btn-primary" disabled={*busy}>{i18n.t("auth.recovery.verify")}</button>
            </>
        },
        RecoveryStep::Verified => html! {
            <div class="alert alert-success" role="status">{i18n.t("auth.recovery.verified")}</div>
        },
    };

    html! {
        <div class="modal modal-open" role="dialog" aria-modal="true">
            <form class="modal-box" onsubmit={on_submit}>
                <h2>{i18n.t("auth.recovery.title")}</h2>
                {(*failure).as_ref().map(|err| html! { <ErrorBanner message={api_error_message(err)} /> }).unwrap_or_default()}
                {body}
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" onclick={on_close}>{i18n.t("common.close")}</button>
                </div>
            </form>
        </div>
    }
}
