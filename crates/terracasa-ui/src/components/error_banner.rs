//! Dismissible error banner shown above lists and forms.

use crate::app::i18n::use_i18n;
use crate::core::http::ApiError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorBannerProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorBanner)]
pub(crate) fn error_banner(props: &ErrorBannerProps) -> Html {
    let i18n = use_i18n();
    html! {
        <div class="alert alert-error" role="alert">
            <span>{props.message.clone()}</span>
            {props.on_dismiss.clone().map(|on_dismiss| html! {
                <button
                    type="button"
                    class="btn btn-ghost btn-xs"
                    aria-label={i18n.t("common.dismiss")}
                    onclick={Callback::from(move |_| on_dismiss.emit(()))}
                >{"✕"}</button>
            }).unwrap_or_default()}
        </div>
    }
}

/// Banner text for an API failure.
pub(crate) fn api_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Network { .. } => err.to_string(),
        ApiError::Unauthorized { message } | ApiError::Backend { message, .. } => message.clone(),
        ApiError::Decode { .. } | ApiError::Encode { .. } => {
            crate::core::http::GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}
