//! Labelled form controls with inline error text.
//!
//! # Design
//! - Controls are fully controlled: value in, edited string out.
//! - Error text arrives already translated.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub multiline: bool,
}

#[function_component(TextField)]
pub(crate) fn text_field(props: &TextFieldProps) -> Html {
    let invalid = props.error.is_some();
    let control = if props.multiline {
        let on_input = props.on_input.clone();
        html! {
            <textarea
                id={props.id.clone()}
                class={classes!("textarea", invalid.then_some("textarea-error"))}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                oninput={Callback::from(move |event: InputEvent| {
                    if let Some(input) = event.target_dyn_into::<HtmlTextAreaElement>() {
                        on_input.emit(input.value());
                    }
                })}
            />
        }
    } else {
        let on_input = props.on_input.clone();
        html! {
            <input
                id={props.id.clone()}
                type={props.input_type.clone()}
                class={classes!("input", invalid.then_some("input-error"))}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                oninput={Callback::from(move |event: InputEvent| {
                    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                        on_input.emit(input.value());
                    }
                })}
            />
        }
    };
    html! {
        <label class="field" for={props.id.clone()}>
            <span class="field-label">
                {props.label.clone()}
                {if props.required { html! { <span class="required">{" *"}</span> } } else { html! {} }}
            </span>
            {control}
            {field_error(props.error.as_ref())}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SelectFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
    pub on_change: Callback<String>,
    /// Label of the leading blank option; omitted when `None`.
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(SelectField)]
pub(crate) fn select_field(props: &SelectFieldProps) -> Html {
    let on_change = props.on_change.clone();
    let onchange = Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            on_change.emit(select.value());
        }
    });
    html! {
        <label class="field" for={props.id.clone()}>
            <span class="field-label">
                {props.label.clone()}
                {if props.required { html! { <span class="required">{" *"}</span> } } else { html! {} }}
            </span>
            <select
                id={props.id.clone()}
                class={classes!("select", props.error.is_some().then_some("select-error"))}
                {onchange}
            >
                {props.placeholder.clone().map(|label| html! {
                    <option value="" selected={props.value.is_empty()}>{label}</option>
                }).unwrap_or_default()}
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={props.value.as_str() == value}>
                        {label.clone()}
                    </option>
                })}
            </select>
            {field_error(props.error.as_ref())}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct CheckboxFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub checked: bool,
    pub on_toggle: Callback<bool>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(CheckboxField)]
pub(crate) fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let on_toggle = props.on_toggle.clone();
    let onchange = Callback::from(move |event: Event| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            on_toggle.emit(input.checked());
        }
    });
    html! {
        <label class="field field-inline" for={props.id.clone()}>
            <input id={props.id.clone()} type="checkbox" class="checkbox" checked={props.checked} {onchange} />
            <span>{props.label.clone()}</span>
            {field_error(props.error.as_ref())}
        </label>
    }
}

fn field_error(error: Option<&AttrValue>) -> Html {
    error
        .map(|message| html! { <span class="field-error" role="alert">{message.clone()}</span> })
        .unwrap_or_default()
}
