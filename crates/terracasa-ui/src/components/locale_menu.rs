//! Locale selection dropdown used in the navbar.
//!
//! # Design
//! - Keep presentation focused on UI; selection state is managed by the caller.
//! - Avoid side effects inside the component; emit the selected locale via callback.

use crate::i18n::LocaleCode;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LocaleMenuProps {
    pub locale: LocaleCode,
    pub on_select: Callback<LocaleCode>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(LocaleMenu)]
pub(crate) fn locale_menu(props: &LocaleMenuProps) -> Html {
    let open = use_state(|| false);
    let toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    let active_flag_src = format!("https://flagcdn.com/{}.svg", locale_flag(props.locale));

    html! {
        <div class={classes!("dropdown", "dropdown-end", (*open).then_some("dropdown-open"))}>
            <button
                type="button"
                class={classes!("btn", "btn-ghost", "btn-sm", props.busy.then_some("loading"))}
                aria-haspopup="listbox"
                aria-expanded={open.to_string()}
                onclick={toggle}
            >
                <img src={active_flag_src} alt="" class="flag" />
                <span>{props.locale.code().to_ascii_uppercase()}</span>
            </button>
            if *open {
                <ul class="dropdown-content menu" role="listbox">
                    {for LocaleCode::all().into_iter().map(|locale| {
                        let on_select = props.on_select.clone();
                        let open = open.clone();
                        let onclick = Callback::from(move |_| {
                            open.set(false);
                            on_select.emit(locale);
                        });
                        let flag_src = format!("https://flagcdn.com/{}.svg", locale_flag(locale));
                        html! {
                            <li role="option" aria-selected={(locale == props.locale).to_string()}>
                                <button type="button" class="locale-option" {onclick}>
                                    <img src={flag_src} alt="" class="flag" />
                                    <span>{locale.label()}</span>
                                </button>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}

fn locale_flag(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => "gb",
        LocaleCode::De => "de",
        LocaleCode::Es => "es",
        LocaleCode::Fr => "fr",
        LocaleCode::Ru => "ru",
        LocaleCode::Tr => "tr",
    }
}
