//! Button for destructive actions that may require an explicit confirmation.

use crate::dom;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    /// Ask through `window.confirm` before acting.
    #[prop_or(true)]
    pub confirm: bool,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    #[prop_or(AttrValue::Static("btn btn-outline-danger"))]
    pub class: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

/// Whether the action may go ahead. `ask` is only consulted when a
/// confirmation is required.
pub fn should_proceed(requires_confirmation: bool, ask: impl FnOnce() -> bool) -> bool {
    !requires_confirmation || ask()
}

#[function_component(ConfirmButton)]
pub fn confirm_button(p: &Props) -> Html {
    let onclick = {
        let requires = p.confirm;
        let message = p.message.clone();
        let cb = p.on_confirm.clone();
        Callback::from(move |e: MouseEvent| {
            if should_proceed(requires, || dom::confirm(&message)) {
                cb.emit(());
            } else {
                e.prevent_default();
            }
        })
    };
    html! {
        <button
            type="button"
            class={p.class.clone()}
            data-confirm={p.confirm.to_string()}
            disabled={p.disabled}
            {onclick}
        >
            { p.label.clone() }
        </button>
    }
}
