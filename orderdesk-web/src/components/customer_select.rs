use crate::bootstrap::CustomerOption;
use crate::i18n::{t, use_ui_lang};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub customers: Rc<[CustomerOption]>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    pub on_change: Callback<String>,
}

#[function_component(CustomerSelect)]
pub fn customer_select(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let on_change = {
        let cb = p.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let selected = p.selected.as_deref().unwrap_or_default();
    html! {
        <div class="mb-3">
            <label for="customer_id" class="form-label">{ t("order.customer") }</label>
            <select id="customer_id" name="customer_id" class="form-select" required=true onchange={on_change}>
                <option value="" selected={selected.is_empty()}>{ t("order.select_customer") }</option>
                { for p.customers.iter().map(|c| html! {
                    <option key={c.id.clone()} value={c.id.clone()} selected={c.id == selected}>
                        { c.name.clone() }
                    </option>
                }) }
            </select>
        </div>
    }
}
