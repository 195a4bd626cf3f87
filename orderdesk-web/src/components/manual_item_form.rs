//! Form for adding a catalogue product with a hand-entered price.

use crate::bootstrap::ProductOption;
use crate::components::button::Button;
use crate::i18n::{t, use_ui_lang};
use crate::state::ManualEntry;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub products: Rc<[ProductOption]>,
    pub entry: ManualEntry,
    pub on_product: Callback<String>,
    pub on_price: Callback<String>,
    pub on_price_blur: Callback<()>,
    pub on_quantity: Callback<String>,
    pub on_commission: Callback<String>,
    pub on_add: Callback<()>,
}

fn text_input(cb: &Callback<String>) -> Callback<InputEvent> {
    let cb = cb.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        cb.emit(input.value());
    })
}

#[function_component(ManualItemForm)]
pub fn manual_item_form(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let on_product = {
        let cb = p.on_product.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let on_blur = {
        let cb = p.on_price_blur.clone();
        Callback::from(move |_: FocusEvent| cb.emit(()))
    };
    let on_add = {
        let cb = p.on_add.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let options = p
        .products
        .iter()
        .map(|product| {
            let label = if product.code.is_empty() {
                product.name.clone()
            } else {
                format!("{} - {}", product.code, product.name)
            };
            html! {
                <option value={product.id.clone()} selected={product.id == p.entry.product_id}>{ label }</option>
            }
        })
        .collect::<Html>();
    html! {
        <section class="card mb-3" aria-labelledby="manual-item-title">
            <div class="card-header">
                <h2 id="manual-item-title" class="h5 mb-0">{ t("manual.title") }</h2>
            </div>
            <div class="card-body row g-2 align-items-end">
                <div class="col-md-4">
                    <label for="modal_product_id" class="form-label">{ t("manual.product") }</label>
                    <select id="modal_product_id" class="form-select" onchange={on_product}>
                        <option value="" selected={p.entry.product_id.is_empty()}>{ t("manual.select_product") }</option>
                        { options }
                    </select>
                </div>
                <div class="col-md-2">
                    <label for="modal_price" class="form-label">{ t("manual.price") }</label>
                    <input
                        id="modal_price"
                        type="text"
                        inputmode="decimal"
                        class="form-control"
                        value={p.entry.price.clone()}
                        oninput={text_input(&p.on_price)}
                        onblur={on_blur}
                    />
                </div>
                <div class="col-md-2">
                    <label for="modal_quantity" class="form-label">{ t("manual.quantity") }</label>
                    <input
                        id="modal_quantity"
                        type="number"
                        min="0"
                        step="0.01"
                        class="form-control"
                        value={p.entry.quantity.clone()}
                        oninput={text_input(&p.on_quantity)}
                    />
                </div>
                <div class="col-md-2">
                    <label for="modal_commission_rate" class="form-label">{ t("manual.commission") }</label>
                    <input
                        id="modal_commission_rate"
                        type="number"
                        min="0"
                        step="0.01"
                        class="form-control"
                        value={p.entry.commission.clone()}
                        oninput={text_input(&p.on_commission)}
                    />
                </div>
                <div class="col-md-2">
                    <Button id={AttrValue::Static("add-manual-item")} label={t("manual.add")} onclick={on_add} />
                </div>
            </div>
        </section>
    }
}
