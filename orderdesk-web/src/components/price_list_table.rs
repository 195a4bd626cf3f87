//! The customer price-list section of the new-order form.
//!
//! Rows are a projection of [`PriceListStatus`]; status rows (loading, error,
//! empty) span the whole table and are never hidden by the search box.

use crate::i18n::{fmt_money, t, use_ui_lang};
use crate::state::ROW_QUANTITY_DEFAULT;
use orderdesk_core::{CurrencyCode, PRICE_LIST_COLUMNS, PriceListEntry, PriceListStatus, filter_entries};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Class applied to prices negotiated for the selected customer.
pub const CUSTOM_PRICE_CLASS: &str = "text-primary fw-bold";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub status: PriceListStatus,
    #[prop_or_default]
    pub search: AttrValue,
    #[prop_or_default]
    pub quantities: BTreeMap<String, String>,
    pub currency: CurrencyCode,
    pub on_search: Callback<String>,
    /// `(product_id, raw quantity text)`
    pub on_quantity: Callback<(String, String)>,
    pub on_add: Callback<String>,
}

fn message_row(text: String, class: &'static str) -> Html {
    html! {
        <tr class="message-row">
            <td colspan={PRICE_LIST_COLUMNS.to_string()} class={classes!("text-center", class)}>{ text }</td>
        </tr>
    }
}

fn entry_row(p: &Props, entry: &PriceListEntry) -> Html {
    let id = entry.id.clone();
    let quantity = p
        .quantities
        .get(&entry.id)
        .cloned()
        .unwrap_or_else(|| ROW_QUANTITY_DEFAULT.to_string());
    let on_input = {
        let cb = p.on_quantity.clone();
        let id = id.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit((id.clone(), input.value()));
        })
    };
    let on_add = {
        let cb = p.on_add.clone();
        let id = id.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
    };
    let price_class = classes!(entry.has_custom_price.then_some(CUSTOM_PRICE_CLASS));
    let price_title = entry.has_custom_price.then(|| t("price_list.custom_price"));
    html! {
        <tr key={id.clone()} data-product-id={id.clone()}>
            <td>{ entry.code.clone() }</td>
            <td>{ entry.name.clone() }</td>
            <td class={price_class} title={price_title}>
                { fmt_money(entry.price, &p.currency) }
            </td>
            <td>
                <input
                    type="number"
                    class="form-control form-control-sm product-quantity"
                    data-product-id={id.clone()}
                    aria-label={t("price_list.quantity")}
                    min="0"
                    step="0.01"
                    value={quantity}
                    oninput={on_input}
                />
            </td>
            <td>
                <button
                    type="button"
                    class="btn btn-sm btn-primary add-product-btn"
                    data-product-id={id}
                    aria-label={t("price_list.add")}
                    onclick={on_add}
                >
                    { "+" }
                </button>
            </td>
        </tr>
    }
}

fn body_rows(p: &Props) -> Html {
    match &p.status {
        PriceListStatus::Hidden => Html::default(),
        PriceListStatus::Loading => message_row(t("price_list.loading"), "text-muted"),
        PriceListStatus::Failed(_) => message_row(t("price_list.error"), "text-danger"),
        PriceListStatus::Loaded(entries) if entries.is_empty() => {
            message_row(t("price_list.empty"), "text-muted")
        }
        PriceListStatus::Loaded(entries) => filter_entries(entries, &p.search)
            .into_iter()
            .map(|entry| entry_row(p, entry))
            .collect::<Html>(),
    }
}

#[function_component(PriceListTable)]
pub fn price_list_table(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let on_search = {
        let cb = p.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let hidden = (!p.status.is_visible()).then_some("display: none");
    html! {
        <section id="customer-price-list-section" class="card mb-3" style={hidden}>
            <div class="card-header d-flex justify-content-between align-items-center">
                <h2 class="h5 mb-0">{ t("price_list.title") }</h2>
                <input
                    id="product-search"
                    type="search"
                    class="form-control form-control-sm w-auto"
                    placeholder={t("price_list.search")}
                    value={p.search.clone()}
                    oninput={on_search}
                />
            </div>
            <table id="customer-products-table" class="table table-sm mb-0">
                <thead>
                    <tr>
                        <th>{ t("price_list.code") }</th>
                        <th>{ t("price_list.name") }</th>
                        <th>{ t("price_list.price") }</th>
                        <th>{ t("price_list.quantity") }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{ body_rows(p) }</tbody>
            </table>
        </section>
    }
}
