//! The line items of the order being composed, with the hidden fields the
//! order form submits.

use crate::components::confirm_button::ConfirmButton;
use crate::i18n::{fmt_money, fmt_percent, fmt_quantity, t, tr, use_ui_lang};
use orderdesk_core::{CurrencyCode, ITEM_COUNT_FIELD, ItemIndex, LineItem, OrderDraft};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub draft: OrderDraft,
    pub currency: CurrencyCode,
    pub on_remove: Callback<ItemIndex>,
    /// Ask before removing a row. Removal goes straight through by default.
    #[prop_or_default]
    pub confirm_remove: bool,
}

const ITEM_COLUMNS: &str = "6";

fn item_row(p: &Props, item: &LineItem) -> Html {
    let index = item.index;
    let on_remove = {
        let cb = p.on_remove.clone();
        Callback::from(move |()| cb.emit(index))
    };
    let hidden = item
        .form_fields()
        .into_iter()
        .map(|(name, value)| html! { <input type="hidden" {name} {value} /> })
        .collect::<Html>();
    html! {
        <tr key={index.get().to_string()} data-index={index.to_string()}>
            <td>{ item.product_name.clone() }{ hidden }</td>
            <td class="text-end">{ fmt_money(item.unit_price, &p.currency) }</td>
            <td class="text-end">{ fmt_quantity(item.quantity) }</td>
            <td class="text-end">{ fmt_percent(item.commission_rate) }</td>
            <td class="text-end">{ fmt_money(item.line_total(), &p.currency) }</td>
            <td class="text-end">
                <ConfirmButton
                    label={t("items.remove")}
                    message={t("confirm.delete")}
                    confirm={p.confirm_remove}
                    class="btn btn-sm btn-outline-danger remove-item-btn"
                    on_confirm={on_remove}
                />
            </td>
        </tr>
    }
}

#[function_component(OrderItemsTable)]
pub fn order_items_table(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let rows = if p.draft.is_empty() {
        html! {
            <tr class="message-row">
                <td colspan={ITEM_COLUMNS} class="text-center text-muted">{ t("items.empty") }</td>
            </tr>
        }
    } else {
        p.draft.items().iter().map(|item| item_row(p, item)).collect::<Html>()
    };
    let count = p.draft.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("count", count.as_str());
    html! {
        <section class="card mb-3">
            <div class="card-header d-flex justify-content-between">
                <h2 class="h5 mb-0">{ t("items.title") }</h2>
                <span class="badge text-bg-secondary">{ tr("items.count", Some(&args)) }</span>
            </div>
            <input type="hidden" id={ITEM_COUNT_FIELD} name={ITEM_COUNT_FIELD} value={p.draft.item_count().to_string()} />
            <table id="orderItemsTable" class="table table-sm mb-0">
                <thead>
                    <tr>
                        <th>{ t("items.product") }</th>
                        <th class="text-end">{ t("items.price") }</th>
                        <th class="text-end">{ t("items.quantity") }</th>
                        <th class="text-end">{ t("items.commission") }</th>
                        <th class="text-end">{ t("items.total") }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{ rows }</tbody>
                <tfoot>
                    <tr>
                        <th colspan="4" class="text-end">{ t("items.commission_total") }</th>
                        <td class="text-end">{ fmt_money(p.draft.commission_total(), &p.currency) }</td>
                        <td></td>
                    </tr>
                    <tr>
                        <th colspan="4" class="text-end">{ t("items.order_total") }</th>
                        <td id="orderTotale" class="text-end fw-bold">{ fmt_money(p.draft.total(), &p.currency) }</td>
                        <td></td>
                    </tr>
                </tfoot>
            </table>
        </section>
    }
}
