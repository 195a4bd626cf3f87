//! The new-order page: customer price list, manual item form and the running
//! list of line items.

use crate::bootstrap::{CustomerOption, OrderDeskConfig, ProductOption};
use crate::components::confirm_button::ConfirmButton;
use crate::components::customer_select::CustomerSelect;
use crate::components::manual_item_form::ManualItemForm;
use crate::components::order_items_table::OrderItemsTable;
use crate::components::price_list_table::PriceListTable;
use crate::i18n::{t, use_ui_lang};
use crate::state::{OrderAction, OrderFormState};
use orderdesk_core::ItemIndex;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: OrderDeskConfig,
    pub customers: Rc<[CustomerOption]>,
    pub products: Rc<[ProductOption]>,
}

/// Issues the requests and alerts the reducer leaves pending.
#[cfg(target_arch = "wasm32")]
#[hook]
fn use_order_effects(state: &UseReducerHandle<OrderFormState>, api_base: &str) {
    use crate::api::HttpPriceApi;
    use crate::dom;
    use orderdesk_core::api::{fetch_price_list, fetch_unit_price};

    let api = use_memo(api_base.to_string(), |base| HttpPriceApi::new(base.clone()));

    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        use_effect_with(state.pending_price_list.clone(), move |ticket| {
            if let Some(ticket) = ticket.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let response = fetch_price_list(&*api, ticket).await;
                    if let Err(err) = &response.result {
                        log::error!("price list request failed: {err}");
                        dom::console_error(&err.to_string());
                    }
                    dispatcher.dispatch(OrderAction::PriceListLoaded(response));
                });
            }
            || ()
        });
    }

    {
        let dispatcher = state.dispatcher();
        use_effect_with(state.pending_unit_price.clone(), move |ticket| {
            if let Some(ticket) = ticket.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let response = fetch_unit_price(&*api, ticket).await;
                    if let Err(err) = &response.result {
                        dom::console_error(&err.to_string());
                    }
                    dispatcher.dispatch(OrderAction::UnitPriceLoaded(response));
                });
            }
            || ()
        });
    }

    use_effect_with(state.notice.clone(), |notice| {
        if let Some(notice) = notice {
            dom::alert(&t(notice.message_key));
        }
        || ()
    });
}

#[function_component(OrderNewPage)]
pub fn order_new_page(p: &Props) -> Html {
    let _lang = use_ui_lang();
    let default_commission = p.config.default_commission_rate();
    let state = use_reducer(move || OrderFormState::new(default_commission));

    #[cfg(target_arch = "wasm32")]
    use_order_effects(&state, &p.config.api_base);

    let dispatch = |make: fn(String) -> OrderAction| {
        let state = state.clone();
        Callback::from(move |text: String| state.dispatch(make(text)))
    };
    let on_customer = dispatch(OrderAction::SelectCustomer);
    let on_search = dispatch(OrderAction::Search);
    let on_manual_price = dispatch(OrderAction::ManualPrice);
    let on_manual_quantity = dispatch(OrderAction::ManualQuantity);
    let on_manual_commission = dispatch(OrderAction::ManualCommission);

    let on_row_quantity = {
        let state = state.clone();
        Callback::from(move |(product_id, text): (String, String)| {
            state.dispatch(OrderAction::RowQuantity { product_id, text });
        })
    };
    let on_add_row = {
        let state = state.clone();
        Callback::from(move |product_id: String| {
            state.dispatch(OrderAction::AddFromPriceList { product_id });
        })
    };
    let on_remove = {
        let state = state.clone();
        Callback::from(move |index: ItemIndex| state.dispatch(OrderAction::Remove(index)))
    };
    let on_clear = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(OrderAction::ClearItems))
    };
    let on_manual_product = {
        let state = state.clone();
        let products = p.products.clone();
        Callback::from(move |product_id: String| {
            let list_price = products.iter().find(|pr| pr.id == product_id).map(|pr| pr.price);
            state.dispatch(OrderAction::ManualProduct {
                product_id,
                list_price,
            });
        })
    };
    let on_manual_blur = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(OrderAction::ManualPriceBlur))
    };
    let on_manual_add = {
        let state = state.clone();
        let products = p.products.clone();
        Callback::from(move |()| {
            let product_name = products
                .iter()
                .find(|pr| pr.id == state.manual.product_id)
                .map(|pr| pr.name.clone())
                .unwrap_or_default();
            state.dispatch(OrderAction::AddManual { product_name });
        })
    };

    let selected = state
        .price_list
        .customer_id()
        .map(|id| AttrValue::from(id.to_string()));

    html! {
        <form id="order-form" method="post" class="order-form">
            <h1 class="h3 mb-3">{ t("order.title") }</h1>
            <CustomerSelect customers={p.customers.clone()} {selected} on_change={on_customer} />
            <PriceListTable
                status={state.price_list.status().clone()}
                search={AttrValue::from(state.search.clone())}
                quantities={state.row_quantities.clone()}
                currency={p.config.currency.clone()}
                {on_search}
                on_quantity={on_row_quantity}
                on_add={on_add_row}
            />
            <ManualItemForm
                products={p.products.clone()}
                entry={state.manual.clone()}
                on_product={on_manual_product}
                on_price={on_manual_price}
                on_price_blur={on_manual_blur}
                on_quantity={on_manual_quantity}
                on_commission={on_manual_commission}
                on_add={on_manual_add}
            />
            <OrderItemsTable draft={state.draft.clone()} currency={p.config.currency.clone()} {on_remove} />
            <div class="d-flex gap-2 justify-content-end">
                <ConfirmButton
                    label={t("order.clear")}
                    message={t("confirm.clear")}
                    class="btn btn-outline-secondary"
                    disabled={state.draft.is_empty()}
                    on_confirm={on_clear}
                />
                <button type="submit" class="btn btn-success" disabled={state.draft.is_empty()}>
                    { t("order.submit") }
                </button>
            </div>
        </form>
    }
}
