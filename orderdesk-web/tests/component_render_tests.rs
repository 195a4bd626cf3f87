use futures::executor::block_on;
use orderdesk_core::{
    ChartSpec, CommissionRate, CurrencyCode, Money, NetworkError, NewLineItem, OrderDraft,
    PriceListEntry, PriceListStatus, Quantity,
};
use orderdesk_web::app::{Layout, LayoutProps};
use orderdesk_web::bootstrap::BootstrapData;
use orderdesk_web::components::chart::{self, Chart};
use orderdesk_web::components::header::{self, Header};
use orderdesk_web::components::order_items_table::{self, OrderItemsTable};
use orderdesk_web::components::price_list_table::{self, CUSTOM_PRICE_CLASS, PriceListTable};
use orderdesk_web::router::Route;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn entries() -> Vec<PriceListEntry> {
    vec![
        PriceListEntry {
            id: "1".into(),
            code: "A1".into(),
            name: "Widget".into(),
            price: Money::from_cents(1_000),
            has_custom_price: true,
        },
        PriceListEntry {
            id: "2".into(),
            code: "B7".into(),
            name: "Gadget".into(),
            price: Money::from_cents(250),
            has_custom_price: false,
        },
    ]
}

fn price_list_props(status: PriceListStatus, search: &str) -> price_list_table::Props {
    price_list_table::Props {
        status,
        search: AttrValue::from(search.to_string()),
        quantities: BTreeMap::new(),
        currency: CurrencyCode::eur(),
        on_search: Callback::noop(),
        on_quantity: Callback::noop(),
        on_add: Callback::noop(),
    }
}

/// Number of `<tr>` rows inside the first `<tbody>`.
fn tbody_rows(html: &str) -> usize {
    let start = html.find("<tbody").expect("table body");
    let end = html[start..].find("</tbody>").expect("closed table body") + start;
    html[start..end].matches("<tr").count()
}

fn render_price_list(status: PriceListStatus, search: &str) -> String {
    block_on(
        LocalServerRenderer::<PriceListTable>::with_props(price_list_props(status, search)).render(),
    )
}

#[test]
fn price_list_rows_show_formatted_prices() {
    orderdesk_web::i18n::set_lang("en");
    let html = render_price_list(PriceListStatus::Loaded(entries()), "");
    assert!(html.contains("Widget"));
    assert!(html.contains("€10.00"));
    assert!(html.contains("€2.50"));
    assert!(html.contains(CUSTOM_PRICE_CLASS));
    assert!(html.contains("product-quantity"));
    assert!(html.contains("add-product-btn"));
    assert!(!html.contains("display: none"));
}

#[test]
fn single_entry_price_list_renders_exactly_one_emphasised_row() {
    orderdesk_web::i18n::set_lang("en");
    let html = render_price_list(PriceListStatus::Loaded(entries()[..1].to_vec()), "");
    assert_eq!(tbody_rows(&html), 1);
    let emphasised = format!(r#"class="{CUSTOM_PRICE_CLASS}""#);
    let cell = html.find(&emphasised).expect("custom price cell");
    assert!(html[cell..].contains("€10.00"));
}

#[test]
fn failed_price_list_renders_exactly_one_full_width_row() {
    orderdesk_web::i18n::set_lang("en");
    let failure = NetworkError::Transport {
        url: "/api/customers/7/price-list".into(),
        message: "offline".into(),
    };
    let html = render_price_list(PriceListStatus::Failed(failure), "widget");
    assert_eq!(tbody_rows(&html), 1);
    assert_eq!(html.matches(r#"colspan="5""#).count(), 1);
    assert!(html.contains("Error loading the price list"));
    assert!(!html.contains("add-product-btn"));
}

#[test]
fn price_list_search_hides_non_matching_rows() {
    orderdesk_web::i18n::set_lang("en");
    let html = render_price_list(PriceListStatus::Loaded(entries()), "b7");
    assert_eq!(tbody_rows(&html), 1);
    assert!(html.contains("Gadget"));
    assert!(!html.contains("Widget"));
}

#[test]
fn price_list_status_rows_span_the_table() {
    orderdesk_web::i18n::set_lang("en");
    let failure = NetworkError::Status {
        url: "/api/customers/7/price-list".into(),
        status: 500,
    };
    let html = render_price_list(PriceListStatus::Failed(failure), "");
    assert!(html.contains("Error loading the price list"));
    assert!(html.contains(r#"colspan="5""#));

    let html = render_price_list(PriceListStatus::Loaded(Vec::new()), "");
    assert!(html.contains("No products available"));

    let html = render_price_list(PriceListStatus::Loading, "");
    assert!(html.contains("Loading price list..."));

    let html = render_price_list(PriceListStatus::Hidden, "");
    assert!(html.contains("display: none"));
}

#[test]
fn order_items_table_carries_hidden_fields_and_total() {
    orderdesk_web::i18n::set_lang("en");
    let mut draft = OrderDraft::new();
    draft
        .add_line_item(NewLineItem {
            product_id: "1".into(),
            product_name: "Widget".into(),
            quantity: Quantity::from_hundredths(250),
            unit_price: Money::from_cents(1_000),
            commission_rate: CommissionRate::percent(5),
        })
        .unwrap();
    let props = order_items_table::Props {
        draft,
        currency: CurrencyCode::eur(),
        on_remove: Callback::noop(),
        confirm_remove: true,
    };
    let html = block_on(LocalServerRenderer::<OrderItemsTable>::with_props(props).render());
    assert!(html.contains("orderItemsTable"));
    assert!(html.contains("orderTotale"));
    assert!(html.contains(r#"name="product_id_0""#));
    assert!(html.contains(r#"name="commission_rate_0""#));
    assert!(html.contains(r#"name="item_count""#));
    assert!(html.contains("€25.00"));
    assert!(html.contains("1 item"));
    assert!(html.contains("remove-item-btn"));
    assert!(html.contains(r#"data-confirm="true""#));
}

fn one_gadget_draft() -> OrderDraft {
    let mut draft = OrderDraft::new();
    draft
        .add_line_item(NewLineItem {
            product_id: "2".into(),
            product_name: "Gadget".into(),
            quantity: Quantity::whole(1),
            unit_price: Money::from_cents(250),
            commission_rate: CommissionRate::percent(5),
        })
        .unwrap();
    draft
}

#[test]
fn line_item_removal_does_not_ask_by_default() {
    let html = block_on(
        LocalServerRenderer::<OrderItemsTable>::with_props(yew::props!(order_items_table::Props {
            draft: one_gadget_draft(),
            currency: CurrencyCode::eur(),
            on_remove: Callback::noop(),
        }))
        .render(),
    );
    assert!(html.contains("remove-item-btn"));
    assert!(html.contains(r#"data-confirm="false""#));
    assert!(!html.contains(r#"data-confirm="true""#));
}

#[test]
fn empty_order_shows_placeholder_row() {
    orderdesk_web::i18n::set_lang("en");
    let props = order_items_table::Props {
        draft: OrderDraft::new(),
        currency: CurrencyCode::eur(),
        on_remove: Callback::noop(),
        confirm_remove: false,
    };
    let html = block_on(LocalServerRenderer::<OrderItemsTable>::with_props(props).render());
    assert!(html.contains("No items added yet"));
    assert!(html.contains("€0.00"));
}

#[test]
fn header_renders_languages_and_navigation() {
    orderdesk_web::i18n::set_lang("en");
    let props = header::Props {
        on_lang_change: Callback::noop(),
        current_lang: "en".to_string(),
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    assert!(html.contains("lang-select"));
    assert!(html.contains("Italiano"));
    assert!(html.contains(r#"href="/dashboard""#));
    assert!(html.contains(r#"href="/orders/new""#));
}

#[test]
fn charts_render_marks_or_empty_message() {
    orderdesk_web::i18n::set_lang("en");
    let bars = chart::Props {
        spec: ChartSpec::sales_bar(
            "monthlySalesChart",
            vec![100.0, 250.0],
            vec!["Jan".into(), "Feb".into()],
            None,
        ),
        currency: CurrencyCode::eur(),
        title: None,
    };
    let html = block_on(LocalServerRenderer::<Chart>::with_props(bars).render());
    assert!(html.contains("monthlySalesChart"));
    assert!(html.contains("<rect"));
    assert!(html.contains("Monthly Sales: €250.00"));

    let whole = chart::Props {
        spec: ChartSpec::category_pie("categorySalesChart", vec![3.0], vec!["Parts".into()]),
        currency: CurrencyCode::eur(),
        title: None,
    };
    let html = block_on(LocalServerRenderer::<Chart>::with_props(whole).render());
    assert!(html.contains("<circle"));
    assert!(html.contains("Parts: 100%"));

    let empty = chart::Props {
        spec: ChartSpec::status_doughnut("orderStatusChart", Vec::new(), Vec::new()),
        currency: CurrencyCode::eur(),
        title: None,
    };
    let html = block_on(LocalServerRenderer::<Chart>::with_props(empty).render());
    assert!(html.contains("No data to display"));
}

fn render_route(route: Route) -> String {
    let props = LayoutProps {
        route,
        data: Rc::new(BootstrapData::default()),
    };
    block_on(LocalServerRenderer::<Layout>::with_props(props).render())
}

#[test]
fn new_order_page_starts_with_hidden_price_list() {
    orderdesk_web::i18n::set_lang("en");
    let html = render_route(Route::NewOrder);
    assert!(html.contains(r#"id="customer_id""#));
    assert!(html.contains("customer-price-list-section"));
    assert!(html.contains("display: none"));
    assert!(html.contains("modal_product_id"));
    assert!(html.contains("modal_price"));
    assert!(html.contains("orderItemsTable"));
}

#[test]
fn dashboard_and_not_found_pages_render() {
    orderdesk_web::i18n::set_lang("en");
    let html = render_route(Route::Dashboard);
    assert!(html.contains("recentOrdersTable"));
    assert!(html.contains("table-filter"));
    assert!(html.contains("No orders yet"));
    assert!(html.contains("Show commission"));

    let html = render_route(Route::NotFound);
    assert!(html.contains("Page not found"));
}
