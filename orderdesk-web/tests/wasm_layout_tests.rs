#![cfg(target_arch = "wasm32")]

use orderdesk_web::app::{Layout, LayoutProps};
use orderdesk_web::bootstrap::{BootstrapData, CustomerOption};
use orderdesk_web::dom;
use orderdesk_web::router::Route;
use std::rc::Rc;
use wasm_bindgen_test::*;
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
async fn new_order_page_mounts_with_customers() {
    orderdesk_web::i18n::set_lang("en");
    let data = BootstrapData {
        customers: vec![CustomerOption {
            id: "4".into(),
            name: "Rossi SRL".into(),
        }],
        ..BootstrapData::default()
    };
    let props = LayoutProps {
        route: Route::NewOrder,
        data: Rc::new(data),
    };
    Renderer::<Layout>::with_root_and_props(ensure_root(), props).render();
    yew::platform::time::sleep(std::time::Duration::from_millis(10)).await;

    let doc = dom::document();
    let select = doc.get_element_by_id("customer_id").expect("customer select");
    assert!(select.inner_html().contains("Rossi SRL"));
    let section = doc
        .get_element_by_id("customer-price-list-section")
        .expect("price list section");
    assert_eq!(section.get_attribute("style").as_deref(), Some("display: none"));
    assert!(doc.get_element_by_id("orderTotale").is_some());
}

#[wasm_bindgen_test]
fn element_text_reads_bootstrap_script() {
    let doc = dom::document();
    let script = doc.create_element("script").expect("create script");
    script.set_id(orderdesk_web::bootstrap::BOOTSTRAP_ELEMENT_ID);
    script.set_text_content(Some(r#"{"config": {"currency": "USD"}}"#));
    doc.body().expect("body").append_child(&script).expect("append script");

    let data = orderdesk_web::bootstrap::load_bootstrap().expect("bootstrap parses");
    assert_eq!(data.config.currency.as_str(), "USD");
    script.remove();
}

#[wasm_bindgen_test]
fn amounts_and_dates_use_intl_for_the_configured_tag() {
    use orderdesk_core::{CommissionRate, CurrencyCode, Money};
    use orderdesk_web::i18n::{fmt_date, fmt_money, fmt_percent, init_from_config};

    init_from_config("es-ES");
    let shown = fmt_money(Money::from_cents(123_450), &CurrencyCode::eur());
    assert!(shown.contains(",50"), "{shown}");
    assert!(shown.ends_with('€'), "{shown}");

    init_from_config("de-DE");
    assert_eq!(fmt_date("2024-03-05"), "05.03.2024");
    assert_eq!(fmt_date("garbage"), "");

    orderdesk_web::i18n::set_lang("it");
    assert_eq!(fmt_percent(CommissionRate::from_hundredths(750)), "7,5%");
    orderdesk_web::i18n::set_lang("en");
}
