use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::executor::block_on;
use orderdesk_core::{
    CurrencyCode, DEFAULT_COMMISSION_RATE, Locale, Money, NetworkError, NewLineItem, OrderDraft,
    PriceApi, PriceListEntry, PriceListStatus, PriceListSync, Quantity, SyncOutcome,
    UnitPriceLookup, fetch_price_list, fetch_unit_price, format_date, format_money,
};

const PRICE_LIST_JSON: &str = r#"[
    {"id": 1, "code": "A1", "name": "Widget", "price": 10.0, "has_custom_price": true,
     "description": "ignored", "stock": 4},
    {"id": "2", "code": "B7", "name": "Gadget", "price": 2.5}
]"#;

/// Serves canned responses in the order they were queued.
struct ScriptedApi {
    lists: RefCell<VecDeque<Result<Vec<PriceListEntry>, NetworkError>>>,
}

#[async_trait(?Send)]
impl PriceApi for ScriptedApi {
    async fn price_list(&self, _customer_id: &str) -> Result<Vec<PriceListEntry>, NetworkError> {
        self.lists
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn unit_price(
        &self,
        _customer_id: &str,
        product_id: &str,
    ) -> Result<Option<Money>, NetworkError> {
        Ok((product_id == "2").then_some(Money::from_cents(240)))
    }
}

fn backend_entries() -> Vec<PriceListEntry> {
    serde_json::from_str(PRICE_LIST_JSON).unwrap()
}

#[test]
fn price_list_payload_decodes_with_defaults() {
    let entries = backend_entries();
    assert_eq!(entries[0].id, "1");
    assert_eq!(entries[0].price, Money::from_cents(1_000));
    assert!(entries[0].has_custom_price);
    assert_eq!(entries[1].id, "2");
    assert!(!entries[1].has_custom_price);
}

#[test]
fn customer_switch_discards_the_slower_response() {
    let api = ScriptedApi {
        lists: RefCell::new(VecDeque::from([
            Ok(backend_entries()),
            Ok(vec![backend_entries().remove(1)]),
        ])),
    };
    let mut sync = PriceListSync::new();
    let first = sync.select_customer(Some("10")).unwrap();
    let second = sync.select_customer(Some("11")).unwrap();

    let slow = block_on(fetch_price_list(&api, first));
    let fast = block_on(fetch_price_list(&api, second));

    assert_eq!(sync.apply(&fast.ticket, fast.result), SyncOutcome::Applied);
    assert_eq!(sync.apply(&slow.ticket, slow.result), SyncOutcome::Stale);
    assert_eq!(sync.customer_id(), Some("11"));
    assert_eq!(sync.status().entries().len(), 1);
    assert_eq!(sync.status().entries()[0].code, "B7");
}

#[test]
fn failed_price_list_leaves_draft_untouched() {
    let api = ScriptedApi {
        lists: RefCell::new(VecDeque::from([Err(NetworkError::Status {
            url: "/api/customers/3/price-list".into(),
            status: 500,
        })])),
    };
    let mut draft = OrderDraft::new();
    draft
        .add_line_item(NewLineItem {
            product_id: "9".into(),
            product_name: "Bolt".into(),
            quantity: Quantity::whole(2),
            unit_price: Money::from_cents(150),
            commission_rate: DEFAULT_COMMISSION_RATE,
        })
        .unwrap();
    let before = draft.clone();

    let mut sync = PriceListSync::new();
    let ticket = sync.select_customer(Some("3")).unwrap();
    let response = block_on(fetch_price_list(&api, ticket));
    sync.apply(&response.ticket, response.result);

    assert!(matches!(
        sync.status(),
        PriceListStatus::Failed(NetworkError::Status { status: 500, .. })
    ));
    assert_eq!(draft, before);
}

#[test]
fn entries_flow_into_a_formatted_order_total() {
    let api = ScriptedApi {
        lists: RefCell::new(VecDeque::from([Ok(backend_entries())])),
    };
    let mut sync = PriceListSync::new();
    let ticket = sync.select_customer(Some("7")).unwrap();
    let response = block_on(fetch_price_list(&api, ticket));
    sync.apply(&response.ticket, response.result);

    let mut draft = OrderDraft::new();
    for (id, qty) in [("1", Quantity::whole(3)), ("2", Quantity::from_hundredths(150))] {
        let entry = sync.find_entry(id).unwrap();
        draft
            .add_line_item(NewLineItem {
                product_id: entry.id.clone(),
                product_name: entry.name.clone(),
                quantity: qty,
                unit_price: entry.price,
                commission_rate: DEFAULT_COMMISSION_RATE,
            })
            .unwrap();
    }

    // 3 × 10.00 + 1.5 × 2.50
    assert_eq!(draft.total(), Money::from_cents(3_375));
    let eur = CurrencyCode::eur();
    assert_eq!(format_money(draft.total(), Locale::EnUs, &eur), "€33.75");
    assert_eq!(
        format_money(draft.total(), Locale::ItIt, &eur),
        "33,75\u{a0}€"
    );
    assert_eq!(format_date("2024-03-05", Locale::EnUs).unwrap(), "03/05/2024");
}

#[test]
fn unit_price_lookup_only_fills_for_latest_selection() {
    let api = ScriptedApi {
        lists: RefCell::new(VecDeque::new()),
    };
    let mut lookup = UnitPriceLookup::default();
    let old = lookup.begin(Some("7"), "2").unwrap();
    let latest = lookup.begin(Some("7"), "1").unwrap();

    let old = block_on(fetch_unit_price(&api, old));
    let latest = block_on(fetch_unit_price(&api, latest));

    assert_eq!(lookup.resolve(&old.ticket, old.result), None);
    // product 1 has no override: the field keeps its value
    assert_eq!(lookup.resolve(&latest.ticket, latest.result), None);
    assert!(lookup.begin(None, "1").is_none());
}
