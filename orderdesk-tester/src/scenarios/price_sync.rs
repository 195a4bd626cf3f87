use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use orderdesk_core::api::{PriceListResponse, UnitPriceResponse};
use orderdesk_core::{
    Money, NetworkError, PriceApi, PriceListEntry, PriceListStatus, PriceListSync, SyncOutcome,
    UnitPriceLookup, fetch_price_list, fetch_unit_price,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// In-memory backend that answers each customer after a fixed delay.
struct FixtureApi {
    delays: HashMap<String, Duration>,
}

impl FixtureApi {
    fn delay(&self, customer_id: &str) -> Duration {
        self.delays.get(customer_id).copied().unwrap_or_default()
    }
}

fn catalogue(customer_id: &str) -> Vec<PriceListEntry> {
    vec![PriceListEntry {
        id: format!("{customer_id}-p1"),
        code: format!("{customer_id}-A1"),
        name: format!("Widget for {customer_id}"),
        price: Money::from_cents(1_000),
        has_custom_price: true,
    }]
}

#[async_trait(?Send)]
impl PriceApi for FixtureApi {
    async fn price_list(&self, customer_id: &str) -> Result<Vec<PriceListEntry>, NetworkError> {
        tokio::time::sleep(self.delay(customer_id)).await;
        Ok(catalogue(customer_id))
    }

    async fn unit_price(
        &self,
        customer_id: &str,
        _product_id: &str,
    ) -> Result<Option<Money>, NetworkError> {
        tokio::time::sleep(self.delay(customer_id)).await;
        Ok(Some(Money::from_cents(1_150)))
    }
}

/// Two customers are picked in quick succession; the first answer arrives
/// last and must be dropped.
pub async fn run(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let slow = format!("c{}", rng.gen_range(1..=50));
    let fast = format!("c{}", rng.gen_range(51..=100));
    let api = FixtureApi {
        delays: HashMap::from([
            (slow.clone(), Duration::from_millis(rng.gen_range(8..=15))),
            (fast.clone(), Duration::from_millis(rng.gen_range(0..=3))),
        ]),
    };

    let mut sync = PriceListSync::new();
    ensure!(sync.select_customer(Some("  ")).is_none(), "blank customer issued a request");
    ensure!(!sync.status().is_visible(), "blank customer left the section visible");

    let first = sync.select_customer(Some(&slow)).context("no ticket for first customer")?;
    let second = sync.select_customer(Some(&fast)).context("no ticket for second customer")?;

    let arrivals: RefCell<Vec<PriceListResponse>> = RefCell::new(Vec::new());
    tokio::join!(
        async {
            let response = fetch_price_list(&api, first).await;
            arrivals.borrow_mut().push(response);
        },
        async {
            let response = fetch_price_list(&api, second).await;
            arrivals.borrow_mut().push(response);
        },
    );

    let outcomes: Vec<(String, SyncOutcome)> = arrivals
        .into_inner()
        .into_iter()
        .map(|response| {
            let customer = response.ticket.customer_id.clone();
            let outcome = sync.apply(&response.ticket, response.result);
            (customer, outcome)
        })
        .collect();
    for (customer, outcome) in &outcomes {
        let expected = if *customer == fast {
            SyncOutcome::Applied
        } else {
            SyncOutcome::Stale
        };
        ensure!(*outcome == expected, "customer {customer}: expected {expected:?}, got {outcome:?}");
    }
    ensure!(
        sync.status() == &PriceListStatus::Loaded(catalogue(&fast)),
        "price list does not belong to the latest customer"
    );

    unit_price_latest_wins(&api, &fast).await
}

async fn unit_price_latest_wins(api: &FixtureApi, customer_id: &str) -> Result<()> {
    let mut lookup = UnitPriceLookup::default();
    let older = lookup
        .begin(Some(customer_id), "p1")
        .context("no ticket for first product")?;
    let newer = lookup
        .begin(Some(customer_id), "p2")
        .context("no ticket for second product")?;
    let UnitPriceResponse { ticket, result } = fetch_unit_price(api, older).await;
    ensure!(lookup.resolve(&ticket, result).is_none(), "superseded unit price was applied");
    let UnitPriceResponse { ticket, result } = fetch_unit_price(api, newer).await;
    ensure!(
        lookup.resolve(&ticket, result) == Some(Money::from_cents(1_150)),
        "latest unit price was dropped"
    );
    Ok(())
}
