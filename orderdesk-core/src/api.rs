//! Backend seam for price lookups.
//!
//! The browser implementation lives in the web crate; tests and the tester use
//! in-memory fixtures.

use crate::error::NetworkError;
use crate::money::Money;
use crate::price_list::{PriceListEntry, PriceListTicket, UnitPriceTicket};
use async_trait::async_trait;

/// `GET /api/customers/{customer_id}/price-list`
#[must_use]
pub fn price_list_path(base: &str, customer_id: &str) -> String {
    format!(
        "{}/customers/{}/price-list",
        base.trim_end_matches('/'),
        encode_segment(customer_id)
    )
}

/// `GET /api/customers/{customer_id}/price/{product_id}`
#[must_use]
pub fn unit_price_path(base: &str, customer_id: &str, product_id: &str) -> String {
    format!(
        "{}/customers/{}/price/{}",
        base.trim_end_matches('/'),
        encode_segment(customer_id),
        encode_segment(product_id)
    )
}

/// Percent-encode everything outside the unreserved set so ids cannot alter
/// the request path.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Price endpoints of the sales backend.
///
/// Futures are `?Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait PriceApi {
    /// Fetch the customer-specific price list.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on transport failure, non-2xx status or an
    /// undecodable body.
    async fn price_list(&self, customer_id: &str) -> Result<Vec<PriceListEntry>, NetworkError>;

    /// Fetch the price of one product for one customer. `Ok(None)` means the
    /// backend answered without a price.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on transport failure or non-2xx status.
    async fn unit_price(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<Option<Money>, NetworkError>;
}

/// A finished price-list request, still carrying its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceListResponse {
    pub ticket: PriceListTicket,
    pub result: Result<Vec<PriceListEntry>, NetworkError>,
}

/// A finished unit-price request, still carrying its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPriceResponse {
    pub ticket: UnitPriceTicket,
    pub result: Result<Option<Money>, NetworkError>,
}

/// Run the request described by `ticket`.
pub async fn fetch_price_list<A: PriceApi + ?Sized>(
    api: &A,
    ticket: PriceListTicket,
) -> PriceListResponse {
    let result = api.price_list(&ticket.customer_id).await;
    PriceListResponse { ticket, result }
}

/// Run the lookup described by `ticket`.
pub async fn fetch_unit_price<A: PriceApi + ?Sized>(
    api: &A,
    ticket: UnitPriceTicket,
) -> UnitPriceResponse {
    let result = api.unit_price(&ticket.customer_id, &ticket.product_id).await;
    UnitPriceResponse { ticket, result }
}
