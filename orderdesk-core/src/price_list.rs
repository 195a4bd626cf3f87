//! Customer price lists and the request bookkeeping that keeps them current.
//!
//! Every customer selection bumps a generation counter and hands out a
//! [`PriceListTicket`]. A response is only applied while its ticket is still the
//! latest one, so a slow response for a previous customer can never overwrite
//! the list of the customer currently selected.

use crate::error::NetworkError;
use crate::money::{Money, major_units};
use serde::{Deserialize, Serialize};

/// Number of columns in the price-list table (code, name, price, quantity, add).
pub const PRICE_LIST_COLUMNS: u32 = 5;

/// A product row as priced for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(with = "major_units")]
    pub price: Money,
    #[serde(default)]
    pub has_custom_price: bool,
}

/// Body of the single-price lookup. `price` is absent when the backend has no
/// price for the pair (it answers `{ "error": ... }` instead).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UnitPriceBody {
    #[serde(default, deserialize_with = "major_units::option::deserialize")]
    pub price: Option<Money>,
}

/// Identifiers arrive as JSON numbers from the backend but are handled as text
/// everywhere else (DOM attributes, form fields).
///
/// # Errors
///
/// Fails when the value is neither an integer nor a string.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Proof that a request was issued for a particular selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceListTicket {
    pub generation: u64,
    pub customer_id: String,
}

/// What the price-list section currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PriceListStatus {
    /// No customer selected: the section is hidden.
    #[default]
    Hidden,
    Loading,
    Loaded(Vec<PriceListEntry>),
    Failed(NetworkError),
}

impl PriceListStatus {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    #[must_use]
    pub fn entries(&self) -> &[PriceListEntry] {
        match self {
            Self::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

/// Whether a response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied,
    Stale,
}

/// Price-list state for the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceListSync {
    generation: u64,
    customer_id: Option<String>,
    status: PriceListStatus,
}

impl PriceListSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a customer selection. Returns a ticket when a request must be
    /// issued; blank ids hide the section and issue nothing.
    pub fn select_customer(&mut self, customer_id: Option<&str>) -> Option<PriceListTicket> {
        self.generation = self.generation.wrapping_add(1);
        match customer_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                self.customer_id = Some(id.to_string());
                self.status = PriceListStatus::Loading;
                Some(PriceListTicket {
                    generation: self.generation,
                    customer_id: id.to_string(),
                })
            }
            None => {
                self.customer_id = None;
                self.status = PriceListStatus::Hidden;
                None
            }
        }
    }

    /// Apply the result of the request identified by `ticket`.
    pub fn apply(
        &mut self,
        ticket: &PriceListTicket,
        result: Result<Vec<PriceListEntry>, NetworkError>,
    ) -> SyncOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale price list for customer {} (generation {} < {})",
                ticket.customer_id,
                ticket.generation,
                self.generation
            );
            return SyncOutcome::Stale;
        }
        self.status = match result {
            Ok(entries) => PriceListStatus::Loaded(entries),
            Err(err) => {
                log::error!("Error fetching price list: {err}");
                PriceListStatus::Failed(err)
            }
        };
        SyncOutcome::Applied
    }

    #[must_use]
    pub fn is_current(&self, ticket: &PriceListTicket) -> bool {
        ticket.generation == self.generation
            && self.customer_id.as_deref() == Some(ticket.customer_id.as_str())
    }

    #[must_use]
    pub const fn status(&self) -> &PriceListStatus {
        &self.status
    }

    #[must_use]
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    #[must_use]
    pub fn find_entry(&self, product_id: &str) -> Option<&PriceListEntry> {
        self.status.entries().iter().find(|entry| entry.id == product_id)
    }
}

/// Ticket for a single-product price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitPriceTicket {
    pub generation: u64,
    pub customer_id: String,
    pub product_id: String,
}

/// Bookkeeping for the per-line product selector's price lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitPriceLookup {
    generation: u64,
}

impl UnitPriceLookup {
    /// Start a lookup; both ids are required, otherwise nothing is requested.
    pub fn begin(&mut self, customer_id: Option<&str>, product_id: &str) -> Option<UnitPriceTicket> {
        self.generation = self.generation.wrapping_add(1);
        let customer_id = customer_id.map(str::trim).filter(|id| !id.is_empty())?;
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return None;
        }
        Some(UnitPriceTicket {
            generation: self.generation,
            customer_id: customer_id.to_string(),
            product_id: product_id.to_string(),
        })
    }

    /// Invalidate any lookup in flight, e.g. when the customer changes.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Resolve a lookup into the price that should replace the field, if any.
    /// Failures, missing prices and superseded lookups leave the field alone.
    pub fn resolve(
        &self,
        ticket: &UnitPriceTicket,
        result: Result<Option<Money>, NetworkError>,
    ) -> Option<Money> {
        if ticket.generation != self.generation {
            return None;
        }
        match result {
            Ok(price) => price,
            Err(err) => {
                log::error!("Error fetching price: {err}");
                None
            }
        }
    }
}

/// Case-insensitive substring match on code or name. An empty term matches all.
#[must_use]
pub fn entry_matches(entry: &PriceListEntry, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty()
        || entry.code.to_lowercase().contains(&needle)
        || entry.name.to_lowercase().contains(&needle)
}

/// Entries visible under the current search term, in their original order.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [PriceListEntry], term: &str) -> Vec<&'a PriceListEntry> {
    entries.iter().filter(|e| entry_matches(e, term)).collect()
}

/// Generic table filter: keep the rows whose full text contains `term`.
#[must_use]
pub fn filter_rows<T: AsRef<str>>(rows: &[T], term: &str) -> Vec<usize> {
    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.as_ref().to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
