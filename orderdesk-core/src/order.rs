//! Order draft management: the line items of an order being composed.
use crate::error::ValidationError;
use crate::money::{CommissionRate, Money, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commission applied to items added straight from the customer price list.
pub const DEFAULT_COMMISSION_RATE: CommissionRate = CommissionRate::percent(5);

/// Name of the hidden field carrying the number of allocated row indices.
pub const ITEM_COUNT_FIELD: &str = "item_count";

/// Stable per-row identifier, unique for the lifetime of a draft.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemIndex(u32);

impl ItemIndex {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Input for [`OrderDraft::add_line_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub commission_rate: CommissionRate,
}

/// One product entry within an order draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub index: ItemIndex,
    pub product_id: String,
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub commission_rate: CommissionRate,
}

impl LineItem {
    /// `quantity × unit_price`, rounded to the cent.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.quantity.times(self.unit_price)
    }

    #[must_use]
    pub fn commission_amount(&self) -> Money {
        self.commission_rate.of(self.line_total())
    }

    /// Hidden form fields submitted for this row, named `{attribute}_{index}`.
    #[must_use]
    pub fn form_fields(&self) -> [(String, String); 4] {
        let i = self.index;
        [
            (format!("product_id_{i}"), self.product_id.clone()),
            (format!("price_{i}"), self.unit_price.to_string()),
            (format!("quantity_{i}"), self.quantity.to_string()),
            (format!("commission_rate_{i}"), self.commission_rate.to_string()),
        ]
    }
}

/// The in-progress, unsaved set of line items composing a new order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    items: Vec<LineItem>,
    next_index: u32,
    /// Total in cents (updated when the draft changes)
    total: Money,
}

impl OrderDraft {
    /// Create a new empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line item and recompute the total.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] without touching the draft when the
    /// quantity is not positive, the price or commission is negative or the
    /// product id is blank.
    pub fn add_line_item(&mut self, item: NewLineItem) -> Result<ItemIndex, ValidationError> {
        validate(&item)?;
        let index = ItemIndex(self.next_index);
        self.next_index = self.next_index.saturating_add(1);
        self.items.push(LineItem {
            index,
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            commission_rate: item.commission_rate,
        });
        self.recompute_order_total();
        log::debug!("added line item {index}, total now {}", self.total);
        Ok(index)
    }

    /// Remove the line item with `index`. Unknown indices are a no-op.
    pub fn remove_line_item(&mut self, index: ItemIndex) -> Option<LineItem> {
        let position = self.items.iter().position(|item| item.index == index)?;
        let removed = self.items.remove(position);
        self.recompute_order_total();
        log::debug!("removed line item {index}, total now {}", self.total);
        Some(removed)
    }

    /// Recompute the retained total from the line items.
    pub fn recompute_order_total(&mut self) -> Money {
        self.total = self.items.iter().map(LineItem::line_total).sum();
        self.total
    }

    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    #[must_use]
    pub fn commission_total(&self) -> Money {
        self.items.iter().map(LineItem::commission_amount).sum()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn find(&self, index: ItemIndex) -> Option<&LineItem> {
        self.items.iter().find(|item| item.index == index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of indices handed out so far; submitted as `item_count` so the
    /// backend scans every index, including the gaps left by removals.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.next_index
    }

    /// Every hidden field the order form submits, `item_count` first.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(1 + self.items.len() * 4);
        fields.push((ITEM_COUNT_FIELD.to_string(), self.next_index.to_string()));
        for item in &self.items {
            fields.extend(item.form_fields());
        }
        fields
    }

    /// Drop every item. Indices keep increasing so identifiers stay unique.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::ZERO;
    }
}

fn validate(item: &NewLineItem) -> Result<(), ValidationError> {
    if item.product_id.trim().is_empty() {
        return Err(ValidationError::MissingProduct);
    }
    if !item.quantity.is_positive() {
        return Err(ValidationError::NonPositiveQuantity(item.quantity.to_string()));
    }
    if item.unit_price.is_negative() {
        return Err(ValidationError::NegativePrice(item.unit_price.to_string()));
    }
    if item.commission_rate.is_negative() {
        return Err(ValidationError::NegativeCommission(
            item.commission_rate.to_string(),
        ));
    }
    Ok(())
}
