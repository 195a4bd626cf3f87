//! Order form state and the transitions UI events drive through it.
//!
//! Everything here is pure: requests to issue are left in `pending_*` tickets
//! and alerts in [`Notice`], and the browser wiring in the page component acts
//! on them.

use orderdesk_core::api::{PriceListResponse, UnitPriceResponse};
use orderdesk_core::{
    CommissionRate, ItemIndex, Money, NewLineItem, OrderDraft, ParseError, PriceListEntry,
    PriceListSync, PriceListTicket, Quantity, SyncOutcome, UnitPriceLookup, UnitPriceTicket,
    ValidationError, blur_format_amount, filter_entries, parse_decimal_input,
};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::Reducible;

/// Quantity shown in a fresh price-list row.
pub const ROW_QUANTITY_DEFAULT: &str = "0";
const MANUAL_QUANTITY_DEFAULT: &str = "1";

/// A blocking message for the user. `serial` changes on every raise so the
/// same message can be shown twice in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub serial: u64,
    /// Translation key of the message.
    pub message_key: &'static str,
}

/// Fields of the manual line-item form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub product_id: String,
    pub price: String,
    pub quantity: String,
    pub commission: String,
}

impl ManualEntry {
    fn new(default_commission: CommissionRate) -> Self {
        Self {
            product_id: String::new(),
            price: String::new(),
            quantity: MANUAL_QUANTITY_DEFAULT.to_string(),
            commission: default_commission.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormState {
    pub price_list: PriceListSync,
    pub unit_price: UnitPriceLookup,
    pub draft: OrderDraft,
    pub search: String,
    /// Raw quantity input per price-list row, keyed by product id.
    pub row_quantities: BTreeMap<String, String>,
    pub manual: ManualEntry,
    pub default_commission: CommissionRate,
    pub pending_price_list: Option<PriceListTicket>,
    pub pending_unit_price: Option<UnitPriceTicket>,
    pub notice: Option<Notice>,
    notices_raised: u64,
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self::new(orderdesk_core::DEFAULT_COMMISSION_RATE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    SelectCustomer(String),
    PriceListLoaded(PriceListResponse),
    Search(String),
    RowQuantity { product_id: String, text: String },
    AddFromPriceList { product_id: String },
    Remove(ItemIndex),
    ClearItems,
    /// A product was picked in the manual form; `list_price` pre-fills the
    /// price until the customer-specific one arrives.
    ManualProduct {
        product_id: String,
        list_price: Option<Money>,
    },
    UnitPriceLoaded(UnitPriceResponse),
    ManualPrice(String),
    ManualPriceBlur,
    ManualQuantity(String),
    ManualCommission(String),
    AddManual { product_name: String },
}

/// Result of an add attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ItemIndex),
    Rejected(ValidationError),
    /// Price or commission text that is not a number, or a quantity with more
    /// than two decimals.
    Unreadable(ParseError),
    /// Unknown product row; nothing happens.
    Noop,
}

/// Translation key of the alert shown for a rejected line item.
#[must_use]
pub const fn validation_message_key(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::NonPositiveQuantity(_) => "validation.quantity",
        ValidationError::NegativePrice(_) => "validation.price",
        ValidationError::NegativeCommission(_) => "validation.commission",
        ValidationError::MissingProduct => "validation.product",
    }
}

/// Translation key of the alert for quantities with more than two decimals.
pub const QUANTITY_PRECISION_KEY: &str = "validation.quantity_precision";

/// Unparseable quantity text counts as zero and is rejected like one. Text
/// with more than two decimals is an error of its own.
fn quantity_from_input(text: &str) -> Result<Quantity, ParseError> {
    match parse_decimal_input(text) {
        Ok(hundredths) => Ok(Quantity::from_hundredths(hundredths)),
        Err(err @ ParseError::Precision(_)) => Err(err),
        Err(_) => Ok(Quantity::ZERO),
    }
}

impl OrderFormState {
    #[must_use]
    pub fn new(default_commission: CommissionRate) -> Self {
        Self {
            price_list: PriceListSync::new(),
            unit_price: UnitPriceLookup::default(),
            draft: OrderDraft::new(),
            search: String::new(),
            row_quantities: BTreeMap::new(),
            manual: ManualEntry::new(default_commission),
            default_commission,
            pending_price_list: None,
            pending_unit_price: None,
            notice: None,
            notices_raised: 0,
        }
    }

    /// Price-list rows matching the search box, in backend order.
    #[must_use]
    pub fn visible_entries(&self) -> Vec<&PriceListEntry> {
        filter_entries(self.price_list.status().entries(), &self.search)
    }

    #[must_use]
    pub fn row_quantity(&self, product_id: &str) -> &str {
        self.row_quantities
            .get(product_id)
            .map_or(ROW_QUANTITY_DEFAULT, String::as_str)
    }

    fn raise(&mut self, message_key: &'static str) {
        self.notices_raised = self.notices_raised.wrapping_add(1);
        self.notice = Some(Notice {
            serial: self.notices_raised,
            message_key,
        });
    }

    pub fn apply(&mut self, action: OrderAction) {
        match action {
            OrderAction::SelectCustomer(customer_id) => self.select_customer(&customer_id),
            OrderAction::PriceListLoaded(response) => self.price_list_loaded(response),
            OrderAction::Search(term) => self.search = term,
            OrderAction::RowQuantity { product_id, text } => {
                self.row_quantities.insert(product_id, text);
            }
            OrderAction::AddFromPriceList { product_id } => {
                let _ = self.add_from_price_list(&product_id);
            }
            OrderAction::Remove(index) => {
                let _ = self.draft.remove_line_item(index);
            }
            OrderAction::ClearItems => self.draft.clear(),
            OrderAction::ManualProduct {
                product_id,
                list_price,
            } => self.select_manual_product(product_id, list_price),
            OrderAction::UnitPriceLoaded(response) => self.unit_price_loaded(response),
            OrderAction::ManualPrice(text) => self.manual.price = text,
            OrderAction::ManualPriceBlur => {
                self.manual.price = blur_format_amount(&self.manual.price);
            }
            OrderAction::ManualQuantity(text) => self.manual.quantity = text,
            OrderAction::ManualCommission(text) => self.manual.commission = text,
            OrderAction::AddManual { product_name } => {
                let _ = self.add_manual(product_name);
            }
        }
    }

    fn select_customer(&mut self, customer_id: &str) {
        self.pending_price_list = self.price_list.select_customer(Some(customer_id));
        self.row_quantities.clear();
        self.unit_price.cancel();
        self.pending_unit_price = None;
    }

    fn price_list_loaded(&mut self, response: PriceListResponse) {
        let PriceListResponse { ticket, result } = response;
        if self.price_list.apply(&ticket, result) == SyncOutcome::Applied {
            self.row_quantities.clear();
        }
        if self.pending_price_list.as_ref() == Some(&ticket) {
            self.pending_price_list = None;
        }
    }

    /// Add the price-list row for `product_id` with the quantity typed in it
    /// and the default commission. The row's quantity resets on success; on
    /// rejection an alert is raised and the draft is untouched.
    pub fn add_from_price_list(&mut self, product_id: &str) -> AddOutcome {
        let Some(entry) = self.price_list.find_entry(product_id).cloned() else {
            return AddOutcome::Noop;
        };
        let quantity = match quantity_from_input(self.row_quantity(product_id)) {
            Ok(quantity) => quantity,
            Err(err) => {
                self.raise(QUANTITY_PRECISION_KEY);
                return AddOutcome::Unreadable(err);
            }
        };
        let item = NewLineItem {
            product_id: entry.id,
            product_name: entry.name,
            quantity,
            unit_price: entry.price,
            commission_rate: self.default_commission,
        };
        match self.draft.add_line_item(item) {
            Ok(index) => {
                self.row_quantities
                    .insert(product_id.to_string(), ROW_QUANTITY_DEFAULT.to_string());
                AddOutcome::Added(index)
            }
            Err(err) => {
                self.raise(validation_message_key(&err));
                AddOutcome::Rejected(err)
            }
        }
    }

    fn select_manual_product(&mut self, product_id: String, list_price: Option<Money>) {
        if let Some(price) = list_price {
            self.manual.price = price.to_string();
        }
        self.pending_unit_price = self
            .unit_price
            .begin(self.price_list.customer_id(), &product_id);
        self.manual.product_id = product_id;
    }

    fn unit_price_loaded(&mut self, response: UnitPriceResponse) {
        let UnitPriceResponse { ticket, result } = response;
        if let Some(price) = self.unit_price.resolve(&ticket, result) {
            self.manual.price = price.to_string();
        }
        if self.pending_unit_price.as_ref() == Some(&ticket) {
            self.pending_unit_price = None;
        }
    }

    /// Add the manual form's line item. Malformed price or commission text is
    /// rejected before it reaches the draft.
    pub fn add_manual(&mut self, product_name: String) -> AddOutcome {
        let price = match parse_decimal_input(&self.manual.price) {
            Ok(cents) => cents,
            Err(err) => {
                self.raise("validation.price");
                return AddOutcome::Unreadable(err);
            }
        };
        let commission = match parse_decimal_input(&self.manual.commission) {
            Ok(hundredths) => hundredths,
            Err(err) => {
                self.raise("validation.commission");
                return AddOutcome::Unreadable(err);
            }
        };
        let quantity = match quantity_from_input(&self.manual.quantity) {
            Ok(quantity) => quantity,
            Err(err) => {
                self.raise(QUANTITY_PRECISION_KEY);
                return AddOutcome::Unreadable(err);
            }
        };
        let item = NewLineItem {
            product_id: self.manual.product_id.clone(),
            product_name,
            quantity,
            unit_price: Money::from_cents(price),
            commission_rate: CommissionRate::from_hundredths(commission),
        };
        match self.draft.add_line_item(item) {
            Ok(index) => {
                self.manual = ManualEntry::new(self.default_commission);
                self.unit_price.cancel();
                self.pending_unit_price = None;
                AddOutcome::Added(index)
            }
            Err(err) => {
                self.raise(validation_message_key(&err));
                AddOutcome::Rejected(err)
            }
        }
    }
}

impl Reducible for OrderFormState {
    type Action = OrderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        next.apply(action);
        Rc::new(next)
    }
}
