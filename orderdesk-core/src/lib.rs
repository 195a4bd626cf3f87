//! OrderDesk Core
//!
//! Platform-agnostic order-entry logic for the OrderDesk sales front end.
//! This crate holds order drafts, price-list synchronisation, money and
//! locale formatting, and chart data, without UI or browser dependencies.

pub mod api;
pub mod chart;
pub mod error;
pub mod format;
pub mod money;
pub mod numbers;
pub mod order;
pub mod price_list;

// Re-export commonly used types
pub use api::{
    PriceApi, PriceListResponse, UnitPriceResponse, fetch_price_list,
    fetch_unit_price, price_list_path, unit_price_path,
};
pub use chart::{ChartKind, ChartSpec, Dataset, Rgba, ValueUnit, share_percent};
pub use error::{FormatError, NetworkError, ParseError, ValidationError};
pub use format::{
    CurrencyCode, DateInput, Locale, blur_format_amount, format_currency, format_currency_lossy,
    format_date, format_date_or_placeholder, format_decimal, format_money, parse_date,
    parse_decimal_input,
};
pub use money::{CommissionRate, Money, Quantity, parse_hundredths};
pub use order::{
    DEFAULT_COMMISSION_RATE, ITEM_COUNT_FIELD, ItemIndex, LineItem, NewLineItem, OrderDraft,
};
pub use price_list::{
    PRICE_LIST_COLUMNS, PriceListEntry, PriceListStatus, PriceListSync, PriceListTicket,
    SyncOutcome, UnitPriceBody, UnitPriceLookup, UnitPriceTicket, entry_matches,
    filter_entries, filter_rows,
};
