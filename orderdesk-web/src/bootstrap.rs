//! Page bootstrap: configuration and reference data embedded by the server.
//!
//! The host page renders a
//! `<script id="orderdesk-bootstrap" type="application/json">` element; every
//! field is optional and falls back to the defaults below.

use orderdesk_core::money::major_units;
use orderdesk_core::numbers::f64_to_hundredths;
use orderdesk_core::price_list::deserialize_id;
use orderdesk_core::{CommissionRate, CurrencyCode, DEFAULT_COMMISSION_RATE, Locale, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the script element holding the bootstrap JSON.
pub const BOOTSTRAP_ELEMENT_ID: &str = "orderdesk-bootstrap";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("bootstrap element #{0} not found")]
    Missing(&'static str),
    #[error("bootstrap JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDeskConfig {
    /// Prefix of the backend API routes.
    pub api_base: String,
    /// BCP-47 tag used for amounts and dates (`it-IT`, `it`, `es-ES`).
    pub locale: String,
    pub currency: CurrencyCode,
    /// Commission (percent) applied to items added from the price list.
    pub default_commission_pct: f64,
}

impl Default for OrderDeskConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            locale: Locale::EnUs.tag().to_string(),
            currency: CurrencyCode::eur(),
            default_commission_pct: 5.0,
        }
    }
}

impl OrderDeskConfig {
    /// Layout for the configured tag; unknown tags fall back to `en-US`.
    #[must_use]
    pub fn number_locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }

    /// The configured default commission, or 5% when it is unusable.
    #[must_use]
    pub fn default_commission_rate(&self) -> CommissionRate {
        f64_to_hundredths(self.default_commission_pct)
            .filter(|h| *h >= 0)
            .map_or(DEFAULT_COMMISSION_RATE, CommissionRate::from_hundredths)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// Catalogue product offered by the manual line-item form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    /// List price, used until a customer-specific price arrives.
    #[serde(with = "major_units")]
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentOrder {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub customer_name: String,
    pub order_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(with = "major_units")]
    pub total_amount: Money,
}

/// Series shown on the dashboard charts. Values are in major units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    pub orders_count: u32,
    pub customers_count: u32,
    pub total_sales: f64,
    pub month_labels: Vec<String>,
    pub monthly_sales: Vec<f64>,
    pub monthly_commission: Vec<f64>,
    pub category_labels: Vec<String>,
    pub category_sales: Vec<f64>,
    pub status_labels: Vec<String>,
    pub status_counts: Vec<f64>,
    pub recent_orders: Vec<RecentOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapData {
    pub config: OrderDeskConfig,
    pub customers: Vec<CustomerOption>,
    pub products: Vec<ProductOption>,
    pub dashboard: DashboardData,
}

/// Parse bootstrap JSON.
///
/// # Errors
///
/// Returns [`BootstrapError::Parse`] when the text is not valid bootstrap JSON.
pub fn parse_bootstrap(json: &str) -> Result<BootstrapData, BootstrapError> {
    Ok(serde_json::from_str(json)?)
}

/// Read the bootstrap element from the current document.
///
/// # Errors
///
/// Returns [`BootstrapError::Missing`] when the page has no bootstrap element
/// and [`BootstrapError::Parse`] when its content is malformed.
pub fn load_bootstrap() -> Result<BootstrapData, BootstrapError> {
    let text = crate::dom::element_text(BOOTSTRAP_ELEMENT_ID)
        .ok_or(BootstrapError::Missing(BOOTSTRAP_ELEMENT_ID))?;
    parse_bootstrap(&text)
}

/// Bootstrap data for the page, with defaults when the page provides none.
#[must_use]
pub fn load_bootstrap_or_default() -> BootstrapData {
    load_bootstrap().unwrap_or_else(|err| {
        log::warn!("{err}; using default configuration");
        BootstrapData::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let data = parse_bootstrap("{}").unwrap();
        assert_eq!(data.config.api_base, "/api");
        assert_eq!(data.config.number_locale(), Locale::EnUs);
        assert_eq!(data.config.currency.as_str(), "EUR");
        assert_eq!(data.config.default_commission_rate(), DEFAULT_COMMISSION_RATE);
        assert!(data.customers.is_empty());
    }

    #[test]
    fn numeric_ids_and_prices_are_normalised() {
        let data = parse_bootstrap(
            r#"{
                "config": {"locale": "it-IT", "currency": "USD", "default_commission_pct": 7.5},
                "customers": [{"id": 4, "name": "Rossi SRL"}],
                "products": [{"id": 12, "code": "P-12", "name": "Valve", "price": 19.99}]
            }"#,
        )
        .unwrap();
        assert_eq!(data.config.number_locale(), Locale::ItIt);
        assert_eq!(data.config.default_commission_rate(), CommissionRate::from_hundredths(750));
        assert_eq!(data.customers[0].id, "4");
        assert_eq!(data.products[0].price, Money::from_cents(1_999));
    }

    #[test]
    fn bare_language_tag_keeps_reference_data() {
        let data = parse_bootstrap(
            r#"{
                "config": {"locale": "it"},
                "customers": [{"id": 4, "name": "Rossi SRL"}],
                "products": [{"id": 12, "name": "Valve", "price": 19.99}],
                "dashboard": {"orders_count": 3}
            }"#,
        )
        .unwrap();
        assert_eq!(data.config.number_locale(), Locale::ItIt);
        assert_eq!(data.customers.len(), 1);
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.dashboard.orders_count, 3);
    }

    #[test]
    fn unknown_locale_falls_back_without_dropping_data() {
        let data = parse_bootstrap(
            r#"{"config": {"locale": "pt-BR"}, "customers": [{"id": "c-1", "name": "Lima"}]}"#,
        )
        .unwrap();
        assert_eq!(data.config.locale, "pt-BR");
        assert_eq!(data.config.number_locale(), Locale::EnUs);
        assert_eq!(data.customers[0].id, "c-1");
    }

    #[test]
    fn negative_commission_falls_back_to_default() {
        let config = OrderDeskConfig {
            default_commission_pct: -1.0,
            ..OrderDeskConfig::default()
        };
        assert_eq!(config.default_commission_rate(), DEFAULT_COMMISSION_RATE);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(parse_bootstrap("{"), Err(BootstrapError::Parse(_))));
    }
}
