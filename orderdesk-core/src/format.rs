//! Locale-aware display formatting for amounts and dates.
//!
//! Fixed layouts for a handful of locales. The browser front end prefers
//! `Intl` and falls back to these; the host and the tester use them directly.

use crate::error::{FormatError, ParseError};
use crate::money::{Money, parse_hundredths};
use crate::numbers::split_hundredths;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narrow no-break space used by French digit grouping.
const NARROW_NBSP: char = '\u{202F}';
/// No-break space between amount and trailing currency symbol.
const NBSP: char = '\u{00A0}';

/// Locales the formatter knows how to lay out.
///
/// Deserializes from any tag through [`Locale::from_tag`], so bare languages
/// and unknown regions never fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl Locale {
    pub const ALL: [Self; 5] = [Self::EnUs, Self::EnGb, Self::ItIt, Self::DeDe, Self::FrFr];

    /// Resolve a BCP-47 tag, falling back to `en-US` for anything unknown.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "en-gb" => Self::EnGb,
            "it" | "it-it" | "it-ch" => Self::ItIt,
            "de" | "de-de" | "de-at" => Self::DeDe,
            "fr" | "fr-fr" => Self::FrFr,
            _ => Self::EnUs,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::ItIt => "it-IT",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
        }
    }

    const fn layout(self) -> NumberLayout {
        match self {
            Self::EnUs | Self::EnGb => NumberLayout {
                group: ',',
                decimal: '.',
                symbol_first: true,
            },
            Self::ItIt | Self::DeDe => NumberLayout {
                group: '.',
                decimal: ',',
                symbol_first: false,
            },
            Self::FrFr => NumberLayout {
                group: NARROW_NBSP,
                decimal: ',',
                symbol_first: false,
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

struct NumberLayout {
    group: char,
    decimal: char,
    symbol_first: bool,
}

/// An ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn eur() -> Self {
        Self::new("EUR")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn symbol(&self) -> &str {
        match self.0.as_str() {
            "EUR" => "€",
            "USD" => "$",
            "GBP" => "£",
            other => other,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::eur()
    }
}

/// Format an amount already held in cents.
#[must_use]
pub fn format_money(amount: Money, locale: Locale, currency: &CurrencyCode) -> String {
    let layout = locale.layout();
    let (negative, whole, frac) = split_hundredths(amount.cents());
    let digits = format!("{}{}{frac:02}", group_digits(whole, layout.group), layout.decimal);
    let sign = if negative { "-" } else { "" };
    let symbol = currency.symbol();
    let spaced = symbol.chars().count() > 1;
    if layout.symbol_first {
        if spaced {
            format!("{sign}{symbol}{NBSP}{digits}")
        } else {
            format!("{sign}{symbol}{digits}")
        }
    } else {
        format!("{sign}{digits}{NBSP}{symbol}")
    }
}

/// Format a decimal amount as currency.
///
/// # Errors
///
/// Returns [`FormatError::NonFinite`] for NaN or infinite input, or for values
/// too large to represent in cents.
pub fn format_currency(
    value: f64,
    locale: Locale,
    currency: &CurrencyCode,
) -> Result<String, FormatError> {
    let amount = Money::from_major(value).ok_or(FormatError::NonFinite(value))?;
    Ok(format_money(amount, locale, currency))
}

/// Format a decimal amount as currency, rendering unusable input as zero.
#[must_use]
pub fn format_currency_lossy(value: f64, locale: Locale, currency: &CurrencyCode) -> String {
    format_currency(value, locale, currency)
        .unwrap_or_else(|_| format_money(Money::ZERO, locale, currency))
}

/// Format a plain number with the locale's grouping and two decimals.
#[must_use]
pub fn format_decimal(hundredths: i64, locale: Locale) -> String {
    let layout = locale.layout();
    let (negative, whole, frac) = split_hundredths(hundredths);
    let sign = if negative { "-" } else { "" };
    format!(
        "{sign}{}{}{frac:02}",
        group_digits(whole, layout.group),
        layout.decimal
    )
}

fn group_digits(value: u64, separator: char) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Something that can be rendered as a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    Date(NaiveDate),
    Text(&'a str),
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

/// Parse the date formats the backend emits (`isoformat()` output and plain dates).
///
/// # Errors
///
/// Returns [`ParseError::Date`] when none of the accepted layouts match.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(stamp.date());
        }
    }
    Err(ParseError::Date(text.to_string()))
}

/// Format a date with two-digit day and month and a four-digit year.
///
/// # Errors
///
/// Returns [`ParseError::Date`] when textual input cannot be parsed.
pub fn format_date<'a>(value: impl Into<DateInput<'a>>, locale: Locale) -> Result<String, ParseError> {
    let date = match value.into() {
        DateInput::Date(date) => date,
        DateInput::Text(text) => parse_date(text)?,
    };
    let (d, m, y) = (date.day(), date.month(), date.year());
    Ok(match locale {
        Locale::EnUs => format!("{m:02}/{d:02}/{y:04}"),
        Locale::EnGb | Locale::ItIt | Locale::FrFr => format!("{d:02}/{m:02}/{y:04}"),
        Locale::DeDe => format!("{d:02}.{m:02}.{y:04}"),
    })
}

/// Format a date, rendering unparseable input as an empty string.
#[must_use]
pub fn format_date_or_placeholder<'a>(value: impl Into<DateInput<'a>>, locale: Locale) -> String {
    format_date(value, locale).unwrap_or_default()
}

/// Parse a numeric form input (quantity, price, commission) into hundredths.
///
/// # Errors
///
/// See [`parse_hundredths`].
pub fn parse_decimal_input(text: &str) -> Result<i64, ParseError> {
    parse_hundredths(text)
}

/// Normalise an amount input to exactly two decimals with a `.` separator, as
/// done when the field loses focus. Input that [`parse_decimal_input`] rejects
/// is returned unchanged so validation can report it.
#[must_use]
pub fn blur_format_amount(text: &str) -> String {
    parse_decimal_input(text).map_or_else(|_| text.to_string(), |h| Money::from_cents(h).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_euro_groups_thousands() {
        let out = format_currency(1234.5, Locale::EnUs, &CurrencyCode::eur()).unwrap();
        assert!(out.contains("1,234.50"));
        assert!(out.contains('€'));
        assert_eq!(out, "€1,234.50");
    }

    #[test]
    fn continental_layouts_trail_the_symbol() {
        let eur = CurrencyCode::eur();
        assert_eq!(
            format_money(Money::from_cents(123_450), Locale::ItIt, &eur),
            "1.234,50\u{a0}€"
        );
        assert_eq!(
            format_money(Money::from_cents(123_456_789), Locale::DeDe, &eur),
            "1.234.567,89\u{a0}€"
        );
        assert_eq!(
            format_money(Money::from_cents(123_450), Locale::FrFr, &eur),
            "1\u{202f}234,50\u{a0}€"
        );
    }

    #[test]
    fn negative_and_unknown_currencies() {
        assert_eq!(
            format_money(Money::from_cents(-1_050), Locale::EnUs, &CurrencyCode::new("usd")),
            "-$10.50"
        );
        assert_eq!(
            format_money(Money::from_cents(99), Locale::EnGb, &CurrencyCode::new("CHF")),
            "CHF\u{a0}0.99"
        );
    }

    #[test]
    fn non_finite_currency_is_rejected_or_zeroed() {
        let eur = CurrencyCode::eur();
        assert!(matches!(
            format_currency(f64::NAN, Locale::EnUs, &eur),
            Err(FormatError::NonFinite(v)) if v.is_nan()
        ));
        assert!(format_currency(f64::INFINITY, Locale::EnUs, &eur).is_err());
        assert_eq!(format_currency_lossy(f64::NAN, Locale::EnUs, &eur), "€0.00");
    }

    #[test]
    fn dates_follow_locale_order() {
        assert_eq!(format_date("2024-03-05", Locale::EnUs).unwrap(), "03/05/2024");
        assert_eq!(format_date("2024-03-05", Locale::ItIt).unwrap(), "05/03/2024");
        assert_eq!(format_date("2024-03-05", Locale::DeDe).unwrap(), "05.03.2024");
        let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(format_date(date, Locale::EnGb).unwrap(), "01/12/2023");
    }

    #[test]
    fn dates_accept_backend_timestamps() {
        assert_eq!(
            format_date("2024-03-05T14:22:10.123456", Locale::EnUs).unwrap(),
            "03/05/2024"
        );
        assert_eq!(
            format_date("2024-03-05T23:59:00+01:00", Locale::EnUs).unwrap(),
            "03/05/2024"
        );
    }

    #[test]
    fn bad_dates_fail_or_fall_back_to_placeholder() {
        assert!(matches!(
            format_date("not a date", Locale::EnUs),
            Err(ParseError::Date(_))
        ));
        assert_eq!(format_date_or_placeholder("2024-13-40", Locale::EnUs), "");
    }

    #[test]
    fn locale_tags_resolve_with_fallback() {
        assert_eq!(Locale::from_tag("it"), Locale::ItIt);
        assert_eq!(Locale::from_tag("de_DE"), Locale::DeDe);
        assert_eq!(Locale::from_tag("en-GB"), Locale::EnGb);
        assert_eq!(Locale::from_tag("pt-BR"), Locale::EnUs);
    }

    #[test]
    fn locale_deserializes_loosely_and_serializes_canonically() {
        let it: Locale = serde_json::from_str("\"it\"").unwrap();
        assert_eq!(it, Locale::ItIt);
        let pt: Locale = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(pt, Locale::EnUs);
        assert_eq!(serde_json::to_string(&Locale::DeDe).unwrap(), "\"de-DE\"");
    }

    #[test]
    fn blur_formatting_pads_to_two_decimals() {
        assert_eq!(blur_format_amount("12.5"), "12.50");
        assert_eq!(blur_format_amount("3"), "3.00");
        assert_eq!(blur_format_amount(""), "");
        assert_eq!(blur_format_amount("abc"), "abc");
    }

    #[test]
    fn blur_formatting_agrees_with_input_parsing() {
        assert_eq!(blur_format_amount("12,5"), "12.50");
        assert_eq!(blur_format_amount(" 0,05 "), "0.05");
        assert_eq!(blur_format_amount("1.234"), "1.234");
        for text in ["12,5", "7", "0.3"] {
            let blurred = blur_format_amount(text);
            assert_eq!(parse_decimal_input(&blurred), parse_decimal_input(text));
        }
    }
}
