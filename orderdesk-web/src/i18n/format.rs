//! Display helpers bound to the active language's number layout.
//!
//! In the browser amounts and dates go through `Intl` with the active BCP-47
//! tag. On the host, and whenever `Intl` yields nothing, the deterministic
//! layouts from `orderdesk-core` are used.

#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
use crate::i18n::bundle::number_locale;
#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Date, Function, Intl, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use orderdesk_core::numbers::i64_to_f64;
use orderdesk_core::{
    CommissionRate, CurrencyCode, Money, Quantity, format_date_or_placeholder, format_decimal,
    format_money, parse_date,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
fn intl_options(pairs: &[(&str, JsValue)]) -> Object {
    let opts = Object::new();
    for (key, value) in pairs {
        let _ = Reflect::set(&opts, &JsValue::from_str(key), value);
    }
    opts
}

#[cfg(target_arch = "wasm32")]
fn intl_number(num: f64, opts: &Object) -> Option<String> {
    with_bundle(|bundle| {
        let locales = Array::new();
        locales.push(&JsValue::from_str(&bundle.number_tag));
        let nf = Intl::NumberFormat::new(&locales, opts);
        let format_fn: Function = nf.format();
        format_fn
            .call1(&nf, &JsValue::from_f64(num))
            .ok()
            .and_then(|v| v.as_string())
    })
}

#[must_use]
pub fn fmt_money(amount: Money, currency: &CurrencyCode) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let opts = intl_options(&[
            ("style", JsValue::from_str("currency")),
            ("currency", JsValue::from_str(currency.as_str())),
        ]);
        if let Some(text) = intl_number(amount.to_major(), &opts) {
            return text;
        }
    }
    format_money(amount, number_locale(), currency)
}

/// Format a backend date; unparseable input renders as an empty cell.
#[must_use]
pub fn fmt_date(date: &str) -> String {
    let Ok(parsed) = parse_date(date) else {
        return String::new();
    };
    #[cfg(target_arch = "wasm32")]
    {
        let opts = intl_options(&[
            ("timeZone", JsValue::from_str("UTC")),
            ("year", JsValue::from_str("numeric")),
            ("month", JsValue::from_str("2-digit")),
            ("day", JsValue::from_str("2-digit")),
        ]);
        let shown = with_bundle(|bundle| {
            Date::new(&JsValue::from_str(&parsed.to_string()))
                .to_locale_date_string(&bundle.number_tag, &opts)
                .as_string()
        });
        if let Some(text) = shown {
            return text;
        }
    }
    format_date_or_placeholder(parsed, number_locale())
}

/// Up to two decimals, trailing zeros dropped (`2`, `2.5`, `2.25`), in the
/// local layout.
fn fmt_trimmed(hundredths: i64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let opts = intl_options(&[("maximumFractionDigits", JsValue::from_f64(2.0))]);
        if let Some(text) = intl_number(i64_to_f64(hundredths) / 100.0, &opts) {
            return text;
        }
    }
    let full = format_decimal(hundredths, number_locale());
    let frac = hundredths.unsigned_abs() % 100;
    let split = full.len().saturating_sub(3);
    let (whole, tail) = full.split_at(split);
    match frac {
        0 => whole.to_string(),
        f if f % 10 == 0 => format!("{whole}{}", tail.trim_end_matches('0')),
        _ => format!("{whole}{tail}"),
    }
}

#[must_use]
pub fn fmt_quantity(quantity: Quantity) -> String {
    fmt_trimmed(quantity.hundredths())
}

#[must_use]
pub fn fmt_percent(rate: CommissionRate) -> String {
    format!("{}%", fmt_trimmed(rate.hundredths()))
}
