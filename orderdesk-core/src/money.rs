//! Fixed-point amounts used throughout the order builder.
//!
//! Prices are stored in cents and quantities / commission rates in hundredths so
//! totals never depend on floating-point accumulation or on re-parsing text.

use crate::error::ParseError;
use crate::numbers::{SCALE, f64_to_hundredths, i64_to_f64, mul_div_round, split_hundredths};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A monetary amount in minor units (cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount (e.g. `10.5`) into cents.
    #[must_use]
    pub fn from_major(value: f64) -> Option<Self> {
        f64_to_hundredths(value).map(Self)
    }

    #[must_use]
    pub fn to_major(self) -> f64 {
        i64_to_f64(self.0) / i64_to_f64(SCALE)
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.0, false)
    }
}

impl FromStr for Money {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s).map(Self)
    }
}

/// An ordered quantity with two decimal places (inputs step by 0.01).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    #[must_use]
    pub const fn whole(units: i64) -> Self {
        Self(units.saturating_mul(SCALE))
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        f64_to_hundredths(value).map(Self)
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// `quantity × unit_price`, rounded to the cent.
    #[must_use]
    pub fn times(self, unit_price: Money) -> Money {
        Money(mul_div_round(self.0, unit_price.0, SCALE))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.0, true)
    }
}

impl FromStr for Quantity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s).map(Self)
    }
}

/// Commission percentage with two decimal places (`5.00` means 5%).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CommissionRate(i64);

impl CommissionRate {
    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    #[must_use]
    pub const fn percent(whole: i64) -> Self {
        Self(whole.saturating_mul(SCALE))
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Commission earned on `amount` at this rate, rounded to the cent.
    #[must_use]
    pub fn of(self, amount: Money) -> Money {
        Money(mul_div_round(amount.0, self.0, SCALE * 100))
    }
}

impl fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.0, true)
    }
}

impl FromStr for CommissionRate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s).map(Self)
    }
}

fn write_fixed(f: &mut fmt::Formatter<'_>, value: i64, trim: bool) -> fmt::Result {
    let (negative, whole, frac) = split_hundredths(value);
    let sign = if negative { "-" } else { "" };
    if trim && frac == 0 {
        write!(f, "{sign}{whole}")
    } else if trim && frac % 10 == 0 {
        write!(f, "{sign}{whole}.{}", frac / 10)
    } else {
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

/// Parse user-entered decimal text into hundredths.
///
/// Accepts an optional sign, `.` or `,` as decimal separator and at most two
/// significant fractional digits. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ParseError::Decimal`] for malformed text, [`ParseError::Precision`]
/// when non-zero digits follow the second decimal place and
/// [`ParseError::Range`] when the value does not fit.
pub fn parse_hundredths(text: &str) -> Result<i64, ParseError> {
    let trimmed = text.trim();
    let malformed = || ParseError::Decimal(text.to_string());
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        Some(_) => (false, trimmed),
        None => return Err(malformed()),
    };
    let (whole, frac) = match digits.find(['.', ',']) {
        Some(pos) => (&digits[..pos], &digits[pos + 1..]),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(malformed());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    if frac.len() > 2 && frac[2..].bytes().any(|b| b != b'0') {
        return Err(ParseError::Precision(text.to_string()));
    }

    let out_of_range = || ParseError::Range(text.to_string());
    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let mut frac_value = 0_i64;
    for (i, b) in frac.bytes().take(2).enumerate() {
        let digit = i64::from(b - b'0');
        frac_value += if i == 0 { digit * 10 } else { digit };
    }
    let magnitude = whole_value
        .checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(out_of_range)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Serde adapter for amounts sent by the backend as decimal numbers.
pub mod major_units {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize cents as a decimal number.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_major())
    }

    /// Deserialize a decimal number into cents.
    ///
    /// # Errors
    ///
    /// Fails when the number is not finite or does not fit in cents.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Money::from_major(raw).ok_or_else(|| D::Error::custom(format!("invalid amount {raw}")))
    }

    /// Same as the parent module but for optional fields.
    pub mod option {
        use super::Money;
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer};

        /// Deserialize an optional decimal number into cents.
        ///
        /// # Errors
        ///
        /// Fails when a present number is not finite or does not fit in cents.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            match Option::<f64>::deserialize(deserializer)? {
                Some(raw) => Money::from_major(raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid amount {raw}"))),
                None => Ok(None),
            }
        }
    }
}
