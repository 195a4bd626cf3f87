//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Scale of every fixed-point amount in the crate (two decimal places).
pub const SCALE: i64 = 100;

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Scale a decimal value to hundredths, rounding half away from zero.
///
/// Returns `None` for non-finite values or values outside the i64 range.
#[must_use]
pub fn f64_to_hundredths(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * i64_to_f64(SCALE)).round();
    let min = cast::<i64, f64>(i64::MIN)?;
    let max = cast::<i64, f64>(i64::MAX)?;
    if scaled < min || scaled > max {
        return None;
    }
    cast::<f64, i64>(scaled)
}

/// Compute `a * b / divisor` in 128-bit space, rounding half away from zero and
/// saturating to the i64 range.
#[must_use]
pub fn mul_div_round(a: i64, b: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return 0;
    }
    let product = i128::from(a) * i128::from(b);
    let divisor = i128::from(divisor);
    let quotient = product / divisor;
    let remainder = product % divisor;
    let rounded = if remainder.abs() * 2 >= divisor.abs() {
        if (product < 0) == (divisor < 0) {
            quotient + 1
        } else {
            quotient - 1
        }
    } else {
        quotient
    };
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Split a fixed-point value into sign, whole part and two-digit fraction.
#[must_use]
pub const fn split_hundredths(value: i64) -> (bool, u64, u64) {
    let negative = value < 0;
    let abs = value.unsigned_abs();
    (negative, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundredths_round_half_away_from_zero() {
        assert_eq!(f64_to_hundredths(10.0), Some(1_000));
        assert_eq!(f64_to_hundredths(1.15), Some(115));
        assert_eq!(f64_to_hundredths(0.125), Some(13));
        assert_eq!(f64_to_hundredths(-0.125), Some(-13));
    }

    #[test]
    fn hundredths_reject_non_finite() {
        assert_eq!(f64_to_hundredths(f64::NAN), None);
        assert_eq!(f64_to_hundredths(f64::INFINITY), None);
        assert_eq!(f64_to_hundredths(1e300), None);
    }

    #[test]
    fn mul_div_rounds_and_saturates() {
        assert_eq!(mul_div_round(250, 333, 100), 833); // 832.5
        assert_eq!(mul_div_round(-250, 333, 100), -833);
        assert_eq!(mul_div_round(1, 1, 3), 0);
        assert_eq!(mul_div_round(2, 1, 3), 1);
        assert_eq!(mul_div_round(i64::MAX, 10, 1), i64::MAX);
        assert_eq!(mul_div_round(5, 5, 0), 0);
    }

    #[test]
    fn split_reports_sign_and_parts() {
        assert_eq!(split_hundredths(123_456), (false, 1_234, 56));
        assert_eq!(split_hundredths(-5), (true, 0, 5));
    }
}
