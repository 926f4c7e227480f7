//! Exact decimal arithmetic for monetary values.
//!
//! Every amount, base and rate in the engine is a [`Decimal`]. Callers may
//! hand in plain numbers or decimal strings; [`to_decimal`] normalises them
//! once at the boundary so the calculation modules only ever see `Decimal`.
//! Rounding happens at output boundaries only (see [`round`]).

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places used for presented monetary values.
pub const MONEY_DECIMALS: u32 = 2;

/// A numeric representation that can be normalised into a [`Decimal`].
///
/// Implemented for `Decimal` itself, the native integer types, `f64` and
/// decimal strings. The `field` name is only used to give validation errors
/// some context.
pub trait ToDecimal {
    /// Converts `self` into the canonical decimal type.
    fn to_decimal(self, field: &str) -> EngineResult<Decimal>;
}

impl ToDecimal for Decimal {
    fn to_decimal(self, _field: &str) -> EngineResult<Decimal> {
        Ok(self)
    }
}

impl ToDecimal for &Decimal {
    fn to_decimal(self, _field: &str) -> EngineResult<Decimal> {
        Ok(*self)
    }
}

macro_rules! impl_to_decimal_for_int {
    ($($t:ty),*) => {
        $(
            impl ToDecimal for $t {
                fn to_decimal(self, _field: &str) -> EngineResult<Decimal> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_to_decimal_for_int!(i32, i64, u32, u64);

impl ToDecimal for f64 {
    fn to_decimal(self, field: &str) -> EngineResult<Decimal> {
        if !self.is_finite() {
            return Err(EngineError::validation(
                field,
                format!("must be a finite number, got {}", self),
            ));
        }
        Decimal::from_f64(self).ok_or_else(|| {
            EngineError::validation(field, format!("{} is out of decimal range", self))
        })
    }
}

impl ToDecimal for &str {
    fn to_decimal(self, field: &str) -> EngineResult<Decimal> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| EngineError::validation(field, format!("'{}' is not a number", self)))
    }
}

impl ToDecimal for &String {
    fn to_decimal(self, field: &str) -> EngineResult<Decimal> {
        self.as_str().to_decimal(field)
    }
}

/// Normalises any accepted numeric representation into a [`Decimal`].
///
/// # Examples
///
/// ```
/// use payroll_engine::decimal::to_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_decimal(3000, "gross").unwrap(), Decimal::new(3000, 0));
/// assert_eq!(to_decimal("2947.50", "base").unwrap(), Decimal::new(294750, 2));
/// assert!(to_decimal("abc", "base").is_err());
/// assert!(to_decimal(f64::NAN, "base").is_err());
/// ```
pub fn to_decimal<T: ToDecimal>(value: T, field: &str) -> EngineResult<Decimal> {
    value.to_decimal(field)
}

/// Normalises a value and rejects it if it is negative.
///
/// This is the entry check for salaries, ceilings, bases and rates.
pub fn to_non_negative<T: ToDecimal>(value: T, field: &str) -> EngineResult<Decimal> {
    ensure_non_negative(value.to_decimal(field)?, field)
}

/// Returns `value` unchanged, or a validation error if it is negative.
pub fn ensure_non_negative(value: Decimal, field: &str) -> EngineResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::validation(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Multiplies two decimals exactly, failing instead of overflowing.
pub fn multiply(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| {
        EngineError::validation("multiply", format!("{} x {} overflows", a, b))
    })
}

/// Adds two decimals, failing instead of overflowing.
pub fn add(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| EngineError::validation("add", format!("{} + {} overflows", a, b)))
}

/// Subtracts `b` from `a`, failing instead of overflowing.
pub fn subtract(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| EngineError::validation("subtract", format!("{} - {} overflows", a, b)))
}

/// Sums an iterator of decimals, failing on the first overflow.
pub fn sum<I: IntoIterator<Item = Decimal>>(values: I) -> EngineResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, add)
}

/// Compares two decimals by value, ignoring scale (`1.0 == 1.00`).
pub fn compare(a: Decimal, b: Decimal) -> Ordering {
    a.cmp(&b)
}

/// Rounds half away from zero to `decimals` places.
///
/// # Examples
///
/// ```
/// use payroll_engine::decimal::round;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round(Decimal::new(1234567, 3), 2), Decimal::new(123457, 2));
/// assert_eq!(round(Decimal::new(-1005, 3), 2), Decimal::new(-101, 2));
/// ```
pub fn round(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to cents.
pub fn round_money(value: Decimal) -> Decimal {
    round(value, MONEY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_integers_convert_exactly() {
        assert_eq!(to_decimal(3500_i32, "ceiling").unwrap(), dec("3500"));
        assert_eq!(to_decimal(40000_u64, "gross").unwrap(), dec("40000"));
        assert_eq!(to_decimal(-12_i64, "x").unwrap(), dec("-12"));
    }

    #[test]
    fn test_simple_floats_convert_without_binary_noise() {
        assert_eq!(to_decimal(3000.0_f64, "gross").unwrap(), dec("3000"));
        assert_eq!(to_decimal(2947.5_f64, "base").unwrap(), dec("2947.5"));
        assert_eq!(to_decimal(0.5_f64, "rate").unwrap(), dec("0.5"));
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match to_decimal(value, "gross_salary") {
                Err(EngineError::Validation { field, .. }) => assert_eq!(field, "gross_salary"),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_strings_parse_plain_and_scientific() {
        assert_eq!(to_decimal("0.9825", "rate").unwrap(), dec("0.9825"));
        assert_eq!(to_decimal(" 1234.56 ", "gross").unwrap(), dec("1234.56"));
        assert_eq!(to_decimal("3.5e3", "ceiling").unwrap(), dec("3500"));
        assert_eq!(
            to_decimal(&"42".to_string(), "hours").unwrap(),
            dec("42")
        );
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let err = to_decimal("twelve", "tax_rate").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed for 'tax_rate': 'twelve' is not a number"
        );
    }

    #[test]
    fn test_non_negative_accepts_zero_and_positive() {
        assert_eq!(to_non_negative(0, "gross").unwrap(), Decimal::ZERO);
        assert_eq!(to_non_negative("-0", "gross").unwrap(), Decimal::ZERO);
        assert_eq!(to_non_negative("10.5", "gross").unwrap(), dec("10.5"));
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        let err = to_non_negative(-1, "gross_salary").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed for 'gross_salary': must not be negative, got -1"
        );
    }

    #[test]
    fn test_multiply_is_exact() {
        assert_eq!(multiply(dec("3000"), dec("0.9825")).unwrap(), dec("2947.5"));
        assert_eq!(multiply(dec("0.1"), dec("0.2")).unwrap(), dec("0.02"));
    }

    #[test]
    fn test_multiply_overflow_is_an_error() {
        assert!(multiply(Decimal::MAX, dec("2")).is_err());
    }

    #[test]
    fn test_add_and_subtract_overflow_are_errors() {
        assert_eq!(add(dec("0.1"), dec("0.2")).unwrap(), dec("0.3"));
        assert_eq!(subtract(dec("3000"), dec("492.9075")).unwrap(), dec("2507.0925"));
        assert!(add(Decimal::MAX, dec("1")).is_err());
        assert!(subtract(Decimal::MIN, dec("1")).is_err());
    }

    #[test]
    fn test_sum_stops_on_overflow() {
        assert_eq!(sum([dec("207"), dec("256.5")]).unwrap(), dec("463.5"));
        assert_eq!(sum(Vec::<Decimal>::new()).unwrap(), Decimal::ZERO);
        assert!(sum([Decimal::MAX, Decimal::MAX]).is_err());
    }

    #[test]
    fn test_compare_ignores_scale() {
        assert_eq!(compare(dec("1.0"), dec("1.00")), Ordering::Equal);
        assert_eq!(compare(dec("3500"), dec("4000")), Ordering::Less);
        assert_eq!(compare(dec("-1"), dec("0")), Ordering::Less);
    }

    #[test]
    fn test_round_half_up_at_two_decimals() {
        assert_eq!(round(dec("1234.567"), 2), dec("1234.57"));
        assert_eq!(round(dec("0.125"), 2), dec("0.13"));
        assert_eq!(round(dec("0.124"), 2), dec("0.12"));
        assert_eq!(round(dec("-0.125"), 2), dec("-0.13"));
        assert_eq!(round_money(dec("2947.5")), dec("2947.50"));
    }
}
