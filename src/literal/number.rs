//! Plain decimal values read from deck fields.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DeckError, Result};

/// Canonical number syntax once exponent letters and elisions are rewritten.
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:e[+-]?\d+)?$").unwrap());

/// Mantissa directly followed by a signed exponent with no letter (`1.5-3`).
static ELIDED_EXPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+))([+-]\d+)$").unwrap());

/// A numeric field value.
///
/// The value is an arbitrary-precision decimal, so `0.1 + 0.2` is exactly
/// `0.3`. The spelling it was read from is kept alongside, so rendering a
/// parsed number reproduces the input (lower-cased). Numbers produced by
/// arithmetic get a freshly formatted spelling.
///
/// Equality and ordering compare values only: `2e3 == 2000`.
#[derive(Debug, Clone)]
pub struct Number {
    value: BigDecimal,
    text: String,
}

impl Number {
    /// Wrap a decimal, formatting its spelling.
    pub fn from_decimal(value: BigDecimal) -> Self {
        let value = value.normalized();
        let text = value.to_string().to_ascii_lowercase();
        Self { value, text }
    }

    /// The decimal with the shortest spelling that reads back as `value`.
    ///
    /// `None` for NaN and the infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        decimal_from_f64(value).map(Self::from_decimal)
    }

    /// Parse the plain-number shape.
    ///
    /// Accepts `e`/`E`/`d`/`D` exponent letters and the FORTRAN form where the
    /// letter is dropped before a signed exponent (`1.5-3`).
    pub fn parse(text: &str) -> Option<Self> {
        let lower = text.trim().to_ascii_lowercase();
        let normalized = normalize(&lower);
        if !NUMBER.is_match(&normalized) {
            return None;
        }
        let value = BigDecimal::from_str(normalized.trim_start_matches('+')).ok()?;
        Some(Self { value, text: lower })
    }

    /// The exact decimal value.
    pub fn decimal(&self) -> &BigDecimal {
        &self.value
    }

    /// The nearest `f64`, infinite when the magnitude is out of range.
    pub fn to_f64(&self) -> f64 {
        normalize(&self.text).parse().unwrap_or(f64::NAN)
    }

    /// The spelling this number renders as.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The value as an integer, if it is exactly integral and fits.
    pub fn as_integer(&self) -> Option<i64> {
        if self.value.is_integer() {
            self.value.to_i64()
        } else {
            None
        }
    }

    /// Divide, failing on a zero divisor.
    ///
    /// Quotients that do not terminate are rounded to the decimal's default
    /// precision.
    pub fn checked_div(&self, rhs: &Number) -> Result<Number> {
        if rhs.value.is_zero() {
            return Err(DeckError::DivisionByZero {
                dividend: self.text.clone(),
            });
        }
        Ok(Number::from_decimal(&self.value / &rhs.value))
    }
}

fn normalize(lower: &str) -> String {
    let mut text = lower.replace('d', "e");
    if let Some(caps) = ELIDED_EXPONENT.captures(&text) {
        text = format!("{}e{}", &caps[1], &caps[2]);
    }
    if text.starts_with('e') {
        text.insert(0, '1');
    }
    text
}

pub(crate) fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    // Display prints the shortest round-tripping digits, never an exponent
    BigDecimal::from_str(&value.to_string()).ok()
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_decimal(BigDecimal::from(value))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Number {}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        decimal_from_f64(*other).is_some_and(|other| self.value == other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd<f64> for Number {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        decimal_from_f64(*other).map(|other| self.value.cmp(&other))
    }
}

macro_rules! number_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                Number::from_decimal(self.value $op rhs.value)
            }
        }

        impl $trait<i64> for Number {
            type Output = Number;

            fn $method(self, rhs: i64) -> Number {
                Number::from_decimal(self.value $op BigDecimal::from(rhs))
            }
        }

        impl $trait<&Number> for &Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                Number::from_decimal(&self.value $op &rhs.value)
            }
        }
    };
}

number_op!(Add, add, +);
number_op!(Sub, sub, -);
number_op!(Mul, mul, *);

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::from_decimal(-self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn num(text: &str) -> Number {
        Number::parse(text).unwrap()
    }

    #[rstest]
    #[case("1", 1.0)]
    #[case("-2.5", -2.5)]
    #[case("+.5", 0.5)]
    #[case("3.", 3.0)]
    #[case("2e3", 2000.0)]
    #[case("2E3", 2000.0)]
    #[case("1.5d-3", 1.5e-3)]
    #[case("1.5D+3", 1.5e3)]
    #[case("1.5-3", 1.5e-3)]
    #[case("-1.5+2", -150.0)]
    #[case("7-1", 0.7)]
    #[case("e2", 100.0)]
    #[case("d-1", 0.1)]
    fn test_parse_number(#[case] text: &str, #[case] expected: f64) {
        assert_relative_eq!(num(text).to_f64(), expected, max_relative = 1e-12);
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case(".")]
    #[case("1.2.3")]
    #[case("1e")]
    #[case("e")]
    #[case("abc")]
    #[case("1--3")]
    fn test_reject_malformed(#[case] text: &str) {
        assert!(Number::parse(text).is_none(), "{:?} should not parse", text);
    }

    #[test]
    fn test_spelling_preserved() {
        assert_eq!(num("1.5D-3").as_str(), "1.5d-3");
        assert_eq!(num("1.5-3").to_string(), "1.5-3");
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(num("2e3"), num("2000"));
        assert_eq!(num("1.50"), num("1.5-0"));
        assert_eq!(num("2e3"), 2000.0);
        assert!(num("1") < num("1.5"));
        assert!(num("-3") < 0.0);
    }

    #[test]
    fn test_decimal_arithmetic_is_exact() {
        let sum = &num("0.1") + &num("0.2");
        assert_eq!(sum, num("0.3"));
        assert_eq!(sum.to_string(), "0.3");
        assert_eq!((num("1.1") * 3).to_string(), "3.3");
        assert_eq!((num("1") - num("0.9")).to_string(), "0.1");
    }

    #[test]
    fn test_beyond_f64_range() {
        let huge = num("1e999");
        assert!(huge > num("9.99e998"));
        assert!(huge.to_f64().is_infinite());
        assert_eq!(num("1e-400") + num("1e-400"), num("2e-400"));
    }

    #[test]
    fn test_arithmetic() {
        let a = num("1.5");
        let b = num("2");
        assert_eq!((&a + &b).to_f64(), 3.5);
        assert_eq!((a.clone() * 2).to_string(), "3");
        assert_eq!((b.clone() - a.clone()).to_string(), "0.5");
        assert_eq!((-b.clone()).to_string(), "-2");
        assert_eq!(b.checked_div(&num("4")).unwrap(), 0.5);
        assert!(matches!(
            a.checked_div(&num("0.0")),
            Err(DeckError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Number::from_f64(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Number::from_f64(-7.25).unwrap(), num("-7.25"));
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(num("12").as_integer(), Some(12));
        assert_eq!(num("1.2e1").as_integer(), Some(12));
        assert_eq!(num("1.5").as_integer(), None);
    }
}
