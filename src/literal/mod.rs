//! Numeric literals and horizontal shorthand.
//!
//! Every numeric field of a deck record is one whitespace-delimited token that
//! is either a plain number or one of five shorthand markers standing in for
//! values the reader fills in:
//!
//! | Shape   | Spelling        | Meaning                                        |
//! |---------|-----------------|------------------------------------------------|
//! | Repeat  | `Nr`            | repeat the previous value N times (N = 1)      |
//! | Jump    | `Nj`            | use the default N times                        |
//! | Multiply| `Nm`            | previous value times N (N required)            |
//! | Interp. | `Ni`            | N linearly spaced values between neighbours    |
//! | Log     | `Nlog`, `Nilog` | N logarithmically spaced values                |
//! | Number  | `1.5e-3`, `1.5d-3`, `1.5-3` | a decimal value                   |
//!
//! Shapes are tried in the order of the table; the first match wins. Input is
//! case-insensitive, rendering is always lower-case.

mod count;
mod number;
mod resolve;

pub use count::{Count, Factor, Spelled};
pub use number::Number;
pub use resolve::{resolve, resolve_with_limit};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DeckError, Result};

static REPEAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)r$").unwrap());
static JUMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)j$").unwrap());
static MULTIPLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?\d+)m$").unwrap());
static INTERPOLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)i$").unwrap());
static LOG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)(ilog|log)$").unwrap());

/// The two spellings of the log-interpolate marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSpelling {
    /// `log`
    Log,
    /// `ilog`
    Ilog,
}

impl LogSpelling {
    /// The keyword as written in a deck.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Ilog => "ilog",
        }
    }
}

/// One parsed numeric field.
#[derive(Debug, Clone, PartialEq)]
pub enum HorizontalToken {
    /// `Nr`: repeat the previous value.
    Repeat(Option<Count>),
    /// `Nj`: jump over N entries, leaving them at their defaults.
    Jump(Option<Count>),
    /// `Ni`: linear interpolation.
    Interpolate(Option<Count>),
    /// `Nm`: multiply the previous value by N.
    Multiply(Factor),
    /// `Nlog` / `Nilog`: logarithmic interpolation.
    Log(Option<Count>, LogSpelling),
    /// A plain decimal number.
    Number(Number),
}

type Shape = fn(&str) -> Option<HorizontalToken>;

/// Attempt order. Earlier shapes must never shadow later ones.
const SHAPES: [Shape; 6] = [
    parse_repeat,
    parse_jump,
    parse_multiply,
    parse_interpolate,
    parse_log,
    parse_number,
];

fn optional_count(digits: &str) -> Option<Option<Count>> {
    if digits.is_empty() {
        Some(None)
    } else {
        Count::parse(digits).map(Some)
    }
}

fn parse_repeat(text: &str) -> Option<HorizontalToken> {
    let caps = REPEAT.captures(text)?;
    optional_count(&caps[1]).map(HorizontalToken::Repeat)
}

fn parse_jump(text: &str) -> Option<HorizontalToken> {
    let caps = JUMP.captures(text)?;
    optional_count(&caps[1]).map(HorizontalToken::Jump)
}

fn parse_multiply(text: &str) -> Option<HorizontalToken> {
    let caps = MULTIPLY.captures(text)?;
    let factor = Factor::parse(&caps[1])?;
    // A zero multiplier is rejected; any other integer, negative included, is kept.
    (factor.value() != 0).then_some(HorizontalToken::Multiply(factor))
}

fn parse_interpolate(text: &str) -> Option<HorizontalToken> {
    let caps = INTERPOLATE.captures(text)?;
    optional_count(&caps[1]).map(HorizontalToken::Interpolate)
}

fn parse_log(text: &str) -> Option<HorizontalToken> {
    let caps = LOG.captures(text)?;
    let spelling = if &caps[2] == "ilog" {
        LogSpelling::Ilog
    } else {
        LogSpelling::Log
    };
    optional_count(&caps[1]).map(|count| HorizontalToken::Log(count, spelling))
}

fn parse_number(text: &str) -> Option<HorizontalToken> {
    Number::parse(text).map(HorizontalToken::Number)
}

impl HorizontalToken {
    /// Parse one field.
    pub fn parse(text: &str) -> Result<Self> {
        let lower = text.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return Err(DeckError::InvalidLiteral {
                text: text.to_string(),
            });
        }
        SHAPES
            .iter()
            .find_map(|shape| shape(&lower))
            .ok_or_else(|| DeckError::InvalidLiteral {
                text: text.to_string(),
            })
    }

    /// Render back to deck spelling.
    pub fn render(&self) -> String {
        fn counted(count: &Option<Count>, keyword: &str) -> String {
            match count {
                Some(n) => format!("{}{}", n.as_str(), keyword),
                None => keyword.to_string(),
            }
        }

        match self {
            Self::Repeat(count) => counted(count, "r"),
            Self::Jump(count) => counted(count, "j"),
            Self::Interpolate(count) => counted(count, "i"),
            Self::Multiply(factor) => format!("{}m", factor.as_str()),
            Self::Log(count, spelling) => counted(count, spelling.keyword()),
            Self::Number(number) => number.as_str().to_string(),
        }
    }

    /// The value as an `f64`, if this is a plain number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(number.to_f64()),
            _ => None,
        }
    }

    /// The number, if this is a plain number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    /// The value as an integer, for integer-only fields.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_integer)
    }

    /// True for any of the five shorthand markers.
    pub fn is_shorthand(&self) -> bool {
        !matches!(self, Self::Number(_))
    }

    /// How many entries a counted marker stands for (absent count means one).
    ///
    /// `None` for multiply and plain numbers, which always stand for one entry.
    pub fn count(&self) -> Option<u32> {
        match self {
            Self::Repeat(count)
            | Self::Jump(count)
            | Self::Interpolate(count)
            | Self::Log(count, _) => Some(count.as_ref().map_or(1, Count::value)),
            Self::Multiply(_) | Self::Number(_) => None,
        }
    }

    /// Add, failing on shorthand operands.
    pub fn try_add<R: Numeric + ?Sized>(&self, rhs: &R) -> Result<Number> {
        Ok(Number::from_decimal(self.numeric("add")? + rhs.numeric("add")?))
    }

    /// Subtract, failing on shorthand operands.
    pub fn try_sub<R: Numeric + ?Sized>(&self, rhs: &R) -> Result<Number> {
        Ok(Number::from_decimal(self.numeric("subtract")? - rhs.numeric("subtract")?))
    }

    /// Multiply, failing on shorthand operands.
    pub fn try_mul<R: Numeric + ?Sized>(&self, rhs: &R) -> Result<Number> {
        Ok(Number::from_decimal(self.numeric("multiply")? * rhs.numeric("multiply")?))
    }

    /// Divide, failing on shorthand operands or a zero divisor.
    pub fn try_div<R: Numeric + ?Sized>(&self, rhs: &R) -> Result<Number> {
        let dividend = Number::from_decimal(self.numeric("divide")?);
        dividend.checked_div(&Number::from_decimal(rhs.numeric("divide")?))
    }

    /// Compare, failing on shorthand operands.
    pub fn try_cmp<R: Numeric + ?Sized>(&self, rhs: &R) -> Result<Ordering> {
        let lhs = self.numeric("compare")?;
        Ok(lhs.cmp(&rhs.numeric("compare")?))
    }
}

/// Operands accepted by the checked arithmetic on [`HorizontalToken`].
pub trait Numeric {
    /// The operand's exact value, or [`DeckError::NotNumeric`] naming `operation`.
    fn numeric(&self, operation: &'static str) -> Result<BigDecimal>;
}

impl Numeric for HorizontalToken {
    fn numeric(&self, operation: &'static str) -> Result<BigDecimal> {
        match self {
            Self::Number(number) => Ok(number.decimal().clone()),
            _ => Err(DeckError::NotNumeric {
                token: self.render(),
                operation,
            }),
        }
    }
}

impl Numeric for Number {
    fn numeric(&self, _operation: &'static str) -> Result<BigDecimal> {
        Ok(self.decimal().clone())
    }
}

impl Numeric for f64 {
    fn numeric(&self, operation: &'static str) -> Result<BigDecimal> {
        number::decimal_from_f64(*self).ok_or_else(|| DeckError::NotNumeric {
            token: self.to_string(),
            operation,
        })
    }
}

impl Numeric for i64 {
    fn numeric(&self, _operation: &'static str) -> Result<BigDecimal> {
        Ok(BigDecimal::from(*self))
    }
}

impl fmt::Display for HorizontalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for HorizontalToken {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse every whitespace-delimited field of a line.
///
/// Run [`crate::expand::expand`] first if the text may contain condensed
/// shorthand or continuation markers.
pub fn parse_fields(text: &str) -> Result<Vec<HorizontalToken>> {
    text.split_whitespace().map(HorizontalToken::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("r", HorizontalToken::Repeat(None))]
    #[case("2r", HorizontalToken::Repeat(Some(Count::new(2))))]
    #[case("2R", HorizontalToken::Repeat(Some(Count::new(2))))]
    #[case("j", HorizontalToken::Jump(None))]
    #[case("10J", HorizontalToken::Jump(Some(Count::new(10))))]
    #[case("3m", HorizontalToken::Multiply(Factor::new(3)))]
    #[case("-2m", HorizontalToken::Multiply(Factor::new(-2)))]
    #[case("i", HorizontalToken::Interpolate(None))]
    #[case("4i", HorizontalToken::Interpolate(Some(Count::new(4))))]
    #[case("log", HorizontalToken::Log(None, LogSpelling::Log))]
    #[case("5ILOG", HorizontalToken::Log(Some(Count::new(5)), LogSpelling::Ilog))]
    fn test_shorthand_shapes(#[case] text: &str, #[case] expected: HorizontalToken) {
        assert_eq!(HorizontalToken::parse(text).unwrap(), expected);
    }

    #[test]
    fn test_shape_priority() {
        assert_eq!(
            HorizontalToken::parse("2r").unwrap(),
            HorizontalToken::Repeat(Some(Count::new(2)))
        );
        let token = HorizontalToken::parse("2e3").unwrap();
        assert!(!token.is_shorthand());
        assert_eq!(token.value(), Some(2000.0));
    }

    #[test]
    fn test_fortran_exponent_elision() {
        let token = HorizontalToken::parse("1.5-3").unwrap();
        assert_relative_eq!(token.value().unwrap(), 0.0015, max_relative = 1e-12);
        assert_eq!(token.render(), "1.5-3");
    }

    #[rstest]
    #[case("m")]
    #[case("0m")]
    #[case("1.5m")]
    #[case("rr")]
    #[case("2x")]
    #[case("")]
    #[case("   ")]
    #[case("1e5r")]
    fn test_rejected(#[case] text: &str) {
        let err = HorizontalToken::parse(text).unwrap_err();
        assert!(err.is_syntax());
        assert!(matches!(err, DeckError::InvalidLiteral { .. }));
    }

    #[rstest]
    #[case("2R", "2r")]
    #[case("ILOG", "ilog")]
    #[case("3m", "3m")]
    #[case("1.5D-3", "1.5d-3")]
    #[case("-4", "-4")]
    #[case("j", "j")]
    #[case("02r", "02r")]
    #[case("007J", "007j")]
    #[case("0r", "0r")]
    #[case("-02m", "-02m")]
    #[case("01Log", "01log")]
    fn test_render(#[case] text: &str, #[case] rendered: &str) {
        assert_eq!(HorizontalToken::parse(text).unwrap().render(), rendered);
    }

    #[test]
    fn test_checked_arithmetic() {
        let two: HorizontalToken = "2".parse().unwrap();
        let half: HorizontalToken = "5-1".parse().unwrap();
        assert_eq!(two.try_add(&half).unwrap(), 2.5);
        assert_eq!(two.try_mul(&3.0).unwrap(), 6.0);
        assert_eq!(two.try_sub(&1_i64).unwrap(), 1.0);
        assert_eq!(two.try_div(&half).unwrap(), 4.0);
        assert_eq!(two.try_cmp(&half).unwrap(), Ordering::Greater);
        assert_eq!(two.try_cmp(&2.0).unwrap(), Ordering::Equal);

        let tenth: HorizontalToken = "0.1".parse().unwrap();
        let sum = tenth.try_add(&"0.2".parse::<HorizontalToken>().unwrap()).unwrap();
        assert_eq!(sum.to_string(), "0.3");
        assert_eq!(tenth.try_mul(&3_i64).unwrap().to_string(), "0.3");
        assert!(tenth.try_add(&f64::NAN).is_err());
    }

    #[test]
    fn test_arithmetic_on_shorthand_fails() {
        let two: HorizontalToken = "2".parse().unwrap();
        let repeat: HorizontalToken = "2r".parse().unwrap();

        let err = repeat.try_add(&1.0).unwrap_err();
        assert!(matches!(
            err,
            DeckError::NotNumeric { ref token, operation: "add" } if token == "2r"
        ));
        assert!(two.try_cmp(&repeat).is_err());
        assert!(matches!(
            two.try_div(&0.0),
            Err(DeckError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let jump: HorizontalToken = "3j".parse().unwrap();
        assert_eq!(jump.count(), Some(3));
        assert_eq!(HorizontalToken::Repeat(None).count(), Some(1));
        assert_eq!(HorizontalToken::Multiply(Factor::new(2)).count(), None);
        assert_eq!("02r".parse::<HorizontalToken>().unwrap().count(), Some(2));
        assert_eq!("12".parse::<HorizontalToken>().unwrap().as_integer(), Some(12));
        assert_eq!(jump.as_integer(), None);
    }

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields("1 2r 3j  4.5e2\t5i").unwrap();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[3].value(), Some(450.0));

        let err = parse_fields("1 2 bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
