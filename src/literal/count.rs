//! Integer prefixes of shorthand markers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An integer read from a marker prefix, together with its digits.
///
/// `02r` and `2r` compare equal but each renders as written.
#[derive(Debug, Clone)]
pub struct Spelled<T> {
    value: T,
    text: String,
}

/// Repetition count of `Nr`, `Nj`, `Ni`, `Nlog` and `Nilog`.
pub type Count = Spelled<u32>;

/// Factor of `Nm`.
pub type Factor = Spelled<i64>;

impl<T: Copy + fmt::Display> Spelled<T> {
    /// Spell `value` without padding.
    pub fn new(value: T) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    /// The integer value.
    pub fn value(&self) -> T {
        self.value
    }

    /// The digits as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<T: FromStr> Spelled<T> {
    /// Read `digits`, keeping them verbatim. `None` if they overflow `T`.
    pub fn parse(digits: &str) -> Option<Self> {
        Some(Self {
            value: digits.parse().ok()?,
            text: digits.to_string(),
        })
    }
}

impl<T: PartialEq> PartialEq for Spelled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Spelled<T> {}

impl<T: Hash> Hash for Spelled<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Display for Spelled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
