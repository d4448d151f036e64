//! Abstract Syntax Tree types for lattice fill paths.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::DeckError;

/// One lattice axis address inside a range: a single index or an inclusive span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coordinate {
    /// `n`
    Digit(i64),
    /// `lower:upper`
    Index(i64, i64),
}

impl Coordinate {
    /// Every index this coordinate addresses, in ascending order.
    ///
    /// Empty when a span's lower bound exceeds its upper bound.
    pub fn values(&self) -> RangeInclusive<i64> {
        match *self {
            Self::Digit(n) => n..=n,
            Self::Index(lower, upper) => lower..=upper,
        }
    }

    fn to_text(self) -> String {
        match self {
            Self::Digit(n) => n.to_string(),
            Self::Index(lower, upper) => format!("{}:{}", lower, upper),
        }
    }
}

/// A node of a lattice fill path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LatticeNode {
    /// A universe or cell number
    Digit(i64),
    /// Lattice elements of `cell` addressed by (i, j, k)
    Range {
        cell: i64,
        i: Coordinate,
        j: Coordinate,
        k: Coordinate,
    },
    /// A parenthesized sub-path
    Paren(Box<LatticeNode>),
    /// `left < right`: left sits inside the addressed part of right
    Embedded(Box<LatticeNode>, Box<LatticeNode>),
}

impl LatticeNode {
    /// A lattice range.
    pub fn range(cell: i64, i: Coordinate, j: Coordinate, k: Coordinate) -> Self {
        Self::Range { cell, i, j, k }
    }

    /// Wrap `inner` in parentheses.
    pub fn paren(inner: LatticeNode) -> Self {
        Self::Paren(Box::new(inner))
    }

    /// Embed `left` inside `right`.
    pub fn embedded(left: LatticeNode, right: LatticeNode) -> Self {
        Self::Embedded(Box::new(left), Box::new(right))
    }

    /// Render in deck syntax. Parsing the result gives back an equal tree.
    pub fn to_text(&self) -> String {
        match self {
            Self::Digit(n) => n.to_string(),
            Self::Range { cell, i, j, k } => {
                format!("{}[{} {} {}]", cell, i.to_text(), j.to_text(), k.to_text())
            }
            Self::Paren(inner) => format!("({})", inner.to_text()),
            Self::Embedded(left, right) => format!("{} < {}", left.to_text(), right.to_text()),
        }
    }

    /// Universe and cell numbers along the path, left to right.
    pub fn universes(&self) -> Vec<i64> {
        match self {
            Self::Digit(n) => vec![*n],
            Self::Range { cell, .. } => vec![*cell],
            Self::Paren(inner) => inner.universes(),
            Self::Embedded(left, right) => {
                let mut out = left.universes();
                out.extend(right.universes());
                out
            }
        }
    }

    /// Every (i, j, k) a range node addresses, i varying fastest.
    ///
    /// Lazy: a range spans the product of its three axes, which can be far
    /// larger than the text. Empty for any other node.
    pub fn cells(&self) -> impl Iterator<Item = [i64; 3]> {
        let axes = match *self {
            Self::Range { i, j, k, .. } => Some((i, j, k)),
            _ => None,
        };
        axes.into_iter().flat_map(|(i, j, k)| {
            k.values().flat_map(move |z| {
                j.values().flat_map(move |y| i.values().map(move |x| [x, y, z]))
            })
        })
    }
}

impl fmt::Display for LatticeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for LatticeNode {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
