//! Abstract Syntax Tree types for cell geometry expressions.

use std::fmt;
use std::str::FromStr;

use crate::error::DeckError;

/// A surface or cell number, optionally naming one facet of a macrobody:
/// `12` or `12.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    number: u64,
    facet: Option<u32>,
}

impl Label {
    /// A label without a facet.
    pub fn new(number: u64) -> Self {
        Self { number, facet: None }
    }

    /// A label naming facet `facet` of surface `number`.
    pub fn with_facet(number: u64, facet: u32) -> Self {
        Self {
            number,
            facet: Some(facet),
        }
    }

    /// Parse `N` or `N.F`; `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        fn digits(part: &str) -> bool {
            !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
        }

        match text.split_once('.') {
            None if digits(text) => Some(Self::new(text.parse().ok()?)),
            Some((number, facet)) if digits(number) && digits(facet) => {
                Some(Self::with_facet(number.parse().ok()?, facet.parse().ok()?))
            }
            _ => None,
        }
    }

    /// The surface or cell number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The macrobody facet, if any.
    pub fn facet(&self) -> Option<u32> {
        self.facet
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.facet {
            Some(facet) => write!(f, "{}.{}", self.number, facet),
            None => write!(f, "{}", self.number),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`: positive sense (outside), the default
    Plus,
    /// `-`: negative sense (inside)
    Minus,
    /// `#`: complement of a cell or parenthesized region
    Complement,
}

impl UnaryOp {
    /// The operator character.
    pub fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Complement => '#',
        }
    }
}

/// A node of a geometry expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeometryNode {
    /// A bare surface (or, under `#`, cell) number
    Digit(Label),
    /// An operand with a sense or complement operator
    Unary(UnaryOp, Box<GeometryNode>),
    /// A parenthesized sub-expression
    Paren(Box<GeometryNode>),
    /// Adjacency: both regions
    Intersection(Box<GeometryNode>, Box<GeometryNode>),
    /// `:`: either region
    Union(Box<GeometryNode>, Box<GeometryNode>),
}

impl GeometryNode {
    /// A bare surface number.
    pub fn digit(number: u64) -> Self {
        Self::Digit(Label::new(number))
    }

    /// Wrap `operand` in a prefix operator.
    pub fn unary(op: UnaryOp, operand: GeometryNode) -> Self {
        Self::Unary(op, Box::new(operand))
    }

    /// Wrap `inner` in parentheses.
    pub fn paren(inner: GeometryNode) -> Self {
        Self::Paren(Box::new(inner))
    }

    /// Intersect two regions.
    pub fn intersection(left: GeometryNode, right: GeometryNode) -> Self {
        Self::Intersection(Box::new(left), Box::new(right))
    }

    /// Unite two regions.
    pub fn union(left: GeometryNode, right: GeometryNode) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    /// Render in deck syntax. Parsing the result gives back an equal tree.
    pub fn to_text(&self) -> String {
        match self {
            Self::Digit(label) => label.to_string(),
            Self::Unary(op, operand) => format!("{}{}", op.symbol(), operand.to_text()),
            Self::Paren(inner) => format!("({})", inner.to_text()),
            Self::Intersection(left, right) => format!("{} {}", left.to_text(), right.to_text()),
            Self::Union(left, right) => format!("{}:{}", left.to_text(), right.to_text()),
        }
    }

    /// The label if this is `#N`, a complement that may name a cell.
    pub fn cell_complement(&self) -> Option<&Label> {
        match self {
            Self::Unary(UnaryOp::Complement, operand) => match operand.as_ref() {
                Self::Digit(label) => Some(label),
                _ => None,
            },
            _ => None,
        }
    }

    /// Labels used as surfaces, left to right.
    ///
    /// Excludes the `#N` candidates reported by [`Self::cell_candidates`].
    pub fn surfaces(&self) -> Vec<&Label> {
        let mut out = Vec::new();
        self.collect(&mut out, &mut Vec::new());
        out
    }

    /// Labels under a `#` complement, left to right.
    pub fn cell_candidates(&self) -> Vec<&Label> {
        let mut out = Vec::new();
        self.collect(&mut Vec::new(), &mut out);
        out
    }

    fn collect<'a>(&'a self, surfaces: &mut Vec<&'a Label>, cells: &mut Vec<&'a Label>) {
        if let Some(label) = self.cell_complement() {
            cells.push(label);
            return;
        }
        match self {
            Self::Digit(label) => surfaces.push(label),
            Self::Unary(_, inner) | Self::Paren(inner) => inner.collect(surfaces, cells),
            Self::Intersection(left, right) | Self::Union(left, right) => {
                left.collect(surfaces, cells);
                right.collect(surfaces, cells);
            }
        }
    }
}

impl fmt::Display for GeometryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for GeometryNode {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
