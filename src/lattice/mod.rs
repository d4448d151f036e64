//! Lattice fill paths.
//!
//! Tallies and fills address geometry nested through universes and lattices
//! with a path of `<`-joined levels, innermost first:
//!
//! ```text
//! 3 < 2[0:1 0 -1:1] < 1
//! ```
//!
//! Each level is a universe or cell number, optionally followed by the
//! lattice elements it is restricted to: three coordinates (i, j, k), each a
//! single index or an inclusive `lower:upper` span. `<` is the only
//! connective; parentheses group.

mod ast;
mod parser;

pub use ast::{Coordinate, LatticeNode};
pub use parser::LatticeParser;

use crate::error::Result;

/// Parse a lattice fill path into an AST.
pub fn parse(input: &str) -> Result<LatticeNode> {
    LatticeParser::new(input)?.parse()
}
