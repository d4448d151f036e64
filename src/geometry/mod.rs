//! Cell geometry expressions.
//!
//! A cell card describes its region as a boolean combination of surface
//! half-spaces:
//!
//! ```text
//! -1 2 : #(3 4) #7
//! ```
//!
//! | Syntax   | Meaning                                              |
//! |----------|------------------------------------------------------|
//! | `N`, `+N`| outside (positive side of) surface N                 |
//! | `-N`     | inside surface N                                     |
//! | `N.F`    | facet F of macrobody N                               |
//! | `A B`    | intersection (binds tighter than `:`)                |
//! | `A : B`  | union                                                |
//! | `( A )`  | grouping                                             |
//! | `#( A )` | complement of a region                               |
//! | `#N`     | complement of cell N, or of surface N if no such cell|
//!
//! Parsing never resolves labels; [`GeometryNode::to_solid`] does.

mod ast;
mod parser;
mod solid;

pub use ast::{GeometryNode, Label, UnaryOp};
pub use parser::GeometryParser;
pub use solid::{Csg, Solid};

use crate::error::Result;

/// Parse a geometry expression into an AST.
pub fn parse(input: &str) -> Result<GeometryNode> {
    GeometryParser::new(input)?.parse()
}
