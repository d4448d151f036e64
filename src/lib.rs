//! # Deck Core
//!
//! The embedded-language machinery shared by every record of an MCNP-style
//! simulation input deck.
//!
//! This library provides:
//! - Numeric field literals with horizontal shorthand (`2r`, `3j`, `2m`, `4i`, `2log`)
//! - A text normalizer that spells condensed shorthand out into bare tokens
//! - Longest-keyword-first dispatch of record text to sibling variants
//! - Parsers and ASTs for cell geometry and lattice fill expressions
//!
//! ## Architecture
//!
//! - [`literal`] - Numeric literals, shorthand markers and their resolution
//! - [`expand`] - Horizontal shorthand expander
//! - [`dispatch`] - Variant registries for record families
//! - [`geometry`] - Cell geometry expressions and their folding into solids
//! - [`lattice`] - Lattice fill paths
//! - [`lexer`] - Tokenizer shared by the two expression parsers
//! - [`error`] - Error type for all of the above
//!
//! Record types are built on top of this crate and reach it only through the
//! `parse` functions and the `render`/`to_text` methods. Everything here is
//! pure: no I/O, no global mutable state, linear in the input length.
//!
//! ## Usage
//!
//! ```
//! use deck_core::{expand, geometry, lattice, literal};
//!
//! let fields = literal::parse_fields(&expand::expand("1 2r 3j 1.5-3")).unwrap();
//! assert_eq!(fields.len(), 7);
//! assert_eq!(fields[6].value(), Some(0.0015));
//!
//! let cell = geometry::parse("-1 2:#(3 4)").unwrap();
//! assert_eq!(cell.to_text(), "-1 2:#(3 4)");
//!
//! let path = lattice::parse("3 < 1[0:1 0 0]").unwrap();
//! assert_eq!(path.universes(), vec![3, 1]);
//! ```

pub mod dispatch;
pub mod error;
pub mod expand;
pub mod geometry;
pub mod lattice;
pub mod lexer;
pub mod literal;

// Re-export main types for convenience
pub use dispatch::{Classified, VariantRegistry};
pub use error::{DeckError, ErrorKind, Result};
pub use expand::{Expander, ExpanderConfig};
pub use geometry::{GeometryNode, Solid};
pub use lattice::LatticeNode;
pub use literal::{HorizontalToken, Number};
