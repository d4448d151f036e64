//! Error types for the deck core.
//!
//! This module provides a unified error type [`DeckError`] that covers every
//! failure the sub-language parsers and evaluators can report. Variants fall
//! into three families, see [`ErrorKind`]:
//!
//! - **Syntax**: the input matches no grammar production, literal shape or
//!   dispatcher pattern. Always carries the offending substring.
//! - **Semantic**: the input is grammatical but cannot be resolved, e.g. an
//!   unknown surface label while folding a geometry expression.
//! - **Config**: a registry or configuration could not be built.

use thiserror::Error;

/// Result type alias using [`DeckError`].
pub type Result<T> = std::result::Result<T, DeckError>;

/// Coarse classification of a [`DeckError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input matches no production or shape.
    Syntax,
    /// Input is well-formed but unresolvable.
    Semantic,
    /// A registry or configuration is invalid.
    Config,
}

/// Unified error type for all deck core operations.
#[derive(Error, Debug)]
pub enum DeckError {
    // ============ Syntax Errors ============
    /// A field is neither a number nor any horizontal shorthand.
    #[error("Invalid literal '{text}': expected a number or one of the shorthands Nr, Nj, Nm, Ni, Nlog")]
    InvalidLiteral { text: String },

    /// A token that no production of the grammar accepts at this point.
    #[error("Syntax error in {grammar} expression '{input}' at column {column}: unexpected '{fragment}', expected {expected}")]
    UnexpectedToken {
        grammar: &'static str,
        input: String,
        fragment: String,
        column: usize,
        expected: &'static str,
    },

    /// The expression ended while a production was still open.
    #[error("Syntax error in {grammar} expression '{input}': unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        grammar: &'static str,
        input: String,
        expected: &'static str,
    },

    /// A character outside the expression alphabet.
    #[error("Syntax error in {grammar} expression '{input}' at column {column}: invalid character '{ch}'")]
    InvalidCharacter {
        grammar: &'static str,
        input: String,
        ch: char,
        column: usize,
    },

    /// The dispatcher could not classify the input into any registered variant.
    #[error("'{text}' does not match any {kind} variant (tried: {tried})")]
    NoVariant {
        kind: String,
        text: String,
        tried: String,
    },

    // ============ Semantic Errors ============
    /// A geometry digit names no known surface.
    #[error("Unknown surface '{label}' referenced in geometry expression")]
    UnknownSurface { label: String },

    /// Arithmetic or comparison attempted on a shorthand marker.
    #[error("Cannot {operation} non-numeric shorthand '{token}'")]
    NotNumeric {
        token: String,
        operation: &'static str,
    },

    /// Division of a literal by zero.
    #[error("Division of '{dividend}' by zero")]
    DivisionByZero { dividend: String },

    /// A shorthand token cannot be resolved against its neighbours.
    #[error("Cannot resolve shorthand '{token}' at position {position}: {message}")]
    UnresolvableShorthand {
        token: String,
        position: usize,
        message: String,
    },

    // ============ Configuration Errors ============
    /// A dispatcher registry was built with an invalid pattern.
    #[error("Invalid discriminator pattern for {kind} variant '{keyword}': {source}")]
    InvalidPattern {
        kind: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    /// A dispatcher registry was built with no variants or duplicate keywords.
    #[error("Invalid {kind} registry: {message}")]
    InvalidRegistry { kind: String, message: String },
}

impl DeckError {
    /// Create an unexpected-token error.
    pub fn unexpected(
        grammar: &'static str,
        input: &str,
        fragment: impl Into<String>,
        column: usize,
        expected: &'static str,
    ) -> Self {
        Self::UnexpectedToken {
            grammar,
            input: input.to_string(),
            fragment: fragment.into(),
            column,
            expected,
        }
    }

    /// Create an unexpected-end error.
    pub fn unexpected_end(grammar: &'static str, input: &str, expected: &'static str) -> Self {
        Self::UnexpectedEnd {
            grammar,
            input: input.to_string(),
            expected,
        }
    }

    /// Create an unknown-surface error
    pub fn unknown_surface(label: impl Into<String>) -> Self {
        Self::UnknownSurface {
            label: label.into(),
        }
    }

    /// Create an unresolvable-shorthand error
    pub fn unresolvable(
        token: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::UnresolvableShorthand {
            token: token.into(),
            position,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLiteral { .. }
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEnd { .. }
            | Self::InvalidCharacter { .. }
            | Self::NoVariant { .. } => ErrorKind::Syntax,
            Self::UnknownSurface { .. }
            | Self::NotNumeric { .. }
            | Self::DivisionByZero { .. }
            | Self::UnresolvableShorthand { .. } => ErrorKind::Semantic,
            Self::InvalidPattern { .. } | Self::InvalidRegistry { .. } => ErrorKind::Config,
        }
    }

    /// True for errors raised because the input matches no grammar.
    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }

    /// True for errors raised while resolving well-formed input.
    pub fn is_semantic(&self) -> bool {
        self.kind() == ErrorKind::Semantic
    }
}
