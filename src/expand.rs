//! Horizontal shorthand expander.
//!
//! Normalizes raw record text before it is split into fields:
//!
//! - `&` continuation markers are dropped and every whitespace run (newlines
//!   included) becomes one space
//! - spaces just inside parentheses are removed: `( 1 2 )` becomes `(1 2)`
//! - a key=value `=` becomes one space: `imp:n = 1` becomes `imp:n 1`
//! - counted repeatable shorthand is spelled out: `3j` becomes `j j j`
//!
//! The repeatable kinds are `r`, `j`, `i`, `log` and `ilog`. `m` carries a
//! multiplier rather than a count and is left alone. After expansion a user's
//! `j j j` and `3j` are the same text.
//!
//! Expansion never fails. Anything malformed is passed through and reported
//! by the field parser.

use once_cell::sync::Lazy;
use regex::Regex;

static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[ \t]*\r?\n").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static OPEN_PAREN_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+").unwrap());
static CLOSE_PAREN_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").unwrap());
static EQUALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*").unwrap());
static COUNTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(\d+)(ilog|log|r|j|i)$").unwrap());

/// Default cap on how many copies one counted token may expand to.
pub const DEFAULT_MAX_EXPANSION: u32 = 100_000;

/// Configuration for the expander.
#[derive(Debug, Clone)]
pub struct ExpanderConfig {
    /// Counted tokens above this count are left unexpanded.
    pub max_expansion: u32,
    /// Drop `&` line-continuation markers.
    pub join_continuations: bool,
    /// Replace key=value `=` signs with a space.
    pub collapse_equals: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            max_expansion: DEFAULT_MAX_EXPANSION,
            join_continuations: true,
            collapse_equals: true,
        }
    }
}

impl ExpanderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expansion cap.
    ///
    /// A token like `1000000j` would otherwise allocate a million fields; with
    /// a cap below its count it is kept as the single counted token, which the
    /// field parser still accepts.
    pub fn with_max_expansion(mut self, max_expansion: u32) -> Self {
        self.max_expansion = max_expansion;
        self
    }

    /// Enable or disable joining of `&` continuations.
    pub fn with_join_continuations(mut self, join: bool) -> Self {
        self.join_continuations = join;
        self
    }

    /// Enable or disable `=` collapsing.
    pub fn with_collapse_equals(mut self, collapse: bool) -> Self {
        self.collapse_equals = collapse;
        self
    }
}

/// Text normalizer for record text.
#[derive(Debug, Clone, Default)]
pub struct Expander {
    config: ExpanderConfig,
}

impl Expander {
    /// Create an expander with the given configuration.
    pub fn new(config: ExpanderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Normalize `raw`.
    pub fn expand(&self, raw: &str) -> String {
        let mut text = if self.config.join_continuations {
            CONTINUATION.replace_all(raw, " ").into_owned()
        } else {
            raw.to_string()
        };

        text = WHITESPACE.replace_all(text.trim(), " ").into_owned();
        text = OPEN_PAREN_SPACE.replace_all(&text, "(").into_owned();
        text = CLOSE_PAREN_SPACE.replace_all(&text, ")").into_owned();
        if self.config.collapse_equals {
            text = EQUALS.replace_all(&text, " ").into_owned();
        }

        let mut out: Vec<&str> = Vec::new();
        for token in text.split(' ').filter(|t| !t.is_empty()) {
            match COUNTED.captures(token) {
                Some(caps) => match caps[1].parse::<u32>() {
                    Ok(count) if count > 0 && count <= self.config.max_expansion => {
                        let keyword = caps.get(2).map_or("", |m| m.as_str());
                        out.extend(std::iter::repeat(keyword).take(count as usize));
                    }
                    _ => out.push(token),
                },
                None => out.push(token),
            }
        }
        out.join(" ")
    }
}

/// Normalize `raw` with the default configuration.
pub fn expand(raw: &str) -> String {
    Expander::default().expand(raw)
}
