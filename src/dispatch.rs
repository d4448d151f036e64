//! Longest-keyword-first dispatch over sibling record variants.
//!
//! Many record kinds come in families whose members are told apart by a
//! leading keyword that may be a prefix of a sibling's keyword (`f`, `fc`,
//! `fm`, `fmesh`). A [`VariantRegistry`] holds one family and classifies text
//! into exactly one member.
//!
//! The registry compiles a single anchored pattern: the variants' keywords,
//! each optionally followed by a suffix pattern (a designator number, a
//! particle list), joined by alternation in descending keyword length. The
//! regex engine commits to the first alternative that matches, so longer
//! keywords have to come first or a shorter prefix would shadow them.
//!
//! Registries are built once and are read-only afterwards; keep one per base
//! kind in a `once_cell::sync::Lazy`:
//!
//! ```
//! use deck_core::dispatch::{Classified, VariantRegistry};
//! use deck_core::error::Result;
//! use once_cell::sync::Lazy;
//!
//! #[derive(Debug, PartialEq)]
//! enum Tally { Plain(String), Mesh(String) }
//!
//! fn plain(c: &Classified<'_>) -> Result<Tally> { Ok(Tally::Plain(c.body.to_string())) }
//! fn mesh(c: &Classified<'_>) -> Result<Tally> { Ok(Tally::Mesh(c.body.to_string())) }
//!
//! static TALLIES: Lazy<VariantRegistry<Tally>> = Lazy::new(|| {
//!     VariantRegistry::builder("tally")
//!         .variant_with("f", r"\d+", plain)
//!         .variant_with("fmesh", r"\d+", mesh)
//!         .build()
//!         .unwrap()
//! });
//!
//! assert_eq!(TALLIES.parse("fmesh4 geom=xyz").unwrap(), Tally::Mesh("geom=xyz".into()));
//! ```

use regex::{Regex, RegexBuilder};

use crate::error::{DeckError, Result};

/// Parser invoked for the variant a text was classified into.
pub type VariantParser<T> = fn(&Classified<'_>) -> Result<T>;

/// The pieces of an input that matched a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    /// The registered keyword of the selected variant.
    pub keyword: &'static str,
    /// Text matched by the variant's suffix pattern, e.g. a designator.
    pub suffix: &'a str,
    /// Everything after the keyword and suffix, trimmed.
    pub body: &'a str,
    /// The whole input.
    pub input: &'a str,
}

struct Variant<T> {
    keyword: &'static str,
    suffix: &'static str,
    parser: VariantParser<T>,
}

/// Builder for a [`VariantRegistry`].
pub struct VariantRegistryBuilder<T> {
    kind: String,
    variants: Vec<Variant<T>>,
}

impl<T> VariantRegistryBuilder<T> {
    /// Register a variant whose keyword is followed directly by its body.
    pub fn variant(self, keyword: &'static str, parser: VariantParser<T>) -> Self {
        self.variant_with(keyword, "", parser)
    }

    /// Register a variant whose keyword is followed by text matching `suffix`.
    ///
    /// `suffix` is a regex fragment; it must not contain capture groups of
    /// its own (use `(?:...)`).
    pub fn variant_with(
        mut self,
        keyword: &'static str,
        suffix: &'static str,
        parser: VariantParser<T>,
    ) -> Self {
        self.variants.push(Variant {
            keyword,
            suffix,
            parser,
        });
        self
    }

    /// Sort the variants and compile the discriminating pattern.
    pub fn build(mut self) -> Result<VariantRegistry<T>> {
        if self.variants.is_empty() {
            return Err(DeckError::InvalidRegistry {
                kind: self.kind,
                message: "no variants registered".to_string(),
            });
        }

        // Stable sort: equal-length keywords keep registration order
        self.variants.sort_by(|a, b| b.keyword.len().cmp(&a.keyword.len()));

        for (i, variant) in self.variants.iter().enumerate() {
            if variant.keyword.is_empty() {
                return Err(DeckError::InvalidRegistry {
                    kind: self.kind.clone(),
                    message: "empty keyword".to_string(),
                });
            }
            let duplicate = self.variants[..i].iter().any(|other| {
                other.keyword.eq_ignore_ascii_case(variant.keyword)
                    && other.suffix == variant.suffix
            });
            if duplicate {
                return Err(DeckError::InvalidRegistry {
                    kind: self.kind.clone(),
                    message: format!("keyword '{}' registered twice", variant.keyword),
                });
            }
            // Check each suffix alone so a bad one is reported against its keyword
            if let Err(source) = Regex::new(variant.suffix) {
                return Err(DeckError::InvalidPattern {
                    kind: self.kind.clone(),
                    keyword: variant.keyword.to_string(),
                    source,
                });
            }
        }

        let alternatives: Vec<String> = self
            .variants
            .iter()
            .enumerate()
            .map(|(i, v)| format!("(?P<k{i}>{})(?P<s{i}>{})", regex::escape(v.keyword), v.suffix))
            .collect();
        let pattern = format!(r"^\s*(?:{})(?:\s+(?P<body>.*?))?\s*$", alternatives.join("|"));

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| DeckError::InvalidPattern {
                kind: self.kind.clone(),
                keyword: "*".to_string(),
                source,
            })?;

        Ok(VariantRegistry {
            kind: self.kind,
            variants: self.variants,
            regex,
        })
    }
}

/// A family of sibling variants with its compiled discriminator.
pub struct VariantRegistry<T> {
    kind: String,
    variants: Vec<Variant<T>>,
    regex: Regex,
}

impl<T> VariantRegistry<T> {
    /// Start building a registry for the base kind `kind`.
    pub fn builder(kind: impl Into<String>) -> VariantRegistryBuilder<T> {
        VariantRegistryBuilder {
            kind: kind.into(),
            variants: Vec::new(),
        }
    }

    /// The base kind this registry classifies.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Registered keywords in match order (longest first).
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.keyword)
    }

    /// Classify `input` without parsing it.
    pub fn classify<'a>(&self, input: &'a str) -> Result<Classified<'a>> {
        self.matched(input).map(|(classified, _)| classified)
    }

    /// Classify `input` and hand it to the selected variant's parser.
    pub fn parse(&self, input: &str) -> Result<T> {
        let (classified, index) = self.matched(input)?;
        (self.variants[index].parser)(&classified)
    }

    fn matched<'a>(&self, input: &'a str) -> Result<(Classified<'a>, usize)> {
        let caps = self.regex.captures(input).ok_or_else(|| self.no_variant(input))?;
        let index = (0..self.variants.len())
            .find(|i| caps.name(&format!("k{i}")).is_some())
            .ok_or_else(|| self.no_variant(input))?;

        let suffix = caps
            .name(&format!("s{index}"))
            .map_or("", |m| m.as_str());
        let body = caps.name("body").map_or("", |m| m.as_str());

        Ok((
            Classified {
                keyword: self.variants[index].keyword,
                suffix,
                body,
                input,
            },
            index,
        ))
    }

    fn no_variant(&self, input: &str) -> DeckError {
        DeckError::NoVariant {
            kind: self.kind.clone(),
            text: input.to_string(),
            tried: self.keywords().collect::<Vec<_>>().join(", "),
        }
    }
}

impl<T> std::fmt::Debug for VariantRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("kind", &self.kind)
            .field("keywords", &self.keywords().collect::<Vec<_>>())
            .finish()
    }
}
