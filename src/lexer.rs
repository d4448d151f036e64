//! Lexer shared by the geometry and lattice expression parsers.
//!
//! Both sub-languages are small: numbers, a handful of one-character
//! operators and whitespace. Which operators are legal, and whether a sign
//! belongs to the number after it, depends on the [`Grammar`].

use crate::error::{DeckError, Result};

/// Which expression language is being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Cell geometry: `-1 2 : #(3 4)`
    Geometry,
    /// Lattice fill paths: `2 < 1[0:1 0 0]`
    Lattice,
}

impl Grammar {
    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Geometry => "geometry",
            Self::Lattice => "lattice",
        }
    }
}

/// Token types in the expression languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A number: `12`, `12.3` (geometry labels), `-4` (lattice, signed)
    Number,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '#'
    Hash,
    /// ':'
    Colon,
    /// '<'
    Less,
    /// '('
    OpenParen,
    /// ')'
    CloseParen,
    /// '['
    OpenBracket,
    /// ']'
    CloseBracket,
}

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: &'a str,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

/// Lexer for one expression.
pub struct Lexer<'a> {
    input: &'a str,
    grammar: Grammar,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str, grammar: Grammar) -> Self {
        Self {
            input,
            grammar,
            chars: input.char_indices().peekable(),
            column: 1,
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        self.skip_whitespace();

        let (start, ch) = match self.chars.peek().copied() {
            Some(next) => next,
            None => return Ok(None),
        };
        let column = self.column;

        let kind = match ch {
            '0'..='9' => {
                self.read_number();
                TokenKind::Number
            }
            '.' if self.grammar == Grammar::Geometry => {
                self.read_number();
                TokenKind::Number
            }
            '+' | '-' if self.grammar == Grammar::Lattice => {
                self.advance();
                match self.chars.peek() {
                    Some(&(_, c)) if c.is_ascii_digit() => {
                        self.read_number();
                        TokenKind::Number
                    }
                    _ => {
                        return Err(DeckError::unexpected(
                            self.grammar.name(),
                            self.input,
                            ch.to_string(),
                            column,
                            "a digit after the sign",
                        ))
                    }
                }
            }
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '#' if self.grammar == Grammar::Geometry => self.single(TokenKind::Hash),
            ':' => self.single(TokenKind::Colon),
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '<' if self.grammar == Grammar::Lattice => self.single(TokenKind::Less),
            '[' if self.grammar == Grammar::Lattice => self.single(TokenKind::OpenBracket),
            ']' if self.grammar == Grammar::Lattice => self.single(TokenKind::CloseBracket),
            _ => {
                return Err(DeckError::InvalidCharacter {
                    grammar: self.grammar.name(),
                    input: self.input.to_string(),
                    ch,
                    column,
                });
            }
        };

        let input = self.input;
        let end = self.chars.peek().map_or(input.len(), |&(pos, _)| pos);
        Ok(Some(Token {
            kind,
            text: &input[start..end],
            column,
        }))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) {
        // Geometry labels may carry a facet: `12.3`. The parser validates the shape.
        let facets = self.grammar == Grammar::Geometry;
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() || (facets && ch == '.') {
                self.advance();
            } else {
                break;
            }
        }
    }
}

/// Cursor over a token list, shared by the recursive-descent parsers.
pub(crate) struct TokenStream<'a> {
    input: &'a str,
    grammar: Grammar,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(input: &'a str, grammar: Grammar) -> Result<Self> {
        Ok(Self {
            input,
            grammar,
            tokens: Lexer::new(input, grammar).tokenize()?,
            pos: 0,
        })
    }

    pub(crate) fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    pub(crate) fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume a token of `kind` or fail naming what was `expected`.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token<'a>> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.unexpected(&token, expected)),
            None => Err(self.end(expected)),
        }
    }

    pub(crate) fn unexpected(&self, token: &Token<'a>, expected: &'static str) -> DeckError {
        DeckError::unexpected(self.grammar.name(), self.input, token.text, token.column, expected)
    }

    pub(crate) fn end(&self, expected: &'static str) -> DeckError {
        DeckError::unexpected_end(self.grammar.name(), self.input, expected)
    }

    /// Fail unless every token was consumed.
    pub(crate) fn finish(&self) -> Result<()> {
        match self.peek() {
            Some(token) => Err(self.unexpected(token, "end of expression")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str, grammar: Grammar) -> Vec<TokenKind> {
        Lexer::new(input, grammar)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_geometry_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("-1 2.3:#(4)", Grammar::Geometry),
            vec![Minus, Number, Number, Colon, Hash, OpenParen, Number, CloseParen]
        );
        let tokens = Lexer::new("  12.3 -4", Grammar::Geometry).tokenize().unwrap();
        assert_eq!(tokens[0].text, "12.3");
        assert_eq!(tokens[0].column, 3);
        assert_eq!(tokens[2].text, "4");
        assert_eq!(tokens[2].column, 9);
    }

    #[test]
    fn test_lattice_signs_bind_to_numbers() {
        use TokenKind::*;
        let tokens = Lexer::new("1[-1:+2 0 0]<2", Grammar::Lattice).tokenize().unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["1", "[", "-1", ":", "+2", "0", "0", "]", "<", "2"]);
        assert_eq!(tokens[8].kind, Less);
    }

    #[test]
    fn test_invalid_characters() {
        let err = Lexer::new("1 & 2", Grammar::Geometry).tokenize().unwrap_err();
        assert!(matches!(err, DeckError::InvalidCharacter { ch: '&', column: 3, .. }));

        assert!(Lexer::new("#1", Grammar::Lattice).tokenize().is_err());
        assert!(Lexer::new("1.5", Grammar::Lattice).tokenize().is_err());
        assert!(Lexer::new("1 < 2", Grammar::Geometry).tokenize().is_err());
        assert!(Lexer::new("- 1", Grammar::Lattice).tokenize().is_err());
    }

    #[test]
    fn test_stream_cursor() {
        let mut stream = TokenStream::new("1 : 2", Grammar::Geometry).unwrap();
        assert_eq!(stream.peek_kind_at(1), Some(TokenKind::Colon));
        assert!(stream.expect(TokenKind::Number, "a number").is_ok());
        assert!(stream.finish().is_err());
        assert!(stream.expect(TokenKind::Number, "a number").is_err());
        assert!(stream.next().is_some());
        assert!(stream.peek().is_none());
        assert!(stream.finish().is_ok());
    }
}
