//! Recursive-descent parser for lattice fill paths.
//!
//! ```text
//! embedded = term { '<' term }
//! term     = paren | range | number
//! range    = number '[' coord coord coord ']'
//! coord    = number [ ':' number ]
//! paren    = '(' embedded ')'
//! ```
//!
//! `range` and a bare `number` start alike; one token of lookahead (`[`)
//! tells them apart.

use super::ast::{Coordinate, LatticeNode};
use crate::error::Result;
use crate::lexer::{Grammar, Token, TokenKind, TokenStream};

const TERM: &str = "a universe number or '('";

/// Parser for one lattice fill path.
pub struct LatticeParser<'a> {
    stream: TokenStream<'a>,
}

impl<'a> LatticeParser<'a> {
    /// Tokenize `input`.
    pub fn new(input: &'a str) -> Result<Self> {
        Ok(Self {
            stream: TokenStream::new(input, Grammar::Lattice)?,
        })
    }

    /// Parse the whole path. Leftover tokens are an error.
    pub fn parse(mut self) -> Result<LatticeNode> {
        let node = self.parse_embedded()?;
        self.stream.finish()?;
        Ok(node)
    }

    fn parse_embedded(&mut self) -> Result<LatticeNode> {
        let mut left = self.parse_term()?;
        while self.stream.peek_kind() == Some(TokenKind::Less) {
            self.stream.next();
            let right = self.parse_term()?;
            left = LatticeNode::embedded(left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<LatticeNode> {
        match self.stream.peek_kind() {
            Some(TokenKind::OpenParen) => self.parse_paren(),
            Some(TokenKind::Number) => {
                if self.stream.peek_kind_at(1) == Some(TokenKind::OpenBracket) {
                    self.parse_range()
                } else {
                    Ok(LatticeNode::Digit(self.parse_integer("a universe number")?))
                }
            }
            Some(_) => Err(match self.stream.peek() {
                Some(token) => self.stream.unexpected(token, TERM),
                None => self.stream.end(TERM),
            }),
            None => Err(self.stream.end(TERM)),
        }
    }

    fn parse_paren(&mut self) -> Result<LatticeNode> {
        self.stream.expect(TokenKind::OpenParen, "'('")?;
        let inner = self.parse_embedded()?;
        self.stream.expect(TokenKind::CloseParen, "')'")?;
        Ok(LatticeNode::paren(inner))
    }

    fn parse_range(&mut self) -> Result<LatticeNode> {
        let cell = self.parse_integer("a lattice cell number")?;
        self.stream.expect(TokenKind::OpenBracket, "'['")?;
        let i = self.parse_coordinate()?;
        let j = self.parse_coordinate()?;
        let k = self.parse_coordinate()?;
        self.stream
            .expect(TokenKind::CloseBracket, "']' after three coordinates")?;
        Ok(LatticeNode::range(cell, i, j, k))
    }

    fn parse_coordinate(&mut self) -> Result<Coordinate> {
        let lower = self.parse_integer("a lattice index")?;
        if self.stream.peek_kind() != Some(TokenKind::Colon) {
            return Ok(Coordinate::Digit(lower));
        }
        self.stream.next();
        let upper = self.parse_integer("an upper index after ':'")?;
        Ok(Coordinate::Index(lower, upper))
    }

    fn parse_integer(&mut self, expected: &'static str) -> Result<i64> {
        let token: Token<'a> = self.stream.expect(TokenKind::Number, expected)?;
        token
            .text
            .parse()
            .map_err(|_| self.stream.unexpected(&token, "an integer that fits in 64 bits"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;
    use crate::lattice::Coordinate::{Digit as C, Index};
    use crate::lattice::LatticeNode as L;
    use rstest::rstest;

    #[test]
    fn test_full_range() {
        assert_eq!(
            parse("1[0:1 0:1 0:1]").unwrap(),
            L::range(1, Index(0, 1), Index(0, 1), Index(0, 1))
        );
    }

    #[test]
    fn test_mixed_coordinates() {
        assert_eq!(
            parse("10[ -2:+2 0 -1 ]").unwrap(),
            L::range(10, Index(-2, 2), C(0), C(-1))
        );
    }

    #[test]
    fn test_embedding_is_left_associative() {
        assert_eq!(
            parse("3 < 2[0 0 0] < 1").unwrap(),
            L::embedded(
                L::embedded(L::Digit(3), L::range(2, C(0), C(0), C(0))),
                L::Digit(1)
            )
        );
        assert_eq!(
            parse("3<(2<1)").unwrap(),
            L::embedded(L::Digit(3), L::paren(L::embedded(L::Digit(2), L::Digit(1))))
        );
    }

    #[test]
    fn test_signed_digit() {
        assert_eq!(parse("-5").unwrap(), L::Digit(-5));
        assert_eq!(parse("+5").unwrap(), L::Digit(5));
    }

    #[rstest]
    #[case("1[0 0]")]
    #[case("1[0 0 0")]
    #[case("1[0 0 0 0]")]
    #[case("1[0:1:2 0 0]")]
    #[case("1[0: 0 0]")]
    #[case("1[]")]
    #[case("[0 0 0]")]
    #[case("1[0 0 0]]")]
    #[case("1 2")]
    #[case("1 <")]
    #[case("< 1")]
    #[case("(1 < 2")]
    #[case("()")]
    #[case("")]
    #[case("1:2")]
    #[case("99999999999999999999")]
    fn test_syntax_errors(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert!(err.is_syntax(), "{:?} gave {}", input, err);
    }

    #[test]
    fn test_error_points_at_bracket() {
        let err = parse("1[0 0 0 0]").unwrap_err().to_string();
        assert!(err.contains("'0'"), "{}", err);
        assert!(err.contains("column 9"), "{}", err);
    }
}
