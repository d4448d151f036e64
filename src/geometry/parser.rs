//! Recursive-descent parser for cell geometry expressions.
//!
//! One method per precedence level, each consuming from the front of the
//! token stream:
//!
//! ```text
//! union        = intersection { ':' intersection }
//! intersection = operand { operand }
//! operand      = unary | paren | digit
//! unary        = ('+' | '-' | '#') (paren | digit)
//! paren        = '(' union ')'
//! ```

use super::ast::{GeometryNode, Label, UnaryOp};
use crate::error::Result;
use crate::lexer::{Grammar, TokenKind, TokenStream};

const OPERAND: &str = "a surface number, '(' or one of '+', '-', '#'";

/// Parser for one geometry expression.
pub struct GeometryParser<'a> {
    stream: TokenStream<'a>,
}

impl<'a> GeometryParser<'a> {
    /// Tokenize `input`.
    pub fn new(input: &'a str) -> Result<Self> {
        Ok(Self {
            stream: TokenStream::new(input, Grammar::Geometry)?,
        })
    }

    /// Parse the whole expression. Leftover tokens are an error.
    pub fn parse(mut self) -> Result<GeometryNode> {
        let node = self.parse_union()?;
        self.stream.finish()?;
        Ok(node)
    }

    fn parse_union(&mut self) -> Result<GeometryNode> {
        let mut left = self.parse_intersection()?;
        while self.stream.peek_kind() == Some(TokenKind::Colon) {
            self.stream.next();
            let right = self.parse_intersection()?;
            left = GeometryNode::union(left, right);
        }
        Ok(left)
    }

    fn parse_intersection(&mut self) -> Result<GeometryNode> {
        let mut left = self.parse_operand()?;
        while self.starts_operand() {
            let right = self.parse_operand()?;
            left = GeometryNode::intersection(left, right);
        }
        Ok(left)
    }

    fn starts_operand(&self) -> bool {
        matches!(
            self.stream.peek_kind(),
            Some(
                TokenKind::Number
                    | TokenKind::OpenParen
                    | TokenKind::Plus
                    | TokenKind::Minus
                    | TokenKind::Hash
            )
        )
    }

    fn parse_operand(&mut self) -> Result<GeometryNode> {
        match self.stream.peek_kind() {
            Some(TokenKind::Plus | TokenKind::Minus | TokenKind::Hash) => self.parse_unary(),
            Some(TokenKind::OpenParen) => self.parse_paren(),
            Some(TokenKind::Number) => self.parse_digit(),
            Some(_) => {
                let token = self.stream.next();
                Err(match token {
                    Some(token) => self.stream.unexpected(&token, OPERAND),
                    None => self.stream.end(OPERAND),
                })
            }
            None => Err(self.stream.end(OPERAND)),
        }
    }

    fn parse_unary(&mut self) -> Result<GeometryNode> {
        let op = match self.stream.next().map(|t| t.kind) {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => UnaryOp::Complement,
        };
        let operand = match self.stream.peek_kind() {
            Some(TokenKind::OpenParen) => self.parse_paren()?,
            Some(TokenKind::Number) => self.parse_digit()?,
            _ => {
                let expected = "a surface number or '(' after the operator";
                return Err(match self.stream.peek() {
                    Some(token) => self.stream.unexpected(token, expected),
                    None => self.stream.end(expected),
                });
            }
        };
        Ok(GeometryNode::unary(op, operand))
    }

    fn parse_paren(&mut self) -> Result<GeometryNode> {
        self.stream.expect(TokenKind::OpenParen, "'('")?;
        let inner = self.parse_union()?;
        self.stream.expect(TokenKind::CloseParen, "')'")?;
        Ok(GeometryNode::paren(inner))
    }

    fn parse_digit(&mut self) -> Result<GeometryNode> {
        let token = self.stream.expect(TokenKind::Number, "a surface number")?;
        match Label::parse(token.text) {
            Some(label) => Ok(GeometryNode::Digit(label)),
            None => Err(self
                .stream
                .unexpected(&token, "a surface number like 12 or 12.3")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;
    use crate::error::DeckError;
    use crate::geometry::GeometryNode as G;
    use rstest::rstest;

    fn d(n: u64) -> GeometryNode {
        G::digit(n)
    }

    #[test]
    fn test_adjacency_binds_tighter_than_colon() {
        assert_eq!(
            parse("1 2:3").unwrap(),
            G::union(G::intersection(d(1), d(2)), d(3))
        );
        assert_eq!(
            parse("1:2 3").unwrap(),
            G::union(d(1), G::intersection(d(2), d(3)))
        );
    }

    #[test]
    fn test_parens_are_kept() {
        assert_eq!(
            parse("(1:2) 3").unwrap(),
            G::intersection(G::paren(G::union(d(1), d(2))), d(3))
        );
    }

    #[test]
    fn test_senses_left_associative() {
        let node = parse("-1 -2 3").unwrap();
        assert_eq!(
            node,
            G::intersection(
                G::intersection(G::unary(UnaryOp::Minus, d(1)), G::unary(UnaryOp::Minus, d(2))),
                d(3)
            )
        );
        assert_eq!(node.to_text(), "-1 -2 3");
    }

    #[test]
    fn test_union_left_associative() {
        assert_eq!(
            parse("1:2:3").unwrap(),
            G::union(G::union(d(1), d(2)), d(3))
        );
    }

    #[test]
    fn test_complement_forms() {
        assert_eq!(
            parse("#5").unwrap(),
            G::unary(UnaryOp::Complement, d(5))
        );
        assert_eq!(parse("#5").unwrap().cell_complement(), Some(&Label::new(5)));
        let node = parse("#(1 -2)").unwrap();
        assert_eq!(node.cell_complement(), None);
        assert_eq!(node.to_text(), "#(1 -2)");
    }

    #[test]
    fn test_separators_without_spaces() {
        assert_eq!(parse("(1:2)3").unwrap(), parse("( 1 : 2 ) 3").unwrap());
        assert_eq!(parse("1:-2").unwrap(), G::union(d(1), G::unary(UnaryOp::Minus, d(2))));
        assert_eq!(
            parse("-1.2 +3").unwrap(),
            G::intersection(
                G::unary(UnaryOp::Minus, G::Digit(Label::with_facet(1, 2))),
                G::unary(UnaryOp::Plus, d(3))
            )
        );
    }

    #[rstest]
    #[case("1 :")]
    #[case(":1")]
    #[case("")]
    #[case("(1 2")]
    #[case("1 2)")]
    #[case("()")]
    #[case("--1")]
    #[case("-")]
    #[case("# 1:")]
    #[case("1..2")]
    #[case(". 1")]
    #[case("1 x")]
    fn test_syntax_errors(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert!(err.is_syntax(), "{:?} gave {}", input, err);
    }

    #[test]
    fn test_error_names_offending_text() {
        let err = parse("1 2 ) 3").unwrap_err();
        match err {
            DeckError::UnexpectedToken {
                fragment, column, ..
            } => {
                assert_eq!(fragment, ")");
                assert_eq!(column, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let err = parse("1 :").unwrap_err();
        assert!(matches!(err, DeckError::UnexpectedEnd { grammar: "geometry", .. }));
    }
}
