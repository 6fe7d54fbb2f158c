use std::path::Path;

use crate::ast::{self, BinaryOperator, Expression, InfixExpression, TokenTree};
use crate::error::{ParseError, ParseErrors};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// Nesting limit for parenthesized and right-hand operand expressions.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Height limit of a statement's expression tree. Flat chains such as
/// `1 + 1 + ...` are parsed in a loop but still grow the tree by one level per
/// operator, and evaluating, rendering and dropping the tree recurse per level.
pub const MAX_TREE_HEIGHT: usize = 1024;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    // `%` deliberately shares this level with `^`.
    Exponent,
    Call,
    Get,
}

pub struct Parser<'path, 'source> {
    lexer: Lexer<'path, 'source>,
    errors: Vec<ParseError>,
    depth: usize,
    previous_end: usize,
}

impl<'path, 'source> Parser<'path, 'source> {
    pub fn new(filename: Option<&'path Path>, source: &'source str) -> Self {
        Self {
            lexer: Lexer::new(filename, source),
            errors: Vec::new(),
            depth: 0,
            previous_end: 0,
        }
    }

    /// Parses every statement in the input. Statements that fail to parse are
    /// left out of the program and reported in order.
    pub fn parse_program(mut self) -> (ast::Program, Vec<ParseError>) {
        let mut statements = Vec::new();

        loop {
            match self.lexer.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            match self.parse_expression_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        (ast::Program { statements }, self.errors)
    }

    pub fn parse(self) -> Result<ast::Program, ParseErrors> {
        let (program, errors) = self.parse_program();
        if errors.is_empty() {
            Ok(program)
        } else {
            Err(ParseErrors { errors })
        }
    }

    fn advance(&mut self) -> Token<'source> {
        let token = self.lexer.next_token();
        self.previous_end = token.span.end;
        token
    }

    // Skip the rest of a failed statement, up to and including its `;`.
    fn synchronize(&mut self) {
        loop {
            match self.lexer.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_expression_statement(&mut self) -> Result<TokenTree<Expression>, ParseError> {
        let start = self.lexer.peek().span.start;
        let (expression, _) = self.parse_expression(Precedence::Lowest)?;
        let span = Span::new(start, self.previous_end);

        if self.lexer.peek().kind == TokenKind::Semicolon {
            self.advance();
        }

        Ok(TokenTree::new(expression, span))
    }

    /// Parses an expression and returns it together with its tree height.
    fn parse_expression(&mut self, precedence: Precedence) -> Result<(Expression, usize), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.lexer.peek().span.into(),
            });
        }

        self.depth += 1;
        let expression = self.parse_expression_within(precedence);
        self.depth -= 1;

        expression
    }

    fn parse_expression_within(
        &mut self,
        precedence: Precedence,
    ) -> Result<(Expression, usize), ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let (kind, span) = {
                let op = self.lexer.peek();
                (op.kind, op.span)
            };
            let op_precedence = match infix_precedence(&kind) {
                Some(op_precedence) if op_precedence > precedence => op_precedence,
                _ => break,
            };

            lhs = match kind {
                TokenKind::OpenParen => {
                    return Err(ParseError::CallUnsupported { span: span.into() })
                }
                TokenKind::OpenBrace => {
                    return Err(ParseError::PropertyAccessUnsupported { span: span.into() })
                }
                _ if kind.is_operator() => self.parse_infix(lhs, op_precedence)?,
                _ => break,
            };
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<(Expression, usize), ParseError> {
        let token = self.lexer.peek().clone();
        let span = token.span;

        let expression = match token.kind {
            TokenKind::Integer(value) => Expression::IntegerLiteral {
                value,
                line: token.line,
                column: token.column,
            },
            TokenKind::Float(value) => Expression::FloatLiteral { value },
            TokenKind::OpenParen => {
                self.advance();
                return self.parse_grouped();
            }
            TokenKind::Illegal => {
                return Err(ParseError::IllegalToken {
                    text: token.lexeme.to_string(),
                    span: span.into(),
                })
            }
            TokenKind::Eof => {
                return Err(ParseError::UnexpectedEndOfInput { span: span.into() })
            }
            kind => {
                return Err(ParseError::NoPrefixRule {
                    found: kind.name(),
                    span: span.into(),
                })
            }
        };

        self.advance();
        Ok((expression, 1))
    }

    fn parse_grouped(&mut self) -> Result<(Expression, usize), ParseError> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        let token = self.lexer.peek();
        if token.kind != TokenKind::CloseParen {
            return Err(ParseError::Expected {
                expected: TokenKind::CloseParen.name(),
                found: token.kind.name(),
                span: token.span.into(),
            });
        }
        self.advance();

        Ok(expression)
    }

    fn parse_infix(
        &mut self,
        (lhs, lhs_height): (Expression, usize),
        precedence: Precedence,
    ) -> Result<(Expression, usize), ParseError> {
        let token = self.advance();
        let op = match BinaryOperator::from_token(&token.kind) {
            Some(op) => op,
            None => unreachable!("parse_infix called on {:?}", token.kind),
        };

        // Parsing the right operand at the operator's own precedence makes it left-associative.
        let (rhs, rhs_height) = self.parse_expression(precedence)?;

        let height = lhs_height.max(rhs_height) + 1;
        if height > MAX_TREE_HEIGHT {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_TREE_HEIGHT,
                span: token.span.into(),
            });
        }

        Ok((
            Expression::Infix(InfixExpression {
                lhs: Box::new(lhs),
                op: TokenTree::new(op, token.span),
                rhs: Box::new(rhs),
            }),
            height,
        ))
    }
}

/// Binding power of a token in infix position. `(` and `{` are listed so that
/// call and property access syntax is recognized, then rejected.
pub fn infix_precedence(kind: &TokenKind) -> Option<Precedence> {
    Some(match kind {
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::Caret | TokenKind::Percent => Precedence::Exponent,
        TokenKind::OpenParen => Precedence::Call,
        TokenKind::OpenBrace => Precedence::Get,

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (ast::Program, Vec<ParseError>) {
        Parser::new(None, input).parse_program()
    }

    fn render(input: &str) -> String {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "unexpected errors for '{input}': {errors:?}");
        program.to_string()
    }

    #[test]
    fn precedence_and_associativity() {
        for (input, expected) in [
            ("1", "1;"),
            ("2.5", "2.5;"),
            ("2 + 3 * 4", "(2 + (3 * 4));"),
            ("(2 + 3) * 4", "((2 + 3) * 4);"),
            ("8 - 3 - 2", "((8 - 3) - 2);"),
            ("2 ^ 3 ^ 2", "((2 ^ 3) ^ 2);"),
            ("2 * 5 % 3", "(2 * (5 % 3));"),
            ("2 % 3 ^ 4", "((2 % 3) ^ 4);"),
            ("1 + 2 * 3 ^ 4 - 5", "((1 + (2 * (3 ^ 4))) - 5);"),
            ("8 / 4 / 2", "((8 / 4) / 2);"),
            ("((1))", "1;"),
        ] {
            assert_eq!(render(input), expected, "when parsing '{input}'");
        }
    }

    #[test]
    fn precedence_table() {
        assert!(Precedence::Lowest < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Exponent);
        assert!(Precedence::Exponent < Precedence::Call);
        assert!(Precedence::Call < Precedence::Get);

        for (kind, expected) in [
            (TokenKind::Plus, Some(Precedence::Sum)),
            (TokenKind::Minus, Some(Precedence::Sum)),
            (TokenKind::Star, Some(Precedence::Product)),
            (TokenKind::Slash, Some(Precedence::Product)),
            (TokenKind::Caret, Some(Precedence::Exponent)),
            (TokenKind::Percent, Some(Precedence::Exponent)),
            (TokenKind::OpenParen, Some(Precedence::Call)),
            (TokenKind::OpenBrace, Some(Precedence::Get)),
            (TokenKind::CloseParen, None),
            (TokenKind::Semicolon, None),
            (TokenKind::Eof, None),
            (TokenKind::Integer(1), None),
        ] {
            assert_eq!(infix_precedence(&kind), expected, "for {kind:?}");
            assert_eq!(kind.is_operator(), BinaryOperator::from_token(&kind).is_some());
        }
    }

    #[test]
    fn statements() {
        assert_eq!(render("1; 2;"), "1; 2;");
        assert_eq!(render("1 2"), "1; 2;");
        assert_eq!(render(";;1;;"), "1;");

        let (program, errors) = parse("");
        assert!(program.is_empty());
        assert!(errors.is_empty());

        let (program, errors) = parse("  \n\t ");
        assert!(program.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn literal_positions() {
        let (program, _) = parse("1 +\n  22");
        match &program.statements[0].node {
            Expression::Infix(InfixExpression { lhs, rhs, .. }) => {
                assert_eq!(
                    **lhs,
                    Expression::IntegerLiteral {
                        value: 1,
                        line: 1,
                        column: 1
                    }
                );
                assert_eq!(
                    **rhs,
                    Expression::IntegerLiteral {
                        value: 22,
                        line: 2,
                        column: 3
                    }
                );
            }
            other => panic!("expected an infix expression, got {other:?}"),
        }
        assert_eq!(program.statements[0].span, Span::new(0, 8));
    }

    #[test]
    fn unmatched_parentheses() {
        let (program, errors) = parse("(1 + 2");
        assert!(program.is_empty());
        assert_eq!(
            errors,
            vec![ParseError::Expected {
                expected: "RPAREN",
                found: "EOF",
                span: (6..6).into(),
            }]
        );

        let (program, errors) = parse("1 + 2)");
        assert_eq!(program.to_string(), "(1 + 2);");
        assert_eq!(
            errors,
            vec![ParseError::NoPrefixRule {
                found: "RPAREN",
                span: (5..6).into(),
            }]
        );
    }

    #[test]
    fn recovers_at_the_next_statement() {
        let (program, errors) = parse("1 + ; 2 * 3; x; 4");
        assert_eq!(program.to_string(), "(2 * 3); 4;");
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ParseError::NoPrefixRule { found: "SEMICOLON", .. }));
        assert!(matches!(errors[1], ParseError::NoPrefixRule { found: "IDENTIFIER", .. }));
    }

    fn first_error(input: &str) -> ParseError {
        let (_, errors) = parse(input);
        match errors.into_iter().next() {
            Some(error) => error,
            None => panic!("expected an error for '{input}'"),
        }
    }

    #[test]
    fn prefix_faults() {
        assert!(matches!(
            first_error("x"),
            ParseError::NoPrefixRule { found: "IDENTIFIER", .. }
        ));
        assert!(matches!(
            first_error("+ 1"),
            ParseError::NoPrefixRule { found: "PLUS", .. }
        ));
        assert!(matches!(
            first_error("= 1"),
            ParseError::NoPrefixRule { found: "ASSIGN", .. }
        ));
        assert!(matches!(
            first_error("1 +"),
            ParseError::UnexpectedEndOfInput { .. }
        ));
        assert!(matches!(
            first_error("1.2.3"),
            ParseError::IllegalToken { text, .. } if text == "1.2"
        ));
        assert!(matches!(
            first_error("2 * $"),
            ParseError::IllegalToken { text, .. } if text == "$"
        ));
    }

    #[test]
    fn calls_and_property_access_are_rejected() {
        let (program, errors) = parse("2(3); 4");
        assert_eq!(program.to_string(), "4;");
        assert_eq!(errors, vec![ParseError::CallUnsupported { span: (1..2).into() }]);

        let (program, errors) = parse("(1 + 2){3}");
        assert!(program.is_empty());
        assert_eq!(
            errors,
            vec![ParseError::PropertyAccessUnsupported { span: (7..8).into() }]
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let (program, errors) = parse(&deep);
        assert!(program.is_empty());
        assert!(matches!(
            errors.as_slice(),
            [ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH, .. }]
        ));

        let fine = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(render(&fine), "1;");
    }

    #[test]
    fn tree_height_is_bounded() {
        let long = format!("1{}; 2", "+1".repeat(100_000));
        let (program, errors) = parse(&long);
        assert_eq!(program.to_string(), "2;");
        assert!(matches!(
            errors.as_slice(),
            [ParseError::NestingTooDeep { limit: MAX_TREE_HEIGHT, .. }]
        ));

        let right_leaning = format!("{}1{}", "1 + (".repeat(100), ")".repeat(100));
        assert!(parse(&right_leaning).1.is_empty());

        let (program, errors) = parse(&format!("1{}", "+1".repeat(MAX_TREE_HEIGHT - 1)));
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 1);

        let (_, errors) = parse(&format!("1{}", "+1".repeat(MAX_TREE_HEIGHT)));
        assert!(matches!(
            errors.as_slice(),
            [ParseError::NestingTooDeep { limit: MAX_TREE_HEIGHT, .. }]
        ));
    }

    #[test]
    fn parse_collects_errors() {
        let errors = Parser::new(None, "x; y; 1").parse().unwrap_err();
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.to_string(), "failed to parse input");

        let program = Parser::new(None, "1 + 1").parse().unwrap();
        assert_eq!(program.statements.len(), 1);
    }
}
