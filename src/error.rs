use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::BinaryOperator;

/// A fault in a single statement. The parser records it and moves on to the next statement.
#[derive(Debug, Diagnostic, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("no prefix parse rule for {found}")]
    #[diagnostic(code(haxian::parse::no_prefix_rule))]
    NoPrefixRule {
        found: &'static str,
        #[label("expected an expression here")]
        span: SourceSpan,
    },

    #[error("illegal token `{text}`")]
    #[diagnostic(code(haxian::parse::illegal_token))]
    IllegalToken {
        text: String,
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("unexpected end of input")]
    #[diagnostic(code(haxian::parse::unexpected_eof))]
    UnexpectedEndOfInput {
        #[label("expected an expression")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(haxian::parse::unexpected_token))]
    Expected {
        expected: &'static str,
        found: &'static str,
        #[label("expected {expected}")]
        span: SourceSpan,
    },

    #[error("function calls are not supported")]
    #[diagnostic(code(haxian::parse::call_unsupported))]
    CallUnsupported {
        #[label("call starts here")]
        span: SourceSpan,
    },

    #[error("property access is not supported")]
    #[diagnostic(code(haxian::parse::property_access_unsupported))]
    PropertyAccessUnsupported {
        #[label("property access starts here")]
        span: SourceSpan,
    },

    #[error("expression nested deeper than {limit} levels")]
    #[diagnostic(code(haxian::parse::nesting_too_deep))]
    NestingTooDeep {
        limit: usize,
        #[label("too deep")]
        span: SourceSpan,
    },
}

#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse input")]
#[diagnostic(code(haxian::parse))]
pub struct ParseErrors {
    #[related]
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Diagnostic, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    #[diagnostic(code(haxian::eval::division_by_zero))]
    DivisionByZero {
        operator: BinaryOperator,
        #[label("right operand of `{operator}` is zero")]
        span: SourceSpan,
    },

    #[error("numeric overflow")]
    #[diagnostic(code(haxian::eval::overflow))]
    Overflow {
        operator: BinaryOperator,
        #[label("`{operator}` overflows")]
        span: SourceSpan,
    },

    #[error("result is not a real number")]
    #[diagnostic(
        code(haxian::eval::non_real_result),
        help("a negative base cannot be raised to a fractional power")
    )]
    NonRealResult {
        operator: BinaryOperator,
        #[label("here")]
        span: SourceSpan,
    },
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseErrors),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}
