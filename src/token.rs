use std::fmt;

use miette::{LabeledSpan, SourceSpan};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn labeled(&self, label: impl Into<String>) -> LabeledSpan {
        LabeledSpan::at(self.start..self.end, label.into())
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start..span.end).into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    pub kind: TokenKind,
    /// The exact source text of the token. For an ILLEGAL numeral this is the
    /// part scanned before the fault.
    pub lexeme: &'source str,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Equals,
    Comma,

    // Identifiers
    Identifier, // NOTE: The name is the token's lexeme.

    // Literals
    Integer(i64),
    Float(f64),

    Illegal,
    Eof,
}

impl TokenKind {
    /// The upper-case kind name used in diagnostics, e.g. `INT` or `LPAREN`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Caret => "POWER",
            TokenKind::Percent => "MODULO",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenBrace => "LBRACE",
            TokenKind::CloseBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Equals => "ASSIGN",
            TokenKind::Comma => "COMMA",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer(_) => "INT",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, {:?}, line: {}, column: {})",
            self.kind.name(),
            self.lexeme,
            self.line,
            self.column
        )
    }
}
