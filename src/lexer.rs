use std::path::Path;

use miette::NamedSource;

use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'path, 'source> {
    filename: Option<&'path Path>,
    source: &'source str,
    rest: &'source str,
    position: usize,
    line: usize,
    column: usize,
    peeked: Option<Token<'source>>,
    finished: bool,
}

impl<'path, 'source> Lexer<'path, 'source> {
    pub fn new(filename: Option<&'path Path>, source: &'source str) -> Self {
        Self {
            filename,
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            peeked: None,
            finished: false,
        }
    }

    pub fn get_source_code(&self) -> NamedSource<String> {
        let name = match self.filename {
            Some(filename) => filename.to_string_lossy().to_string(),
            None => "<input>".to_string(),
        };

        NamedSource::new(name, self.source.to_string())
    }

    /// Returns the next token. Once the input is exhausted every call returns EOF.
    pub fn next_token(&mut self) -> Token<'source> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }

        self.scan()
    }

    pub fn peek(&mut self) -> &Token<'source> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        };

        self.peeked.insert(token)
    }

    /// Lexes the remaining input, ending with exactly one EOF token.
    pub fn tokenize_all(self) -> Vec<Token<'source>> {
        self.collect()
    }

    fn bump(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        self.position += c.len_utf8();

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn token(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token<'source> {
        Token {
            kind,
            lexeme: &self.source[start..self.position],
            span: Span::new(start, self.position),
            line,
            column,
        }
    }

    fn scan(&mut self) -> Token<'source> {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.bump();
        }

        let (start, line, column) = (self.position, self.line, self.column);
        let Some(c) = self.bump() else {
            return self.token(TokenKind::Eof, start, line, column);
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '%' => TokenKind::Percent,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Equals,
            ',' => TokenKind::Comma,
            '0'..='9' => return self.scan_number(start, line, column),
            c if c.is_alphabetic() || c == '_' => return self.scan_ident(start, line, column),
            _ => TokenKind::Illegal,
        };

        self.token(kind, start, line, column)
    }

    fn scan_ident(&mut self, start: usize, line: usize, column: usize) -> Token<'source> {
        while matches!(self.peek_char(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }

        self.token(TokenKind::Identifier, start, line, column)
    }

    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Token<'source> {
        let mut has_fraction = false;

        while let Some(c) = self.peek_char() {
            match c {
                '0'..='9' => {}
                '.' if !has_fraction => has_fraction = true,
                '.' => {
                    // A second dot ends the numeral as a fault. The dot is swallowed with it.
                    let lexeme = &self.source[start..self.position];
                    self.bump();
                    return Token {
                        kind: TokenKind::Illegal,
                        lexeme,
                        span: Span::new(start, self.position),
                        line,
                        column,
                    };
                }
                _ => break,
            }
            self.bump();
        }

        let literal = &self.source[start..self.position];
        let kind = if has_fraction {
            literal
                .parse()
                .ok()
                .filter(|f: &f64| f.is_finite())
                .map(TokenKind::Float)
        } else {
            literal.parse().map(TokenKind::Integer).ok()
        };

        self.token(kind.unwrap_or(TokenKind::Illegal), start, line, column)
    }
}

impl<'path, 'source> Iterator for Lexer<'path, 'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }

        Some(token)
    }
}
