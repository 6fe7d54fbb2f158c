use crate::{ast::BinaryOperator, token::TokenKind};

impl BinaryOperator {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Percent => Self::Mod,
            TokenKind::Caret => Self::Pow,

            _ => return None,
        })
    }
}

impl TokenKind {
    // For easier matching
    pub(crate) fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Caret
        )
    }
}
