//! The legacy flat-token reducer, kept as a cross-check for the tree evaluator.
//!
//! It resolves parentheses innermost first, then reduces the flat list in three
//! left-to-right passes: `^`, then `* / %`, then `+ -`. Note that it groups `%`
//! with `* /`, whereas the parser groups `%` with `^`.

use haxian::ast::{BinaryOperator, Number};
use haxian::token::{Token, TokenKind};

#[derive(Debug, Copy, Clone)]
enum Item {
    Number(Number),
    Op(BinaryOperator),
    Open,
    Close,
}

pub fn reduce_tokens(tokens: &[Token]) -> Result<Number, String> {
    let items = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| match t.kind {
            TokenKind::Integer(i) => Ok(Item::Number(Number::Integer(i))),
            TokenKind::Float(f) => Ok(Item::Number(Number::Float(f))),
            TokenKind::OpenParen => Ok(Item::Open),
            TokenKind::CloseParen => Ok(Item::Close),
            TokenKind::Plus => Ok(Item::Op(BinaryOperator::Add)),
            TokenKind::Minus => Ok(Item::Op(BinaryOperator::Sub)),
            TokenKind::Star => Ok(Item::Op(BinaryOperator::Mul)),
            TokenKind::Slash => Ok(Item::Op(BinaryOperator::Div)),
            TokenKind::Percent => Ok(Item::Op(BinaryOperator::Mod)),
            TokenKind::Caret => Ok(Item::Op(BinaryOperator::Pow)),
            kind => Err(format!("unsupported token {}", kind.name())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    reduce(items)
}

fn reduce(mut items: Vec<Item>) -> Result<Number, String> {
    while let Some(open) = items.iter().position(|i| matches!(i, Item::Open)) {
        let close = matching_close(&items, open).ok_or("mismatched parentheses")?;
        let inner = reduce(items[open + 1..close].to_vec())?;
        items.splice(open..=close, [Item::Number(inner)]);
    }

    for ops in [
        &[BinaryOperator::Pow][..],
        &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod][..],
        &[BinaryOperator::Add, BinaryOperator::Sub][..],
    ] {
        let mut i = 0;
        while i + 2 < items.len() {
            match (items[i], items[i + 1], items[i + 2]) {
                (Item::Number(lhs), Item::Op(op), Item::Number(rhs)) if ops.contains(&op) => {
                    let value = op.apply(lhs, rhs).map_err(|fault| format!("{fault:?}"))?;
                    items.splice(i..i + 3, [Item::Number(value)]);
                }
                _ => i += 1,
            }
        }
    }

    match items.as_slice() {
        [Item::Number(value)] => Ok(*value),
        _ => Err(format!("invalid expression: {items:?}")),
    }
}

fn matching_close(items: &[Item], open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, item) in items.iter().enumerate().skip(open) {
        match item {
            Item::Open => depth += 1,
            Item::Close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
