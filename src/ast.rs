use std::fmt;

use crate::token::Span;

#[derive(Debug, PartialEq, Clone)]
pub struct TokenTree<T> {
    pub node: T,
    pub span: Span,
}

impl<T> TokenTree<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A sequence of expression statements. An empty program has no value.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<TokenTree<Expression>>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    IntegerLiteral {
        value: i64,
        line: usize,
        column: usize,
    },
    FloatLiteral {
        value: f64,
    },
    Infix(InfixExpression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct InfixExpression {
    pub lhs: Box<Expression>,
    pub op: TokenTree<BinaryOperator>,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "^",
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Integer(a), Number::Float(b)) => (*a as f64) == *b,
            (Number::Float(a), Number::Integer(b)) => *a == (*b as f64),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            // Floats always show a fraction so they lex back as FLOAT.
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Renders the expression fully parenthesized, in a form the parser accepts.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::IntegerLiteral { value, .. } => write!(f, "{}", Number::Integer(*value)),
            Expression::FloatLiteral { value } => write!(f, "{}", Number::Float(*value)),
            Expression::Infix(InfixExpression { lhs, op, rhs }) => {
                write!(f, "({lhs} {} {rhs})", op.node)
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{};", statement.node)?;
        }

        Ok(())
    }
}
