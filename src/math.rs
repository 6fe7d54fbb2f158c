use std::ops;

use crate::ast::{BinaryOperator, Number};

/// Why an arithmetic operation has no value. The evaluator attaches the operator and its span.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticFault {
    DivisionByZero,
    Overflow,
    NonRealResult,
}

// Integer overflow in + - * falls back to the float result rather than wrapping.
impl ops::Add for Number {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => match a.checked_add(b) {
                Some(sum) => Number::Integer(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl ops::Sub for Number {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => match a.checked_sub(b) {
                Some(difference) => Number::Integer(difference),
                None => Number::Float(a as f64 - b as f64),
            },
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl ops::Mul for Number {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => match a.checked_mul(b) {
                Some(product) => Number::Integer(product),
                None => Number::Float(a as f64 * b as f64),
            },
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// True division: the result is always a float.
    pub fn checked_div(self, other: Self) -> Result<Self, ArithmeticFault> {
        if other.is_zero() {
            return Err(ArithmeticFault::DivisionByZero);
        }

        Ok(Number::Float(self.as_f64() / other.as_f64()))
    }

    /// Floor-based modulo: a non-zero result takes the sign of the divisor.
    pub fn checked_rem(self, other: Self) -> Result<Self, ArithmeticFault> {
        if other.is_zero() {
            return Err(ArithmeticFault::DivisionByZero);
        }

        Ok(match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => {
                // Only i64::MIN % -1 overflows, and its remainder is 0.
                let r = a.checked_rem(b).unwrap_or(0);
                Number::Integer(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let r = a % b;
                Number::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r })
            }
        })
    }

    pub fn pow(self, other: Self) -> Result<Self, ArithmeticFault> {
        match (self, other) {
            (Number::Integer(base), Number::Integer(exponent)) if exponent >= 0 => {
                match u32::try_from(exponent) {
                    Ok(exponent) => match base.checked_pow(exponent) {
                        Some(result) => Ok(Number::Integer(result)),
                        None => float_pow(base as f64, exponent as f64),
                    },
                    // Exponents this large only have an integer result for these bases.
                    Err(_) => match base {
                        0 | 1 => Ok(Number::Integer(base)),
                        -1 => Ok(Number::Integer(if exponent % 2 == 0 { 1 } else { -1 })),
                        _ => float_pow(base as f64, exponent as f64),
                    },
                }
            }
            (base, exponent) => float_pow(base.as_f64(), exponent.as_f64()),
        }
    }
}

fn float_pow(base: f64, exponent: f64) -> Result<Number, ArithmeticFault> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticFault::DivisionByZero);
    }

    let result = base.powf(exponent);
    let finite_operands = base.is_finite() && exponent.is_finite();
    if result.is_nan() && finite_operands {
        Err(ArithmeticFault::NonRealResult)
    } else if result.is_infinite() && finite_operands {
        Err(ArithmeticFault::Overflow)
    } else {
        Ok(Number::Float(result))
    }
}

impl BinaryOperator {
    pub fn apply(&self, lhs: Number, rhs: Number) -> Result<Number, ArithmeticFault> {
        match self {
            BinaryOperator::Add => Ok(lhs + rhs),
            BinaryOperator::Sub => Ok(lhs - rhs),
            BinaryOperator::Mul => Ok(lhs * rhs),
            BinaryOperator::Div => lhs.checked_div(rhs),
            BinaryOperator::Mod => lhs.checked_rem(rhs),
            BinaryOperator::Pow => lhs.pow(rhs),
        }
    }
}
