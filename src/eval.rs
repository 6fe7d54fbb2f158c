use crate::ast::{Expression, InfixExpression, Number, Program};
use crate::error::EvalError;
use crate::math::ArithmeticFault;

/// Evaluates every statement in order and returns the value of the last one.
/// An empty program has no value.
pub fn evaluate_program(program: &Program) -> Result<Option<Number>, EvalError> {
    let mut value = None;
    for statement in &program.statements {
        value = Some(evaluate(&statement.node)?);
    }

    Ok(value)
}

pub fn evaluate(expression: &Expression) -> Result<Number, EvalError> {
    match expression {
        Expression::IntegerLiteral { value, .. } => Ok(Number::Integer(*value)),
        Expression::FloatLiteral { value } => Ok(Number::Float(*value)),
        Expression::Infix(InfixExpression { lhs, op, rhs }) => {
            let lhs = evaluate(lhs)?;
            let rhs = evaluate(rhs)?;

            op.node.apply(lhs, rhs).map_err(|fault| {
                let (operator, span) = (op.node, op.span.into());
                match fault {
                    ArithmeticFault::DivisionByZero => EvalError::DivisionByZero { operator, span },
                    ArithmeticFault::Overflow => EvalError::Overflow { operator, span },
                    ArithmeticFault::NonRealResult => EvalError::NonRealResult { operator, span },
                }
            })
        }
    }
}
