use miette::NamedSource;

use crate::ast::{Expression, InfixExpression, Program};
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Reports every token as an advice diagnostic labelled at its span.
pub fn print_tokens(lexer: Lexer, source_code: NamedSource<String>) {
    for token in lexer {
        let kind = match token.kind {
            TokenKind::Integer(i) => format!("INT({i})"),
            TokenKind::Float(f) => format!("FLOAT({f:?})"),
            TokenKind::Identifier | TokenKind::Illegal => {
                format!("{}({:?})", token.kind.name(), token.lexeme)
            }
            kind => kind.name().to_string(),
        };
        let diag = miette::miette!(
            labels = vec![token.span.labeled(kind)],
            severity = miette::Severity::Advice,
            "found a token at line {}, column {}",
            token.line,
            token.column,
        )
        .with_source_code(source_code.clone());
        eprintln!("{:?}", diag);
    }
}

/// Renders the tree one node per line, children indented under their parent.
pub fn format_program(program: &Program) -> String {
    let mut out = String::from("Program\n");
    for statement in &program.statements {
        out.push_str("  ExpressionStatement\n");
        format_expression(&mut out, &statement.node, 2);
    }

    out
}

fn format_expression(out: &mut String, expression: &Expression, depth: usize) {
    let indent = "  ".repeat(depth);
    match expression {
        Expression::IntegerLiteral {
            value,
            line,
            column,
        } => out.push_str(&format!(
            "{indent}IntegerLiteral {value} (line {line}, column {column})\n"
        )),
        Expression::FloatLiteral { value } => {
            out.push_str(&format!("{indent}FloatLiteral {value:?}\n"))
        }
        Expression::Infix(InfixExpression { lhs, op, rhs }) => {
            out.push_str(&format!("{indent}InfixExpression {}\n", op.node));
            format_expression(out, lhs, depth + 1);
            format_expression(out, rhs, depth + 1);
        }
    }
}
