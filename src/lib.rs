use std::path::Path;

pub mod ast;
pub mod debug;
pub mod error;
pub mod eval;
mod helpers;
pub mod lexer;
pub mod math;
pub mod parser;
pub mod token;

pub use error::Error;

/// Lexes, parses and evaluates `source`. Returns `None` when the input has no statements.
pub fn run(filename: Option<&Path>, source: &str) -> Result<Option<ast::Number>, Error> {
    let program = parser::Parser::new(filename, source).parse()?;
    Ok(eval::evaluate_program(&program)?)
}
