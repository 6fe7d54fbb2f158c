use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use haxian::{debug, lexer, parser};
use miette::{IntoDiagnostic, WrapErr};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// The Haxian source file to run. Starts an interactive prompt when omitted.
    filename: Option<PathBuf>,

    /// Debug the lexer, printing out each token. Does not parse or evaluate the input.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,

    /// Debug the parser, printing out the AST. Does not evaluate the input.
    #[clap(long, default_value = "false")]
    debug_parser: bool,
}

#[derive(Debug, Copy, Clone)]
struct Options {
    debug_lexer: bool,
    debug_parser: bool,
}

fn main() -> miette::Result<()> {
    let Input {
        filename,
        debug_lexer,
        debug_parser,
    } = Input::parse();
    let options = Options {
        debug_lexer,
        debug_parser,
    };

    match filename {
        Some(filename) => {
            if !run_file(&filename, options)? {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_repl(options),
    }
}

fn run_repl(options: Options) -> miette::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("haxian> ");
        io::stdout().flush().into_diagnostic()?;

        line.clear();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            println!();
            return Ok(());
        }

        match Command::from_line(&line) {
            Command::Skip => continue,
            Command::Exit => {
                println!("Exiting interpreter.");
                return Ok(());
            }
            Command::LoadFile(path) => {
                // A missing file is reported but does not end the session.
                if let Err(e) = run_file(path, options) {
                    eprintln!("{:?}", e);
                }
            }
            Command::Eval(input) => {
                run_source(None, input, options);
            }
        }
    }
}

/// What the interactive prompt does with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'line> {
    Skip,
    Exit,
    LoadFile(&'line Path),
    Eval(&'line str),
}

impl<'line> Command<'line> {
    fn from_line(line: &'line str) -> Self {
        let input = line.trim();
        if input.is_empty() {
            Command::Skip
        } else if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Command::Exit
        } else if input.ends_with(".hax") {
            Command::LoadFile(Path::new(input))
        } else {
            Command::Eval(input)
        }
    }
}

/// Returns whether the file ran without a parse or evaluation fault.
fn run_file(filename: &Path, options: Options) -> miette::Result<bool> {
    let source = std::fs::read_to_string(filename)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read source file {}", filename.display()))?;

    Ok(run_source(Some(filename), &source, options))
}

fn run_source(filename: Option<&Path>, source: &str, options: Options) -> bool {
    let source_code = lexer::Lexer::new(filename, source).get_source_code();

    if options.debug_lexer {
        debug::print_tokens(lexer::Lexer::new(filename, source), source_code);
        return true;
    }

    if options.debug_parser {
        let (program, errors) = parser::Parser::new(filename, source).parse_program();
        print!("{}", debug::format_program(&program));
        for error in &errors {
            eprintln!(
                "{:?}",
                miette::Report::new(error.clone()).with_source_code(source_code.clone())
            );
        }
        return errors.is_empty();
    }

    match haxian::run(filename, source) {
        Ok(Some(value)) => {
            println!("{value}");
            true
        }
        Ok(None) => true,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e).with_source_code(source_code));
            false
        }
    }
}
