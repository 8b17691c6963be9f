use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
};

use clap::Parser;
use monkey_lexer::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::{tokenize, Lexer},
    render_error, Position,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Print the tokens of a source file", long_about = None)]
struct Cli {
    /// Source file to tokenize; reads lines from stdin when omitted
    file: Option<PathBuf>,

    /// Stop at the first illegal character and report it
    #[arg(short, long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &cli.file {
        Some(path) => run_file(path, cli.strict),
        None => repl(cli.strict),
    }
}

fn run_file(path: &Path, strict: bool) -> ExitCode {
    let file_name = path.to_string_lossy().into_owned();

    let source = match fs::read(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", io_error(file_name, e));
            return ExitCode::FAILURE;
        }
    };

    debug!("Tokenizing file: {:?}", path);

    if print_tokens(source, Some(file_name), strict) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn io_error(path: String, e: io::Error) -> Error {
    Error::new(
        ErrorImpl::Io {
            path: path.clone(),
            message: e.to_string(),
        },
        Position(0, Rc::new(path)),
    )
}

fn repl(strict: bool) -> ExitCode {
    info!("reading from stdin");

    let stdin = io::stdin();
    let mut lines = stdin.lock().split(b'\n');

    loop {
        print!(">> ");
        let _ = io::stdout().flush();

        match lines.next() {
            Some(Ok(line)) => {
                print_tokens(line, None, strict);
            }
            Some(Err(e)) => {
                eprintln!("Error: {}", io_error(String::from("<stdin>"), e));
                return ExitCode::FAILURE;
            }
            None => {
                println!();
                return ExitCode::SUCCESS;
            }
        }
    }
}

/// Prints one token per line. Returns `false` when strict mode hit an
/// illegal character.
fn print_tokens(source: Vec<u8>, file: Option<String>, strict: bool) -> bool {
    if !strict {
        for token in Lexer::new(source, file) {
            println!("{}", token);
        }
        return true;
    }

    match tokenize(source.clone(), file) {
        Ok(tokens) => {
            for token in tokens {
                println!("{}", token);
            }
            true
        }
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            false
        }
    }
}
