use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use frontend::{
    lexer::lexer::Lexer,
    parser::parser::{parse_with_options, ParserOptions},
    render_error,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "frontend", about = "Parse a source file and report syntax errors")]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the canonical rendering of the parsed program
    #[arg(long)]
    ast: bool,

    /// Deepest expression nesting accepted before giving up
    #[arg(long, default_value_t = ParserOptions::default().max_nesting_depth)]
    max_depth: usize,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let file_name = args.file.to_string_lossy().to_string();
    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %file_name, %err, "failed to read source file");
            return ExitCode::FAILURE;
        }
    };

    if args.tokens {
        for result in Lexer::new(&source) {
            match result {
                Ok(token) => println!("{:>4}:{:<4} {:?}", token.line + 1, token.column, token),
                Err(err) => println!("{}", err),
            }
        }
    }

    let start = Instant::now();
    let options = ParserOptions {
        max_nesting_depth: args.max_depth,
    };
    let (parser, program) = parse_with_options(&source, options);
    info!(elapsed = ?start.elapsed(), diagnostics = parser.diagnostics().len(), "parsed {}", file_name);

    if args.ast {
        println!("{}", program);
    }

    for diagnostic in parser.diagnostics() {
        eprint!("{}", render_error(diagnostic, &source, &file_name));
    }

    if parser.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
