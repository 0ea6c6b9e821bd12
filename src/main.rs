//! Canon JSON CLI.
//!
//! Reads a JSON document from a file or stdin and either re-serializes it
//! canonically or just validates it. Results and errors are printed to
//! stdout as JSON; diagnostics go to stderr via `tracing`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use canon_json::json::Map;
use canon_json::{parse_with_limits, serialize, stringify, Limits, ParseError, Value};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "CANONJSON_LOG";

#[derive(Parser)]
#[command(name = "canonjson")]
#[command(about = "Canon JSON - strict parser and canonical serializer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Print the canonical serialization of a document
    Format {
        /// Indent with tabs and break lines with CRLF
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate a document and report the type of its top-level value
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Maximum array/object nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Input file (defaults to stdin)
    path: Option<PathBuf>,
}

impl InputArgs {
    fn limits(&self) -> Limits {
        match self.max_depth {
            Some(depth) => Limits::unbounded().with_max_nesting_depth(depth),
            None => Limits::unbounded(),
        }
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        match &self.path {
            Some(path) => fs::read(path),
            None => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `{"err":{...}}` report for a parse failure.
fn error_report(err: &ParseError) -> Value {
    let as_int = |n: usize| Value::Int(i64::try_from(n).unwrap_or(i64::MAX));

    let mut detail = Map::new();
    detail.insert("code".to_string(), Value::Int(i64::from(err.code())));
    detail.insert("name".to_string(), Value::String(err.kind().name().to_string()));
    detail.insert("message".to_string(), Value::String(err.to_string()));
    detail.insert("line".to_string(), as_int(err.line()));
    detail.insert("column".to_string(), as_int(err.column()));

    let mut report = Map::new();
    report.insert("err".to_string(), Value::Object(detail));
    Value::Object(report)
}

fn ok_report(value: &Value) -> Value {
    let mut detail = Map::new();
    detail.insert("type".to_string(), Value::String(value.type_name().to_string()));

    let mut report = Map::new();
    report.insert("ok".to_string(), Value::Object(detail));
    Value::Object(report)
}

/// Parse the input, printing an error report on failure.
fn load(input: &InputArgs) -> Result<Value, ExitCode> {
    let bytes = input.read().map_err(|e| {
        error!(error = %e, path = ?input.path, "failed to read input");
        ExitCode::from(2)
    })?;
    debug!(len = bytes.len(), "read input");

    parse_with_limits(&bytes, input.limits()).map_err(|e| {
        println!("{}", stringify(&error_report(&e), false));
        ExitCode::FAILURE
    })
}

fn run(command: Commands) -> Result<(), ExitCode> {
    match command {
        Commands::Version => {
            println!("canonjson v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Format { pretty, input } => {
            let value = load(&input)?;
            let mut out = serialize(&value, pretty);
            out.push(b'\n');
            io::stdout().write_all(&out).map_err(|e| {
                error!(error = %e, "failed to write output");
                ExitCode::from(2)
            })?;
        }
        Commands::Check { input } => {
            let value = load(&input)?;
            println!("{}", stringify(&ok_report(&value), false));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(command) => match run(command) {
            Ok(()) => ExitCode::SUCCESS,
            Err(code) => code,
        },
        None => {
            println!("canonjson v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}
