use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use json_path_matcher::{query, Context, InputFormat, Mode};
use tracing_subscriber::EnvFilter;

/// Runs a path expression against a YAML or JSON document.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path expression, e.g. "$..[?(@.kind == 'ServiceAccount')].kind"
    expression: String,
    /// Document to query; stdin when omitted
    file: Option<PathBuf>,
    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,
    /// List every node on the way to a match instead of the matches
    #[arg(long)]
    encloses: bool,
    /// Show only the first hit
    #[arg(long)]
    first: bool,
    /// Print hits as a JSON array
    #[arg(long)]
    json: bool,
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let source = match read_source(args.file.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let ctx = Context {
        mode: if args.encloses { Mode::Encloses } else { Mode::Matches },
        format: args.format.resolve(args.file.as_deref()),
        first: args.first,
    };

    let reports = match query(&source, &args.expression, &ctx) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("cannot render output: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    for report in &reports {
        match &report.value {
            Some(value) => println!("{}: {value}", report.location),
            None => println!("{}", report.location),
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(file: Option<&PathBuf>) -> json_path_matcher::Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
