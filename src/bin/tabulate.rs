//! tabulate: Flatten a JSON array of objects into CSV
//!
//! Usage:
//!   # Fields on the command line, read a file, write stdout
//!   tabulate orders.json -f id=Order -f 'items[*].sku=SKU'
//!
//!   # Read from stdin, write a semicolon-separated file
//!   cat orders.json | tabulate -f id -f 'items[*].sku' -d ';' -o orders.csv
//!
//!   # Fields, transforms and delimiter from a configuration file
//!   tabulate orders.json --config fields.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::PathBuf;
use tabulate::{ConversionConfig, Converter, FieldConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tabulate")]
#[command(about = "Flatten a nested JSON array per object into CSV rows", long_about = None)]
struct Args {
    /// Input file holding a JSON array (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output CSV file (use stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// JSON configuration file with fields, delimiter and header settings
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output column as PATH or PATH=HEADER; replaces the configured fields
    #[arg(long = "field", short = 'f', value_name = "PATH[=HEADER]")]
    fields: Vec<String>,

    /// Field delimiter (default: ",")
    #[arg(long, short = 'd')]
    delimiter: Option<char>,

    /// Don't write a header row
    #[arg(long)]
    no_header: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Build config
    let mut config = match &args.config {
        Some(path) => ConversionConfig::from_path(path)?,
        None => ConversionConfig::default(),
    };
    if !args.fields.is_empty() {
        config.fields = args.fields.iter().map(|f| FieldConfig::parse_spec(f)).collect();
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if args.no_header {
        config.header = false;
    }
    if config.fields.is_empty() {
        bail!("no fields given; use --field or --config");
    }

    let converter = Converter::new(&config.into_options()?)?;

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(stdin().lock()),
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(stdout().lock())),
    };

    let summary = converter
        .run(reader, writer)
        .context("Failed to convert JSON to CSV")?;

    if summary.records == 0 {
        tracing::warn!("No JSON records found in input");
    }

    Ok(())
}

/// Log to stderr so stdout carries only CSV.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,tabulate={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
