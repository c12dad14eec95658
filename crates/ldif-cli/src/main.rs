//! LDIF to CSV CLI
//!
//! Reads LDIF files named on the command line and writes their entries as a
//! single CSV table to stdout.

use clap::{ArgAction, Parser, ValueEnum};
use ldif_core::{
    load_files, parse_lines, write_directory, ColumnOrder, Error, OutputFormat, Quoting,
    WriteOptions,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "ldif2csv")]
#[command(about = "Convert LDIF files to a CSV table", long_about = None)]
#[command(version)]
struct Cli {
    /// LDIF files to read, concatenated in order
    files: Vec<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Order columns alphabetically instead of by first appearance
    #[arg(long)]
    sort_columns: bool,

    /// Quote and escape CSV fields per RFC 4180
    #[arg(long)]
    rfc4180: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl Cli {
    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            format: match self.format {
                Format::Csv => OutputFormat::Csv,
                Format::Json => OutputFormat::Json,
            },
            quoting: if self.rfc4180 {
                Quoting::Rfc4180
            } else {
                Quoting::Legacy
            },
            column_order: if self.sort_columns {
                ColumnOrder::Sorted
            } else {
                ColumnOrder::FirstSeen
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        eprintln!("LDIF filename is missing!");
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        match e {
            Error::FileRead { path, source } => {
                eprintln!("Error reading file '{}': {}", path.display(), source);
            }
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> ldif_core::Result<()> {
    let lines = load_files(&cli.files, |path| eprintln!("Reading: {}", path.display()))?;
    let directory = parse_lines(&lines);

    tracing::info!(
        entries = directory.entry_count(),
        columns = directory.attributes.len(),
        "converted input"
    );

    let options = cli.write_options();
    match &cli.output {
        Some(path) => {
            let file = File::create(path)?;
            write_directory(&directory, &options, BufWriter::new(file))
        }
        None => {
            let stdout = io::stdout();
            write_directory(&directory, &options, BufWriter::new(stdout.lock()))
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}
