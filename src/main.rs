//! hash-to-excel CLI - CSV hash listing to formatted XLSX
//!
//! Usage: hash-to-excel [--input hashes.csv] [--output formatted_hash.xlsx]

use clap::Parser;
use hash_to_excel::types::{DEFAULT_MIN_FIELDS, DEFAULT_OUTPUT, DEFAULT_REPORT, DEFAULT_SHEET_NAME};
use hash_to_excel::{ConvertOptions, RowNumbering};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hash-to-excel")]
#[command(version)]
#[command(about = "Read a CSV file and write specific fields to a new Excel file")]
#[command(
    long_about = "Reads a CSV of file hashes and writes a formatted Excel sheet:\n\
    - Column A: sequence number\n\
    - Column B: file name (CSV column 1), wrapped after its third '_' segment\n\
    - Column C: SHA-256 hash (CSV column 2), split over two lines\n\
    - Column D: file size (CSV column 12)\n\
    Without --input the first .csv file in the current directory is used.\n\
    Exits with status 1 when the files could not be processed."
)]
struct Args {
    /// Path to the input CSV file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output XLSX file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Text report file path
    #[arg(short, long, default_value = DEFAULT_REPORT)]
    report: PathBuf,

    /// Do not write the text report
    #[arg(long)]
    no_report: bool,

    /// Sheet name
    #[arg(short, long, default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// Minimum fields a record needs (never fewer than 12)
    #[arg(long, default_value_t = DEFAULT_MIN_FIELDS)]
    min_fields: usize,

    /// Number rows by input position, leaving blank rows for skipped records
    #[arg(long)]
    keep_gaps: bool,

    /// Show progress information
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            report: (!self.no_report).then(|| self.report.clone()),
            sheet_name: self.sheet_name.clone(),
            min_fields: self.min_fields,
            numbering: if self.keep_gaps {
                RowNumbering::SourcePosition
            } else {
                RowNumbering::Compact
            },
            ..ConvertOptions::default()
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let start = Instant::now();

    let result = hash_to_excel::convert_with(&args.options(), |skipped| {
        println!(
            "Skipping record due to insufficient fields: {:?}",
            skipped.fields
        );
    });

    match result {
        Ok(summary) => {
            if summary.records == 0 {
                println!("No records found in the input CSV file.");
            }
            if args.verbose {
                eprintln!(
                    "Wrote {} of {} records in {:.2}s",
                    summary.rows_written,
                    summary.records,
                    start.elapsed().as_secs_f64()
                );
            }
            match &summary.report {
                Some(report) => println!(
                    "Successfully processed the CSV file ({}) and created {} and {}",
                    summary.input.display(),
                    summary.output.display(),
                    report.display()
                ),
                None => println!(
                    "Successfully processed the CSV file ({}) and created {}",
                    summary.input.display(),
                    summary.output.display()
                ),
            }
        }
        Err(e) => {
            println!("Failed to process files: {}", e);
            std::process::exit(1);
        }
    }
}
