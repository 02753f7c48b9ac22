//! CLI entry point for the CSV data analyzer.

use anyhow::Result;
use clap::Parser;
use csv_analyzer::{Analyzer, AnalyzerConfig, RunSummary, types::format_statistic};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "CSV Data Analyzer",
    long_about = "Loads a CSV file, removes duplicate rows, scores data quality, \
                  summarizes one column, plots its distribution and writes a PDF report.\n\n\
                  OUTPUTS (working directory):\n  \
                  cleaned_data.csv      deduplicated table\n  \
                  column_plot.png       distribution plot\n  \
                  analysis_report.pdf   one-page report\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG              log filter (default: info)\n\n\
                  EXAMPLES:\n  \
                  csv-analyzer --file sales.csv --column price"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    file: PathBuf,

    /// Column to summarize and plot
    #[arg(short, long)]
    column: String,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let analyzer = Analyzer::new(AnalyzerConfig::default());
    match analyzer.run(&args.file, &args.column) {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        // A load failure ends the run without outputs but is not a CLI error.
        Err(e) if e.is_load_failure() => {
            error!("{}", e);
            println!("Error loading file: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print a human-readable run summary.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(60));
    println!("CSV DATA ANALYZER");
    println!("{}", "=".repeat(60));
    println!("  File: {}", summary.input_file.display());
    println!(
        "  Rows: {} loaded, {} duplicates removed",
        summary.rows_loaded, summary.duplicates_removed
    );
    println!("  Columns: {}", summary.columns_loaded);
    println!();

    println!("{}", summary.quality);
    println!();

    println!("COLUMN: {}", summary.column);
    println!("{}", "-".repeat(40));
    match summary.stats.as_ref().and_then(|s| s.numeric()) {
        Some(numeric) => {
            for (label, value) in numeric.entries() {
                println!("  {}: {}", label, format_statistic(value));
            }
        }
        None if summary.stats.is_none() => println!("  Column not found"),
        None => println!("  No numeric stats available."),
    }
    println!();

    println!("OUTPUTS");
    println!("{}", "-".repeat(40));
    println!("  Cleaned data: {}", summary.cleaned_file.display());
    match &summary.plot {
        Some(plot) => println!("  Plot ({}): {}", plot.kind, plot.path.display()),
        None => println!("  Plot: not produced"),
    }
    println!("  Report: {}", summary.report.path.display());
}
