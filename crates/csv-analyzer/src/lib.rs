//! CSV Data Analyzer Library
//!
//! A single-file exploratory analysis tool built with Rust and Polars.
//!
//! # Overview
//!
//! One run of the analyzer performs a fixed sequence of stages:
//!
//! - **Load**: parse a comma-delimited file with a header row
//! - **Deduplicate**: drop exact-duplicate rows, keeping the first occurrence
//! - **Score**: a heuristic data-quality score in [0, 100]
//! - **Analyze**: mean, median, sample std, min and max of one numeric column
//! - **Persist**: write the deduplicated table to `cleaned_data.csv`
//! - **Plot**: a histogram or value-count bar chart in `column_plot.png`
//! - **Report**: a one-page PDF in `analysis_report.pdf`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use csv_analyzer::{Analyzer, AnalyzerConfig};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::builder()
//!     .output_dir("out")
//!     .build()?;
//!
//! let summary = Analyzer::new(config).run(Path::new("sales.csv"), "price")?;
//! println!("{}", summary.quality);
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`AnalyzerError`]. A missing input file
//! or an unparsable table is a [`AnalyzerError::LoadFailed`] and stops the
//! run before any output is written. A missing column or an empty plot is
//! logged and the run carries on.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod plotting;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::Deduplicator;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, ConfigValidationError};
pub use error::{AnalyzerError, Result as AnalyzerResult, ResultExt};
pub use loader::{MISSING_MARKERS, TableLoader};
pub use pipeline::{Analyzer, PipelineStage};
pub use plotting::{DistributionPlotter, PlotPlan};
pub use profiler::ColumnAnalyzer;
pub use quality::QualityScorer;
pub use reporting::{ReportAssembler, ReportContent};
pub use types::{
    ColumnStats, NumericSummary, PlotArtifact, PlotKind, QualityReport, ReportArtifact, RunSummary,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype, is_numeric_series};
