//! Report assembly module.
//!
//! Composes the file name, column name, column statistics, quality score
//! and (when one was produced) the distribution plot into a single-page PDF.
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_analyzer::reporting::{ReportAssembler, ReportContent};
//!
//! let content = ReportContent {
//!     file_name: "sales.csv".to_string(),
//!     column: "price",
//!     stats: Some(&stats),
//!     score: quality.score,
//!     plot: plot.as_ref(),
//!     generated_at: chrono::Local::now(),
//! };
//! ReportAssembler::default().assemble(&content, Path::new("analysis_report.pdf"))?;
//! ```

mod generator;

pub use generator::{
    LineStyle, NO_STATS_LINE, REPORT_TITLE, ReportAssembler, ReportContent, ReportLine,
};
