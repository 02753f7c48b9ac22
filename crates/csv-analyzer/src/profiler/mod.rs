//! Column profiling module.
//!
//! Looks up one named column and, if it is numeric, computes mean, median,
//! sample standard deviation, minimum and maximum over its non-missing
//! values. Non-numeric columns yield [`ColumnStats::NonNumeric`], which is a
//! normal outcome rather than an error.

mod statistics;

use crate::error::{AnalyzerError, Result};
use crate::types::ColumnStats;
use crate::utils::is_numeric_series;
use polars::prelude::*;
use tracing::info;

pub(crate) use statistics::summarize_numeric;

/// Computes descriptive statistics for one column.
pub struct ColumnAnalyzer;

impl ColumnAnalyzer {
    /// Analyze `column` in `df`.
    ///
    /// Returns [`AnalyzerError::ColumnNotFound`] if the column is absent.
    pub fn analyze(df: &DataFrame, column: &str) -> Result<ColumnStats> {
        let col = df
            .column(column)
            .map_err(|_| AnalyzerError::ColumnNotFound(column.to_string()))?;
        let series = col.as_materialized_series();

        let stats = if is_numeric_series(series) {
            ColumnStats::Numeric(summarize_numeric(series)?)
        } else {
            info!(
                "Column '{}' is non-numeric. Skipping numeric stats.",
                column
            );
            ColumnStats::NonNumeric
        };

        info!("Stats for '{}': {}", column, stats);
        Ok(stats)
    }
}
