//! Distribution plotting module.
//!
//! Draws the distribution of one column to a PNG image: an equal-width
//! histogram for numeric columns with many distinct values, otherwise a bar
//! chart of value counts ordered by value. A column with nothing to draw
//! produces no image and leaves any existing file untouched.

mod fonts;
mod plan;
mod render;

pub use plan::{BarCategory, HistogramBin, PlotPlan, bar_categories, histogram_bins};

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::types::PlotArtifact;
use polars::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Renders column distributions.
#[derive(Debug, Clone)]
pub struct DistributionPlotter {
    histogram_threshold: usize,
    histogram_bins: usize,
    size: (u32, u32),
}

impl Default for DistributionPlotter {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl DistributionPlotter {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            histogram_threshold: config.histogram_threshold,
            histogram_bins: config.histogram_bins,
            size: config.plot_size,
        }
    }

    /// Decide what to draw for `column` without rendering anything.
    pub fn plan(&self, df: &DataFrame, column: &str) -> Result<PlotPlan> {
        let col = df
            .column(column)
            .map_err(|_| AnalyzerError::ColumnNotFound(column.to_string()))?;
        PlotPlan::for_series(
            col.as_materialized_series(),
            self.histogram_threshold,
            self.histogram_bins,
        )
    }

    /// Plot `column` to `path`.
    ///
    /// Returns `Ok(None)` when the column has no values to draw.
    pub fn plot(&self, df: &DataFrame, column: &str, path: &Path) -> Result<Option<PlotArtifact>> {
        let plan = self.plan(df, column)?;

        let Some(kind) = plan.kind() else {
            warn!("No data to plot for column '{}'. Skipping plot.", column);
            return Ok(None);
        };

        render::render(&plan, column, path, self.size)?;
        info!("Plot saved as {}", path.display());

        Ok(Some(PlotArtifact {
            path: path.to_path_buf(),
            kind,
        }))
    }
}
