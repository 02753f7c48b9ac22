//! Configuration types for the analyzer.
//!
//! The CLI always runs with [`AnalyzerConfig::default()`]; the builder exists
//! so library callers and tests can redirect outputs and tune the plot and
//! scoring constants.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the deduplicated table written after scoring.
pub const DEFAULT_CLEANED_FILE: &str = "cleaned_data.csv";
/// Default name of the distribution plot image.
pub const DEFAULT_PLOT_FILE: &str = "column_plot.png";
/// Default name of the PDF report.
pub const DEFAULT_REPORT_FILE: &str = "analysis_report.pdf";

/// Configuration for an analyzer run.
///
/// Use [`AnalyzerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use csv_analyzer::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .output_dir("out")
///     .histogram_bins(30)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory the three output files are written to.
    /// Default: "." (the working directory)
    pub output_dir: PathBuf,

    /// File name of the cleaned table.
    /// Default: "cleaned_data.csv"
    pub cleaned_file_name: String,

    /// File name of the plot image.
    /// Default: "column_plot.png"
    pub plot_file_name: String,

    /// File name of the PDF report.
    /// Default: "analysis_report.pdf"
    pub report_file_name: String,

    /// A numeric column with more distinct values than this is drawn as a
    /// histogram; otherwise as a bar chart of value counts.
    /// Default: 20
    pub histogram_threshold: usize,

    /// Number of equal-width histogram bins.
    /// Default: 20
    pub histogram_bins: usize,

    /// Points deducted from the quality score per constant column.
    /// Default: 5.0
    pub constant_column_penalty: f64,

    /// Plot canvas size in pixels (width, height).
    /// Default: (1000, 600)
    pub plot_size: (u32, u32),

    /// Width of the embedded plot in the report, in millimetres.
    /// Default: 180.0
    pub report_image_width_mm: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cleaned_file_name: DEFAULT_CLEANED_FILE.to_string(),
            plot_file_name: DEFAULT_PLOT_FILE.to_string(),
            report_file_name: DEFAULT_REPORT_FILE.to_string(),
            histogram_threshold: 20,
            histogram_bins: 20,
            constant_column_penalty: 5.0,
            plot_size: (1000, 600),
            report_image_width_mm: 180.0,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Full path of the cleaned table.
    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    /// Full path of the plot image.
    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.plot_file_name)
    }

    /// Full path of the PDF report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }

    /// Output directory as a path.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("cleaned_file_name", &self.cleaned_file_name),
            ("plot_file_name", &self.plot_file_name),
            ("report_file_name", &self.report_file_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyFileName(field.to_string()));
            }
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBins(self.histogram_bins));
        }

        if !(self.constant_column_penalty >= 0.0) {
            return Err(ConfigValidationError::InvalidPenalty(
                self.constant_column_penalty,
            ));
        }

        if self.plot_size.0 == 0 || self.plot_size.1 == 0 {
            return Err(ConfigValidationError::InvalidPlotSize(
                self.plot_size.0,
                self.plot_size.1,
            ));
        }

        if !(self.report_image_width_mm > 0.0) {
            return Err(ConfigValidationError::InvalidImageWidth(
                self.report_image_width_mm,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Output file name '{0}' must not be empty")]
    EmptyFileName(String),

    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidBins(usize),

    #[error("Invalid constant column penalty: {0} (must be non-negative)")]
    InvalidPenalty(f64),

    #[error("Invalid plot size: {0}x{1} (both sides must be positive)")]
    InvalidPlotSize(u32, u32),

    #[error("Invalid report image width: {0} mm (must be positive)")]
    InvalidImageWidth(f64),
}

impl From<ConfigValidationError> for crate::error::AnalyzerError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalyzerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    output_dir: Option<PathBuf>,
    cleaned_file_name: Option<String>,
    plot_file_name: Option<String>,
    report_file_name: Option<String>,
    histogram_threshold: Option<usize>,
    histogram_bins: Option<usize>,
    constant_column_penalty: Option<f64>,
    plot_size: Option<(u32, u32)>,
    report_image_width_mm: Option<f64>,
}

impl AnalyzerConfigBuilder {
    /// Set the directory all output files are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the file name of the cleaned table.
    pub fn cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = Some(name.into());
        self
    }

    /// Set the file name of the plot image.
    pub fn plot_file_name(mut self, name: impl Into<String>) -> Self {
        self.plot_file_name = Some(name.into());
        self
    }

    /// Set the file name of the PDF report.
    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = Some(name.into());
        self
    }

    /// Set the distinct-value count above which numeric columns get a histogram.
    pub fn histogram_threshold(mut self, threshold: usize) -> Self {
        self.histogram_threshold = Some(threshold);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the per-constant-column score penalty.
    pub fn constant_column_penalty(mut self, penalty: f64) -> Self {
        self.constant_column_penalty = Some(penalty);
        self
    }

    /// Set the plot canvas size in pixels.
    pub fn plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_size = Some((width, height));
        self
    }

    /// Set the width of the embedded plot in the report (mm).
    pub fn report_image_width_mm(mut self, width: f64) -> Self {
        self.report_image_width_mm = Some(width);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        let defaults = AnalyzerConfig::default();
        let config = AnalyzerConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            cleaned_file_name: self
                .cleaned_file_name
                .unwrap_or(defaults.cleaned_file_name),
            plot_file_name: self.plot_file_name.unwrap_or(defaults.plot_file_name),
            report_file_name: self.report_file_name.unwrap_or(defaults.report_file_name),
            histogram_threshold: self
                .histogram_threshold
                .unwrap_or(defaults.histogram_threshold),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            constant_column_penalty: self
                .constant_column_penalty
                .unwrap_or(defaults.constant_column_penalty),
            plot_size: self.plot_size.unwrap_or(defaults.plot_size),
            report_image_width_mm: self
                .report_image_width_mm
                .unwrap_or(defaults.report_image_width_mm),
        };

        config.validate()?;
        Ok(config)
    }
}
