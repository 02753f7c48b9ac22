//! Custom error types for the analyzer.
//!
//! This module provides the error hierarchy using `thiserror`. Load,
//! column-lookup and plot failures are recoverable: the orchestrator checks
//! [`AnalyzerError::is_recoverable`] and either stops early or carries on
//! without the missing artifact.
//!
//! Errors are serializable so a run failure can be emitted as
//! machine-readable `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input file missing, unreadable, or not parseable as a table.
    #[error("Failed to load '{}': {reason}", .path.display())]
    LoadFailed { path: PathBuf, reason: String },

    /// Column was not found in the table.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// The distribution plot could not be drawn.
    #[error("Failed to render plot: {0}")]
    PlotFailed(String),

    /// The PDF report could not be composed.
    #[error("Failed to assemble report: {0}")]
    ReportFailed(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// PDF writer error.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Image decoding error (reading the rendered plot back for embedding).
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalyzerError>,
    },
}

impl AnalyzerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalyzerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a [`AnalyzerError::LoadFailed`] from any displayable cause.
    pub fn load_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AnalyzerError::LoadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LoadFailed { .. } => "LOAD_FAILED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::PlotFailed(_) => "PLOT_FAILED",
            Self::ReportFailed(_) => "REPORT_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Pdf(_) => "PDF_ERROR",
            Self::Image(_) => "IMAGE_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a load failure.
    pub fn is_load_failure(&self) -> bool {
        match self {
            Self::LoadFailed { .. } => true,
            Self::WithContext { source, .. } => source.is_load_failure(),
            _ => false,
        }
    }

    /// Check if the run can report this error and continue (or stop cleanly).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::LoadFailed { .. } | Self::ColumnNotFound(_) | Self::PlotFailed(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalyzerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalyzerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalyzerError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalyzerError::Io(e).with_context(context))
    }
}
