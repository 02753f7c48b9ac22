//! Table loading.
//!
//! Reads one comma-delimited file with a header row into a [`DataFrame`].
//! Any failure comes back as [`AnalyzerError::LoadFailed`] so the caller can
//! stop the run cleanly instead of unwinding.

use crate::error::{AnalyzerError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, error, info};

/// Cell contents read as missing values.
pub const MISSING_MARKERS: [&str; 11] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Loader for delimited text tables.
pub struct TableLoader;

impl TableLoader {
    /// Load a CSV file, falling back to a normalized copy of its content
    /// when the strict read fails.
    pub fn load(path: &Path) -> Result<DataFrame> {
        match Self::load_inner(path) {
            Ok(df) => {
                info!(
                    "CSV loaded successfully: {} rows x {} columns",
                    df.height(),
                    df.width()
                );
                Ok(df)
            }
            Err(e) => {
                error!("Failed to load CSV: {}", e);
                Err(e)
            }
        }
    }

    fn load_inner(path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(AnalyzerError::load_failed(path, "file not found"));
        }

        let df = match Self::read_strict(path) {
            Ok(df) => df,
            Err(e) => {
                debug!("Standard loading failed: {}", e);
                let content = std::fs::read_to_string(path)
                    .map_err(|e| AnalyzerError::load_failed(path, e))?;
                Self::read_from_str(&clean_csv_content(&content))
                    .map_err(|e| AnalyzerError::load_failed(path, e))?
            }
        };

        if df.width() == 0 {
            return Err(AnalyzerError::load_failed(path, "no columns to parse"));
        }

        Ok(df)
    }

    fn read_strict(path: &Path) -> PolarsResult<DataFrame> {
        read_options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
    }

    /// Parse CSV text that is already in memory.
    pub fn read_from_str(content: &str) -> PolarsResult<DataFrame> {
        read_options()
            .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
            .finish()
    }
}

fn read_options() -> CsvReadOptions {
    let null_values = MISSING_MARKERS.iter().map(|m| (*m).into()).collect();

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(NullValues::AllColumns(null_values))),
        )
}

/// Collapse doubled quote runs and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
