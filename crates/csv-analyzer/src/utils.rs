//! Shared utilities for the analyzer stages.

use polars::prelude::*;
use std::path::Path;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a column dtype for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Boolean type (analyzed as 0/1)
    Boolean,
    /// Date or datetime types
    Datetime,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    is_numeric_dtype(dtype) && !matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    ) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// The is-numeric predicate used for statistics and plot selection.
///
/// Booleans count as numeric.
pub fn is_numeric_series(series: &Series) -> bool {
    matches!(
        get_dtype_category(series.dtype()),
        DtypeCategory::Numeric | DtypeCategory::Boolean
    )
}

/// Non-missing values of a numeric series as `f64`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.drop_nulls().cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().flatten().collect())
}

/// Number of distinct non-missing values.
pub fn distinct_non_missing(series: &Series) -> PolarsResult<usize> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(0);
    }
    non_null.n_unique()
}

// =============================================================================
// Misc
// =============================================================================

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// The file-name component of a path, for display.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
