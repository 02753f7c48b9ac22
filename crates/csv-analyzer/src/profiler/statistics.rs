//! Descriptive statistics for numeric columns.

use crate::error::Result;
use crate::types::NumericSummary;
use crate::utils::numeric_values;
use polars::prelude::*;

/// Summarize the non-missing values of a numeric series.
///
/// Standard deviation uses sample semantics (ddof = 1) and is undefined for
/// fewer than two values. Every statistic is undefined for an empty sample.
pub(crate) fn summarize_numeric(series: &Series) -> Result<NumericSummary> {
    let values = numeric_values(series)?;
    let count = values.len();

    if count == 0 {
        return Ok(NumericSummary {
            count,
            mean: None,
            median: None,
            std_dev: None,
            min: None,
            max: None,
        });
    }

    let sample = Series::new(series.name().clone(), values);
    let floats = sample.f64()?;

    Ok(NumericSummary {
        count,
        mean: sample.mean(),
        median: sample.median(),
        std_dev: calculate_std(&sample),
        min: floats.min(),
        max: floats.max(),
    })
}

/// Sample standard deviation, `None` below two values.
pub(crate) fn calculate_std(series: &Series) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    series.std(1)
}
