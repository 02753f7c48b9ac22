use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Heuristic data-quality breakdown for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_cells: usize,
    pub missing_cells: usize,
    pub missing_percentage: f64,
    pub duplicate_rows: usize,
    pub duplicate_percentage: f64,
    pub constant_columns: Vec<String>,
    /// Final score in [0, 100], rounded to 2 decimals.
    pub score: f64,
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data Quality Report:")?;
        writeln!(
            f,
            "  Missing: {} ({:.2}%)",
            self.missing_cells, self.missing_percentage
        )?;
        writeln!(
            f,
            "  Duplicates: {} ({:.2}%)",
            self.duplicate_rows, self.duplicate_percentage
        )?;
        writeln!(
            f,
            "  Constant Columns: {} {:?}",
            self.constant_columns.len(),
            self.constant_columns
        )?;
        write!(f, "  Data Quality Score: {}%", self.score)
    }
}

/// Descriptive statistics over the non-missing values of a numeric column.
///
/// `None` marks a statistic that is undefined for the sample (for example the
/// standard deviation of a single value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    /// Statistics in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Std", self.std_dev),
            ("Min", self.min),
            ("Max", self.max),
        ]
    }
}

/// Result of analyzing one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericSummary),
    /// The column is not numeric; no statistics apply.
    NonNumeric,
}

impl ColumnStats {
    pub fn is_empty(&self) -> bool {
        matches!(self, ColumnStats::NonNumeric)
    }

    pub fn numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnStats::Numeric(summary) => Some(summary),
            ColumnStats::NonNumeric => None,
        }
    }
}

impl fmt::Display for ColumnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnStats::NonNumeric => write!(f, "{{}}"),
            ColumnStats::Numeric(summary) => {
                let parts: Vec<String> = summary
                    .entries()
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, format_statistic(*value)))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// Format a statistic to 2 decimals, or "undefined" when it has no value.
///
/// Present but non-finite values print as `inf`, `-inf` or `NaN`.
pub fn format_statistic(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Histogram,
    Bar,
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotKind::Histogram => write!(f, "histogram"),
            PlotKind::Bar => write!(f, "bar chart"),
        }
    }
}

/// A rendered plot image on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotArtifact {
    pub path: PathBuf,
    pub kind: PlotKind,
}

/// The written PDF report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub includes_plot: bool,
}

/// Everything one analyzer run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_file: PathBuf,
    pub column: String,
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub duplicates_removed: usize,
    pub quality: QualityReport,
    /// `None` when the column was not found.
    pub stats: Option<ColumnStats>,
    pub cleaned_file: PathBuf,
    pub plot: Option<PlotArtifact>,
    pub report: ReportArtifact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_statistic() {
        assert_eq!(format_statistic(Some(2.5)), "2.50");
        assert_eq!(format_statistic(Some(1.0 / 3.0)), "0.33");
        assert_eq!(format_statistic(None), "undefined");
        assert_eq!(format_statistic(Some(f64::INFINITY)), "inf");
        assert_eq!(format_statistic(Some(f64::NEG_INFINITY)), "-inf");
        assert_eq!(format_statistic(Some(f64::NAN)), "NaN");
    }

    #[test]
    fn test_column_stats_display() {
        let stats = ColumnStats::Numeric(NumericSummary {
            count: 1,
            mean: Some(5.0),
            median: Some(5.0),
            std_dev: None,
            min: Some(5.0),
            max: Some(5.0),
        });
        let text = stats.to_string();
        assert!(text.contains("Mean: 5.00"));
        assert!(text.contains("Std: undefined"));
        assert_eq!(ColumnStats::NonNumeric.to_string(), "{}");
    }

    #[test]
    fn test_quality_report_display() {
        let report = QualityReport {
            total_cells: 10,
            missing_cells: 1,
            missing_percentage: 10.0,
            duplicate_rows: 0,
            duplicate_percentage: 0.0,
            constant_columns: vec!["flag".to_string()],
            score: 85.0,
        };
        let text = report.to_string();
        assert!(text.contains("Missing: 1 (10.00%)"));
        assert!(text.contains("Constant Columns: 1 [\"flag\"]"));
        assert!(text.contains("Data Quality Score: 85%"));
    }
}
