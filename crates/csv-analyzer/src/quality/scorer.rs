use crate::cleaner::Deduplicator;
use crate::error::Result;
use crate::types::QualityReport;
use crate::utils::{distinct_non_missing, round_to};
use polars::prelude::*;
use tracing::info;

/// Additive-penalty quality score.
///
/// `score = 100 - missing% - duplicate% - penalty * constant_columns`,
/// floored at 0 and rounded to 2 decimals.
pub struct QualityScorer {
    constant_column_penalty: f64,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self {
            constant_column_penalty: 5.0,
        }
    }
}

impl QualityScorer {
    pub fn new(constant_column_penalty: f64) -> Self {
        Self {
            constant_column_penalty,
        }
    }

    pub fn score(&self, df: &DataFrame) -> Result<QualityReport> {
        let rows = df.height();
        let total_cells = rows * df.width();

        let missing_cells: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        let missing_percentage = if total_cells > 0 {
            missing_cells as f64 / total_cells as f64 * 100.0
        } else {
            0.0
        };

        let duplicate_rows = Deduplicator::count_duplicates(df)?;
        let duplicate_percentage = if rows > 0 {
            duplicate_rows as f64 / rows as f64 * 100.0
        } else {
            0.0
        };

        let constant_columns = Self::constant_columns(df)?;

        let raw = 100.0
            - missing_percentage
            - duplicate_percentage
            - self.constant_column_penalty * constant_columns.len() as f64;
        let score = round_to(raw.max(0.0), 2);

        let report = QualityReport {
            total_cells,
            missing_cells,
            missing_percentage,
            duplicate_rows,
            duplicate_percentage,
            constant_columns,
            score,
        };

        for line in report.to_string().lines() {
            info!("{}", line);
        }

        Ok(report)
    }

    /// Columns with exactly one distinct non-missing value.
    pub fn constant_columns(df: &DataFrame) -> Result<Vec<String>> {
        let mut constant = Vec::new();
        for col in df.get_columns() {
            if distinct_non_missing(col.as_materialized_series())? == 1 {
                constant.push(col.name().to_string());
            }
        }
        Ok(constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_table_scores_100() {
        // id/category table after deduplication
        let df = df!(
            "id" => [1i64, 2],
            "category" => ["a", "b"]
        )
        .unwrap();
        let report = QualityScorer::default().score(&df).unwrap();

        assert_eq!(report.missing_cells, 0);
        assert_eq!(report.duplicate_rows, 0);
        assert!(report.constant_columns.is_empty());
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_single_constant_column_scores_95() {
        // ten rows of 5 collapse to one after deduplication
        let df = df!("v" => [5i64]).unwrap();
        let report = QualityScorer::default().score(&df).unwrap();

        assert_eq!(report.constant_columns, vec!["v".to_string()]);
        assert_eq!(report.score, 95.0);
    }

    #[test]
    fn test_all_constant_columns() {
        let df = df!(
            "a" => [1i64],
            "b" => ["x"],
            "c" => [true]
        )
        .unwrap();
        let report = QualityScorer::default().score(&df).unwrap();
        assert_eq!(report.score, 85.0);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut columns: Vec<Column> = Vec::new();
        for i in 0..25 {
            columns.push(Series::new(format!("c{i}").into(), &[1i64]).into());
        }
        let df = DataFrame::new(columns).unwrap();
        let report = QualityScorer::default().score(&df).unwrap();

        assert_eq!(report.constant_columns.len(), 25);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_missing_penalty() {
        let df = df!(
            "a" => [Some(1i64), None, Some(3)],
            "b" => [Some("x"), Some("y"), Some("z")]
        )
        .unwrap();
        let report = QualityScorer::default().score(&df).unwrap();

        assert_eq!(report.total_cells, 6);
        assert_eq!(report.missing_cells, 1);
        assert!((report.missing_percentage - 100.0 / 6.0).abs() < 1e-9);
        assert_eq!(report.score, 83.33);
    }

    #[test]
    fn test_duplicate_penalty_on_raw_table() {
        let df = df!(
            "id" => [1i64, 1, 2],
            "category" => ["a", "a", "b"]
        )
        .unwrap();
        let report = QualityScorer::default().score(&df).unwrap();

        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.score, 66.67);
    }

    #[test]
    fn test_all_missing_column_is_not_constant() {
        let df = df!(
            "empty" => [None::<i64>, None],
            "v" => [Some(1i64), Some(2)]
        )
        .unwrap();
        let constant = QualityScorer::constant_columns(&df).unwrap();
        assert!(constant.is_empty());
    }

    #[test]
    fn test_constant_ignores_missing() {
        let df = df!("v" => [Some(7i64), None, Some(7)]).unwrap();
        let constant = QualityScorer::constant_columns(&df).unwrap();
        assert_eq!(constant, vec!["v".to_string()]);
    }

    #[test]
    fn test_empty_table_has_no_penalties() {
        let report = QualityScorer::default().score(&DataFrame::empty()).unwrap();
        assert_eq!(report.total_cells, 0);
        assert_eq!(report.missing_percentage, 0.0);
        assert_eq!(report.duplicate_percentage, 0.0);
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_custom_penalty() {
        let df = df!("v" => [5i64, 5]).unwrap();
        let report = QualityScorer::new(10.0).score(&df).unwrap();
        // one duplicate row out of two (50%) plus one constant column (10)
        assert_eq!(report.score, 40.0);
    }
}
