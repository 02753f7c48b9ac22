//! Data cleaning module.
//!
//! Removes rows that are fully identical to an earlier row. Only rows are
//! removed; columns and their order are untouched.

use crate::error::Result;
use polars::prelude::*;
use tracing::{debug, info};

/// Removes exact-duplicate rows, keeping the first occurrence.
pub struct Deduplicator;

impl Deduplicator {
    /// Deduplicate a table.
    ///
    /// Returns the cleaned table and the number of removed rows. Row order
    /// among the kept rows is preserved; missing cells compare equal.
    pub fn deduplicate(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        if before == 0 || df.width() == 0 {
            info!("Removed 0 duplicate rows.");
            return Ok((df, 0));
        }

        let deduped = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        let removed = before - deduped.height();

        info!("Removed {} duplicate rows.", removed);
        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            debug!("Duplicates were {:.1}% of {} rows", pct, before);
        }

        Ok((deduped, removed))
    }

    /// Number of rows that duplicate an earlier row.
    pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(0);
        }
        let unique = df
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(df.height() - unique.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id_category_with_duplicate() -> DataFrame {
        df!(
            "id" => [1i64, 1, 2],
            "category" => ["a", "a", "b"]
        )
        .unwrap()
    }

    #[test]
    fn test_removes_exact_duplicates_keeping_first() {
        let (cleaned, removed) = Deduplicator::deduplicate(id_category_with_duplicate()).unwrap();

        assert_eq!(removed, 1);
        let expected = df!(
            "id" => [1i64, 2],
            "category" => ["a", "b"]
        )
        .unwrap();
        assert!(cleaned.equals(&expected));
    }

    #[test]
    fn test_preserves_row_and_column_order() {
        let df = df!(
            "z" => [3i64, 1, 3, 2, 1],
            "a" => ["c", "a", "c", "b", "a"]
        )
        .unwrap();
        let (cleaned, removed) = Deduplicator::deduplicate(df).unwrap();

        assert_eq!(removed, 2);
        let names: Vec<String> = cleaned
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["z".to_string(), "a".to_string()]);
        let z: Vec<Option<i64>> = cleaned.column("z").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(z, vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn test_rows_differing_in_one_column_are_kept() {
        let df = df!(
            "a" => [1i64, 1],
            "b" => ["x", "y"]
        )
        .unwrap();
        let (cleaned, removed) = Deduplicator::deduplicate(df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(cleaned.height(), 2);
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let df = df!(
            "a" => [Some(1i64), Some(1)],
            "b" => [None::<&str>, None]
        )
        .unwrap();
        let (cleaned, removed) = Deduplicator::deduplicate(df).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(cleaned.height(), 1);
    }

    #[test]
    fn test_idempotent() {
        let (once, _) = Deduplicator::deduplicate(id_category_with_duplicate()).unwrap();
        let (twice, removed_again) = Deduplicator::deduplicate(once.clone()).unwrap();

        assert_eq!(removed_again, 0);
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_row_count_never_grows() {
        let df = df!("v" => [1i64, 2, 3]).unwrap();
        let before = df.height();
        let (cleaned, removed) = Deduplicator::deduplicate(df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(cleaned.height(), before);
    }

    #[test]
    fn test_count_duplicates() {
        assert_eq!(Deduplicator::count_duplicates(&id_category_with_duplicate()).unwrap(), 1);
        assert_eq!(Deduplicator::count_duplicates(&DataFrame::empty()).unwrap(), 0);
    }
}
