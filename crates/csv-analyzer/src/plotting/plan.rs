//! Plot selection: histogram vs. categorical bars.

use crate::error::Result;
use crate::types::PlotKind;
use crate::utils::{
    DtypeCategory, distinct_non_missing, get_dtype_category, is_integer_dtype, is_numeric_series,
    numeric_values,
};
use polars::prelude::*;
use std::collections::BTreeMap;

/// One equal-width histogram bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// One bar of a value-count chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarCategory {
    pub label: String,
    pub count: usize,
}

/// What the plotter should draw for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotPlan {
    Histogram(Vec<HistogramBin>),
    Bars(Vec<BarCategory>),
    /// No renderable data points.
    Empty,
}

impl PlotPlan {
    /// Decide how to plot `series`.
    ///
    /// Numeric columns with more than `threshold` distinct finite values get a
    /// `bins`-bin histogram; everything else gets value counts sorted by value.
    /// Infinite float values are never plotted.
    pub fn for_series(series: &Series, threshold: usize, bins: usize) -> Result<Self> {
        if is_numeric_series(series) {
            let values = finite_values(series)?;
            let distinct = if is_float_dtype(series.dtype()) {
                count_distinct(&values)
            } else {
                distinct_non_missing(series)?
            };
            if distinct > threshold {
                return Ok(PlotPlan::Histogram(histogram_bins(&values, bins)));
            }
        }

        let categories = bar_categories(series)?;
        if categories.is_empty() {
            Ok(PlotPlan::Empty)
        } else {
            Ok(PlotPlan::Bars(categories))
        }
    }

    pub fn kind(&self) -> Option<PlotKind> {
        match self {
            PlotPlan::Histogram(_) => Some(PlotKind::Histogram),
            PlotPlan::Bars(_) => Some(PlotKind::Bar),
            PlotPlan::Empty => None,
        }
    }

    /// Largest bar height.
    pub fn max_count(&self) -> usize {
        match self {
            PlotPlan::Histogram(bins) => bins.iter().map(|b| b.count).max().unwrap_or(0),
            PlotPlan::Bars(bars) => bars.iter().map(|b| b.count).max().unwrap_or(0),
            PlotPlan::Empty => 0,
        }
    }
}

/// Bin the finite `values` into `bins` equal-width bins spanning min..=max.
///
/// The last bin is closed on the right. A zero-width range is widened by 0.5
/// on each side. Non-finite values are skipped.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = ((v - lo) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Count non-missing values per distinct value, sorted by value.
///
/// Integers group on their native values, floats numerically (finite values
/// only), booleans as false/true and everything else by its text form.
pub fn bar_categories(series: &Series) -> Result<Vec<BarCategory>> {
    let dtype = series.dtype();

    if is_integer_dtype(dtype) {
        // i128 holds every i64 and u64 value exactly
        let mut counts: BTreeMap<i128, usize> = BTreeMap::new();
        if dtype.is_unsigned_integer() {
            let values = series.drop_nulls().cast(&DataType::UInt64)?;
            for v in values.u64()?.into_iter().flatten() {
                *counts.entry(i128::from(v)).or_insert(0) += 1;
            }
        } else {
            let values = series.drop_nulls().cast(&DataType::Int64)?;
            for v in values.i64()?.into_iter().flatten() {
                *counts.entry(i128::from(v)).or_insert(0) += 1;
            }
        }
        return Ok(to_categories(counts));
    }

    match get_dtype_category(dtype) {
        DtypeCategory::Boolean => {
            let mut counts: BTreeMap<bool, usize> = BTreeMap::new();
            for v in series.bool()?.into_iter().flatten() {
                *counts.entry(v).or_insert(0) += 1;
            }
            Ok(to_categories(counts))
        }
        DtypeCategory::Numeric => {
            let mut values = finite_values(series)?;
            values.sort_by(f64::total_cmp);

            let mut bars: Vec<BarCategory> = Vec::new();
            let mut previous: Option<f64> = None;
            for v in values {
                match bars.last_mut() {
                    Some(last) if previous == Some(v) => last.count += 1,
                    _ => bars.push(BarCategory {
                        label: v.to_string(),
                        count: 1,
                    }),
                }
                previous = Some(v);
            }
            Ok(bars)
        }
        _ => {
            let text = series.drop_nulls().cast(&DataType::String)?;
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for value in text.str()?.into_iter().flatten() {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
            Ok(to_categories(counts))
        }
    }
}

fn to_categories<K: ToString>(counts: BTreeMap<K, usize>) -> Vec<BarCategory> {
    counts
        .into_iter()
        .map(|(value, count)| BarCategory {
            label: value.to_string(),
            count,
        })
        .collect()
}

/// Non-missing, finite values of a numeric series.
fn finite_values(series: &Series) -> Result<Vec<f64>> {
    let mut values = numeric_values(series)?;
    values.retain(|v| v.is_finite());
    Ok(values)
}

fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Number of distinct values; `values` must be free of NaN.
fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_many_distinct_numeric_values_use_histogram() {
        let values: Vec<i64> = (1..=25).collect();
        let series = Series::new("v".into(), values);
        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();

        assert_eq!(plan.kind(), Some(PlotKind::Histogram));
        match plan {
            PlotPlan::Histogram(bins) => {
                assert_eq!(bins.len(), 20);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 25);
                assert_eq!(bins[0].lower, 1.0);
                assert_eq!(bins[19].upper, 25.0);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_threshold_distinct_uses_bars() {
        let values: Vec<i64> = (1..=20).collect();
        let series = Series::new("v".into(), values);
        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();
        assert_eq!(plan.kind(), Some(PlotKind::Bar));
    }

    #[test]
    fn test_many_distinct_strings_use_bars() {
        let values: Vec<String> = (0..30).map(|i| format!("item{i:02}")).collect();
        let series = Series::new("v".into(), values);
        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();
        assert_eq!(plan.kind(), Some(PlotKind::Bar));
    }

    #[test]
    fn test_all_missing_categorical_is_empty() {
        let series = Series::new("v".into(), &[None::<&str>, None, None]);
        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();
        assert_eq!(plan, PlotPlan::Empty);
        assert_eq!(plan.kind(), None);
    }

    #[test]
    fn test_bar_categories_sorted_lexicographically() {
        let series = Series::new("v".into(), &[Some("b"), Some("a"), None, Some("b"), Some("c")]);
        let bars = bar_categories(&series).unwrap();
        assert_eq!(
            bars,
            vec![
                BarCategory { label: "a".to_string(), count: 1 },
                BarCategory { label: "b".to_string(), count: 2 },
                BarCategory { label: "c".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_bar_categories_sorted_numerically() {
        let series = Series::new("v".into(), &[10i64, 9, 10, 100]);
        let bars = bar_categories(&series).unwrap();
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["9", "10", "100"]);
        assert_eq!(bars[1].count, 2);
    }

    #[test]
    fn test_bar_categories_boolean_labels() {
        let series = Series::new("flag".into(), &[true, false, true]);
        let bars = bar_categories(&series).unwrap();
        assert_eq!(bars[0].label, "false");
        assert_eq!(bars[1].label, "true");
        assert_eq!(bars[1].count, 2);
    }

    #[test]
    fn test_histogram_last_bin_includes_max() {
        let bins = histogram_bins(&[0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn test_histogram_zero_width_range() {
        let bins = histogram_bins(&[3.0, 3.0], 4);
        assert_eq!(bins.first().unwrap().lower, 2.5);
        assert_eq!(bins.last().unwrap().upper, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_infinite_values_excluded_from_histogram() {
        let mut values: Vec<f64> = (0..25).map(f64::from).collect();
        values.push(f64::INFINITY);
        values.push(f64::NEG_INFINITY);
        let series = Series::new("v".into(), values);

        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();

        match plan {
            PlotPlan::Histogram(bins) => {
                assert!(bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
                assert_eq!(bins[0].lower, 0.0);
                assert_eq!(bins[19].upper, 24.0);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 25);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_infinite_values_do_not_count_as_distinct() {
        // 20 finite values plus two infinities stays at the threshold
        let mut values: Vec<f64> = (0..20).map(f64::from).collect();
        values.push(f64::INFINITY);
        values.push(f64::NEG_INFINITY);
        let series = Series::new("v".into(), values);

        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();

        assert_eq!(plan.kind(), Some(PlotKind::Bar));
        assert_eq!(plan.max_count(), 1);
    }

    #[test]
    fn test_only_infinite_values_is_empty() {
        let series = Series::new("v".into(), &[Some(f64::INFINITY), None, Some(f64::NEG_INFINITY)]);
        let plan = PlotPlan::for_series(&series, 20, 20).unwrap();
        assert_eq!(plan, PlotPlan::Empty);
    }

    #[test]
    fn test_histogram_bins_skip_non_finite() {
        let bins = histogram_bins(&[1.0, f64::NAN, 3.0, f64::INFINITY], 2);
        assert_eq!(bins.first().unwrap().lower, 1.0);
        assert_eq!(bins.last().unwrap().upper, 3.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_large_integers_keep_separate_bars() {
        let base = 1i64 << 53;
        let series = Series::new("id".into(), &[base, base + 1, base + 1]);
        let bars = bar_categories(&series).unwrap();
        assert_eq!(
            bars,
            vec![
                BarCategory { label: base.to_string(), count: 1 },
                BarCategory { label: (base + 1).to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_unsigned_integers_above_i64_range() {
        let series = Series::new("id".into(), &[u64::MAX, 1u64]);
        let bars = bar_categories(&series).unwrap();
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "18446744073709551615"]);
    }

    #[test]
    fn test_max_count() {
        let plan = PlotPlan::Bars(vec![
            BarCategory { label: "a".to_string(), count: 3 },
            BarCategory { label: "b".to_string(), count: 7 },
        ]);
        assert_eq!(plan.max_count(), 7);
        assert_eq!(PlotPlan::Empty.max_count(), 0);
    }
}
