//! Data quality scoring module.
//!
//! Computes a heuristic score in [0, 100] from missingness, duplication and
//! constant (degenerate) columns.

mod scorer;

pub use scorer::QualityScorer;
