//! Stages of an analyzer run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of the analyzer pipeline, in execution order.
///
/// Each stage runs inside a `tracing` span carrying its [`display_name`].
///
/// [`display_name`]: PipelineStage::display_name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Reading and parsing the input file
    Load,
    /// Removing exact-duplicate rows
    Deduplicate,
    /// Computing the quality score
    Score,
    /// Summarizing the chosen column
    Analyze,
    /// Writing the cleaned table
    Persist,
    /// Rendering the distribution plot
    Plot,
    /// Writing the PDF report
    Report,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 7] = [
        Self::Load,
        Self::Deduplicate,
        Self::Score,
        Self::Analyze,
        Self::Persist,
        Self::Plot,
        Self::Report,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Load => "Loading Data",
            Self::Deduplicate => "Removing Duplicates",
            Self::Score => "Scoring Quality",
            Self::Analyze => "Analyzing Column",
            Self::Persist => "Saving Cleaned Data",
            Self::Plot => "Plotting Distribution",
            Self::Report => "Assembling Report",
        }
    }

    /// One-based position of the stage in the run.
    pub fn step(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
