//! Pipeline module.
//!
//! This module provides the [`Analyzer`] orchestrator that chains the
//! loader, deduplicator, scorer, column analyzer, plotter and report
//! assembler for one run.

mod runner;
mod stage;

pub use runner::Analyzer;
pub use stage::PipelineStage;
