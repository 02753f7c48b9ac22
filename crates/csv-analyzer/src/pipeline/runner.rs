use super::stage::PipelineStage;
use crate::cleaner::Deduplicator;
use crate::config::AnalyzerConfig;
use crate::error::{Result, ResultExt};
use crate::loader::TableLoader;
use crate::plotting::DistributionPlotter;
use crate::profiler::ColumnAnalyzer;
use crate::quality::QualityScorer;
use crate::reporting::{ReportAssembler, ReportContent};
use crate::types::RunSummary;
use crate::utils::display_file_name;
use chrono::Local;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

/// Runs the fixed Load → Deduplicate → Score → Analyze → Persist → Plot →
/// Report sequence for one file and one column.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `column` of the table at `file`.
    ///
    /// An invalid configuration returns [`crate::error::AnalyzerError::InvalidConfig`] and a
    /// load failure returns [`crate::error::AnalyzerError::LoadFailed`], both before any
    /// output file is touched. A missing column or an unplottable column is
    /// logged and the run continues; the report then omits the affected
    /// section.
    pub fn run(&self, file: &Path, column: &str) -> Result<RunSummary> {
        self.config.validate()?;
        info!("Analyzing column '{}' of {}", column, file.display());

        let df = in_stage(PipelineStage::Load, || TableLoader::load(file))?;
        let (rows_loaded, columns_loaded) = (df.height(), df.width());

        let (mut cleaned, duplicates_removed) =
            in_stage(PipelineStage::Deduplicate, || Deduplicator::deduplicate(df))?;

        let quality = in_stage(PipelineStage::Score, || {
            QualityScorer::new(self.config.constant_column_penalty).score(&cleaned)
        })?;

        let stats = in_stage(PipelineStage::Analyze, || {
            recover(ColumnAnalyzer::analyze(&cleaned, column))
        })?;

        fs::create_dir_all(self.config.output_dir()).context("Failed to create output directory")?;

        let cleaned_file = self.config.cleaned_path();
        in_stage(PipelineStage::Persist, || {
            write_csv(&mut cleaned, &cleaned_file)
        })?;

        // stats is None only when the column is absent; that was already reported
        let plot = if stats.is_some() {
            in_stage(PipelineStage::Plot, || {
                let plotter = DistributionPlotter::new(&self.config);
                Ok(recover(plotter.plot(&cleaned, column, &self.config.plot_path()))?.flatten())
            })?
        } else {
            debug!("Skipping plot for missing column '{}'", column);
            None
        };

        let report = in_stage(PipelineStage::Report, || {
            let content = ReportContent {
                file_name: display_file_name(file),
                column,
                stats: stats.as_ref(),
                score: quality.score,
                plot: plot.as_ref(),
                generated_at: Local::now(),
            };
            ReportAssembler::new(self.config.report_image_width_mm)
                .assemble(&content, &self.config.report_path())
        })?;

        Ok(RunSummary {
            input_file: file.to_path_buf(),
            column: column.to_string(),
            rows_loaded,
            columns_loaded,
            duplicates_removed,
            quality,
            stats,
            cleaned_file,
            plot,
            report,
        })
    }
}

/// Run `f` inside a span for `stage`.
fn in_stage<T>(stage: PipelineStage, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _span = info_span!("stage", step = stage.step(), name = stage.display_name()).entered();
    f()
}

/// Turn a recoverable column or plot failure into `None`.
///
/// Load failures and every other error still propagate.
fn recover<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() && !e.is_load_failure() => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Write `df` as comma-separated text with a header row.
fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).context("Failed to create cleaned data file")?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .context("Failed to write cleaned data")?;
    info!("Cleaned data saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use crate::types::PlotKind;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn analyzer(dir: &Path) -> Analyzer {
        let config = AnalyzerConfig::builder()
            .output_dir(dir)
            .plot_size(320, 200)
            .build()
            .unwrap();
        Analyzer::new(config)
    }

    fn write_input(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("input.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_removes_duplicates_and_writes_outputs() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "id,category\n1,a\n1,a\n2,b\n");

        let summary = analyzer(dir.path()).run(&input, "id").unwrap();

        assert_eq!(summary.rows_loaded, 3);
        assert_eq!(summary.duplicates_removed, 1);
        assert_eq!(summary.quality.score, 100.0);
        assert_eq!(summary.plot.as_ref().map(|p| p.kind), Some(PlotKind::Bar));
        assert!(summary.report.includes_plot);
        assert!(summary.cleaned_file.exists());
        assert!(summary.report.path.exists());

        let cleaned = fs::read_to_string(&summary.cleaned_file).unwrap();
        assert_eq!(cleaned.lines().count(), 3);
    }

    #[test]
    fn test_run_missing_column_continues() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "id,category\n1,a\n2,b\n");

        let summary = analyzer(dir.path()).run(&input, "missing").unwrap();

        assert!(summary.stats.is_none());
        assert!(summary.plot.is_none());
        assert!(!summary.report.includes_plot);
        assert!(summary.report.path.exists());
    }

    #[test]
    fn test_run_load_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let err = analyzer(&out)
            .run(&dir.path().join("absent.csv"), "id")
            .unwrap_err();

        assert!(err.is_load_failure());
        assert!(!out.exists());
    }

    #[test]
    fn test_run_missing_column_warns_once() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "id,category\n1,a\n2,b\n");
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let summary = tracing::subscriber::with_default(subscriber, || {
            analyzer(dir.path()).run(&input, "missing").unwrap()
        });

        assert!(summary.plot.is_none());
        assert_eq!(logs.text().matches("Column 'missing' not found").count(), 1);
        assert!(!dir.path().join("column_plot.png").exists());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "id\n1\n");
        let out = dir.path().join("out");
        let config = AnalyzerConfig {
            output_dir: out.clone(),
            histogram_bins: 0,
            ..AnalyzerConfig::default()
        };

        let err = Analyzer::new(config).run(&input, "id").unwrap_err();

        assert!(matches!(err, AnalyzerError::InvalidConfig(_)));
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(!err.is_recoverable());
        assert!(!out.exists());
    }

    #[test]
    fn test_recover_keeps_fatal_errors() {
        let io: Result<()> = Err(std::io::Error::other("disk full").into());
        assert!(recover(io).is_err());

        let missing: Result<()> = Err(AnalyzerError::ColumnNotFound("x".to_string()));
        assert_eq!(recover(missing).unwrap(), None);
    }
}
