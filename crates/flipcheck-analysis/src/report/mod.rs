//! Reporters and the sink that persists classified records.

pub mod json;
pub mod text;

use std::path::{Path, PathBuf};

use flipcheck_core::config::FlipcheckConfig;
use flipcheck_core::errors::{PipelineError, ReportError};
use flipcheck_storage::append_log::append_row;
use flipcheck_storage::persist::write_atomic;
use flipcheck_storage::StorageLayout;
use tracing::info;

use crate::record::{ClassificationRecord, RESULTS_HEADER};

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    /// File extension of generated reports.
    fn extension(&self) -> &'static str;
    fn generate(&self, record: &ClassificationRecord) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "text" => Some(Box::new(text::TextReporter)),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// Appends every classified record to the results log and, when a reporter
/// is configured, renders it to `<reports dir>/<key stem>.<ext>`.
pub struct ReportSink {
    results_path: PathBuf,
    reports_dir: PathBuf,
    reporter: Option<Box<dyn Reporter>>,
}

impl ReportSink {
    pub fn new(
        results_path: impl Into<PathBuf>,
        reports_dir: impl Into<PathBuf>,
        reporter: Option<Box<dyn Reporter>>,
    ) -> Self {
        Self {
            results_path: results_path.into(),
            reports_dir: reports_dir.into(),
            reporter,
        }
    }

    pub fn from_config(
        config: &FlipcheckConfig,
        layout: &StorageLayout,
        root: &Path,
    ) -> Result<Self, ReportError> {
        let reporter = if config.report.effective_enabled() {
            let format = config.report.effective_format();
            Some(
                create_reporter(format)
                    .ok_or_else(|| ReportError::UnknownFormat(format.to_string()))?,
            )
        } else {
            None
        };
        Ok(Self::new(
            layout.results_path.clone(),
            config.paths.reports_dir_in(root),
            reporter,
        ))
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Where the report for `record` goes, if reports are enabled.
    pub fn report_path(&self, record: &ClassificationRecord) -> Option<PathBuf> {
        self.reporter.as_ref().map(|r| {
            self.reports_dir
                .join(format!("{}.{}", record.key.file_stem(), r.extension()))
        })
    }

    /// Append to the results log, then render the report. Returns the report path.
    pub fn persist(&self, record: &ClassificationRecord) -> Result<Option<PathBuf>, PipelineError> {
        append_row(&self.results_path, &RESULTS_HEADER, &record.log_fields())?;

        let (Some(reporter), Some(path)) = (self.reporter.as_ref(), self.report_path(record)) else {
            return Ok(None);
        };
        let content = reporter.generate(record)?;
        write_atomic(&path, &content).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(reporter = reporter.name(), path = %path.display(), "report written");
        Ok(Some(path))
    }
}
