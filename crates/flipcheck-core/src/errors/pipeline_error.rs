//! Pipeline errors.

use super::error_code::FlipcheckErrorCode;
use super::{ClassifyError, ConfigError, ReportError, ResolveError, TableError};

/// Errors that can occur while running a command end to end.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Classify error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl FlipcheckErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Table(e) => e.error_code(),
            Self::Resolve(e) => e.error_code(),
            Self::Classify(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}
