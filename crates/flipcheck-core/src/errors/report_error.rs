//! Report rendering errors.

use super::error_code::{self, FlipcheckErrorCode};

/// Errors raised by reporters.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unknown report format: {0}")]
    UnknownFormat(String),

    #[error("report serialization failed: {0}")]
    Serialization(String),

    #[error("IO error writing report {path}: {message}")]
    Io { path: String, message: String },
}

impl FlipcheckErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
