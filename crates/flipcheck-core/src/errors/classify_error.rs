//! Classification errors.

use std::path::PathBuf;

use super::error_code::{self, FlipcheckErrorCode};

/// Errors that stop a single pair from being classified.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("combined metrics table not found: {path}")]
    CombinedTableMissing { path: PathBuf },

    #[error("no combined entry for {key}")]
    KeyNotFound { key: String },
}

impl FlipcheckErrorCode for ClassifyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CombinedTableMissing { .. } => error_code::COMBINED_MISSING,
            Self::KeyNotFound { .. } => error_code::KEY_NOT_FOUND,
        }
    }
}
