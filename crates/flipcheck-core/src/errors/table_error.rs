//! Storage-layer errors for whitespace tables and append-only logs.

use std::path::PathBuf;

use super::error_code::{self, FlipcheckErrorCode};

/// Errors raised while reading or writing persisted tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} has no header line")]
    MissingHeader { path: PathBuf },

    #[error("{path} is missing key column `{column}`")]
    MissingKeyColumn { path: PathBuf, column: String },

    #[error("invalid key field `{field}` = {value:?}")]
    InvalidKey { field: &'static str, value: String },

    #[error("no summary tables found under {dir}")]
    NoSources { dir: PathBuf },

    #[error("could not lock {path}: {source}")]
    LockFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TableError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl FlipcheckErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::TABLE_IO,
            Self::NoSources { .. } => error_code::NO_SOURCES,
            Self::LockFailed { .. } => error_code::LOCK_FAILED,
            _ => error_code::TABLE_ERROR,
        }
    }
}
