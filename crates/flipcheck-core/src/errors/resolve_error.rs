//! Conformation resolution errors.

use super::error_code::{self, FlipcheckErrorCode};

/// Errors raised while deciding the purine side and reference geometry of a pair.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no purine in pair {pair}")]
    NoPurine { pair: String },

    #[error("both sides of pair {pair} are purines")]
    BothPurines { pair: String },

    #[error("unknown conformation {value:?} (expected syn or anti)")]
    UnknownConformation { value: String },
}

impl FlipcheckErrorCode for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPurine { .. } | Self::BothPurines { .. } => error_code::AMBIGUOUS_PURINE,
            Self::UnknownConformation { .. } => error_code::UNKNOWN_CONFORMATION,
        }
    }
}
