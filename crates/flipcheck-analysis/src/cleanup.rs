//! Removes the per-pair working directory once a pair is settled.

use std::path::Path;

use flipcheck_core::config::CleanupConfig;
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::Verdict;

/// What happened to the pair directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CleanupOutcome {
    Removed,
    /// The verdict keeps the directory.
    Kept,
    /// The verdict asked for removal but cleanup is turned off.
    Disabled,
    /// Nothing to remove.
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
pub struct CleanupPolicy {
    enabled: bool,
}

impl CleanupPolicy {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &CleanupConfig) -> Self {
        Self::new(config.effective_enabled())
    }

    /// Remove `pair_dir` when `verdict` is WC or poor density. Failures are
    /// logged and reported, never raised.
    pub fn apply(&self, verdict: Verdict, pair_dir: &Path) -> CleanupOutcome {
        if !verdict.triggers_cleanup() {
            return CleanupOutcome::Kept;
        }
        if !self.enabled {
            return CleanupOutcome::Disabled;
        }
        if !pair_dir.is_dir() {
            info!(path = %pair_dir.display(), "pair directory does not exist");
            return CleanupOutcome::NotFound;
        }
        match std::fs::remove_dir_all(pair_dir) {
            Ok(()) => {
                info!(path = %pair_dir.display(), %verdict, "removed pair directory");
                CleanupOutcome::Removed
            }
            Err(e) => {
                warn!(path = %pair_dir.display(), error = %e, "could not remove pair directory");
                CleanupOutcome::Failed(e.to_string())
            }
        }
    }
}
