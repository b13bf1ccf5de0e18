//! Pair directory cleanup configuration.

use serde::{Deserialize, Serialize};

/// Configuration for pruning pair working directories after classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CleanupConfig {
    /// Delete the pair directory for `WC` and `Poor electron density` verdicts. Default: true.
    pub enabled: Option<bool>,
}

impl CleanupConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
