//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REPORT_FORMAT;

/// Report formats understood by the analysis crate.
pub const REPORT_FORMATS: [&str; 2] = ["text", "json"];

/// Configuration for rendered per-pair reports.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Render a report for every classified pair. Default: true.
    pub enabled: Option<bool>,
    /// Report format: "text" | "json". Default: "text".
    pub format: Option<String>,
}

impl ReportConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_REPORT_FORMAT)
    }
}
