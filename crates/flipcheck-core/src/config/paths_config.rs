//! File layout configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BFACTOR_FILE, DEFAULT_CLASHSCORE_FILE, DEFAULT_CLASSIFICATION_DIR,
    DEFAULT_COMBINED_FILE, DEFAULT_EDIA_FILE, DEFAULT_PAIR_ROOTS, DEFAULT_REPORTS_DIR,
    DEFAULT_RESULTS_FILE, DEFAULT_RSCC_FILE, DEFAULT_RVALUES_FILE,
};

/// Where tables, logs, pair directories and reports live.
/// Relative paths are resolved against the working root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding summary tables and outputs. Default: "classification_files".
    pub classification_dir: Option<String>,
    /// R-values summary file name. Default: "R_values_summary.txt".
    pub rvalues_file: Option<String>,
    /// RSCC summary file name. Default: "RSCC_summary.txt".
    pub rscc_file: Option<String>,
    /// EDIA summary file name. Default: "EDIA_summary.txt".
    pub edia_file: Option<String>,
    /// Clashscore summary file name. Default: "clashscore_summary.txt".
    pub clashscore_file: Option<String>,
    /// B-factor summary file name. Default: "Bfactor_summary.txt".
    pub bfactor_file: Option<String>,
    /// Combined table file name. Default: "combined_metrics.txt".
    pub combined_file: Option<String>,
    /// Classification log file name. Default: "classification_results.txt".
    pub results_file: Option<String>,
    /// Roots probed for per-pair directories, in order.
    #[serde(default)]
    pub pair_roots: Vec<String>,
    /// Report output directory. Default: "reports".
    pub reports_dir: Option<String>,
}

impl PathsConfig {
    pub fn effective_classification_dir(&self) -> &str {
        self.classification_dir
            .as_deref()
            .unwrap_or(DEFAULT_CLASSIFICATION_DIR)
    }

    pub fn effective_rvalues_file(&self) -> &str {
        self.rvalues_file.as_deref().unwrap_or(DEFAULT_RVALUES_FILE)
    }

    pub fn effective_rscc_file(&self) -> &str {
        self.rscc_file.as_deref().unwrap_or(DEFAULT_RSCC_FILE)
    }

    pub fn effective_edia_file(&self) -> &str {
        self.edia_file.as_deref().unwrap_or(DEFAULT_EDIA_FILE)
    }

    pub fn effective_clashscore_file(&self) -> &str {
        self.clashscore_file
            .as_deref()
            .unwrap_or(DEFAULT_CLASHSCORE_FILE)
    }

    pub fn effective_bfactor_file(&self) -> &str {
        self.bfactor_file.as_deref().unwrap_or(DEFAULT_BFACTOR_FILE)
    }

    pub fn effective_combined_file(&self) -> &str {
        self.combined_file.as_deref().unwrap_or(DEFAULT_COMBINED_FILE)
    }

    pub fn effective_results_file(&self) -> &str {
        self.results_file.as_deref().unwrap_or(DEFAULT_RESULTS_FILE)
    }

    pub fn effective_reports_dir(&self) -> &str {
        self.reports_dir.as_deref().unwrap_or(DEFAULT_REPORTS_DIR)
    }

    /// Pair roots, falling back to `PDB_without_nt` then `../PDB_without_nt`.
    pub fn effective_pair_roots(&self) -> Vec<String> {
        if self.pair_roots.is_empty() {
            DEFAULT_PAIR_ROOTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.pair_roots.clone()
        }
    }

    /// `<root>/<classification_dir>`.
    pub fn classification_dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.effective_classification_dir())
    }

    /// Pair roots resolved against `root`.
    pub fn pair_roots_in(&self, root: &Path) -> Vec<PathBuf> {
        self.effective_pair_roots()
            .iter()
            .map(|r| root.join(r))
            .collect()
    }

    /// `<root>/<reports_dir>`.
    pub fn reports_dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.effective_reports_dir())
    }
}
