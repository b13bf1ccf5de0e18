//! The five upstream metric tables.

use flipcheck_core::config::PathsConfig;

/// One upstream analysis and the sparse table it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSource {
    RValues,
    Rscc,
    Edia,
    Clashscore,
    BFactor,
}

impl MetricSource {
    /// Join preference order: the first table here seeds the combined key order.
    pub const PREFERENCE: [MetricSource; 5] = [
        MetricSource::RValues,
        MetricSource::Rscc,
        MetricSource::Edia,
        MetricSource::Clashscore,
        MetricSource::BFactor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::RValues => "R-values",
            Self::Rscc => "RSCC",
            Self::Edia => "EDIA",
            Self::Clashscore => "clashscore",
            Self::BFactor => "B-factor",
        }
    }

    /// Metric columns this table contributes, in the order the producer writes them.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::RValues => &[
                "r_total_WC",
                "r_work_WC",
                "r_free_WC",
                "r_total_HG",
                "r_work_HG",
                "r_free_HG",
            ],
            Self::Rscc => &["RSCC_WC", "RSCC_HG"],
            Self::Edia => &["WC_edia", "HG_edia"],
            Self::Clashscore => &[
                "WC_clashscore_global",
                "HG_clashscore_global",
                "WC_clashscore_bp",
                "HG_clashscore_bp",
                "WC_clashscore_neighbour",
                "HG_clashscore_neighbour",
            ],
            Self::BFactor => &["mean_B_HG", "mean_B_WC"],
        }
    }

    /// Configured file name for this table.
    pub fn file_name(self, paths: &PathsConfig) -> &str {
        match self {
            Self::RValues => paths.effective_rvalues_file(),
            Self::Rscc => paths.effective_rscc_file(),
            Self::Edia => paths.effective_edia_file(),
            Self::Clashscore => paths.effective_clashscore_file(),
            Self::BFactor => paths.effective_bfactor_file(),
        }
    }
}
