//! Classifier tolerances and thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLASH_TOLERANCE, DEFAULT_EDIA_TOLERANCE, DEFAULT_OCCUPANCY_TOLERANCE,
    DEFAULT_OTHER_TOLERANCE, DEFAULT_POOR_DENSITY_EDIA, DEFAULT_RSCC_TOLERANCE,
    DEFAULT_R_VALUE_TOLERANCE,
};

/// Configuration for the classifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassifierConfig {
    /// RSCC voting tolerance. Default: 0.007.
    pub rscc_tolerance: Option<f64>,
    /// EDIA voting tolerance. Default: 0.010.
    pub edia_tolerance: Option<f64>,
    /// Clashscore voting tolerance. Default: 0 (exact).
    pub clash_tolerance: Option<f64>,
    /// R-work / R-free highlight threshold. Default: 0.01.
    pub r_value_tolerance: Option<f64>,
    /// Tolerance for metrics without a dedicated rule. Default: 0.005.
    pub other_tolerance: Option<f64>,
    /// EDIA below which both states count as poor density. Default: 0.5.
    pub poor_density_edia: Option<f64>,
    /// Allowed deviation of occupancy from 1. Default: 0.001.
    pub occupancy_tolerance: Option<f64>,
    /// Resolve conformations other than syn/anti without a swap. Default: false.
    pub allow_unknown_conformation: Option<bool>,
}

impl ClassifierConfig {
    pub fn effective_rscc_tolerance(&self) -> f64 {
        self.rscc_tolerance.unwrap_or(DEFAULT_RSCC_TOLERANCE)
    }

    pub fn effective_edia_tolerance(&self) -> f64 {
        self.edia_tolerance.unwrap_or(DEFAULT_EDIA_TOLERANCE)
    }

    pub fn effective_clash_tolerance(&self) -> f64 {
        self.clash_tolerance.unwrap_or(DEFAULT_CLASH_TOLERANCE)
    }

    pub fn effective_r_value_tolerance(&self) -> f64 {
        self.r_value_tolerance.unwrap_or(DEFAULT_R_VALUE_TOLERANCE)
    }

    pub fn effective_other_tolerance(&self) -> f64 {
        self.other_tolerance.unwrap_or(DEFAULT_OTHER_TOLERANCE)
    }

    pub fn effective_poor_density_edia(&self) -> f64 {
        self.poor_density_edia.unwrap_or(DEFAULT_POOR_DENSITY_EDIA)
    }

    pub fn effective_occupancy_tolerance(&self) -> f64 {
        self.occupancy_tolerance
            .unwrap_or(DEFAULT_OCCUPANCY_TOLERANCE)
    }

    pub fn effective_allow_unknown_conformation(&self) -> bool {
        self.allow_unknown_conformation.unwrap_or(false)
    }

    /// Named tolerance values, for validation.
    pub(crate) fn tolerances(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("classifier.rscc_tolerance", self.rscc_tolerance),
            ("classifier.edia_tolerance", self.edia_tolerance),
            ("classifier.clash_tolerance", self.clash_tolerance),
            ("classifier.r_value_tolerance", self.r_value_tolerance),
            ("classifier.other_tolerance", self.other_tolerance),
            ("classifier.occupancy_tolerance", self.occupancy_tolerance),
        ]
    }
}
