//! The classified record appended to the results log and rendered by reporters.

use std::path::PathBuf;

use flipcheck_core::constants::NOT_AVAILABLE_TOKEN;
use flipcheck_core::types::{
    CompositeKey, Conformation, ConformationLabel, Metric, Nucleotide, Role,
};
use flipcheck_storage::codec::format_fixed;
use serde::Serialize;

use crate::classifier::{Classification, Verdict};
use crate::resolver::{ImagePaths, Resolution, RoleMapping};

/// Results log header. `_WC` columns hold the reference model, `_HG` the alternative.
pub const RESULTS_HEADER: [&str; 32] = [
    "pdb_id",
    "resolution",
    "chain_1",
    "nt_type_1",
    "nt_number_1",
    "chain_2",
    "nt_type_2",
    "nt_number_2",
    "RSCC_WC",
    "RSCC_HG",
    "delta_RSCC",
    "EDIA_WC",
    "EDIA_HG",
    "delta_EDIA",
    "Clashscore_bp_WC",
    "Clashscore_bp_HG",
    "delta_Clashscore_bp",
    "Clashscore_neighbour_WC",
    "Clashscore_neighbour_HG",
    "delta_Clashscore_neighbour",
    "Clashscore_global_WC",
    "Clashscore_global_HG",
    "R_work_WC",
    "R_work_HG",
    "delta_R_work",
    "R_free_WC",
    "R_free_HG",
    "delta_R_free",
    "B_factor_WC",
    "B_factor_HG",
    "Initial_conformation",
    "classification",
];

/// Metric groups in log order, with whether the delta is logged.
const LOG_LAYOUT: [(Metric, bool); 8] = [
    (Metric::Rscc, true),
    (Metric::Edia, true),
    (Metric::ClashBp, true),
    (Metric::ClashNeighbour, true),
    (Metric::ClashGlobal, false),
    (Metric::RWork, true),
    (Metric::RFree, true),
    (Metric::MeanB, false),
];

/// Decimals used when logging or reporting `metric`.
pub fn decimals(metric: Metric) -> usize {
    match metric {
        Metric::ClashBp | Metric::ClashNeighbour | Metric::ClashGlobal | Metric::MeanB => 1,
        _ => 3,
    }
}

/// `value` with the metric's precision, `NA` when missing.
pub fn format_metric(metric: Metric, value: Option<f64>) -> String {
    format_fixed(value, decimals(metric), NOT_AVAILABLE_TOKEN)
}

/// One classified pair. Created once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub key: CompositeKey,
    pub resolution: String,
    pub purine: Nucleotide,
    pub conformation: Conformation,
    pub conformation_bp: ConformationLabel,
    pub mapping: RoleMapping,
    pub classification: Classification,
    pub pair_dir: PathBuf,
    pub reference_images: ImagePaths,
    pub alternative_images: ImagePaths,
}

impl ClassificationRecord {
    pub fn new(
        key: CompositeKey,
        resolution: impl Into<String>,
        resolved: Resolution,
        classification: Classification,
        pair_dir: PathBuf,
    ) -> Self {
        let reference_images =
            ImagePaths::for_geometry(&pair_dir, &key, resolved.mapping.geometry(Role::Reference));
        let alternative_images = ImagePaths::for_geometry(
            &pair_dir,
            &key,
            resolved.mapping.geometry(Role::Alternative),
        );
        Self {
            key,
            resolution: resolution.into(),
            purine: resolved.purine,
            conformation: resolved.conformation,
            conformation_bp: resolved.conformation_bp,
            mapping: resolved.mapping,
            classification,
            pair_dir,
            reference_images,
            alternative_images,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.classification.verdict
    }

    /// Cells of one results-log line, in [`RESULTS_HEADER`] order.
    pub fn log_fields(&self) -> Vec<String> {
        let k = &self.key;
        let mut fields = vec![
            k.pdb_id.clone(),
            self.resolution.clone(),
            k.chain_1.clone(),
            k.nt_type_1.clone(),
            k.nt_number_1.to_string(),
            k.chain_2.clone(),
            k.nt_type_2.clone(),
            k.nt_number_2.to_string(),
        ];
        for (metric, with_delta) in LOG_LAYOUT {
            let a = self.classification.assessment(metric);
            fields.push(format_metric(metric, a.and_then(|a| a.reference)));
            fields.push(format_metric(metric, a.and_then(|a| a.alternative)));
            if with_delta {
                fields.push(format_metric(metric, a.and_then(|a| a.delta)));
            }
        }
        fields.push(self.conformation_bp.as_str().to_string());
        fields.push(self.verdict().as_str().to_string());
        fields
    }
}
