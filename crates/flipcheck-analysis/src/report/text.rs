//! Text reporter: fixed-width metric table, image locations and the result.

use flipcheck_core::constants::NOT_AVAILABLE_TOKEN;
use flipcheck_core::errors::ReportError;
use flipcheck_core::types::Metric;

use super::Reporter;
use crate::classifier::MetricAssessment;
use crate::record::{format_metric, ClassificationRecord};
use crate::resolver::ImagePaths;

const RULE: &str = "------------------------------------------------------------------";

/// Row order of the metric table.
const ROWS: [Metric; 8] = [
    Metric::Rscc,
    Metric::Edia,
    Metric::ClashBp,
    Metric::ClashNeighbour,
    Metric::ClashGlobal,
    Metric::RWork,
    Metric::RFree,
    Metric::MeanB,
];

pub struct TextReporter;

impl TextReporter {
    fn metric_row(out: &mut String, metric: Metric, a: Option<&MetricAssessment>) {
        let favours = a
            .and_then(|a| a.interpretation)
            .map(|i| i.as_str())
            .unwrap_or("N/A");
        // HG column is the alternative model, WC the reference.
        out.push_str(&format!(
            "{:<27} {:>9} {:>9} {:>10}  {}\n",
            metric.display_name(),
            format_metric(metric, a.and_then(|a| a.alternative)),
            format_metric(metric, a.and_then(|a| a.reference)),
            format_metric(metric, a.and_then(|a| a.delta)),
            favours
        ));
    }

    fn images(out: &mut String, label: &str, images: &ImagePaths) {
        out.push_str(&format!("  {label} ({}):\n", images.geometry));
        out.push_str(&format!("    {}\n", images.front.display()));
        out.push_str(&format!("    {}\n", images.rotated.display()));
    }
}

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn generate(&self, record: &ClassificationRecord) -> Result<String, ReportError> {
        let k = &record.key;
        let mut out = String::new();
        let resolution = if record.resolution.is_empty() {
            NOT_AVAILABLE_TOKEN
        } else {
            record.resolution.as_str()
        };

        out.push_str(&format!(
            "PDB ID: {} | Resolution: {} Å\n",
            k.pdb_id, resolution
        ));
        out.push_str(&format!(
            "Chains: {}, {} | Nucleotides: {}.{} : {}.{}\n",
            k.chain_1, k.chain_2, k.nt_type_1, k.nt_number_1, k.nt_type_2, k.nt_number_2
        ));
        out.push_str(&format!(
            "Original conformation: {}({}) - {}\n",
            record.purine.nt_type, record.conformation, record.conformation_bp
        ));
        out.push('\n');

        out.push_str(&format!(
            "{:<27} {:>9} {:>9} {:>10}  Favours\n",
            "Metric", "HG", "WC", "Δ(WC - HG)"
        ));
        out.push_str(RULE);
        out.push('\n');
        for metric in ROWS {
            Self::metric_row(&mut out, metric, record.classification.assessment(metric));
        }
        out.push('\n');

        out.push_str("Images:\n");
        Self::images(&mut out, "WC", &record.reference_images);
        Self::images(&mut out, "HG", &record.alternative_images);
        out.push('\n');

        out.push_str(&format!("Overall Result: {}\n", record.verdict()));
        Ok(out)
    }
}
