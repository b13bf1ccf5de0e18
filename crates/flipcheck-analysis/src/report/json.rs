//! JSON reporter: the whole record, pretty-printed.

use flipcheck_core::errors::ReportError;

use super::Reporter;
use crate::record::ClassificationRecord;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, record: &ClassificationRecord) -> Result<String, ReportError> {
        serde_json::to_string_pretty(record).map_err(|e| ReportError::Serialization(e.to_string()))
    }
}
