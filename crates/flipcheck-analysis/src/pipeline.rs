//! End-to-end commands over one working root.

use std::path::{Path, PathBuf};

use flipcheck_core::config::FlipcheckConfig;
use flipcheck_core::constants::OCCUPANCY_FILE_NAME;
use flipcheck_core::errors::{ClassifyError, PipelineError};
use flipcheck_core::types::{CompositeKey, Geometry};
use flipcheck_storage::{
    Aggregator, CombinedTable, RebuildSummary, StorageLayout, UpsertSummary,
};
use tracing::{info, warn};

use crate::classifier::{Classifier, FileOccupancy};
use crate::cleanup::{CleanupOutcome, CleanupPolicy};
use crate::record::ClassificationRecord;
use crate::report::ReportSink;
use crate::resolver::{locate_pair_dir, resolve, ResolvedView};

/// Arguments of classify-one.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub key: CompositeKey,
    /// Crystallographic resolution, recorded verbatim.
    pub resolution: String,
    pub conformation_1: String,
    pub conformation_2: String,
}

#[derive(Debug, Clone)]
pub struct ClassifyOutcome {
    pub record: ClassificationRecord,
    pub report_path: Option<PathBuf>,
    pub cleanup: CleanupOutcome,
}

/// Rebuild, upsert and classify against one configured root.
pub struct Pipeline {
    config: FlipcheckConfig,
    root: PathBuf,
    layout: StorageLayout,
    classifier: Classifier,
    sink: ReportSink,
    cleanup: CleanupPolicy,
}

impl Pipeline {
    pub fn new(config: FlipcheckConfig, root: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let root = root.into();
        let layout = StorageLayout::from_config(&config, &root);
        let sink = ReportSink::from_config(&config, &layout, &root)?;
        Ok(Self {
            classifier: Classifier::from_config(&config.classifier),
            cleanup: CleanupPolicy::from_config(&config.cleanup),
            config,
            root,
            layout,
            sink,
        })
    }

    pub fn config(&self) -> &FlipcheckConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.layout.clone())
    }

    pub fn rebuild_all(&self) -> Result<RebuildSummary, PipelineError> {
        Ok(self.aggregator().rebuild_all()?)
    }

    pub fn upsert_one(&self, key: &CompositeKey) -> Result<UpsertSummary, PipelineError> {
        Ok(self.aggregator().upsert_one(key)?)
    }

    /// Classify one pair, append it to the results log, render its report,
    /// then apply the cleanup policy.
    ///
    /// Nothing is written when the key is unknown or the pair cannot be resolved.
    pub fn classify_one(&self, request: &ClassifyRequest) -> Result<ClassifyOutcome, PipelineError> {
        let key = request.key.normalized();
        let combined_path = &self.layout.combined_path;
        let combined = CombinedTable::load(combined_path)?.ok_or_else(|| {
            ClassifyError::CombinedTableMissing {
                path: combined_path.clone(),
            }
        })?;

        let matches = combined.matching(&key);
        let Some(&combined_record) = matches.first() else {
            return Err(ClassifyError::KeyNotFound {
                key: key.to_string(),
            }
            .into());
        };
        if matches.len() > 1 {
            warn!(%key, count = matches.len(), "multiple combined entries, using the first");
        }

        let resolved = resolve(
            &key,
            &request.conformation_1,
            &request.conformation_2,
            self.config.classifier.effective_allow_unknown_conformation(),
        )?;

        let pair_dir = locate_pair_dir(
            &self.config.paths.pair_roots_in(&self.root),
            &resolved.pair_dir_name(&key),
        );
        let occupancy = FileOccupancy::new(
            pair_dir
                .join(Geometry::Wc.label())
                .join(OCCUPANCY_FILE_NAME),
        );

        let view = ResolvedView::new(combined_record, resolved.mapping);
        let classification = self.classifier.classify(view, &occupancy);
        info!(
            %key,
            verdict = %classification.verdict,
            rule = classification.rule,
            wc = classification.tally.wc,
            hg = classification.tally.hg,
            "classified pair"
        );

        let record = ClassificationRecord::new(
            key,
            request.resolution.clone(),
            resolved,
            classification,
            pair_dir,
        );
        let report_path = self.sink.persist(&record)?;
        let cleanup = self.cleanup.apply(record.verdict(), &record.pair_dir);

        Ok(ClassifyOutcome {
            record,
            report_path,
            cleanup,
        })
    }
}
