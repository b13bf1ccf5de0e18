//! Joins the metric tables into the combined table.
//!
//! Both entry points build every row through [`build_record`], so a full
//! rebuild and a single-key upsert of the same key always agree.

use std::collections::HashSet;

use flipcheck_core::errors::TableError;
use flipcheck_core::types::{CompositeKey, Metric};
use tracing::{info, warn};

use crate::combined::{CombinedRecord, CombinedTable, UpsertAction};
use crate::layout::StorageLayout;
use crate::metric_table::MetricTable;
use crate::persist::with_exclusive_lock;

/// Result of a full rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildSummary {
    pub rows: usize,
    pub sources_present: usize,
}

/// Result of a single-key upsert.
#[derive(Debug, Clone)]
pub struct UpsertSummary {
    pub action: UpsertAction,
    /// The combined table was missing or unreadable and was rebuilt first.
    pub rebuilt: bool,
    pub record: CombinedRecord,
}

/// Full rebuild and single-key upsert over one [`StorageLayout`].
pub struct Aggregator {
    layout: StorageLayout,
}

impl Aggregator {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Load every metric table fresh, in preference order.
    ///
    /// A missing file gives an absent table. A file without a header or key
    /// columns is logged and treated as absent.
    pub fn load_sources(&self) -> Result<Vec<MetricTable>, TableError> {
        self.layout
            .sources()
            .map(|(source, path)| match MetricTable::load(source, path) {
                Ok(table) => Ok(table),
                Err(e @ TableError::Io { .. }) => Err(e),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "ignoring malformed metric table");
                    Ok(MetricTable::absent(source))
                }
            })
            .collect()
    }

    /// Rebuild the combined table from scratch and persist it.
    pub fn rebuild_all(&self) -> Result<RebuildSummary, TableError> {
        with_exclusive_lock(&self.layout.combined_path, || {
            let (table, summary) = self.rebuild_unlocked()?;
            table.write(&self.layout.combined_path)?;
            Ok(summary)
        })
    }

    fn rebuild_unlocked(&self) -> Result<(CombinedTable, RebuildSummary), TableError> {
        let tables = self.load_sources()?;
        let sources_present = tables.iter().filter(|t| t.is_present()).count();
        if sources_present == 0 {
            return Err(TableError::NoSources {
                dir: self.layout.classification_dir.clone(),
            });
        }
        let table = build_combined(&tables);
        let summary = RebuildSummary {
            rows: table.len(),
            sources_present,
        };
        info!(
            rows = summary.rows,
            sources = summary.sources_present,
            path = %self.layout.combined_path.display(),
            "rebuilt combined table"
        );
        Ok((table, summary))
    }

    /// Recompute the row for `key` from fresh metric tables and write it
    /// into the combined table, leaving every other row untouched.
    pub fn upsert_one(&self, key: &CompositeKey) -> Result<UpsertSummary, TableError> {
        let path = &self.layout.combined_path;
        with_exclusive_lock(path, || {
            let mut rebuilt = false;
            let mut table = match CombinedTable::load(path) {
                Ok(Some(table)) => table,
                Ok(None) => {
                    info!(path = %path.display(), "combined table not found, rebuilding");
                    rebuilt = true;
                    self.rebuild_unlocked()?.0
                }
                Err(e @ TableError::Io { .. }) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "combined table unreadable, rebuilding");
                    rebuilt = true;
                    self.rebuild_unlocked()?.0
                }
            };

            let tables = self.load_sources()?;
            let record = build_record(key, &tables);
            let action = table.upsert(record.clone());
            table.write(path)?;
            info!(%key, ?action, "upserted combined row");

            Ok(UpsertSummary {
                action,
                rebuilt,
                record,
            })
        })
    }
}

/// Build the full record for `key` by per-field first-match lookup.
pub fn build_record(key: &CompositeKey, tables: &[MetricTable]) -> CombinedRecord {
    let mut record = CombinedRecord::new(key.clone());
    for table in tables {
        for column in table.source().columns() {
            if let Some((metric, geometry)) = Metric::from_column(column) {
                record.set(metric, geometry, table.lookup(key, column));
            }
        }
    }
    record.recompute_deltas();
    record
}

/// Build the combined table from every key any table defines.
///
/// Keys from the first table in preference order come first, then keys only
/// later tables know, each in file order. Duplicate keys keep the first.
pub fn build_combined(tables: &[MetricTable]) -> CombinedTable {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for table in tables {
        for key in table.keys() {
            if seen.insert(key) {
                keys.push(key);
            }
        }
    }
    CombinedTable::from_records(keys.into_iter().map(|k| build_record(k, tables)).collect())
}
