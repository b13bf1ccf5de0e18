//! # flipcheck-storage
//!
//! File persistence for flipcheck. Upstream analyses each append to a sparse
//! whitespace table; this crate loads them, joins them into the combined
//! per-pair table and keeps the append-only logs.

pub mod aggregator;
pub mod append_log;
pub mod codec;
pub mod combined;
pub mod delta;
pub mod layout;
pub mod metric_table;
pub mod occupancy;
pub mod persist;
pub mod source;

pub use aggregator::{Aggregator, RebuildSummary, UpsertSummary};
pub use combined::{CombinedRecord, CombinedTable, UpsertAction, COMBINED_COLUMNS};
pub use layout::StorageLayout;
pub use metric_table::MetricTable;
pub use source::MetricSource;
