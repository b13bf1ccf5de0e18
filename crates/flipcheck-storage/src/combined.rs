//! The combined per-pair table.

use std::collections::HashSet;
use std::path::Path;

use flipcheck_core::errors::TableError;
use flipcheck_core::types::{CompositeKey, DeltaField, Geometry, Metric, KEY_COLUMNS};
use tracing::warn;

use crate::codec::{format_float, format_row, parse_cell, parse_table};
use crate::delta::signed_delta;
use crate::metric_table::{key_from_row, key_indices};
use crate::persist::write_atomic;

/// Persisted column order of the combined table.
pub const COMBINED_COLUMNS: [&str; 29] = [
    "pdb_id",
    "chain_1",
    "nt_type_1",
    "nt_number_1",
    "chain_2",
    "nt_type_2",
    "nt_number_2",
    "r_total_WC",
    "r_work_WC",
    "r_free_WC",
    "r_total_HG",
    "r_work_HG",
    "r_free_HG",
    "RSCC_WC",
    "RSCC_HG",
    "delta_RSCC",
    "WC_edia",
    "HG_edia",
    "delta_edia",
    "WC_clashscore_global",
    "HG_clashscore_global",
    "WC_clashscore_bp",
    "HG_clashscore_bp",
    "delta_clashscore_bp",
    "WC_clashscore_neighbour",
    "HG_clashscore_neighbour",
    "delta_clashscore_neighbour",
    "mean_B_HG",
    "mean_B_WC",
];

/// A value column of the combined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Raw(Metric, Geometry),
    Delta(DeltaField),
}

impl Column {
    fn from_name(name: &str) -> Option<Column> {
        Metric::from_column(name)
            .map(|(m, g)| Column::Raw(m, g))
            .or_else(|| DeltaField::from_column(name).map(Column::Delta))
    }
}

fn slot(geometry: Geometry) -> usize {
    match geometry {
        Geometry::Wc => 0,
        Geometry::Hg => 1,
    }
}

/// One row of the combined table: every raw metric under both geometries
/// plus the four stored deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub key: CompositeKey,
    raw: [[Option<f64>; 2]; 9],
    deltas: [Option<f64>; 4],
}

impl CombinedRecord {
    /// A record with every value missing.
    pub fn new(key: CompositeKey) -> Self {
        Self {
            key,
            raw: [[None; 2]; 9],
            deltas: [None; 4],
        }
    }

    pub fn get(&self, metric: Metric, geometry: Geometry) -> Option<f64> {
        self.raw[metric.index()][slot(geometry)]
    }

    pub fn set(&mut self, metric: Metric, geometry: Geometry, value: Option<f64>) {
        self.raw[metric.index()][slot(geometry)] = value;
    }

    /// Stored `WC - HG` delta.
    pub fn delta(&self, field: DeltaField) -> Option<f64> {
        self.deltas[field.index()]
    }

    /// Recompute all four deltas as `WC - HG`.
    pub fn recompute_deltas(&mut self) {
        for field in DeltaField::ALL {
            let metric = field.metric();
            self.deltas[field.index()] =
                signed_delta(self.get(metric, Geometry::Wc), self.get(metric, Geometry::Hg));
        }
    }

    /// Cells in [`COMBINED_COLUMNS`] order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self.key.to_fields().into_iter().collect();
        for name in &COMBINED_COLUMNS[KEY_COLUMNS.len()..] {
            let value = match Column::from_name(name) {
                Some(Column::Raw(m, g)) => self.get(m, g),
                Some(Column::Delta(d)) => self.delta(d),
                None => None,
            };
            fields.push(format_float(value));
        }
        fields
    }
}

/// Whether an upsert replaced a row or added one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Inserted,
    Updated,
}

/// One data line of the combined table.
#[derive(Debug, Clone, PartialEq)]
enum Row {
    /// A keyed record. `cells` holds the line as read when the file already
    /// had the canonical header; an upserted record has none and is rendered.
    Record {
        record: CombinedRecord,
        cells: Option<Vec<String>>,
    },
    /// A line whose key could not be read. Written back unchanged.
    Unkeyed(Vec<String>),
}

impl Row {
    fn record(&self) -> Option<&CombinedRecord> {
        match self {
            Self::Record { record, .. } => Some(record),
            Self::Unkeyed(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Record {
                cells: Some(cells), ..
            }
            | Self::Unkeyed(cells) => format_row(cells),
            Self::Record { record, .. } => format_row(&record.to_fields()),
        }
    }
}

/// The authoritative combined table, in row order.
///
/// Rows other than the one an upsert targets are carried through untouched,
/// including duplicate keys and lines with an unreadable key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    rows: Vec<Row>,
}

impl CombinedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CombinedRecord>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|record| Row::Record {
                    record,
                    cells: None,
                })
                .collect(),
        }
    }

    /// Load from disk; `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, TableError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TableError::io(path, e)),
        }
    }

    /// Parse table text. Unknown columns are ignored and absent ones read as
    /// missing. Duplicate keys and unkeyed lines are kept, with a warning.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, TableError> {
        let raw = parse_table(text).ok_or_else(|| TableError::MissingHeader {
            path: origin.to_path_buf(),
        })?;
        let key_idx = key_indices(&raw, origin)?;
        let columns: Vec<(usize, Column)> = raw
            .header
            .iter()
            .enumerate()
            .filter_map(|(i, name)| Column::from_name(name).map(|c| (i, c)))
            .collect();
        let canonical = raw.header.iter().map(String::as_str).eq(COMBINED_COLUMNS);

        let mut table = Self::new();
        let mut seen = HashSet::new();
        for (line_no, row) in raw.rows.into_iter().enumerate() {
            let key = match key_from_row(&row, &key_idx) {
                Ok(key) => key,
                Err(e) => {
                    warn!(path = %origin.display(), row = line_no + 1, error = %e, "combined row has no readable key");
                    table.rows.push(Row::Unkeyed(row));
                    continue;
                }
            };
            if !seen.insert(key.clone()) {
                warn!(%key, "duplicate combined row");
            }
            let mut record = CombinedRecord::new(key);
            for &(i, column) in &columns {
                let value = row.get(i).and_then(|cell| parse_cell(cell));
                match column {
                    Column::Raw(m, g) => record.set(m, g, value),
                    Column::Delta(d) => record.deltas[d.index()] = value,
                }
            }
            table.rows.push(Row::Record {
                record,
                cells: canonical.then_some(row),
            });
        }
        Ok(table)
    }

    /// Full text with header, one line per row.
    pub fn render(&self) -> String {
        let mut out = format_row(&COMBINED_COLUMNS);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.render());
            out.push('\n');
        }
        out
    }

    /// Stage to `<path>.tmp` and rename over `path`.
    pub fn write(&self, path: &Path) -> Result<(), TableError> {
        write_atomic(path, &self.render())
    }

    /// Keyed records in row order, duplicates included.
    pub fn records(&self) -> Vec<&CombinedRecord> {
        self.rows.iter().filter_map(Row::record).collect()
    }

    /// Number of data lines, unkeyed ones included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First record with exactly this key.
    pub fn get(&self, key: &CompositeKey) -> Option<&CombinedRecord> {
        self.rows
            .iter()
            .filter_map(Row::record)
            .find(|r| &r.key == key)
    }

    /// Records matching `key` with the pdb id compared case-insensitively.
    pub fn matching(&self, key: &CompositeKey) -> Vec<&CombinedRecord> {
        self.rows
            .iter()
            .filter_map(Row::record)
            .filter(|r| r.key.matches_ignoring_pdb_case(key))
            .collect()
    }

    /// Overwrite the first row with the same key in place, or append.
    pub fn upsert(&mut self, record: CombinedRecord) -> UpsertAction {
        let existing = self
            .rows
            .iter_mut()
            .find(|row| row.record().is_some_and(|r| r.key == record.key));
        match existing {
            Some(row) => {
                *row = Row::Record {
                    record,
                    cells: None,
                };
                UpsertAction::Updated
            }
            None => {
                self.rows.push(Row::Record {
                    record,
                    cells: None,
                });
                UpsertAction::Inserted
            }
        }
    }
}
