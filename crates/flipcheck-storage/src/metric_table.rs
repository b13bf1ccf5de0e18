//! In-memory view of one upstream metric table.

use std::collections::HashMap;
use std::path::Path;

use flipcheck_core::errors::TableError;
use flipcheck_core::types::{CompositeKey, KEY_COLUMNS};
use tracing::{debug, warn};

use crate::codec::{parse_cell, parse_table, RawTable};
use crate::source::MetricSource;

/// Sparse table keyed by [`CompositeKey`].
///
/// Rows keep file order; duplicate keys are kept and lookups use the first.
#[derive(Debug, Clone)]
pub struct MetricTable {
    source: MetricSource,
    columns: Vec<String>,
    rows: Vec<(CompositeKey, Vec<Option<f64>>)>,
    /// Row of the first occurrence of each key.
    first_row: HashMap<CompositeKey, usize>,
    present: bool,
}

impl MetricTable {
    /// A table whose file does not exist.
    pub fn absent(source: MetricSource) -> Self {
        Self {
            source,
            columns: Vec::new(),
            rows: Vec::new(),
            first_row: HashMap::new(),
            present: false,
        }
    }

    /// Load from disk. A missing file yields an absent, empty table.
    pub fn load(source: MetricSource, path: &Path) -> Result<Self, TableError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(source = source.name(), path = %path.display(), "metric table not found");
                return Ok(Self::absent(source));
            }
            Err(e) => return Err(TableError::io(path, e)),
        };
        let table = Self::parse(source, &text, path)?;
        debug!(
            source = source.name(),
            rows = table.rows.len(),
            "loaded metric table"
        );
        Ok(table)
    }

    /// Parse table text; `origin` is only used in errors and warnings.
    pub fn parse(source: MetricSource, text: &str, origin: &Path) -> Result<Self, TableError> {
        let raw = parse_table(text).ok_or_else(|| TableError::MissingHeader {
            path: origin.to_path_buf(),
        })?;
        let key_idx = key_indices(&raw, origin)?;

        let value_idx: Vec<(String, usize)> = raw
            .header
            .iter()
            .enumerate()
            .filter(|(_, name)| !KEY_COLUMNS.contains(&name.as_str()))
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut rows = Vec::with_capacity(raw.rows.len());
        let mut first_row = HashMap::with_capacity(raw.rows.len());
        for (line_no, row) in raw.rows.iter().enumerate() {
            let key = match key_from_row(row, &key_idx) {
                Ok(key) => key,
                Err(e) => {
                    warn!(
                        path = %origin.display(),
                        row = line_no + 1,
                        error = %e,
                        "skipping row with unparsable key"
                    );
                    continue;
                }
            };
            let values = value_idx
                .iter()
                .map(|(_, i)| row.get(*i).and_then(|cell| parse_cell(cell)))
                .collect();
            first_row.entry(key.clone()).or_insert(rows.len());
            rows.push((key, values));
        }

        Ok(Self {
            source,
            columns: value_idx.into_iter().map(|(name, _)| name).collect(),
            rows,
            first_row,
            present: true,
        })
    }

    pub fn source(&self) -> MetricSource {
        self.source
    }

    /// Whether the backing file existed and parsed.
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Keys in file order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &CompositeKey> {
        self.rows.iter().map(|(key, _)| key)
    }

    /// Value of `column` for the first row matching `key`.
    /// Missing if the column, the key or the value is absent.
    pub fn lookup(&self, key: &CompositeKey, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        let (_, values) = self.rows.get(*self.first_row.get(key)?)?;
        values.get(col).copied().flatten()
    }
}

pub(crate) fn key_indices(raw: &RawTable, origin: &Path) -> Result<[usize; 7], TableError> {
    let mut idx = [0usize; 7];
    for (slot, column) in idx.iter_mut().zip(KEY_COLUMNS) {
        *slot = raw
            .column_index(column)
            .ok_or_else(|| TableError::MissingKeyColumn {
                path: origin.to_path_buf(),
                column: column.to_string(),
            })?;
    }
    Ok(idx)
}

pub(crate) fn key_from_row(row: &[String], idx: &[usize; 7]) -> Result<CompositeKey, TableError> {
    let fields: Vec<&str> = idx
        .iter()
        .map(|&i| row.get(i).map(String::as_str).unwrap_or(""))
        .collect();
    CompositeKey::from_fields(&fields)
}
