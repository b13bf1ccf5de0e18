//! Append-only whitespace logs with a header written exactly once.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use flipcheck_core::errors::TableError;
use flipcheck_core::types::{CompositeKey, KEY_COLUMNS};

use crate::codec::{format_float, format_row};
use crate::source::MetricSource;

/// Create `path` with `header` if it does not exist yet.
///
/// Uses create-new so an existing log is never truncated. A zero-length file
/// left by an interrupted run also gets the header. Returns whether the
/// header was written.
pub fn ensure_header<S: AsRef<str>>(path: &Path, header: &[S]) -> Result<bool, TableError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| TableError::io(dir, e))?;
    }
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => Some(f),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let empty = fs::metadata(path)
                .map(|m| m.len() == 0)
                .map_err(|e| TableError::io(path, e))?;
            if empty {
                Some(
                    OpenOptions::new()
                        .append(true)
                        .open(path)
                        .map_err(|e| TableError::io(path, e))?,
                )
            } else {
                None
            }
        }
        Err(e) => return Err(TableError::io(path, e)),
    };
    match file {
        Some(mut f) => {
            writeln!(f, "{}", format_row(header)).map_err(|e| TableError::io(path, e))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Append one row, writing `header` first if the log is new.
pub fn append_row<S: AsRef<str>, T: AsRef<str>>(
    path: &Path,
    header: &[S],
    cells: &[T],
) -> Result<(), TableError> {
    ensure_header(path, header)?;
    let mut f = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| TableError::io(path, e))?;
    writeln!(f, "{}", format_row(cells)).map_err(|e| TableError::io(path, e))
}

/// Append a row to an upstream metric table.
///
/// `values` follows [`MetricSource::columns`]; missing or absent entries are
/// written as `None`.
pub fn append_metric_row(
    path: &Path,
    source: MetricSource,
    key: &CompositeKey,
    values: &[Option<f64>],
) -> Result<(), TableError> {
    let header: Vec<&str> = KEY_COLUMNS
        .iter()
        .chain(source.columns())
        .copied()
        .collect();
    let mut cells: Vec<String> = key.to_fields().to_vec();
    cells.extend(
        (0..source.columns().len()).map(|i| format_float(values.get(i).copied().flatten())),
    );
    append_row(path, &header, &cells)
}
