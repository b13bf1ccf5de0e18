//! Whitespace-delimited table codec.
//!
//! Header is the first non-blank line. Rows are split on runs of whitespace,
//! so cells never contain spaces. Missing numeric values are written `None`.

use flipcheck_core::constants::MISSING_TOKEN;

/// A table split into header and rows, cells still raw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

/// Split `text` into header and rows. Returns `None` when there is no header.
pub fn parse_table(text: &str) -> Option<RawTable> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header: Vec<String> = lines.next()?.split_whitespace().map(String::from).collect();
    let rows = lines
        .map(|line| line.split_whitespace().map(String::from).collect())
        .collect();
    Some(RawTable { header, rows })
}

/// Numeric cell value. `None`, `NA`, `NaN`, empty and non-numeric cells are missing.
pub fn parse_cell(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

/// Shortest round-trip form; integral values keep a trailing `.0`.
pub fn format_float(value: Option<f64>) -> String {
    match value {
        None => MISSING_TOKEN.to_string(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => format!("{v:.1}"),
        Some(v) => format!("{v}"),
    }
}

/// Fixed-precision form used by the results log and reports.
pub fn format_fixed(value: Option<f64>, decimals: usize, missing: &str) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => missing.to_string(),
    }
}

/// Join cells into one line (no trailing newline).
pub fn format_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ")
}
