//! Composite pair identity shared by every table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TableError;

/// Key columns, in persisted order.
pub const KEY_COLUMNS: [&str; 7] = [
    "pdb_id",
    "chain_1",
    "nt_type_1",
    "nt_number_1",
    "chain_2",
    "nt_type_2",
    "nt_number_2",
];

/// Identity of one candidate base pair.
///
/// Equality is exact and field-wise. Case-insensitive pdb matching is only
/// applied at the classification boundary via [`CompositeKey::matches_ignoring_pdb_case`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey {
    pub pdb_id: String,
    pub chain_1: String,
    pub nt_type_1: String,
    pub nt_number_1: i64,
    pub chain_2: String,
    pub nt_type_2: String,
    pub nt_number_2: i64,
}

/// One side of a pair: chain, nucleotide code and residue number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nucleotide {
    pub chain: String,
    pub nt_type: String,
    pub number: i64,
}

impl CompositeKey {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pdb_id: impl Into<String>,
        chain_1: impl Into<String>,
        nt_type_1: impl Into<String>,
        nt_number_1: i64,
        chain_2: impl Into<String>,
        nt_type_2: impl Into<String>,
        nt_number_2: i64,
    ) -> Self {
        Self {
            pdb_id: pdb_id.into(),
            chain_1: chain_1.into(),
            nt_type_1: nt_type_1.into(),
            nt_number_1,
            chain_2: chain_2.into(),
            nt_type_2: nt_type_2.into(),
            nt_number_2,
        }
    }

    /// Build a key from seven raw fields in [`KEY_COLUMNS`] order.
    pub fn from_fields(fields: &[&str]) -> Result<Self, TableError> {
        if fields.len() != KEY_COLUMNS.len() {
            return Err(TableError::InvalidKey {
                field: "key",
                value: fields.join(" "),
            });
        }
        Ok(Self {
            pdb_id: non_empty("pdb_id", fields[0])?,
            chain_1: non_empty("chain_1", fields[1])?,
            nt_type_1: non_empty("nt_type_1", fields[2])?,
            nt_number_1: parse_residue_number("nt_number_1", fields[3])?,
            chain_2: non_empty("chain_2", fields[4])?,
            nt_type_2: non_empty("nt_type_2", fields[5])?,
            nt_number_2: parse_residue_number("nt_number_2", fields[6])?,
        })
    }

    /// Key fields rendered in [`KEY_COLUMNS`] order.
    pub fn to_fields(&self) -> [String; 7] {
        [
            self.pdb_id.clone(),
            self.chain_1.clone(),
            self.nt_type_1.clone(),
            self.nt_number_1.to_string(),
            self.chain_2.clone(),
            self.nt_type_2.clone(),
            self.nt_number_2.to_string(),
        ]
    }

    pub fn side_1(&self) -> Nucleotide {
        Nucleotide {
            chain: self.chain_1.clone(),
            nt_type: self.nt_type_1.clone(),
            number: self.nt_number_1,
        }
    }

    pub fn side_2(&self) -> Nucleotide {
        Nucleotide {
            chain: self.chain_2.clone(),
            nt_type: self.nt_type_2.clone(),
            number: self.nt_number_2,
        }
    }

    /// Field-wise match where only the pdb id is compared case-insensitively.
    pub fn matches_ignoring_pdb_case(&self, other: &CompositeKey) -> bool {
        self.pdb_id.eq_ignore_ascii_case(&other.pdb_id)
            && self.chain_1 == other.chain_1
            && self.nt_type_1 == other.nt_type_1
            && self.nt_number_1 == other.nt_number_1
            && self.chain_2 == other.chain_2
            && self.nt_type_2 == other.nt_type_2
            && self.nt_number_2 == other.nt_number_2
    }

    /// Lower-case pdb id and upper-case nucleotide codes, as classification expects.
    pub fn normalized(&self) -> Self {
        Self {
            pdb_id: self.pdb_id.to_ascii_lowercase(),
            nt_type_1: self.nt_type_1.to_ascii_uppercase(),
            nt_type_2: self.nt_type_2.to_ascii_uppercase(),
            ..self.clone()
        }
    }

    /// `pdb_c1_t1_n1_c2_t2_n2`, used for report file names.
    pub fn file_stem(&self) -> String {
        self.to_fields().join("_")
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}{} - {}:{}{}",
            self.pdb_id,
            self.chain_1,
            self.nt_type_1,
            self.nt_number_1,
            self.chain_2,
            self.nt_type_2,
            self.nt_number_2
        )
    }
}

fn non_empty(field: &'static str, raw: &str) -> Result<String, TableError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TableError::InvalidKey {
            field,
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Residue numbers may be negative; `12.0` is accepted as `12`.
fn parse_residue_number(field: &'static str, raw: &str) -> Result<i64, TableError> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(TableError::InvalidKey {
            field,
            value: raw.to_string(),
        }),
    }
}
