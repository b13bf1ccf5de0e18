//! Hydrogen-bonding geometries, resolved roles and modeled conformations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two geometries every pair is modeled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Geometry {
    /// Watson-Crick-like.
    #[serde(rename = "WC")]
    Wc,
    /// Hoogsteen-like.
    #[serde(rename = "HG")]
    Hg,
}

impl Geometry {
    pub const ALL: [Geometry; 2] = [Geometry::Wc, Geometry::Hg];

    /// Column prefix/suffix and directory name: `WC` or `HG`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wc => "WC",
            Self::Hg => "HG",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role of a geometry after resolving it against the modeled conformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Compared as the anti/WC state; first operand of every resolved delta.
    Reference,
    /// Compared as the syn/HG state.
    Alternative,
}

/// Glycosidic conformation the purine was originally modeled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conformation {
    Syn,
    Anti,
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

impl Conformation {
    /// Parse a conformation label. Matching is exact (`syn`, `anti`).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "syn" => Self::Syn,
            "anti" => Self::Anti,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display label recorded with each classification.
    pub fn label(&self) -> ConformationLabel {
        match self {
            Self::Syn => ConformationLabel::Hg,
            Self::Anti => ConformationLabel::Wc,
            Self::Other(_) => ConformationLabel::Other,
        }
    }
}

impl fmt::Display for Conformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syn => f.write_str("syn"),
            Self::Anti => f.write_str("anti"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// The `conformation_bp` label: display and record-keeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConformationLabel {
    #[serde(rename = "HG")]
    Hg,
    #[serde(rename = "WC")]
    Wc,
    Other,
}

impl ConformationLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hg => "HG",
            Self::Wc => "WC",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ConformationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
