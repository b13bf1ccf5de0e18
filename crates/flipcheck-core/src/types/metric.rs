//! Metric families and their persisted column names.
//!
//! Column names are looked up from `(Metric, Geometry)` rather than built by
//! prefix concatenation; the upstream tables are inconsistent about whether
//! the geometry is a prefix (`WC_edia`) or a suffix (`RSCC_WC`).

use serde::{Deserialize, Serialize};

use super::geometry::Geometry;

/// A raw metric recorded once per geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RTotal,
    RWork,
    RFree,
    Rscc,
    Edia,
    ClashGlobal,
    ClashBp,
    ClashNeighbour,
    MeanB,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::RTotal,
        Metric::RWork,
        Metric::RFree,
        Metric::Rscc,
        Metric::Edia,
        Metric::ClashGlobal,
        Metric::ClashBp,
        Metric::ClashNeighbour,
        Metric::MeanB,
    ];

    /// The eight metrics whose sixteen values decide the total-failure path.
    /// `r_total` is carried in the combined table but never classified.
    pub const QUALITY: [Metric; 8] = [
        Metric::Rscc,
        Metric::Edia,
        Metric::ClashBp,
        Metric::ClashNeighbour,
        Metric::ClashGlobal,
        Metric::RWork,
        Metric::RFree,
        Metric::MeanB,
    ];

    /// Stable position in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Persisted column name for this metric under `geometry`.
    pub fn column(self, geometry: Geometry) -> &'static str {
        use Geometry::{Hg, Wc};
        match (self, geometry) {
            (Self::RTotal, Wc) => "r_total_WC",
            (Self::RTotal, Hg) => "r_total_HG",
            (Self::RWork, Wc) => "r_work_WC",
            (Self::RWork, Hg) => "r_work_HG",
            (Self::RFree, Wc) => "r_free_WC",
            (Self::RFree, Hg) => "r_free_HG",
            (Self::Rscc, Wc) => "RSCC_WC",
            (Self::Rscc, Hg) => "RSCC_HG",
            (Self::Edia, Wc) => "WC_edia",
            (Self::Edia, Hg) => "HG_edia",
            (Self::ClashGlobal, Wc) => "WC_clashscore_global",
            (Self::ClashGlobal, Hg) => "HG_clashscore_global",
            (Self::ClashBp, Wc) => "WC_clashscore_bp",
            (Self::ClashBp, Hg) => "HG_clashscore_bp",
            (Self::ClashNeighbour, Wc) => "WC_clashscore_neighbour",
            (Self::ClashNeighbour, Hg) => "HG_clashscore_neighbour",
            (Self::MeanB, Wc) => "mean_B_WC",
            (Self::MeanB, Hg) => "mean_B_HG",
        }
    }

    /// Inverse of [`Metric::column`].
    pub fn from_column(column: &str) -> Option<(Metric, Geometry)> {
        Metric::ALL.iter().find_map(|&metric| {
            Geometry::ALL
                .iter()
                .find(|&&geometry| metric.column(geometry) == column)
                .map(|&geometry| (metric, geometry))
        })
    }

    /// Human-readable name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::RTotal => "R-total",
            Self::RWork => "R-work",
            Self::RFree => "R-free",
            Self::Rscc => "RSCC",
            Self::Edia => "EDIA",
            Self::ClashGlobal => "Clashscore global",
            Self::ClashBp => "Clashscore bp",
            Self::ClashNeighbour => "Clashscore neighbour",
            Self::MeanB => "B-factor (purine avg)",
        }
    }
}

/// The four deltas stored in the combined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaField {
    Rscc,
    Edia,
    ClashBp,
    ClashNeighbour,
}

impl DeltaField {
    pub const ALL: [DeltaField; 4] = [
        DeltaField::Rscc,
        DeltaField::Edia,
        DeltaField::ClashBp,
        DeltaField::ClashNeighbour,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::Rscc => "delta_RSCC",
            Self::Edia => "delta_edia",
            Self::ClashBp => "delta_clashscore_bp",
            Self::ClashNeighbour => "delta_clashscore_neighbour",
        }
    }

    /// The raw metric this delta is derived from.
    pub fn metric(self) -> Metric {
        match self {
            Self::Rscc => Metric::Rscc,
            Self::Edia => Metric::Edia,
            Self::ClashBp => Metric::ClashBp,
            Self::ClashNeighbour => Metric::ClashNeighbour,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_column(column: &str) -> Option<DeltaField> {
        DeltaField::ALL.iter().copied().find(|d| d.column() == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_round_trips() {
        for metric in Metric::ALL {
            for geometry in Geometry::ALL {
                assert_eq!(Metric::from_column(metric.column(geometry)), Some((metric, geometry)));
            }
        }
        assert_eq!(Metric::from_column("delta_RSCC"), None);
    }

    #[test]
    fn index_matches_position() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        for (i, delta) in DeltaField::ALL.iter().enumerate() {
            assert_eq!(delta.index(), i);
        }
    }
}
