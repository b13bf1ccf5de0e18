//! Tolerance voting per metric family.

use flipcheck_core::config::ClassifierConfig;
use flipcheck_core::types::Metric;
use serde::Serialize;

use super::verdict::{RFlag, Vote};

/// How a metric's delta is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricFamily {
    /// Higher is better.
    Rscc,
    /// Higher is better.
    Edia,
    /// Lower is better.
    Clash,
    /// Flagged when the difference is large, never voted.
    RValue,
    /// Higher is better, generic tolerance.
    Other,
}

impl MetricFamily {
    pub fn of(metric: Metric) -> Self {
        match metric {
            Metric::Rscc => Self::Rscc,
            Metric::Edia => Self::Edia,
            Metric::ClashBp | Metric::ClashNeighbour | Metric::ClashGlobal => Self::Clash,
            Metric::RWork | Metric::RFree | Metric::RTotal => Self::RValue,
            Metric::MeanB => Self::Other,
        }
    }
}

/// Resolved classifier thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub rscc: f64,
    pub edia: f64,
    pub clash: f64,
    pub r_value: f64,
    pub other: f64,
    pub poor_density_edia: f64,
    pub occupancy: f64,
}

impl Tolerances {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            rscc: config.effective_rscc_tolerance(),
            edia: config.effective_edia_tolerance(),
            clash: config.effective_clash_tolerance(),
            r_value: config.effective_r_value_tolerance(),
            other: config.effective_other_tolerance(),
            poor_density_edia: config.effective_poor_density_edia(),
            occupancy: config.effective_occupancy_tolerance(),
        }
    }

    pub fn for_family(&self, family: MetricFamily) -> f64 {
        match family {
            MetricFamily::Rscc => self.rscc,
            MetricFamily::Edia => self.edia,
            MetricFamily::Clash => self.clash,
            MetricFamily::RValue => self.r_value,
            MetricFamily::Other => self.other,
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

/// A vote for the voting families, a flag for R-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Interpretation {
    Vote(Vote),
    Flag(RFlag),
}

impl Interpretation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vote(v) => v.as_str(),
            Self::Flag(f) => f.as_str(),
        }
    }

    pub fn vote(self) -> Option<Vote> {
        match self {
            Self::Vote(v) => Some(v),
            Self::Flag(_) => None,
        }
    }
}

/// Interpret `delta = reference - alternative`. Missing delta, no interpretation.
///
/// The tolerance band is inclusive: `|delta| <= tol` is Ambiguous.
pub fn interpret(family: MetricFamily, delta: Option<f64>, tolerances: &Tolerances) -> Option<Interpretation> {
    let d = delta?;
    let tol = tolerances.for_family(family);
    let interpretation = match family {
        MetricFamily::RValue => Interpretation::Flag(if d.abs() > tol {
            RFlag::Highlight
        } else {
            RFlag::Normal
        }),
        _ if d.abs() <= tol => Interpretation::Vote(Vote::Ambiguous),
        MetricFamily::Clash if d > 0.0 => Interpretation::Vote(Vote::Hg),
        MetricFamily::Clash => Interpretation::Vote(Vote::Wc),
        _ if d > 0.0 => Interpretation::Vote(Vote::Wc),
        _ => Interpretation::Vote(Vote::Hg),
    };
    Some(interpretation)
}
