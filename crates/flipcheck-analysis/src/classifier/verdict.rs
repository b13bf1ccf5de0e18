//! Per-metric votes, R-value flags and the overall verdict.

use std::fmt;

use serde::Serialize;

/// Which geometry a single metric favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Vote {
    #[serde(rename = "WC")]
    Wc,
    #[serde(rename = "HG")]
    Hg,
    Ambiguous,
}

impl Vote {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wc => "WC",
            Self::Hg => "HG",
            Self::Ambiguous => "Ambiguous",
        }
    }
}

/// R-work / R-free are flagged, not voted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RFlag {
    Highlight,
    Normal,
}

impl RFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highlight => "Highlight",
            Self::Normal => "Normal",
        }
    }
}

/// Overall classification of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "WC")]
    Wc,
    #[serde(rename = "HG")]
    Hg,
    Ambiguous,
    #[serde(rename = "Poor electron density")]
    PoorDensity,
    Error,
    #[serde(rename = "Occupancy_not_1")]
    OccupancyNot1,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wc => "WC",
            Self::Hg => "HG",
            Self::Ambiguous => "Ambiguous",
            Self::PoorDensity => "Poor electron density",
            Self::Error => "Error",
            Self::OccupancyNot1 => "Occupancy_not_1",
        }
    }

    /// Verdicts after which the per-pair working directory is no longer needed.
    pub fn triggers_cleanup(self) -> bool {
        matches!(self, Self::Wc | Self::PoorDensity)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of the four voting metrics. Missing deltas cast no vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub wc: usize,
    pub hg: usize,
    pub ambiguous: usize,
}

impl VoteTally {
    pub fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Wc => self.wc += 1,
            Vote::Hg => self.hg += 1,
            Vote::Ambiguous => self.ambiguous += 1,
        }
    }

    /// More WC than HG votes is WC, more HG is HG, a tie (including 0-0) is Ambiguous.
    pub fn majority(&self) -> Verdict {
        use std::cmp::Ordering;
        match self.wc.cmp(&self.hg) {
            Ordering::Greater => Verdict::Wc,
            Ordering::Less => Verdict::Hg,
            Ordering::Equal => Verdict::Ambiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_is_ambiguous() {
        let mut tally = VoteTally::default();
        assert_eq!(tally.majority(), Verdict::Ambiguous);
        for vote in [Vote::Wc, Vote::Wc, Vote::Hg, Vote::Hg] {
            tally.record(vote);
        }
        assert_eq!(tally.majority(), Verdict::Ambiguous);
        tally.record(Vote::Ambiguous);
        assert_eq!(tally.majority(), Verdict::Ambiguous);
        tally.record(Vote::Hg);
        assert_eq!(tally.majority(), Verdict::Hg);
    }

    #[test]
    fn cleanup_verdicts() {
        let cleaned: Vec<Verdict> = [
            Verdict::Wc,
            Verdict::Hg,
            Verdict::Ambiguous,
            Verdict::PoorDensity,
            Verdict::Error,
            Verdict::OccupancyNot1,
        ]
        .into_iter()
        .filter(|v| v.triggers_cleanup())
        .collect();
        assert_eq!(cleaned, vec![Verdict::Wc, Verdict::PoorDensity]);
    }

    #[test]
    fn serialized_names_match_display() {
        let json = serde_json::to_string(&Verdict::PoorDensity).unwrap();
        assert_eq!(json, "\"Poor electron density\"");
        assert_eq!(Verdict::OccupancyNot1.to_string(), "Occupancy_not_1");
    }
}
