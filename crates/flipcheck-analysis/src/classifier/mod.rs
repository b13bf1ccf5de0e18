//! WC/HG classifier: per-metric tolerance votes plus ordered override rules.

pub mod engine;
pub mod occupancy;
pub mod rules;
pub mod tolerance;
pub mod verdict;

pub use engine::{Classification, Classifier, MetricAssessment};
pub use occupancy::{FileOccupancy, OccupancyProbe};
pub use rules::{default_rules, OverrideRule, RuleContext};
pub use tolerance::{interpret, Interpretation, MetricFamily, Tolerances};
pub use verdict::{RFlag, Verdict, Vote, VoteTally};
