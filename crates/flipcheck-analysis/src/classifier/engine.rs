//! Classifier: assesses every metric of a resolved record and applies the
//! override rules.

use flipcheck_core::config::ClassifierConfig;
use flipcheck_core::types::{Metric, Role};
use serde::Serialize;

use super::occupancy::OccupancyProbe;
use super::rules::{default_rules, evaluate, OverrideRule, RuleContext};
use super::tolerance::{interpret, Interpretation, MetricFamily, Tolerances};
use super::verdict::{Verdict, VoteTally};
use crate::resolver::ResolvedView;

/// Metrics whose votes decide the majority.
pub const VOTING_METRICS: [Metric; 4] = [
    Metric::Rscc,
    Metric::Edia,
    Metric::ClashBp,
    Metric::ClashNeighbour,
];

/// One metric after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricAssessment {
    pub metric: Metric,
    pub reference: Option<f64>,
    pub alternative: Option<f64>,
    /// `reference - alternative`.
    pub delta: Option<f64>,
    pub interpretation: Option<Interpretation>,
}

/// Outcome of classifying one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// In [`Metric::QUALITY`] order.
    pub assessments: Vec<MetricAssessment>,
    pub tally: VoteTally,
    pub verdict: Verdict,
    /// Id of the rule that produced the verdict.
    pub rule: &'static str,
}

impl Classification {
    pub fn assessment(&self, metric: Metric) -> Option<&MetricAssessment> {
        self.assessments.iter().find(|a| a.metric == metric)
    }
}

pub struct Classifier {
    tolerances: Tolerances,
    rules: Vec<OverrideRule>,
}

impl Classifier {
    pub fn new(tolerances: Tolerances) -> Self {
        Self::with_rules(tolerances, default_rules())
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(Tolerances::from_config(config))
    }

    pub fn with_rules(tolerances: Tolerances, rules: Vec<OverrideRule>) -> Self {
        Self { tolerances, rules }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn classify(&self, view: ResolvedView<'_>, occupancy: &dyn OccupancyProbe) -> Classification {
        let assessments: Vec<MetricAssessment> = Metric::QUALITY
            .iter()
            .map(|&metric| {
                let delta = view.delta(metric);
                MetricAssessment {
                    metric,
                    reference: view.field(Role::Reference, metric),
                    alternative: view.field(Role::Alternative, metric),
                    delta,
                    interpretation: interpret(MetricFamily::of(metric), delta, &self.tolerances),
                }
            })
            .collect();

        let mut tally = VoteTally::default();
        for a in assessments.iter().filter(|a| VOTING_METRICS.contains(&a.metric)) {
            if let Some(vote) = a.interpretation.and_then(Interpretation::vote) {
                tally.record(vote);
            }
        }

        let ctx = RuleContext {
            view,
            tally,
            tolerances: &self.tolerances,
            occupancy,
        };
        let (verdict, rule) = evaluate(&self.rules, &ctx);

        Classification {
            assessments,
            tally,
            verdict,
            rule,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}
