//! Ordered override rules. Evaluated top-down, first match wins.

use flipcheck_core::types::{Metric, OccupancyReading, Role};
use tracing::debug;

use super::occupancy::OccupancyProbe;
use super::tolerance::Tolerances;
use super::verdict::{Verdict, VoteTally};
use crate::resolver::ResolvedView;

/// Type alias for rule check functions.
pub type RuleCheckFn = Box<dyn Fn(&RuleContext<'_>) -> Option<Verdict> + Send + Sync>;

/// One override: returns a verdict when it applies.
pub struct OverrideRule {
    pub id: &'static str,
    pub description: &'static str,
    pub check: RuleCheckFn,
}

/// Everything a rule may inspect.
pub struct RuleContext<'a> {
    pub view: ResolvedView<'a>,
    pub tally: VoteTally,
    pub tolerances: &'a Tolerances,
    pub occupancy: &'a dyn OccupancyProbe,
}

/// Evaluate `rules` in order; the id of the matching rule is returned with its verdict.
/// With no match the pair is Ambiguous.
pub fn evaluate(rules: &[OverrideRule], ctx: &RuleContext<'_>) -> (Verdict, &'static str) {
    for rule in rules {
        if let Some(verdict) = (rule.check)(ctx) {
            debug!(rule = rule.id, %verdict, "override rule matched");
            return (verdict, rule.id);
        }
    }
    (Verdict::Ambiguous, "none")
}

/// Total failure, then poor density, then majority vote.
pub fn default_rules() -> Vec<OverrideRule> {
    vec![total_failure_rule(), poor_density_rule(), majority_vote_rule()]
}

/// All sixteen quality values missing: consult the occupancy record.
pub fn total_failure_rule() -> OverrideRule {
    OverrideRule {
        id: "total_failure",
        description: "No quality metric under either model; occupancy decides between Error and Occupancy_not_1",
        check: Box::new(|ctx: &RuleContext<'_>| {
            if !ctx.view.all_quality_missing() {
                return None;
            }
            Some(match ctx.occupancy.read() {
                OccupancyReading::Value(v) if (v - 1.0).abs() > ctx.tolerances.occupancy => {
                    Verdict::OccupancyNot1
                }
                // Full occupancy, no record, or an unreadable one.
                _ => Verdict::Error,
            })
        }),
    }
}

/// Both EDIA values present and below the threshold.
pub fn poor_density_rule() -> OverrideRule {
    OverrideRule {
        id: "poor_density",
        description: "EDIA of both models below the poor-density threshold",
        check: Box::new(|ctx: &RuleContext<'_>| {
            let threshold = ctx.tolerances.poor_density_edia;
            let reference = ctx.view.field(Role::Reference, Metric::Edia)?;
            let alternative = ctx.view.field(Role::Alternative, Metric::Edia)?;
            (reference < threshold && alternative < threshold).then_some(Verdict::PoorDensity)
        }),
    }
}

/// Majority over RSCC, EDIA, clash-bp and clash-neighbour.
pub fn majority_vote_rule() -> OverrideRule {
    OverrideRule {
        id: "majority_vote",
        description: "More WC than HG votes is WC, more HG is HG, otherwise Ambiguous",
        check: Box::new(|ctx: &RuleContext<'_>| Some(ctx.tally.majority())),
    }
}
