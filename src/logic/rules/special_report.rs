use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

/// Flags unscheduled (SPECI) observations.
pub const RULE: Rule = Rule {
    id: "speci",
    name: "Special Observation",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let obs = ctx.observation;
    if !obs.is_speci {
        return None;
    }

    Some(AlertCondition::new(
        AlertKind::SpecialReport,
        Severity::Amber,
        "Special Weather Report",
        format!(
            "{} issued a SPECI at {}Z. Conditions changed significantly since the last routine report.",
            obs.station_id,
            obs.observed_at.format("%d%H%M")
        ),
    ))
}
