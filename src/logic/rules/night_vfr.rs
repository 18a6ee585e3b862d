use super::{Rule, RuleContext};
use crate::logic::daylight::is_night;
use crate::models::{AlertCondition, AlertKind, FlightCategory, Severity};

/// Night operations at the observing station
///
/// Night is judged at the observation time. VFR at night is amber; anything
/// below VFR at night is red.
pub const RULE: Rule = Rule {
    id: "night_vfr",
    name: "Night Operations",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let obs = ctx.observation;
    if !is_night(obs.location.latitude, obs.location.longitude, obs.observed_at) {
        return None;
    }

    let category = obs.flight_category();
    // TODO: split "night" from "reduced conditions at night" once the alert
    // taxonomy distinguishes them; both currently share this rule.
    let (severity, title) = if category == FlightCategory::Vfr {
        (Severity::Amber, "Night VFR")
    } else {
        (Severity::Red, "Night with Reduced Conditions")
    };

    Some(AlertCondition::new(
        AlertKind::NightVfr,
        severity,
        title,
        format!(
            "It is night at {} and conditions are {}. Terrain and cloud are harder to see.",
            obs.station_id, category
        ),
    ))
}
