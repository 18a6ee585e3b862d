use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

/// Altimeter setting under which a low-pressure advisory is raised, inHg.
pub const LOW_ALTIMETER_INHG: f64 = 29.70;

pub const RULE: Rule = Rule {
    id: "low_altimeter",
    name: "Low Altimeter Setting",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let altimeter = ctx.observation.altimeter_inhg;
    if altimeter >= LOW_ALTIMETER_INHG {
        return None;
    }

    Some(AlertCondition::new(
        AlertKind::LowAltimeter,
        Severity::Amber,
        "Low Pressure System",
        format!(
            "Altimeter {:.2} inHg. Low pressure often brings deteriorating weather; expect reduced density-altitude margins.",
            altimeter
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::daytime_obs;
    use crate::models::Thresholds;

    fn fires(inhg: f64) -> bool {
        let obs = daytime_obs().with_altimeter(inhg);
        let thresholds = Thresholds::default();
        evaluate(&RuleContext {
            observation: &obs,
            thresholds: &thresholds,
            runway_heading: None,
        })
        .is_some()
    }

    #[test]
    fn below_threshold_only() {
        assert!(fires(29.42));
        assert!(fires(29.69));
        assert!(!fires(29.70));
        assert!(!fires(30.12));
    }
}
