use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

/// Fog risk from a narrow temperature/dewpoint spread
///
/// Lower is worse: red at or under the red band, amber at or under amber.
pub const RULE: Rule = Rule {
    id: "fog_risk",
    name: "Temperature/Dewpoint Spread",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let obs = ctx.observation;
    let spread = obs.temp_dewpoint_spread();
    let band = &ctx.thresholds.temp_dewpoint_spread;

    let severity = if spread <= band.red {
        Severity::Red
    } else if spread <= band.amber {
        Severity::Amber
    } else {
        return None;
    };

    let title = match severity {
        Severity::Red => "Fog Likely",
        _ => "Fog Risk",
    };

    Some(AlertCondition::new(
        AlertKind::FogRisk,
        severity,
        title,
        format!(
            "Temperature/dewpoint spread {:.1}°C ({:.0}/{:.0}). Fog or low stratus may form.",
            spread, obs.temperature_c, obs.dewpoint_c
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::daytime_obs;
    use crate::models::Thresholds;

    fn severity(temp: f64, dew: f64) -> Option<Severity> {
        let obs = daytime_obs().with_temperatures(temp, dew);
        let thresholds = Thresholds::default();
        evaluate(&RuleContext {
            observation: &obs,
            thresholds: &thresholds,
            runway_heading: None,
        })
        .map(|a| a.severity)
    }

    #[test]
    fn smaller_spread_is_worse() {
        assert_eq!(severity(10.0, 0.0), None);
        assert_eq!(severity(10.0, 7.0), Some(Severity::Amber));
        assert_eq!(severity(10.0, 8.5), Some(Severity::Amber));
        assert_eq!(severity(10.0, 9.0), Some(Severity::Red));
        assert_eq!(severity(10.0, 10.0), Some(Severity::Red));
    }
}
