use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

/// Gust spread over the sustained wind. Always amber.
pub const RULE: Rule = Rule {
    id: "gust_factor",
    name: "Gust Factor",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let wind = &ctx.observation.wind;
    let gust = wind.gust_kt?;
    let factor = gust as f64 - wind.speed_kt as f64;

    if factor <= ctx.thresholds.gust_factor_kt {
        return None;
    }

    Some(AlertCondition::new(
        AlertKind::GustFactor,
        Severity::Amber,
        "Gusty Winds",
        format!(
            "Gusts {:.0} kt above sustained wind ({}). Expect turbulence and airspeed fluctuations on approach.",
            factor,
            wind.describe()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::daytime_obs;
    use crate::models::{Thresholds, WindDirection};

    fn fires(speed: u32, gust: Option<u32>) -> bool {
        let obs = daytime_obs().with_wind(WindDirection::Degrees(300), speed, gust);
        let thresholds = Thresholds::default();
        evaluate(&RuleContext {
            observation: &obs,
            thresholds: &thresholds,
            runway_heading: None,
        })
        .is_some()
    }

    #[test]
    fn needs_gust_above_delta() {
        assert!(!fires(20, None));
        assert!(!fires(10, Some(20)));
        assert!(fires(10, Some(21)));
        assert!(fires(5, Some(30)));
    }
}
