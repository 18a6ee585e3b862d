use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

/// Low ceiling. No alert when no ceiling is reported.
pub const RULE: Rule = Rule {
    id: "low_ceiling",
    name: "Low Ceiling",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let ceiling = ctx.observation.ceiling_ft()? as f64;
    let band = &ctx.thresholds.ceiling;

    let severity = if ceiling < band.red {
        Severity::Red
    } else if ceiling < band.amber {
        Severity::Amber
    } else {
        return None;
    };

    let title = match severity {
        Severity::Red => "Ceiling Below Red Threshold",
        _ => "Low Ceiling",
    };

    Some(AlertCondition::new(
        AlertKind::LowCeiling,
        severity,
        title,
        format!(
            "Ceiling {:.0} ft AGL at {} (threshold {:.0} ft).",
            ceiling,
            ctx.observation.station_id,
            if severity == Severity::Red { band.red } else { band.amber }
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::daytime_obs;
    use crate::models::{CloudCover, Thresholds};

    fn severity(obs: crate::models::NormalizedObservation) -> Option<Severity> {
        let thresholds = Thresholds::default();
        evaluate(&RuleContext {
            observation: &obs,
            thresholds: &thresholds,
            runway_heading: None,
        })
        .map(|a| a.severity)
    }

    #[test]
    fn bands() {
        let at = |cover, base| severity(daytime_obs().with_cloud(cover, base));
        assert_eq!(at(CloudCover::Overcast, 900), Some(Severity::Red));
        assert_eq!(at(CloudCover::Broken, 1000), Some(Severity::Amber));
        assert_eq!(at(CloudCover::Broken, 2900), Some(Severity::Amber));
        assert_eq!(severity(daytime_obs().with_cloud(CloudCover::Broken, 3000)), None);
    }

    #[test]
    fn clear_sky_is_skipped() {
        assert_eq!(severity(daytime_obs()), None);
        assert_eq!(severity(daytime_obs().with_cloud(CloudCover::Scattered, 500)), None);
    }
}
