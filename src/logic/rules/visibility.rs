use super::{Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity};

pub const RULE: Rule = Rule {
    id: "low_visibility",
    name: "Low Visibility",
    evaluate,
};

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let visibility = &ctx.observation.visibility;
    let band = &ctx.thresholds.visibility;

    let severity = if visibility.statute_miles < band.red {
        Severity::Red
    } else if visibility.statute_miles < band.amber {
        Severity::Amber
    } else {
        return None;
    };

    let title = match severity {
        Severity::Red => "Visibility Below Red Threshold",
        _ => "Reduced Visibility",
    };

    let mut message = format!(
        "Visibility {} at {}",
        visibility.describe(),
        ctx.observation.station_id
    );
    if let Some(wx) = ctx.observation.present_weather.as_deref() {
        message.push_str(&format!(" in {}", wx));
    }
    message.push('.');

    Some(AlertCondition::new(AlertKind::LowVisibility, severity, title, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::daytime_obs;
    use crate::models::Thresholds;

    fn alert(vis: f64) -> Option<AlertCondition> {
        let obs = daytime_obs().with_visibility(vis).with_weather("BR");
        let thresholds = Thresholds::default();
        evaluate(&RuleContext {
            observation: &obs,
            thresholds: &thresholds,
            runway_heading: None,
        })
    }

    #[test]
    fn bands() {
        assert_eq!(alert(2.5).unwrap().severity, Severity::Red);
        assert_eq!(alert(3.0).unwrap().severity, Severity::Amber);
        assert_eq!(alert(4.0).unwrap().severity, Severity::Amber);
        assert!(alert(5.0).is_none());
        assert!(alert(10.0).is_none());
    }

    #[test]
    fn message_names_weather() {
        assert!(alert(1.0).unwrap().message.contains("in BR"));
    }
}
