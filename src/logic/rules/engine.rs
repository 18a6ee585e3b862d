use super::{
    altimeter, ceiling, crosswind, fog_risk, gust_factor, night_vfr, special_report, visibility,
    Rule, RuleContext,
};
use crate::models::{sort_by_severity, AlertCondition, NormalizedObservation, Thresholds};

static RULES: [Rule; 8] = [
    crosswind::RULE,
    fog_risk::RULE,
    gust_factor::RULE,
    ceiling::RULE,
    visibility::RULE,
    special_report::RULE,
    night_vfr::RULE,
    altimeter::RULE,
];

pub struct AlertEngine {
    rules: &'static [Rule],
}

impl AlertEngine {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Run every rule and return the alerts, red first. Rules keep their
    /// table order within a severity.
    pub fn evaluate(
        &self,
        observation: &NormalizedObservation,
        thresholds: &Thresholds,
        runway_heading: Option<f64>,
    ) -> Vec<AlertCondition> {
        let ctx = RuleContext {
            observation,
            thresholds,
            runway_heading,
        };

        let mut alerts: Vec<AlertCondition> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let alert = (rule.evaluate)(&ctx)?;
                tracing::debug!(rule = rule.id, severity = %alert.severity, "alert rule fired");
                Some(alert)
            })
            .collect();

        sort_by_severity(&mut alerts, |a| a.severity);
        alerts
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        observation: &NormalizedObservation,
        thresholds: &Thresholds,
        runway_heading: Option<f64>,
    ) -> Option<AlertCondition> {
        let ctx = RuleContext {
            observation,
            thresholds,
            runway_heading,
        };
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .and_then(|rule| (rule.evaluate)(&ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id, r.name)).collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures::{alert_kinds, daytime_obs};
    use crate::models::{AlertKind, CloudCover, Severity, WindDirection};

    #[test]
    fn benign_day_has_no_alerts() {
        let engine = AlertEngine::new();
        let alerts = engine.evaluate(&daytime_obs(), &Thresholds::default(), Some(170.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn red_alerts_come_first_in_rule_order() {
        let obs = daytime_obs()
            .with_wind(WindDirection::Degrees(260), 14, Some(28))
            .with_temperatures(8.0, 6.0)
            .with_cloud(CloudCover::Overcast, 700)
            .with_visibility(4.0)
            .with_altimeter(29.55)
            .special();

        let alerts = AlertEngine::new().evaluate(&obs, &Thresholds::default(), Some(170.0));

        assert_eq!(
            alert_kinds(&alerts),
            vec![
                AlertKind::Crosswind,
                AlertKind::LowCeiling,
                AlertKind::FogRisk,
                AlertKind::GustFactor,
                AlertKind::LowVisibility,
                AlertKind::SpecialReport,
                AlertKind::LowAltimeter,
            ]
        );

        let first_amber = alerts.iter().position(|a| a.severity == Severity::Amber).unwrap();
        assert!(alerts[..first_amber].iter().all(|a| a.severity == Severity::Red));
        assert!(alerts[first_amber..].iter().all(|a| a.severity == Severity::Amber));
    }

    #[test]
    fn missing_inputs_suppress_rules() {
        // No runway, variable wind, clear sky
        let obs = daytime_obs().with_wind(WindDirection::Variable, 40, None);
        let alerts = AlertEngine::new().evaluate(&obs, &Thresholds::default(), None);
        assert!(alerts.is_empty());
    }

    #[test]
    fn evaluate_single_rule() {
        let engine = AlertEngine::new();
        let obs = daytime_obs().with_altimeter(29.5);
        let thresholds = Thresholds::default();

        let alert = engine.evaluate_rule("low_altimeter", &obs, &thresholds, None).unwrap();
        assert_eq!(alert.kind, AlertKind::LowAltimeter);
        assert!(engine.evaluate_rule("low_ceiling", &obs, &thresholds, None).is_none());
        assert!(engine.evaluate_rule("no_such_rule", &obs, &thresholds, None).is_none());
    }

    #[test]
    fn lists_all_rules() {
        let ids: Vec<&str> = AlertEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "crosswind",
                "fog_risk",
                "gust_factor",
                "low_ceiling",
                "low_visibility",
                "speci",
                "night_vfr",
                "low_altimeter",
            ]
        );
    }
}
