pub mod altimeter;
pub mod ceiling;
pub mod crosswind;
pub mod engine;
pub mod fog_risk;
pub mod gust_factor;
pub mod night_vfr;
pub mod special_report;
pub mod visibility;

pub use engine::AlertEngine;

use crate::models::{AlertCondition, NormalizedObservation, Severity, Thresholds};

/// Inputs shared by every alert rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub observation: &'a NormalizedObservation,
    pub thresholds: &'a Thresholds,
    /// Runway heading in degrees true, when a runway has been chosen.
    pub runway_heading: Option<f64>,
}

/// A hazard rule: evaluates one observation and returns at most one alert.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    pub evaluate: fn(&RuleContext) -> Option<AlertCondition>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Severity for a "higher is worse" value against an amber/red band.
pub(crate) fn rising_severity(value: f64, amber: f64, red: f64) -> Option<Severity> {
    if value >= red {
        Some(Severity::Red)
    } else if value >= amber {
        Some(Severity::Amber)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{GeoPoint, NormalizedObservation};
    use chrono::{TimeZone, Utc};

    /// Daytime observation at Denver with benign conditions.
    pub fn daytime_obs() -> NormalizedObservation {
        NormalizedObservation::new(
            "KDEN",
            Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap(),
            GeoPoint {
                latitude: 39.86,
                longitude: -104.67,
                elevation_ft: 5434.0,
            },
        )
    }

    pub fn alert_kinds(alerts: &[super::AlertCondition]) -> Vec<crate::models::AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }
}
