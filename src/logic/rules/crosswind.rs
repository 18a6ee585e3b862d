use super::{rising_severity, Rule, RuleContext};
use crate::models::{AlertCondition, AlertKind, Severity, WindDirection};

/// Crosswind component against the selected runway
///
/// Skipped without a runway heading or when the wind is variable. The larger
/// of the sustained and gust components is compared against the band.
pub const RULE: Rule = Rule {
    id: "crosswind",
    name: "Crosswind Component",
    evaluate,
};

/// Angle from runway to wind, wrapped to [-180, 180].
pub fn relative_angle(wind_dir: f64, runway_heading: f64) -> f64 {
    let diff = (wind_dir - runway_heading).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

pub fn crosswind_component(speed_kt: f64, angle_deg: f64) -> f64 {
    (speed_kt * angle_deg.to_radians().sin()).abs()
}

fn evaluate(ctx: &RuleContext) -> Option<AlertCondition> {
    let heading = ctx.runway_heading?;
    let wind = &ctx.observation.wind;
    let WindDirection::Degrees(dir) = wind.direction else {
        return None;
    };

    let angle = relative_angle(dir as f64, heading);
    let sustained = crosswind_component(wind.speed_kt as f64, angle);
    let gust = wind
        .gust_kt
        .map(|g| crosswind_component(g as f64, angle))
        .unwrap_or(0.0);
    let component = sustained.max(gust);

    let band = &ctx.thresholds.crosswind;
    let severity = rising_severity(component, band.amber, band.red)?;

    let title = match severity {
        Severity::Red => "Crosswind Exceeds Limit",
        _ => "Strong Crosswind",
    };

    Some(AlertCondition::new(
        AlertKind::Crosswind,
        severity,
        title,
        format!(
            "Crosswind component {:.0} kt for runway heading {:03.0}° (wind {}).",
            component,
            heading,
            wind.describe()
        ),
    ))
}
