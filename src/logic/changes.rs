use crate::models::{
    format_ceiling, sort_by_severity, ChangeKind, NormalizedObservation, Severity, WeatherChange,
};

/// Present-weather tokens that always warrant a red change when they appear.
pub const HAZARDOUS_WEATHER: [&str; 8] = ["TS", "FZ", "FG", "+RA", "+SN", "GR", "FC", "VA"];

/// Differences between a captured observation and a newer one, most severe
/// first. Improvements are not reported.
pub fn detect_changes(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Vec<WeatherChange> {
    let mut changes: Vec<WeatherChange> = [
        flight_category_change(snapshot, current),
        wind_speed_change(snapshot, current),
        gust_change(snapshot, current),
        visibility_change(snapshot, current),
        ceiling_change(snapshot, current),
        weather_change(snapshot, current),
        special_report_change(snapshot, current),
    ]
    .into_iter()
    .flatten()
    .collect();

    sort_by_severity(&mut changes, |c| c.severity);

    tracing::debug!(
        station = %current.station_id,
        count = changes.len(),
        "observation changes detected"
    );

    changes
}

fn flight_category_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    let before = snapshot.flight_category();
    let after = current.flight_category();
    if before == after {
        return None;
    }

    let degraded = after.rank() < before.rank();
    let severity = if degraded && after.is_instrument() {
        Severity::Red
    } else {
        Severity::Amber
    };
    let verb = if degraded { "dropped" } else { "improved" };

    Some(
        WeatherChange::new(
            ChangeKind::FlightCategory,
            severity,
            format!("Flight category {} to {}", verb, after),
            format!("{} was {} and is now {}", current.station_id, before, after),
        )
        .with_values(before.as_str(), after.as_str()),
    )
}

fn wind_speed_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    let before = snapshot.wind.speed_kt;
    let after = current.wind.speed_kt;
    let delta = before.abs_diff(after);

    let severity = if delta > 15 {
        Severity::Red
    } else if delta > 5 {
        Severity::Amber
    } else {
        return None;
    };
    let verb = if after > before { "increased" } else { "decreased" };

    Some(
        WeatherChange::new(
            ChangeKind::WindSpeed,
            severity,
            format!("Wind {} {} kt", verb, delta),
            format!("Sustained wind {} from {} kt to {} kt", verb, before, after),
        )
        .with_values(format!("{} kt", before), format!("{} kt", after)),
    )
}

fn gust_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    match (snapshot.wind.gust_kt, current.wind.gust_kt) {
        (None, Some(gust)) => {
            let severity = if gust >= 10 { Severity::Red } else { Severity::Amber };
            Some(
                WeatherChange::new(
                    ChangeKind::Gust,
                    severity,
                    "Gusts developing",
                    format!("Gusts to {} kt now reported", gust),
                )
                .with_values("None", format!("{} kt", gust)),
            )
        }
        (Some(before), Some(after)) if after > before => {
            let increase = after - before;
            let severity = if increase >= 10 { Severity::Red } else { Severity::Amber };
            Some(
                WeatherChange::new(
                    ChangeKind::Gust,
                    severity,
                    format!("Gusts increased {} kt", increase),
                    format!("Gusts increased from {} kt to {} kt", before, after),
                )
                .with_values(format!("{} kt", before), format!("{} kt", after)),
            )
        }
        _ => None,
    }
}

fn visibility_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    let before = snapshot.visibility.statute_miles;
    let after = current.visibility.statute_miles;
    if after >= before {
        return None;
    }

    let drop = before - after;
    let severity = if after < 3.0 {
        Severity::Red
    } else if drop > 2.0 {
        Severity::Amber
    } else {
        return None;
    };

    Some(
        WeatherChange::new(
            ChangeKind::Visibility,
            severity,
            "Visibility decreased",
            format!("Visibility dropped {:.1} SM", drop),
        )
        .with_values(snapshot.visibility.describe(), current.visibility.describe()),
    )
}

fn ceiling_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    let before = snapshot.ceiling_ft();
    let after = current.ceiling_ft();

    let (severity, description) = match (before, after) {
        (None, Some(c)) => {
            let severity = if c < 1000 { Severity::Red } else { Severity::Amber };
            (severity, format!("Ceiling now {} ft where none was reported", c))
        }
        (Some(a), Some(b)) if b < a => {
            let severity = if b < 1000 {
                Severity::Red
            } else if a - b > 500 {
                Severity::Amber
            } else {
                return None;
            };
            (severity, format!("Ceiling lowered {} ft", a - b))
        }
        _ => return None,
    };

    Some(
        WeatherChange::new(ChangeKind::Ceiling, severity, "Ceiling lowering", description)
            .with_values(format_ceiling(before), format_ceiling(after)),
    )
}

fn weather_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    let now = current.present_weather.as_deref().filter(|w| !w.trim().is_empty())?;
    let before = snapshot.present_weather.as_deref().unwrap_or("");

    let new_hazards: Vec<&str> = HAZARDOUS_WEATHER
        .iter()
        .copied()
        .filter(|token| now.contains(token) && !before.contains(token))
        .collect();

    if !new_hazards.is_empty() {
        return Some(
            WeatherChange::new(
                ChangeKind::Weather,
                Severity::Red,
                "Hazardous weather reported",
                format!("New hazardous weather: {}", new_hazards.join(", ")),
            )
            .with_values(display_weather(before), now),
        );
    }

    if before.trim().is_empty() {
        return Some(
            WeatherChange::new(
                ChangeKind::Weather,
                Severity::Amber,
                "Weather now reported",
                format!("Present weather: {}", now),
            )
            .with_values("None", now),
        );
    }

    None
}

fn display_weather(weather: &str) -> &str {
    if weather.trim().is_empty() {
        "None"
    } else {
        weather
    }
}

fn special_report_change(
    snapshot: &NormalizedObservation,
    current: &NormalizedObservation,
) -> Option<WeatherChange> {
    if snapshot.is_speci || !current.is_speci {
        return None;
    }

    Some(
        WeatherChange::new(
            ChangeKind::SpecialReport,
            Severity::Amber,
            "Special observation issued",
            format!("{} issued a SPECI: conditions changed significantly", current.station_id),
        )
        .with_values("METAR", "SPECI"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CloudCover, GeoPoint, WindDirection};
    use chrono::{TimeZone, Utc};

    fn base() -> NormalizedObservation {
        NormalizedObservation::new(
            "KORD",
            Utc.with_ymd_and_hms(2024, 2, 20, 14, 51, 0).unwrap(),
            GeoPoint {
                latitude: 41.98,
                longitude: -87.9,
                elevation_ft: 672.0,
            },
        )
        .with_wind(WindDirection::Degrees(270), 10, None)
        .with_visibility(10.0)
    }

    #[test]
    fn identical_observations_produce_nothing() {
        assert!(detect_changes(&base(), &base()).is_empty());
    }

    #[test]
    fn vfr_to_ifr_with_gusts_and_low_visibility() {
        let snapshot = base();
        let current = base()
            .with_wind(WindDirection::Degrees(270), 10, Some(20))
            .with_visibility(2.0);

        let changes = detect_changes(&snapshot, &current);
        let kinds: Vec<ChangeKind> = changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::FlightCategory, ChangeKind::Gust, ChangeKind::Visibility]
        );
        assert!(changes.iter().all(|c| c.severity == Severity::Red));
        assert_eq!(changes[0].previous_value, "VFR");
        assert_eq!(changes[0].current_value, "IFR");
    }

    #[test]
    fn red_changes_sort_before_amber() {
        let snapshot = base().with_cloud(CloudCover::Broken, 4500);
        let current = base()
            .with_wind(WindDirection::Degrees(270), 17, None)
            .with_cloud(CloudCover::Broken, 3500)
            .with_weather("TSRA")
            .special();

        let changes = detect_changes(&snapshot, &current);
        let summary: Vec<(ChangeKind, Severity)> =
            changes.iter().map(|c| (c.kind, c.severity)).collect();
        assert_eq!(
            summary,
            vec![
                (ChangeKind::Weather, Severity::Red),
                (ChangeKind::WindSpeed, Severity::Amber),
                (ChangeKind::Ceiling, Severity::Amber),
                (ChangeKind::SpecialReport, Severity::Amber),
            ]
        );
    }

    #[test]
    fn flight_category_improvement_is_amber() {
        let snapshot = base().with_visibility(2.0);
        let changes = detect_changes(&snapshot, &base());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::FlightCategory);
        assert_eq!(changes[0].severity, Severity::Amber);
    }

    #[test]
    fn degrading_to_mvfr_is_amber() {
        let current = base().with_visibility(4.0);
        let changes = detect_changes(&base(), &current);
        let fc = changes.iter().find(|c| c.kind == ChangeKind::FlightCategory).unwrap();
        assert_eq!(fc.severity, Severity::Amber);
        // 6 SM drop from 10 to 4 is amber, not red
        let vis = changes.iter().find(|c| c.kind == ChangeKind::Visibility).unwrap();
        assert_eq!(vis.severity, Severity::Amber);
    }

    #[test]
    fn wind_speed_bands() {
        let calm = base();
        let small = base().with_wind(WindDirection::Degrees(270), 15, None);
        let strong = base().with_wind(WindDirection::Degrees(270), 26, None);
        let dropped = base().with_wind(WindDirection::Degrees(270), 2, None);

        assert!(detect_changes(&calm, &small).is_empty());
        assert_eq!(detect_changes(&calm, &strong)[0].severity, Severity::Red);
        assert_eq!(detect_changes(&calm, &dropped)[0].severity, Severity::Amber);
    }

    #[test]
    fn gust_rules() {
        let light_onset = base().with_wind(WindDirection::Degrees(270), 5, Some(9));
        let calm = base().with_wind(WindDirection::Degrees(270), 5, None);
        let changes = detect_changes(&calm, &light_onset);
        assert_eq!(changes[0].kind, ChangeKind::Gust);
        assert_eq!(changes[0].severity, Severity::Amber);

        let before = base().with_wind(WindDirection::Degrees(270), 10, Some(18));
        let bigger = base().with_wind(WindDirection::Degrees(270), 10, Some(28));
        assert_eq!(detect_changes(&before, &bigger)[0].severity, Severity::Red);

        let smaller = base().with_wind(WindDirection::Degrees(270), 10, Some(15));
        assert!(detect_changes(&before, &smaller).is_empty());

        let gone = base();
        assert!(detect_changes(&before, &gone).is_empty());
    }

    #[test]
    fn ceiling_rules() {
        let clear = base();
        let low = base().with_cloud(CloudCover::Overcast, 800);
        let mid = base().with_cloud(CloudCover::Overcast, 4000);

        let appear_low = detect_changes(&clear, &low);
        let c = appear_low.iter().find(|c| c.kind == ChangeKind::Ceiling).unwrap();
        assert_eq!(c.severity, Severity::Red);

        let appear_mid = detect_changes(&clear, &mid);
        assert_eq!(appear_mid.len(), 1);
        assert_eq!(appear_mid[0].severity, Severity::Amber);

        let slight = base().with_cloud(CloudCover::Overcast, 3700);
        assert!(detect_changes(&mid, &slight).is_empty());

        // Rising ceilings never emit
        assert!(detect_changes(&slight, &mid).is_empty());
    }

    #[test]
    fn weather_tokens() {
        let rain = base().with_weather("-RA");
        let freezing = base().with_weather("-FZRA");

        let first = detect_changes(&base(), &rain);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].severity, Severity::Amber);

        let hazard = detect_changes(&rain, &freezing);
        assert_eq!(hazard.len(), 1);
        assert_eq!(hazard[0].severity, Severity::Red);
        assert!(hazard[0].description.contains("FZ"));

        // Same hazard in both reports is not new
        assert!(detect_changes(&freezing, &freezing).is_empty());
        // Non-hazardous change between two reported strings is ignored
        assert!(detect_changes(&rain, &base().with_weather("BR")).is_empty());
    }

    #[test]
    fn speci_onset_only() {
        let speci = base().special();
        assert_eq!(detect_changes(&base(), &speci)[0].kind, ChangeKind::SpecialReport);
        assert!(detect_changes(&speci, &speci).is_empty());
        assert!(detect_changes(&speci, &base()).is_empty());
    }
}
