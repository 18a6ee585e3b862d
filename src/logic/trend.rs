use super::timeline::{generate_timeline, DEFAULT_HORIZON_HOURS};
use crate::models::{
    format_ceiling, format_visibility, ForecastPeriod, ForecastPoint, NormalizedObservation,
    TrendDirection, WeatherTrend,
};
use chrono::{DateTime, Utc};

const CEILING_THRESHOLD_FT: i64 = 500;
const VISIBILITY_THRESHOLD_SM: f64 = 1.0;
const WIND_THRESHOLD_KT: i64 = 3;

/// Compare the current observation against the forecast two to three hours
/// out.
pub fn analyze_trends(
    current: &NormalizedObservation,
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
) -> Vec<WeatherTrend> {
    let timeline = generate_timeline(periods, now, DEFAULT_HORIZON_HOURS);
    if timeline.len() < 2 {
        return Vec::new();
    }
    let Some(target) = timeline.get(2).or_else(|| timeline.get(1)) else {
        return Vec::new();
    };

    [
        ceiling_trend(current, target),
        Some(visibility_trend(current, target)),
        Some(wind_trend(current, target)),
        category_trend(current, target),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn ceiling_trend(current: &NormalizedObservation, target: &ForecastPoint) -> Option<WeatherTrend> {
    let now = current.ceiling_ft();
    let later = target.ceiling_ft;

    let (direction, description) = match (now, later) {
        (None, None) => return None,
        (Some(_), None) => (TrendDirection::Improving, "Ceiling forecast to clear".to_string()),
        (None, Some(c)) => (
            TrendDirection::Deteriorating,
            format!("Ceiling forecast to develop at {} ft", c),
        ),
        (Some(a), Some(b)) => {
            let delta = b as i64 - a as i64;
            if delta > CEILING_THRESHOLD_FT {
                (TrendDirection::Improving, format!("Ceiling rising {} ft", delta))
            } else if delta < -CEILING_THRESHOLD_FT {
                (TrendDirection::Deteriorating, format!("Ceiling lowering {} ft", -delta))
            } else {
                return None;
            }
        }
    };

    Some(WeatherTrend::new(
        "Ceiling",
        direction,
        format_ceiling(now),
        format_ceiling(later),
        description,
    ))
}

fn visibility_trend(current: &NormalizedObservation, target: &ForecastPoint) -> WeatherTrend {
    let now = current.visibility.statute_miles;
    let later = target.visibility_sm;
    let delta = later - now;

    let (direction, description) = if delta > VISIBILITY_THRESHOLD_SM {
        (TrendDirection::Improving, "Visibility improving")
    } else if delta < -VISIBILITY_THRESHOLD_SM {
        (TrendDirection::Deteriorating, "Visibility decreasing")
    } else {
        (TrendDirection::Stable, "Visibility steady")
    };

    WeatherTrend::new(
        "Visibility",
        direction,
        current.visibility.describe(),
        format_visibility(later, false),
        description,
    )
}

fn wind_trend(current: &NormalizedObservation, target: &ForecastPoint) -> WeatherTrend {
    let now = current.wind.speed_kt as i64;
    let later = target.wind.speed_kt as i64;
    let delta = later - now;

    let (direction, description) = if delta > WIND_THRESHOLD_KT {
        (TrendDirection::Deteriorating, format!("Wind increasing {} kt", delta))
    } else if delta < -WIND_THRESHOLD_KT {
        (TrendDirection::Improving, format!("Wind decreasing {} kt", -delta))
    } else {
        (TrendDirection::Stable, "Wind steady".to_string())
    };

    WeatherTrend::new(
        "Wind",
        direction,
        format!("{} kt", now),
        format!("{} kt", later),
        description,
    )
}

fn category_trend(current: &NormalizedObservation, target: &ForecastPoint) -> Option<WeatherTrend> {
    let now = current.flight_category();
    let later = target.flight_category;
    if now == later {
        return None;
    }

    let direction = if later.rank() > now.rank() {
        TrendDirection::Improving
    } else {
        TrendDirection::Deteriorating
    };

    Some(WeatherTrend::new(
        "Flight Category",
        direction,
        now.as_str(),
        later.as_str(),
        format!("{} becoming {}", now, later),
    ))
}
