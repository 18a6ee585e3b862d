use crate::models::{ForecastPeriod, ForecastPoint};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_HORIZON_HOURS: u32 = 6;

/// Pick the period that governs `instant`, considering only base and FM
/// periods.
///
/// Preference order: the most recently started period containing the
/// instant, then the first period that has not ended yet, then the first
/// sustained period at all.
pub fn select_period(
    periods: &[ForecastPeriod],
    instant: DateTime<Utc>,
) -> Option<&ForecastPeriod> {
    let sustained = || periods.iter().filter(|p| p.change.is_sustained());

    let containing = sustained()
        .filter(|p| p.contains(instant))
        .fold(None::<&ForecastPeriod>, |best, p| match best {
            Some(b) if b.from >= p.from => Some(b),
            _ => Some(p),
        });

    containing
        .or_else(|| sustained().find(|p| p.to > instant))
        .or_else(|| sustained().next())
}

/// Conditions forecast for one instant.
pub fn point_at(periods: &[ForecastPeriod], instant: DateTime<Utc>) -> Option<ForecastPoint> {
    select_period(periods, instant).map(|p| ForecastPoint::from_period(instant, p))
}

/// Sample the forecast at `now` and each following hour up to
/// `horizon_hours`, inclusive.
///
/// Empty when there is no base or FM period to sample.
pub fn generate_timeline(
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
    horizon_hours: u32,
) -> Vec<ForecastPoint> {
    sample(periods, now, Duration::hours(1), horizon_hours as usize)
}

/// Sample the forecast every `step`, producing `steps + 1` points.
pub fn sample(
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
    step: Duration,
    steps: usize,
) -> Vec<ForecastPoint> {
    (0..=steps)
        .map_while(|i| point_at(periods, now + step * i as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangeType, CloudCover, CloudLayer, FlightCategory, Wind, WindDirection};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 15, 0, 0).unwrap()
    }

    fn period(from_h: i64, to_h: i64, change: ChangeType) -> ForecastPeriod {
        ForecastPeriod::new(now() + Duration::hours(from_h), now() + Duration::hours(to_h), change)
    }

    #[test]
    fn empty_forecast_gives_empty_timeline() {
        assert!(generate_timeline(&[], now(), DEFAULT_HORIZON_HOURS).is_empty());
    }

    #[test]
    fn only_transient_periods_give_empty_timeline() {
        let periods = vec![
            period(0, 6, ChangeType::Temporary),
            period(0, 6, ChangeType::Probability),
        ];
        assert!(generate_timeline(&periods, now(), DEFAULT_HORIZON_HOURS).is_empty());
    }

    #[test]
    fn single_all_day_period_gives_seven_identical_points() {
        let p = period(-12, 12, ChangeType::Base)
            .with_visibility("4SM")
            .with_cloud(CloudLayer::new(CloudCover::Overcast, 2200))
            .with_wind(Wind {
                direction: WindDirection::Degrees(270),
                speed_kt: 9,
                gust_kt: None,
            });
        let points = generate_timeline(&[p], now(), DEFAULT_HORIZON_HOURS);

        assert_eq!(points.len(), 7);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.time, now() + Duration::hours(i as i64));
            assert_eq!(point.ceiling_ft, Some(2200));
            assert_eq!(point.visibility_sm, 4.0);
            assert_eq!(point.flight_category, FlightCategory::Mvfr);
            assert_eq!(point.wind.speed_kt, 9);
        }
    }

    #[test]
    fn temporary_periods_are_ignored() {
        let periods = vec![
            period(-1, 6, ChangeType::Base).with_visibility("P6SM"),
            period(1, 3, ChangeType::Temporary).with_visibility("1/2SM"),
        ];
        let points = generate_timeline(&periods, now(), DEFAULT_HORIZON_HOURS);
        assert!(points.iter().all(|p| p.visibility_sm == 6.0));
    }

    #[test]
    fn latest_started_containing_period_wins() {
        let periods = vec![
            period(-6, 24, ChangeType::Base).with_visibility("P6SM"),
            period(2, 24, ChangeType::From).with_visibility("2SM"),
        ];
        let points = generate_timeline(&periods, now(), DEFAULT_HORIZON_HOURS);
        assert_eq!(points[1].visibility_sm, 6.0);
        assert_eq!(points[2].visibility_sm, 2.0);
        assert_eq!(points[6].visibility_sm, 2.0);
    }

    #[test]
    fn falls_back_to_upcoming_then_first_period() {
        // Forecast starts two hours from now
        let upcoming = vec![period(2, 8, ChangeType::Base).with_visibility("3SM")];
        let p = select_period(&upcoming, now()).unwrap();
        assert_eq!(p.visibility_sm(), 3.0);

        // Forecast already expired
        let stale = vec![
            period(-10, -6, ChangeType::Base).with_visibility("1SM"),
            period(-6, -2, ChangeType::From).with_visibility("2SM"),
        ];
        let p = select_period(&stale, now()).unwrap();
        assert_eq!(p.visibility_sm(), 1.0);
    }

    #[test]
    fn half_hour_sampling() {
        let p = period(0, 12, ChangeType::Base);
        let points = sample(&[p], now(), Duration::minutes(30), 12);
        assert_eq!(points.len(), 13);
        assert_eq!(points[12].time, now() + Duration::hours(6));
    }
}
