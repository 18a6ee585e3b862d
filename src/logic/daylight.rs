use super::solar::{HourAngle, SolarDay, CIVIL_TWILIGHT_DEPRESSION_DEG, SUNRISE_DEPRESSION_DEG};
use crate::models::{format_local, SunInfo};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// Offset from sunset that starts night for currency purposes.
pub const CURRENCY_NIGHT_OFFSET_MIN: i64 = 60;

/// Sunrise, sunset, civil twilight and the two night definitions for a date.
pub fn sun_info(latitude: f64, longitude: f64, date: NaiveDate, offset: FixedOffset) -> SunInfo {
    let day = SolarDay::new(date, longitude);
    let (sunrise, sunset) = split(day.crossings(latitude, SUNRISE_DEPRESSION_DEG));
    let (twilight_start, twilight_end) =
        split(day.crossings(latitude, CIVIL_TWILIGHT_DEPRESSION_DEG));
    let currency_night = sunset.map(|s| s + Duration::minutes(CURRENCY_NIGHT_OFFSET_MIN));

    if sunrise.is_none() || twilight_start.is_none() {
        tracing::debug!(
            latitude,
            longitude,
            %date,
            "sun does not cross the horizon or civil twilight depression"
        );
    }

    SunInfo {
        date,
        civil_twilight_start: twilight_start,
        sunrise,
        sunset,
        civil_twilight_end: twilight_end,
        currency_night,
        logbook_night: twilight_end,
        sunrise_local: format_local(sunrise, offset),
        sunset_local: format_local(sunset, offset),
        civil_twilight_start_local: format_local(twilight_start, offset),
        civil_twilight_end_local: format_local(twilight_end, offset),
        currency_night_local: format_local(currency_night, offset),
    }
}

fn split<T>(pair: Option<(T, T)>) -> (Option<T>, Option<T>) {
    match pair {
        Some((a, b)) => (Some(a), Some(b)),
        None => (None, None),
    }
}

/// Calendar date at the place by mean solar time, so that a local night
/// falls within one solar day.
pub fn local_solar_date(longitude: f64, instant: DateTime<Utc>) -> NaiveDate {
    let shift = Duration::seconds((longitude * 240.0).round() as i64);
    (instant + shift).date_naive()
}

/// Whether `instant` is outside civil twilight at the given place.
///
/// The twilight band itself counts as day. Where the sun never reaches the
/// civil depression the answer is the polar one: never rising means night,
/// never setting means day.
pub fn is_night(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> bool {
    let day = SolarDay::new(local_solar_date(longitude, instant), longitude);

    match day.hour_angle(latitude, CIVIL_TWILIGHT_DEPRESSION_DEG) {
        HourAngle::AlwaysBelow => true,
        HourAngle::AlwaysAbove => false,
        HourAngle::Crossing(_) => match day.crossings(latitude, CIVIL_TWILIGHT_DEPRESSION_DEG) {
            Some((start, end)) => instant < start || instant >= end,
            None => false,
        },
    }
}
