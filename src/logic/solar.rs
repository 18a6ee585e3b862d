//! NOAA-style solar position math.
//!
//! Low-precision orbital series (good to about a minute for sunrise/sunset
//! between 1800 and 2100) for declination and the equation of time, and the
//! hour angle at which the sun's centre crosses a given depression below the
//! horizon.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Refraction plus solar semi-diameter, used for sunrise and sunset.
pub const SUNRISE_DEPRESSION_DEG: f64 = 0.833;
/// Sun 6° below the horizon bounds civil twilight.
pub const CIVIL_TWILIGHT_DEPRESSION_DEG: f64 = 6.0;

/// Julian day at 00:00 UTC of a calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (mut y, mut m) = (date.year() as f64, date.month() as f64);
    let d = date.day() as f64;
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + d + b - 1524.5
}

pub fn julian_century(jd: f64) -> f64 {
    (jd - 2_451_545.0) / 36_525.0
}

fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

fn mean_longitude(t: f64) -> f64 {
    normalize_degrees(280.46646 + t * (36000.76983 + t * 0.0003032))
}

fn mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

fn orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t) * DEG;
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

fn apparent_longitude(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    mean_longitude(t) + equation_of_center(t) - 0.00569 - 0.00478 * (omega * DEG).sin()
}

fn obliquity_corrected(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    let mean = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let omega = 125.04 - 1934.136 * t;
    mean + 0.00256 * (omega * DEG).cos()
}

/// Solar declination in degrees.
pub fn solar_declination(t: f64) -> f64 {
    let e = obliquity_corrected(t) * DEG;
    let lambda = apparent_longitude(t) * DEG;
    (e.sin() * lambda.sin()).clamp(-1.0, 1.0).asin() / DEG
}

/// Equation of time in minutes (apparent minus mean solar time).
pub fn equation_of_time(t: f64) -> f64 {
    let e = obliquity_corrected(t) * DEG;
    let l0 = mean_longitude(t) * DEG;
    let ecc = orbit_eccentricity(t);
    let m = mean_anomaly(t) * DEG;
    let y = (e / 2.0).tan().powi(2);

    let eq = y * (2.0 * l0).sin() - 2.0 * ecc * m.sin()
        + 4.0 * ecc * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * ecc * ecc * (2.0 * m).sin();

    4.0 * eq / DEG
}

/// Outcome of solving for the hour angle of a depression crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngle {
    /// Degrees either side of solar noon.
    Crossing(f64),
    /// The sun stays above the depression all day.
    AlwaysAbove,
    /// The sun never climbs to the depression.
    AlwaysBelow,
}

/// Sun parameters for one date, evaluated near local solar noon.
#[derive(Debug, Clone, Copy)]
pub struct SolarDay {
    pub date: NaiveDate,
    pub declination_deg: f64,
    pub equation_of_time_min: f64,
    /// Minutes after 00:00 UTC of `date`.
    pub solar_noon_min: f64,
}

impl SolarDay {
    pub fn new(date: NaiveDate, longitude: f64) -> Self {
        let t = julian_century(julian_day(date) + 0.5 - longitude / 360.0);
        let declination_deg = solar_declination(t);
        let equation_of_time_min = equation_of_time(t);
        Self {
            date,
            declination_deg,
            equation_of_time_min,
            solar_noon_min: 720.0 - 4.0 * longitude - equation_of_time_min,
        }
    }

    pub fn hour_angle(&self, latitude: f64, depression_deg: f64) -> HourAngle {
        let lat = latitude * DEG;
        let decl = self.declination_deg * DEG;
        let zenith = (90.0 + depression_deg) * DEG;

        let cos_h = (zenith.cos() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());

        if !cos_h.is_finite() {
            // Pole: the sun circles at a constant altitude all day.
            let noon_altitude = 90.0 - (latitude - self.declination_deg).abs();
            return if noon_altitude > -depression_deg {
                HourAngle::AlwaysAbove
            } else {
                HourAngle::AlwaysBelow
            };
        }
        if cos_h > 1.0 {
            HourAngle::AlwaysBelow
        } else if cos_h < -1.0 {
            HourAngle::AlwaysAbove
        } else {
            HourAngle::Crossing(cos_h.acos() / DEG)
        }
    }

    /// Morning and evening crossings of a depression, or `None` when the sun
    /// does not cross it on this date.
    pub fn crossings(
        &self,
        latitude: f64,
        depression_deg: f64,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.hour_angle(latitude, depression_deg) {
            HourAngle::Crossing(h) => {
                let offset = 4.0 * h;
                Some((
                    self.instant_at(self.solar_noon_min - offset),
                    self.instant_at(self.solar_noon_min + offset),
                ))
            }
            HourAngle::AlwaysAbove | HourAngle::AlwaysBelow => None,
        }
    }

    fn instant_at(&self, minutes: f64) -> DateTime<Utc> {
        let midnight = self.date.and_time(chrono::NaiveTime::MIN).and_utc();
        midnight + Duration::milliseconds((minutes * 60_000.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn julian_day_known_epochs() {
        // J2000.0 is 2000-01-01 12:00 TT
        assert_eq!(julian_day(date(2000, 1, 1)), 2_451_544.5);
        assert_eq!(julian_day(date(1970, 1, 1)), 2_440_587.5);
        assert_eq!(julian_century(julian_day(date(2000, 1, 1)) + 0.5), 0.0);
    }

    #[test]
    fn declination_at_solstices_and_equinox() {
        let june = SolarDay::new(date(2024, 6, 20), 0.0);
        assert!((june.declination_deg - 23.44).abs() < 0.1);

        let december = SolarDay::new(date(2024, 12, 21), 0.0);
        assert!((december.declination_deg + 23.44).abs() < 0.1);

        let march = SolarDay::new(date(2024, 3, 20), 0.0);
        assert!(march.declination_deg.abs() < 0.5);
    }

    #[test]
    fn equation_of_time_extremes() {
        // Early November peaks around +16.4 min, mid February around -14.2 min
        let nov = SolarDay::new(date(2024, 11, 3), 0.0);
        assert!((nov.equation_of_time_min - 16.4).abs() < 0.5);

        let feb = SolarDay::new(date(2024, 2, 11), 0.0);
        assert!((feb.equation_of_time_min + 14.2).abs() < 0.5);
    }

    #[test]
    fn new_york_summer_sunrise_and_sunset() {
        let day = SolarDay::new(date(2024, 6, 20), -74.006);
        let (sunrise, sunset) = day.crossings(40.7128, SUNRISE_DEPRESSION_DEG).unwrap();

        let expected_rise = Utc.with_ymd_and_hms(2024, 6, 20, 9, 25, 0).unwrap();
        let expected_set = Utc.with_ymd_and_hms(2024, 6, 21, 0, 31, 0).unwrap();
        assert!((sunrise - expected_rise).num_minutes().abs() <= 3, "sunrise {}", sunrise);
        assert!((sunset - expected_set).num_minutes().abs() <= 3, "sunset {}", sunset);
    }

    #[test]
    fn polar_hour_angles() {
        let winter = SolarDay::new(date(2024, 12, 21), 25.0);
        assert_eq!(winter.hour_angle(70.0, SUNRISE_DEPRESSION_DEG), HourAngle::AlwaysBelow);
        assert!(matches!(
            winter.hour_angle(70.0, CIVIL_TWILIGHT_DEPRESSION_DEG),
            HourAngle::Crossing(_)
        ));
        assert_eq!(winter.hour_angle(80.0, CIVIL_TWILIGHT_DEPRESSION_DEG), HourAngle::AlwaysBelow);

        let summer = SolarDay::new(date(2024, 6, 21), 25.0);
        assert_eq!(summer.hour_angle(70.0, SUNRISE_DEPRESSION_DEG), HourAngle::AlwaysAbove);
        assert!(summer.crossings(70.0, SUNRISE_DEPRESSION_DEG).is_none());
    }

    #[test]
    fn poles_do_not_produce_nan() {
        let summer = SolarDay::new(date(2024, 6, 21), 0.0);
        assert_eq!(summer.hour_angle(90.0, SUNRISE_DEPRESSION_DEG), HourAngle::AlwaysAbove);
        assert_eq!(summer.hour_angle(-90.0, SUNRISE_DEPRESSION_DEG), HourAngle::AlwaysBelow);
    }
}
