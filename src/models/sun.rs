use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Day/night boundaries for one date at one place.
///
/// Every instant is `None` when the sun does not cross the relevant
/// depression angle that day (polar day or polar night). Check before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunInfo {
    pub date: NaiveDate,
    pub civil_twilight_start: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub civil_twilight_end: Option<DateTime<Utc>>,
    /// Sunset plus one hour, used for night currency.
    pub currency_night: Option<DateTime<Utc>>,
    /// End of evening civil twilight, used for logbook night time.
    pub logbook_night: Option<DateTime<Utc>>,
    pub sunrise_local: String,
    pub sunset_local: String,
    pub civil_twilight_start_local: String,
    pub civil_twilight_end_local: String,
    pub currency_night_local: String,
}

pub fn format_local(instant: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    match instant {
        Some(t) => t.with_timezone(&offset).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
