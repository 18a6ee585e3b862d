use super::{
    analyze_departure, analyze_trends, detect_changes, first_qualifying_period, generate_timeline,
    is_night, night_minimums, sun_info, AlertEngine,
};
use super::daylight::local_solar_date;
use super::timeline::DEFAULT_HORIZON_HOURS;
use crate::models::{
    AlertCondition, DepartureAnalysis, DepartureWindow, ForecastPeriod, ForecastPoint,
    NormalizedObservation, PersonalMinimums, SunInfo, Thresholds, WeatherChange, WeatherTrend,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Everything needed to brief one station, as read from a JSON file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BriefingInput {
    pub observation: NormalizedObservation,
    #[serde(default)]
    pub forecast: Vec<ForecastPeriod>,
    /// An earlier observation of the same station to diff against.
    #[serde(default)]
    pub snapshot: Option<NormalizedObservation>,
    /// Evaluation instant. Falls back to the caller's clock when absent.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Settings that shape a briefing but do not come from the weather.
#[derive(Debug, Clone, Copy)]
pub struct BriefingOptions<'a> {
    pub thresholds: &'a Thresholds,
    pub minimums: &'a PersonalMinimums,
    pub runway_heading: Option<f64>,
    pub offset: FixedOffset,
    /// Use night-adjusted minimums for departure planning.
    pub night: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Briefing {
    pub station_id: String,
    pub generated_at: DateTime<Utc>,
    /// Whether the station is outside civil twilight at `generated_at`.
    pub is_night: bool,
    pub minimums: PersonalMinimums,
    pub alerts: Vec<AlertCondition>,
    pub sun: SunInfo,
    pub timeline: Vec<ForecastPoint>,
    pub trends: Vec<WeatherTrend>,
    pub departure: DepartureAnalysis,
    pub first_window: Option<DepartureWindow>,
    pub changes: Vec<WeatherChange>,
}

impl Briefing {
    pub fn prepare(input: &BriefingInput, options: &BriefingOptions, now: DateTime<Utc>) -> Self {
        let obs = &input.observation;
        let location = obs.location;

        let minimums = if options.night {
            night_minimums(options.minimums)
        } else {
            *options.minimums
        };

        // The station's own calendar day, whatever offset the output uses
        let station_date = local_solar_date(location.longitude, now);
        let sun = sun_info(location.latitude, location.longitude, station_date, options.offset);

        let alerts = AlertEngine::new().evaluate(obs, options.thresholds, options.runway_heading);
        let changes = input
            .snapshot
            .as_ref()
            .map(|snapshot| detect_changes(snapshot, obs))
            .unwrap_or_default();

        let briefing = Self {
            station_id: obs.station_id.clone(),
            generated_at: now,
            is_night: is_night(location.latitude, location.longitude, now),
            minimums,
            alerts,
            sun,
            timeline: generate_timeline(&input.forecast, now, DEFAULT_HORIZON_HOURS),
            trends: analyze_trends(obs, &input.forecast, now),
            departure: analyze_departure(&input.forecast, &minimums, now, options.offset),
            first_window: first_qualifying_period(&input.forecast, &minimums),
            changes,
        };

        tracing::info!(
            station = %briefing.station_id,
            alerts = briefing.alerts.len(),
            changes = briefing.changes.len(),
            windows = briefing.departure.windows.len(),
            "briefing prepared"
        );
        briefing
    }
}
