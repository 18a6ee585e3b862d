use super::observation::FlightCategory;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Which personal minimum a forecast sample broke first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limitation {
    Ceiling,
    Visibility,
    Wind,
    Gust,
}

impl Limitation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Limitation::Ceiling => "ceiling below minimums",
            Limitation::Visibility => "visibility below minimums",
            Limitation::Wind => "wind above limit",
            Limitation::Gust => "gusts above limit",
        }
    }
}

impl std::fmt::Display for Limitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A forecast instant checked against personal minimums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSample {
    pub time: DateTime<Utc>,
    pub flight_category: FlightCategory,
    pub failure: Option<(Limitation, String)>,
}

impl WindowSample {
    pub fn passes(&self) -> bool {
        self.failure.is_none()
    }

    pub fn reason(&self) -> Option<&str> {
        self.failure.as_ref().map(|(_, r)| r.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub flight_category: FlightCategory,
    /// Why the window closes, when something closes it.
    pub reason: Option<String>,
}

impl DepartureWindow {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartureAnalysis {
    pub samples: Vec<WindowSample>,
    pub windows: Vec<DepartureWindow>,
    pub best: Option<DepartureWindow>,
    pub advisory: String,
}

impl DepartureAnalysis {
    pub fn currently_within_minimums(&self) -> bool {
        self.samples.first().is_some_and(WindowSample::passes)
    }
}
