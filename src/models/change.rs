use super::alert::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    FlightCategory,
    WindSpeed,
    Gust,
    Visibility,
    Ceiling,
    Weather,
    SpecialReport,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::FlightCategory => "flight_category",
            ChangeKind::WindSpeed => "wind_speed",
            ChangeKind::Gust => "gust",
            ChangeKind::Visibility => "visibility",
            ChangeKind::Ceiling => "ceiling",
            ChangeKind::Weather => "weather",
            ChangeKind::SpecialReport => "speci",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notable difference between a captured observation and a newer one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherChange {
    pub id: String,
    pub kind: ChangeKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub previous_value: String,
    pub current_value: String,
    pub detected_at: DateTime<Utc>,
}

impl WeatherChange {
    pub fn new(
        kind: ChangeKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let detected_at = Utc::now();
        Self {
            id: format!("{}-{}", kind.as_str(), detected_at.timestamp_millis()),
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            previous_value: String::new(),
            current_value: String::new(),
            detected_at,
        }
    }

    pub fn with_values(mut self, previous: impl Into<String>, current: impl Into<String>) -> Self {
        self.previous_value = previous.into();
        self.current_value = current.into();
        self
    }
}
