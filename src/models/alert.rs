use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Crosswind,
    FogRisk,
    GustFactor,
    LowCeiling,
    LowVisibility,
    SpecialReport,
    NightVfr,
    LowAltimeter,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Crosswind => "crosswind",
            AlertKind::FogRisk => "fog_risk",
            AlertKind::GustFactor => "gust_factor",
            AlertKind::LowCeiling => "low_ceiling",
            AlertKind::LowVisibility => "low_visibility",
            AlertKind::SpecialReport => "speci",
            AlertKind::NightVfr => "night_vfr",
            AlertKind::LowAltimeter => "low_altimeter",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered least to most severe, so `Ord` can be used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Green,
    Amber,
    Red,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Green => "Green",
            Severity::Amber => "Amber",
            Severity::Red => "Red",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Green => "✓",
            Severity::Amber => "⚠",
            Severity::Red => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable sort, most severe first.
pub fn sort_by_severity<T>(items: &mut [T], severity: impl Fn(&T) -> Severity) {
    items.sort_by(|a, b| severity(b).cmp(&severity(a)));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCondition {
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub detected_at: DateTime<Utc>,
}

impl AlertCondition {
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let detected_at = Utc::now();
        Self {
            id: format!("{}-{}", kind.as_str(), detected_at.timestamp_millis()),
            kind,
            severity,
            title: title.into(),
            message: message.into(),
            detected_at,
        }
    }
}
