use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Improving,
    Deteriorating,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "↑ Improving",
            TrendDirection::Deteriorating => "↓ Deteriorating",
            TrendDirection::Stable => "→ Stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherTrend {
    pub metric: String,
    pub direction: TrendDirection,
    pub current_value: String,
    pub forecast_value: String,
    pub description: String,
}

impl WeatherTrend {
    pub fn new(
        metric: &str,
        direction: TrendDirection,
        current_value: impl Into<String>,
        forecast_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.to_string(),
            direction,
            current_value: current_value.into(),
            forecast_value: forecast_value.into(),
            description: description.into(),
        }
    }
}
