use super::observation::{CloudLayer, FlightCategory, Wind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Change group of a forecast period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChangeType {
    #[default]
    #[serde(rename = "BASE")]
    Base,
    #[serde(rename = "FM")]
    From,
    #[serde(rename = "TEMPO")]
    Temporary,
    #[serde(rename = "BECMG")]
    Becoming,
    #[serde(rename = "PROB")]
    Probability,
}

impl ChangeType {
    /// Whether periods of this type describe the prevailing state. Only these
    /// feed the timeline and window derivations.
    pub fn is_sustained(&self) -> bool {
        matches!(self, ChangeType::Base | ChangeType::From)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Base => "BASE",
            ChangeType::From => "FM",
            ChangeType::Temporary => "TEMPO",
            ChangeType::Becoming => "BECMG",
            ChangeType::Probability => "PROB",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One period of a terminal forecast, valid over `[from, to)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub change: ChangeType,
    #[serde(default = "Wind::calm")]
    pub wind: Wind,
    /// Visibility as reported, e.g. "P6SM" or "1 1/2SM".
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub clouds: Vec<CloudLayer>,
    #[serde(default)]
    pub present_weather: Option<String>,
}

impl ForecastPeriod {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, change: ChangeType) -> Self {
        Self {
            from,
            to,
            change,
            wind: Wind::calm(),
            visibility: None,
            clouds: Vec::new(),
            present_weather: None,
        }
    }

    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn with_cloud(mut self, layer: CloudLayer) -> Self {
        self.clouds.push(layer);
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.present_weather = Some(weather.into());
        self
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    pub fn ceiling_ft(&self) -> Option<u32> {
        super::observation::ceiling_from_layers(&self.clouds)
    }

    pub fn visibility_sm(&self) -> f64 {
        parse_visibility_sm(self.visibility.as_deref())
    }

    pub fn flight_category(&self) -> FlightCategory {
        FlightCategory::from_conditions(self.ceiling_ft(), self.visibility_sm())
    }
}

/// Visibility assumed when a forecast omits it or reports something unreadable.
pub const DEFAULT_VISIBILITY_SM: f64 = 10.0;

/// Parse a forecast visibility group into statute miles.
///
/// Accepts plain numbers ("10"), plus/minus prefixes ("P6SM", "M1/4SM"),
/// fractions ("1/2SM") and mixed numbers ("1 1/2SM").
pub fn parse_visibility_sm(raw: Option<&str>) -> f64 {
    raw.and_then(parse_visibility_group)
        .unwrap_or(DEFAULT_VISIBILITY_SM)
}

fn parse_visibility_group(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix("SM").unwrap_or(trimmed).trim();
    let body = body
        .strip_prefix('P')
        .or_else(|| body.strip_prefix('M'))
        .unwrap_or(body);

    if body.is_empty() {
        return None;
    }

    let mut total = 0.0;
    for part in body.split_whitespace() {
        total += match part.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.parse().ok()?;
                let den: f64 = den.parse().ok()?;
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            None => part.parse::<f64>().ok()?,
        };
    }

    total.is_finite().then_some(total)
}

/// A sampled instant of the forecast with its derived conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    pub ceiling_ft: Option<u32>,
    pub visibility_sm: f64,
    pub flight_category: FlightCategory,
    pub wind: Wind,
    pub clouds: Vec<CloudLayer>,
    pub present_weather: Option<String>,
}

impl ForecastPoint {
    pub fn from_period(time: DateTime<Utc>, period: &ForecastPeriod) -> Self {
        let ceiling_ft = period.ceiling_ft();
        let visibility_sm = period.visibility_sm();
        Self {
            time,
            ceiling_ft,
            visibility_sm,
            flight_category: FlightCategory::from_conditions(ceiling_ft, visibility_sm),
            wind: period.wind,
            clouds: period.clouds.clone(),
            present_weather: period.present_weather.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::observation::CloudCover;
    use chrono::TimeZone;

    #[test]
    fn visibility_groups() {
        assert_eq!(parse_visibility_sm(Some("10")), 10.0);
        assert_eq!(parse_visibility_sm(Some("P6SM")), 6.0);
        assert_eq!(parse_visibility_sm(Some("3SM")), 3.0);
        assert_eq!(parse_visibility_sm(Some("1/2SM")), 0.5);
        assert_eq!(parse_visibility_sm(Some("1 1/2SM")), 1.5);
        assert_eq!(parse_visibility_sm(Some("M1/4SM")), 0.25);
    }

    #[test]
    fn visibility_defaults_to_ten() {
        assert_eq!(parse_visibility_sm(None), 10.0);
        assert_eq!(parse_visibility_sm(Some("")), 10.0);
        assert_eq!(parse_visibility_sm(Some("////")), 10.0);
        assert_eq!(parse_visibility_sm(Some("1/0SM")), 10.0);
    }

    #[test]
    fn sustained_change_types() {
        assert!(ChangeType::Base.is_sustained());
        assert!(ChangeType::From.is_sustained());
        assert!(!ChangeType::Temporary.is_sustained());
        assert!(!ChangeType::Probability.is_sustained());
        assert!(!ChangeType::Becoming.is_sustained());
    }

    #[test]
    fn period_window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        let p = ForecastPeriod::new(from, to, ChangeType::Base);
        assert!(p.contains(from));
        assert!(!p.contains(to));
    }

    #[test]
    fn point_carries_period_conditions() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let p = ForecastPeriod::new(from, to, ChangeType::From)
            .with_visibility("2SM")
            .with_cloud(CloudLayer::new(CloudCover::Broken, 1500))
            .with_weather("-SHRA");
        let point = ForecastPoint::from_period(from, &p);
        assert_eq!(point.ceiling_ft, Some(1500));
        assert_eq!(point.visibility_sm, 2.0);
        assert_eq!(point.flight_category, FlightCategory::Ifr);
        assert_eq!(point.present_weather.as_deref(), Some("-SHRA"));
    }
}
