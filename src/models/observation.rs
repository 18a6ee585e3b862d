use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlightCategory {
    #[serde(rename = "LIFR")]
    Lifr,
    #[serde(rename = "IFR")]
    Ifr,
    #[serde(rename = "MVFR")]
    Mvfr,
    #[serde(rename = "VFR")]
    Vfr,
}

impl FlightCategory {
    /// Classify ceiling and visibility, first match wins:
    /// - LIFR: ceiling < 500 ft or visibility < 1 SM
    /// - IFR: ceiling < 1000 ft or visibility < 3 SM
    /// - MVFR: ceiling < 3000 ft or visibility < 5 SM
    /// - VFR otherwise
    ///
    /// An absent ceiling never lowers the category on its own.
    pub fn from_conditions(ceiling_ft: Option<u32>, visibility_sm: f64) -> Self {
        let below = |limit: u32| ceiling_ft.is_some_and(|c| c < limit);

        if below(500) || visibility_sm < 1.0 {
            FlightCategory::Lifr
        } else if below(1000) || visibility_sm < 3.0 {
            FlightCategory::Ifr
        } else if below(3000) || visibility_sm < 5.0 {
            FlightCategory::Mvfr
        } else {
            FlightCategory::Vfr
        }
    }

    /// Rank used for trend direction; higher is better.
    pub fn rank(&self) -> u8 {
        match self {
            FlightCategory::Lifr => 0,
            FlightCategory::Ifr => 1,
            FlightCategory::Mvfr => 2,
            FlightCategory::Vfr => 3,
        }
    }

    pub fn is_instrument(&self) -> bool {
        matches!(self, FlightCategory::Ifr | FlightCategory::Lifr)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Vfr => "VFR",
        }
    }
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindDirection {
    Degrees(u16),
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: WindDirection,
    pub speed_kt: u32,
    #[serde(default)]
    pub gust_kt: Option<u32>,
}

impl Wind {
    pub fn calm() -> Self {
        Self {
            direction: WindDirection::Degrees(0),
            speed_kt: 0,
            gust_kt: None,
        }
    }

    pub fn describe(&self) -> String {
        let dir = match self.direction {
            WindDirection::Degrees(d) => format!("{:03}", d),
            WindDirection::Variable => "VRB".to_string(),
        };
        match self.gust_kt {
            Some(g) => format!("{}@{}G{}kt", dir, self.speed_kt, g),
            None => format!("{}@{}kt", dir, self.speed_kt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub statute_miles: f64,
    /// Reported as "P6SM" style: greater than the value.
    #[serde(default)]
    pub plus: bool,
}

impl Visibility {
    pub fn new(statute_miles: f64) -> Self {
        Self {
            statute_miles,
            plus: false,
        }
    }

    pub fn describe(&self) -> String {
        format_visibility(self.statute_miles, self.plus)
    }
}

pub fn format_visibility(sm: f64, plus: bool) -> String {
    let prefix = if plus { "P" } else { "" };
    if sm.fract() == 0.0 {
        format!("{}{:.0} SM", prefix, sm)
    } else {
        format!("{}{:.2} SM", prefix, sm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudCover {
    #[serde(rename = "SKC", alias = "CLR")]
    Clear,
    #[serde(rename = "FEW")]
    Few,
    #[serde(rename = "SCT")]
    Scattered,
    #[serde(rename = "BKN")]
    Broken,
    #[serde(rename = "OVC")]
    Overcast,
}

impl CloudCover {
    pub fn forms_ceiling(&self) -> bool {
        matches!(self, CloudCover::Broken | CloudCover::Overcast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub cover: CloudCover,
    #[serde(default)]
    pub base_ft: Option<u32>,
}

impl CloudLayer {
    pub fn new(cover: CloudCover, base_ft: u32) -> Self {
        Self {
            cover,
            base_ft: Some(base_ft),
        }
    }
}

/// Base of the lowest broken or overcast layer.
pub fn ceiling_from_layers(layers: &[CloudLayer]) -> Option<u32> {
    layers
        .iter()
        .filter(|l| l.cover.forms_ceiling())
        .filter_map(|l| l.base_ft)
        .min()
}

pub fn format_ceiling(ceiling_ft: Option<u32>) -> String {
    match ceiling_ft {
        Some(c) => format!("{} ft", c),
        None => "No ceiling".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation_ft: f64,
}

/// A decoded surface observation, as handed over by the report parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedObservation {
    pub station_id: String,
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub is_speci: bool,
    pub temperature_c: f64,
    pub dewpoint_c: f64,
    pub wind: Wind,
    pub visibility: Visibility,
    pub altimeter_inhg: f64,
    #[serde(default)]
    pub clouds: Vec<CloudLayer>,
    #[serde(default)]
    pub present_weather: Option<String>,
    #[serde(default)]
    pub raw_text: String,
    pub location: GeoPoint,
}

impl NormalizedObservation {
    pub fn new(
        station_id: impl Into<String>,
        observed_at: DateTime<Utc>,
        location: GeoPoint,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            observed_at,
            is_speci: false,
            temperature_c: 15.0,
            dewpoint_c: 5.0,
            wind: Wind::calm(),
            visibility: Visibility::new(10.0),
            altimeter_inhg: 29.92,
            clouds: Vec::new(),
            present_weather: None,
            raw_text: String::new(),
            location,
        }
    }

    pub fn with_wind(
        mut self,
        direction: WindDirection,
        speed_kt: u32,
        gust_kt: Option<u32>,
    ) -> Self {
        self.wind = Wind {
            direction,
            speed_kt,
            gust_kt,
        };
        self
    }

    pub fn with_visibility(mut self, statute_miles: f64) -> Self {
        self.visibility = Visibility::new(statute_miles);
        self
    }

    pub fn with_cloud(mut self, cover: CloudCover, base_ft: u32) -> Self {
        self.clouds.push(CloudLayer::new(cover, base_ft));
        self
    }

    pub fn with_temperatures(mut self, temperature_c: f64, dewpoint_c: f64) -> Self {
        self.temperature_c = temperature_c;
        self.dewpoint_c = dewpoint_c;
        self
    }

    pub fn with_altimeter(mut self, inhg: f64) -> Self {
        self.altimeter_inhg = inhg;
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.present_weather = Some(weather.into());
        self
    }

    pub fn special(mut self) -> Self {
        self.is_speci = true;
        self
    }

    pub fn ceiling_ft(&self) -> Option<u32> {
        ceiling_from_layers(&self.clouds)
    }

    pub fn flight_category(&self) -> FlightCategory {
        FlightCategory::from_conditions(self.ceiling_ft(), self.visibility.statute_miles)
    }

    pub fn temp_dewpoint_spread(&self) -> f64 {
        self.temperature_c - self.dewpoint_c
    }
}
