use serde::{Deserialize, Serialize};

/// Amber/red pair for one hazard metric.
///
/// Precondition: `amber` is the less severe bound. For "higher is worse"
/// metrics (crosswind) amber < red; for "lower is worse" metrics (ceiling,
/// visibility, temperature/dewpoint spread) amber > red. Evaluators trust
/// this and never check it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub amber: f64,
    pub red: f64,
}

impl Band {
    pub const fn new(amber: f64, red: f64) -> Self {
        Self { amber, red }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Knots
    pub crosswind: Band,
    /// Degrees Celsius
    pub temp_dewpoint_spread: Band,
    /// Feet AGL
    pub ceiling: Band,
    /// Statute miles
    pub visibility: Band,
    /// Gust minus sustained wind, knots
    pub gust_factor_kt: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            crosswind: Band::new(10.0, 15.0),
            temp_dewpoint_spread: Band::new(3.0, 1.0),
            ceiling: Band::new(3000.0, 1000.0),
            visibility: Band::new(5.0, 3.0),
            gust_factor_kt: 10.0,
        }
    }
}

impl Thresholds {
    /// Names of metrics whose bands are inverted. Diagnostic only.
    pub fn band_violations(&self) -> Vec<&'static str> {
        let mut violations = Vec::new();
        if self.crosswind.amber >= self.crosswind.red {
            violations.push("crosswind");
        }
        if self.temp_dewpoint_spread.amber <= self.temp_dewpoint_spread.red {
            violations.push("temp_dewpoint_spread");
        }
        if self.ceiling.amber <= self.ceiling.red {
            violations.push("ceiling");
        }
        if self.visibility.amber <= self.visibility.red {
            violations.push("visibility");
        }
        violations
    }
}

/// Pilot-configured personal limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalMinimums {
    pub ceiling_ft: u32,
    pub visibility_sm: f64,
    pub max_crosswind_kt: u32,
    pub max_gust_kt: u32,
    pub max_wind_kt: u32,
}

impl Default for PersonalMinimums {
    fn default() -> Self {
        Self {
            ceiling_ft: 3000,
            visibility_sm: 5.0,
            max_crosswind_kt: 15,
            max_gust_kt: 25,
            max_wind_kt: 25,
        }
    }
}
