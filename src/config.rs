use crate::error::{Result, WxBriefError};
use crate::models::{PersonalMinimums, Thresholds};
use chrono::FixedOffset;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub airport: AirportConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub minimums: PersonalMinimums,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirportConfig {
    pub ident: String,
    /// Degrees true of the runway in use
    #[serde(default)]
    pub runway_heading: Option<f64>,
    #[serde(default)]
    pub utc_offset_hours: f64,
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            ident: "KDEN".into(),
            runway_heading: None,
            utc_offset_hours: 0.0,
        }
    }
}

impl AirportConfig {
    pub fn offset(&self) -> Result<FixedOffset> {
        let seconds = (self.utc_offset_hours * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds).ok_or_else(|| {
            WxBriefError::Config(format!("invalid utc_offset_hours {}", self.utc_offset_hours))
        })
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(WxBriefError::Config(format!(
                "Config file not found at {:?}. Run `wxbrief init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| WxBriefError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::debug!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse YAML text, substituting `${VAR}` references from the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| WxBriefError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("wxbrief").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/wxbrief/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WxBriefError::Config("Cannot determine config directory".into()))?
            .join("wxbrief");
        Ok(config_dir.join("config.yaml"))
    }

    /// Problems worth warning about. None of them stop evaluation.
    pub fn validate(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .thresholds
            .band_violations()
            .into_iter()
            .map(|metric| format!("thresholds.{}: amber band is more severe than red", metric))
            .collect();

        if let Some(heading) = self.airport.runway_heading {
            if !(0.0..=360.0).contains(&heading) {
                problems.push(format!("airport.runway_heading {} is outside 0-360", heading));
            }
        }
        if self.airport.offset().is_err() {
            problems.push(format!(
                "airport.utc_offset_hours {} is not a valid offset",
                self.airport.utc_offset_hours
            ));
        }
        if self.minimums.visibility_sm < 0.0 {
            problems.push("minimums.visibility_sm is negative".to_string());
        }

        problems
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up your weather briefing!");
        println!();

        let input_err = |e: dialoguer::Error| WxBriefError::Config(format!("Input error: {}", e));

        println!("Home Airport");
        let ident: String = Input::new()
            .with_prompt("  Identifier")
            .default("KDEN".into())
            .interact_text()
            .map_err(input_err)?;

        let runway: String = Input::new()
            .with_prompt("  Runway heading (degrees true, blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_err)?;
        let runway_heading = if runway.trim().is_empty() {
            None
        } else {
            Some(runway.trim().parse::<f64>().map_err(|e| {
                WxBriefError::InvalidData(format!("runway heading '{}': {}", runway, e))
            })?)
        };

        let utc_offset_hours: f64 = Input::new()
            .with_prompt("  UTC offset (hours)")
            .default(0.0)
            .interact_text()
            .map_err(input_err)?;

        println!();

        println!("Personal Minimums");
        let defaults = PersonalMinimums::default();
        let ceiling_ft: u32 = Input::new()
            .with_prompt("  Ceiling (ft)")
            .default(defaults.ceiling_ft)
            .interact_text()
            .map_err(input_err)?;

        let visibility_sm: f64 = Input::new()
            .with_prompt("  Visibility (SM)")
            .default(defaults.visibility_sm)
            .interact_text()
            .map_err(input_err)?;

        let max_crosswind_kt: u32 = Input::new()
            .with_prompt("  Max crosswind (kt)")
            .default(defaults.max_crosswind_kt)
            .interact_text()
            .map_err(input_err)?;

        let max_wind_kt: u32 = Input::new()
            .with_prompt("  Max wind (kt)")
            .default(defaults.max_wind_kt)
            .interact_text()
            .map_err(input_err)?;

        let max_gust_kt: u32 = Input::new()
            .with_prompt("  Max gust (kt)")
            .default(defaults.max_gust_kt)
            .interact_text()
            .map_err(input_err)?;

        println!();

        let config = Config {
            airport: AirportConfig {
                ident,
                runway_heading,
                utc_offset_hours,
            },
            thresholds: Thresholds::default(),
            minimums: PersonalMinimums {
                ceiling_ft,
                visibility_sm,
                max_crosswind_kt,
                max_gust_kt,
                max_wind_kt,
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)?;

        let content = format!(
            "# wxbrief Configuration\n# Generated by `wxbrief init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| WxBriefError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
