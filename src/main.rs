mod cli;

use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wxbrief::config::Config;
use wxbrief::error::Result;
use wxbrief::logic::departure::format_duration;
use wxbrief::logic::{sun_info, Briefing, BriefingInput, BriefingOptions};
use wxbrief::models::{format_ceiling, format_local, format_visibility, SunInfo};

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Check => {
            let config = Config::load(cli.config)?;
            let problems = config.validate();
            for problem in &problems {
                tracing::warn!("{}", problem);
            }
            if problems.is_empty() {
                println!("Config OK ({})", config.airport.ident);
            } else {
                println!("Config loaded with {} warning(s)", problems.len());
            }
            Ok(())
        }
        Commands::Sun { lat, lon, date } => {
            let config = load_or_default(cli.config)?;
            let offset = config.airport.offset()?;
            let date = date.unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());
            print_sun(&sun_info(lat, lon, date, offset));
            Ok(())
        }
        Commands::Brief { input, night } => {
            let config = load_or_default(cli.config)?;
            for problem in config.validate() {
                tracing::warn!("{}", problem);
            }
            let input = read_input(&input)?;
            let now = input.now.unwrap_or_else(Utc::now);
            let offset = config.airport.offset()?;

            let options = BriefingOptions {
                thresholds: &config.thresholds,
                minimums: &config.minimums,
                runway_heading: config.airport.runway_heading,
                offset,
                night,
            };
            let briefing = Briefing::prepare(&input, &options, now);
            print_briefing(&briefing, &input, offset, night);
            Ok(())
        }
    }
}

/// Commands that only read settings can run without a config file.
fn load_or_default(config_override: Option<PathBuf>) -> Result<Config> {
    if config_override.is_none() && !Config::exists(None) {
        tracing::warn!("No config file found, using defaults. Run `wxbrief init` to set up.");
        return Ok(Config::default());
    }
    Config::load(config_override)
}

fn read_input(path: &Path) -> Result<BriefingInput> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn local(t: DateTime<Utc>, offset: FixedOffset) -> String {
    format_local(Some(t), offset)
}

fn print_sun(sun: &SunInfo) {
    println!("Sun for {}", sun.date);
    println!("  Civil twilight begins  {}", sun.civil_twilight_start_local);
    println!("  Sunrise                {}", sun.sunrise_local);
    println!("  Sunset                 {}", sun.sunset_local);
    println!("  Civil twilight ends    {}", sun.civil_twilight_end_local);
    println!("  Night currency from    {}", sun.currency_night_local);
}

fn print_briefing(briefing: &Briefing, input: &BriefingInput, offset: FixedOffset, night: bool) {
    let obs = &input.observation;

    println!(
        "{} briefing at {} ({})",
        briefing.station_id,
        local(briefing.generated_at, offset),
        if briefing.is_night { "night" } else { "day" }
    );
    println!(
        "  {}  wind {}  vis {}  ceiling {}  {:.0}/{:.0}C  A{:.2}",
        obs.flight_category(),
        obs.wind.describe(),
        obs.visibility.describe(),
        format_ceiling(obs.ceiling_ft()),
        obs.temperature_c,
        obs.dewpoint_c,
        obs.altimeter_inhg
    );
    println!();

    println!("Alerts");
    if briefing.alerts.is_empty() {
        println!("  none");
    }
    for alert in &briefing.alerts {
        println!("  {} {}: {}", alert.severity.symbol(), alert.title, alert.message);
    }
    println!();

    if input.snapshot.is_some() {
        println!("Changes since last report");
        if briefing.changes.is_empty() {
            println!("  none");
        }
        for change in &briefing.changes {
            println!(
                "  {} {}: {} -> {}",
                change.severity.symbol(),
                change.title,
                change.previous_value,
                change.current_value
            );
        }
        println!();
    }

    println!("Forecast");
    if briefing.timeline.is_empty() {
        println!("  no forecast periods");
    }
    for point in &briefing.timeline {
        println!(
            "  {}  {:<4}  {:<10}  {:<7}  {}",
            local(point.time, offset),
            point.flight_category,
            format_ceiling(point.ceiling_ft),
            format_visibility(point.visibility_sm, false),
            point.wind.describe()
        );
    }
    println!();

    if !briefing.trends.is_empty() {
        println!("Trends");
        for trend in &briefing.trends {
            println!(
                "  {:<16} {:<13} {} -> {}  ({})",
                trend.metric,
                trend.direction,
                trend.current_value,
                trend.forecast_value,
                trend.description
            );
        }
        println!();
    }

    let m = &briefing.minimums;
    println!(
        "Departure (minimums {} ft / {} SM / wind {} kt / gust {} kt{})",
        m.ceiling_ft,
        m.visibility_sm,
        m.max_wind_kt,
        m.max_gust_kt,
        if night { ", night" } else { "" }
    );
    println!("  {}", briefing.departure.advisory);
    if let Some(window) = &briefing.first_window {
        println!(
            "  First qualifying period: {} to {} ({})",
            local(window.start, offset),
            local(window.end, offset),
            format_duration(window.duration())
        );
    }
    println!();

    print_sun(&briefing.sun);
}
