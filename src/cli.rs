use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wxbrief", version, about = "Pilot weather briefing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Brief from a JSON file holding an observation and forecast
    Brief {
        input: PathBuf,
        /// Apply night-adjusted personal minimums
        #[arg(long)]
        night: bool,
    },
    /// Sunrise, sunset and night boundaries
    Sun {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Date (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set up personal minimums and home airport
    Init,
    /// Validate config
    Check,
}
