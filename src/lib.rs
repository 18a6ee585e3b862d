//! Weather risk and timing evaluators for pilot briefings.
//!
//! Every evaluator is a pure function of its inputs: observations, forecast
//! periods, thresholds, minimums and an explicit "now". Nothing here fetches,
//! schedules or stores data.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
