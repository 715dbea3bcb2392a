//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{state::TimerSettings, timer::parse_elapsed};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "station-timer")]
#[command(about = "An interval timer that rotates through work and rest stations")]
#[command(version)]
pub struct Config {
    /// Length of each station, as S, M:SS or H:MM:SS
    #[arg(short, long, default_value = "60", value_parser = parse_duration)]
    pub duration: u64,

    /// Break between stations, as S, M:SS or H:MM:SS
    #[arg(short, long, default_value = "15", value_parser = parse_duration)]
    pub break_duration: u64,

    /// Number of stations
    #[arg(short, long, default_value = "5")]
    pub repeats: u64,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Port for the local control endpoints
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Start with audio muted
    #[arg(long)]
    pub muted: bool,

    /// Ring the terminal bell on each cooldown second
    #[arg(long)]
    pub bell: bool,

    /// Wait for a start-timer request instead of starting right away
    #[arg(long)]
    pub idle: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings for the run started at launch
    pub fn settings(&self) -> TimerSettings {
        TimerSettings::new(self.duration, self.break_duration, self.repeats)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn parse_duration(value: &str) -> Result<u64, String> {
    parse_elapsed(value)
        .ok_or_else(|| format!("`{}` is not a duration like 45, 1:30 or 1:00:00", value))
}
