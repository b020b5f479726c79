//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{
    timer_state::{DEFAULT_BREAK_MINUTES, DEFAULT_LONG_BREAK_AFTER, DEFAULT_LONG_BREAK_MINUTES, DEFAULT_STUDY_MINUTES},
    TimerConfig,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "study-buddy")]
#[command(about = "A pomodoro study timer service with mock study helpers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Study interval length in minutes
    #[arg(long, default_value_t = DEFAULT_STUDY_MINUTES, value_parser = clap::value_parser!(u32).range(1..))]
    pub study_minutes: u32,

    /// Short break length in minutes
    #[arg(long, default_value_t = DEFAULT_BREAK_MINUTES, value_parser = clap::value_parser!(u32).range(1..))]
    pub break_minutes: u32,

    /// Long break length in minutes
    #[arg(long, default_value_t = DEFAULT_LONG_BREAK_MINUTES, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break_minutes: u32,

    /// Number of study intervals before a long break
    #[arg(long, default_value_t = DEFAULT_LONG_BREAK_AFTER, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break_after: u32,

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

    /// Timer configuration for the served pomodoro timer
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            study_minutes: self.study_minutes,
            break_minutes: self.break_minutes,
            long_break_minutes: self.long_break_minutes,
            long_break_after: self.long_break_after,
        }
    }
}
