//! Configuration and CLI argument handling

use clap::Parser;

use crate::console::OutputFormat;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "standup-timer")]
#[command(about = "A one-minute meeting countdown that flips into overtime")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Start counting down right away instead of waiting for a toggle
    #[arg(short, long)]
    pub autostart: bool,

    /// Print each update as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Seed for picking overtime messages
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Output format for rendered updates
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
