//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(about = "A match clock and scoreboard server that survives sleep and restarts")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory the scoreboard snapshot is saved in
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Keep the scoreboard in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Display refresh period in milliseconds while the clock runs
    #[arg(long, default_value = "250")]
    pub tick_ms: u64,

    /// Log the end-of-quarter alert instead of ringing the bell
    #[arg(long)]
    pub mute: bool,

    /// How often to check whether the host slept, in seconds
    #[arg(long, default_value = "15")]
    pub wake_check_secs: u64,

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

    /// Snapshot directory, defaulting to the platform data directory
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("courtside")
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn wake_check_interval(&self) -> Duration {
        Duration::from_secs(self.wake_check_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["courtside"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.wake_check_interval(), Duration::from_secs(15));
        assert_eq!(config.log_level(), "info");
        assert!(!config.ephemeral);
        assert!(config.state_dir().ends_with("courtside"));
    }

    #[test]
    fn explicit_state_dir_wins() {
        let config =
            Config::try_parse_from(["courtside", "--state-dir", "/tmp/board", "-v", "--tick-ms", "1"])
                .unwrap();
        assert_eq!(config.state_dir(), PathBuf::from("/tmp/board"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
    }
}
