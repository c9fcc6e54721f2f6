//! Command-line argument parsing.

use crate::config::Config;
use clap::Parser;

/// Network interface statistics sampler with HTTP query endpoints
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Device to monitor (overrides config file)
    #[arg(short, long, env = "LINKMETER_DEVICE")]
    pub device: Option<String>,

    /// Address to listen on (overrides config file)
    #[arg(short, long, env = "LINKMETER_LISTEN")]
    pub listen: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "linkmeter.toml", env = "LINKMETER_CONFIG")]
    pub config: String,

    /// Exclude devices matching this pattern from the stats fetch
    #[arg(long, env = "LINKMETER_IGNORE_PATTERN")]
    pub ignore_pattern: Option<String>,

    /// Fetch only devices matching this pattern
    #[arg(long, env = "LINKMETER_ACCEPT_PATTERN")]
    pub accept_pattern: Option<String>,
}

impl Args {
    /// Fold command-line overrides into a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(device) = &self.device {
            config.device = device.clone();
        }
        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if self.ignore_pattern.is_some() {
            config.ignore_pattern = self.ignore_pattern.clone();
        }
        if self.accept_pattern.is_some() {
            config.accept_pattern = self.accept_pattern.clone();
        }
    }
}
