//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    catalog::Catalog,
    error::Result,
    state::app_state::DEFAULT_RESTART_SECONDS,
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "zen-zone")]
#[command(about = "A state-managed HTTP service driving guided breathing and meditation sessions")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Session timer tick period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_millis: u64,

    /// Length of the "start again" breathing run in seconds
    #[arg(long, default_value_t = DEFAULT_RESTART_SECONDS)]
    pub restart_seconds: u64,

    /// JSON catalog replacing the built-in exercises, programs and affirmations
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

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

    /// Timer tick period, never shorter than one millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    /// Load the configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Ok(Catalog::default()),
        }
    }
}
