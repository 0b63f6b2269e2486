//! Command-line argument parsing for Aether.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Aether command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "aether", about = "Aether atmospheric scattering")]
pub struct CliArgs {
    /// Starting hour of the day (wraps at 24).
    #[arg(long)]
    pub time_of_day: Option<f32>,

    /// Sunrise hour.
    #[arg(long)]
    pub sunrise: Option<f32>,

    /// Sunset hour.
    #[arg(long)]
    pub sunset: Option<f32>,

    /// Encode the planet center as split high/low parts.
    #[arg(long)]
    pub double_precision: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(t) = args.time_of_day {
            self.time_of_day.time_of_day = t;
        }
        if let Some(t) = args.sunrise {
            self.time_of_day.sunrise_time = t;
        }
        if let Some(t) = args.sunset {
            self.time_of_day.sunset_time = t;
        }
        if let Some(dp) = args.double_precision {
            self.scattering.use_double_precision = dp;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
