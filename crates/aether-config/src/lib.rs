//! Configuration system for Aether.
//!
//! Designer-facing scattering, sun, and time-of-day settings persist to disk
//! as RON. Supports CLI overrides via clap, hot-reload detection, validation,
//! and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, ScatteringConfig, SunConfig, TimeOfDayConfig, TwilightCurve,
    default_config_dir, wrap_hours,
};
pub use error::ConfigError;
