//! Configuration structs with sensible defaults, validation, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hours in one full day. Time-of-day values wrap at this boundary.
const HOURS_PER_DAY: f32 = 24.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Scattering and atmosphere-shell settings.
    pub scattering: ScatteringConfig,
    /// Sun disk and light settings.
    pub sun: SunConfig,
    /// Time of day and sun color keys.
    pub time_of_day: TimeOfDayConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Designer-set scattering constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatteringConfig {
    /// Planet radius in the planet's local units (before transform scale).
    pub planet_radius: f32,
    /// Atmosphere shell thickness in the planet's local units.
    pub atmosphere_height: f32,
    /// Overall density multiplier for the shell.
    pub atmosphere_density: f32,
    /// Exponential density falloff with altitude.
    pub density_falloff: f32,
    /// Mie scattering coefficient (scalar).
    pub mie_coefficient: f32,
    /// Rayleigh scattering coefficients (RGB).
    pub rayleigh_coefficients: [f32; 3],
    pub scattering_intensity: f32,
    pub scattering_scale: f32,
    pub scattering_power: f32,
    /// Mie contribution multiplier when viewed from outside the shell.
    pub mie_scattering_from_space: f32,
    /// Henyey-Greenstein g parameter.
    pub mie_anisotropy: f32,
    /// Keep the shell proportional to the planet transform.
    pub fix_atmosphere_scale: bool,
    /// Artistic multiplier on the shell height, applied on top of the transform scale.
    pub atmosphere_scale_factor: f32,
    /// Send the planet center as split high/low parts.
    pub use_double_precision: bool,
}

/// Sun light and disk overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    pub intensity: f32,
    pub falloff: f32,
    /// Angular size of the sun disk overlay, `[0.0, 1.0]`.
    pub texture_size: f32,
}

/// Interpolation curve used inside the twilight windows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TwilightCurve {
    #[default]
    Linear,
    SmoothStep,
}

/// Time of day and the four sun color keys.
///
/// Hours are in `[0.0, 24.0)`; `time_of_day` wraps, the transition times must
/// already be in range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeOfDayConfig {
    /// Current hour. Values outside `[0, 24)` wrap.
    pub time_of_day: f32,
    pub sunrise_time: f32,
    pub sunset_time: f32,
    /// Half-width in hours of the blend window centered on sunrise and sunset.
    pub twilight_half_width: f32,
    pub twilight_curve: TwilightCurve,
    /// Linear RGBA colors.
    pub daytime_color: [f32; 4],
    pub sunrise_color: [f32; 4],
    pub sunset_color: [f32; 4],
    pub night_color: [f32; 4],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for ScatteringConfig {
    fn default() -> Self {
        Self {
            planet_radius: 1.0,
            atmosphere_height: 0.1,
            atmosphere_density: 2.0,
            density_falloff: 1.0,
            mie_coefficient: 0.1,
            rayleigh_coefficients: [5.8, 13.5, 33.1],
            scattering_intensity: 3.0,
            scattering_scale: 20.0,
            scattering_power: 3.0,
            mie_scattering_from_space: 2.0,
            mie_anisotropy: 0.76,
            fix_atmosphere_scale: true,
            atmosphere_scale_factor: 1.0,
            use_double_precision: true,
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            intensity: 50.0,
            falloff: 10.0,
            texture_size: 0.1,
        }
    }
}

impl Default for TimeOfDayConfig {
    fn default() -> Self {
        Self {
            time_of_day: 12.0,
            sunrise_time: 6.0,
            sunset_time: 18.0,
            twilight_half_width: 1.0,
            twilight_curve: TwilightCurve::Linear,
            daytime_color: [1.0, 1.0, 0.9, 1.0],
            sunrise_color: [1.0, 0.5, 0.2, 1.0],
            sunset_color: [1.0, 0.4, 0.1, 1.0],
            night_color: [0.2, 0.2, 0.5, 1.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl TimeOfDayConfig {
    /// Length in hours of the arc from sunrise forward to sunset.
    pub fn day_length(&self) -> f32 {
        (self.sunset_time - self.sunrise_time).rem_euclid(HOURS_PER_DAY)
    }

    /// `time_of_day` wrapped into `[0.0, 24.0)`.
    pub fn wrapped_time(&self) -> f32 {
        wrap_hours(self.time_of_day)
    }
}

/// Wrap an hour value into `[0.0, 24.0)`.
pub fn wrap_hours(hours: f32) -> f32 {
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs.
    if wrapped >= HOURS_PER_DAY { 0.0 } else { wrapped }
}

/// Platform config directory for Aether, e.g. `~/.config/aether`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aether")
}

// --- Validation ---

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn check_hour(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if (0.0..HOURS_PER_DAY).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be in [0, 24), got {value}")))
    }
}

impl Config {
    /// Check every value the atmosphere pass depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scattering;
        check_finite("scattering.planet_radius", s.planet_radius)?;
        if s.planet_radius <= 0.0 {
            return Err(invalid(
                "scattering.planet_radius",
                format!("must be positive, got {}", s.planet_radius),
            ));
        }
        check_finite("scattering.atmosphere_height", s.atmosphere_height)?;
        if s.atmosphere_height < 0.0 {
            return Err(invalid(
                "scattering.atmosphere_height",
                format!("must not be negative, got {}", s.atmosphere_height),
            ));
        }
        check_finite("scattering.atmosphere_scale_factor", s.atmosphere_scale_factor)?;
        if s.atmosphere_scale_factor <= 0.0 {
            return Err(invalid(
                "scattering.atmosphere_scale_factor",
                format!("must be positive, got {}", s.atmosphere_scale_factor),
            ));
        }

        if !(0.0..=1.0).contains(&self.sun.texture_size) {
            return Err(invalid(
                "sun.texture_size",
                format!("must be in [0, 1], got {}", self.sun.texture_size),
            ));
        }

        let t = &self.time_of_day;
        check_finite("time_of_day.time_of_day", t.time_of_day)?;
        check_hour("time_of_day.sunrise_time", t.sunrise_time)?;
        check_hour("time_of_day.sunset_time", t.sunset_time)?;
        check_finite("time_of_day.twilight_half_width", t.twilight_half_width)?;
        if t.twilight_half_width <= 0.0 {
            return Err(invalid(
                "time_of_day.twilight_half_width",
                format!("must be positive, got {}", t.twilight_half_width),
            ));
        }
        let day = t.day_length();
        let shortest_arc = day.min(HOURS_PER_DAY - day);
        if 2.0 * t.twilight_half_width > shortest_arc {
            return Err(invalid(
                "time_of_day.twilight_half_width",
                format!(
                    "twilight windows of {}h overlap: day lasts {day}h, night {}h",
                    2.0 * t.twilight_half_width,
                    HOURS_PER_DAY - day
                ),
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// The running pass should swap the whole value in between frames rather
    /// than patch fields of the config it is reading.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sunrise_time"));
        assert!(ron_str.contains("use_double_precision: true"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.time_of_day.twilight_curve = TwilightCurve::SmoothStep;
        config.debug.log_dir = Some(PathBuf::from("logs"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(scattering: (planet_radius: 6371.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scattering.planet_radius, 6371.0);
        assert_eq!(config.scattering.atmosphere_height, 0.1);
        assert_eq!(config.time_of_day, TimeOfDayConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scattering.planet_radius = 6_371_000.0;
        config.time_of_day.time_of_day = 7.25;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.time_of_day.time_of_day = 19.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().time_of_day.time_of_day, 19.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_radius() {
        let mut config = Config::default();
        config.scattering.planet_radius = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "scattering.planet_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_hour_out_of_range() {
        let mut config = Config::default();
        config.time_of_day.sunset_time = 24.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_wrapping_time_of_day() {
        let mut config = Config::default();
        config.time_of_day.time_of_day = 30.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlapping_windows() {
        let mut config = Config::default();
        config.time_of_day.sunrise_time = 11.0;
        config.time_of_day.sunset_time = 12.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"), "{err}");
    }

    #[test]
    fn test_day_length_wraps_past_midnight() {
        let tod = TimeOfDayConfig {
            sunrise_time: 20.0,
            sunset_time: 4.0,
            ..Default::default()
        };
        assert_eq!(tod.day_length(), 8.0);
    }

    #[test]
    fn test_wrap_hours() {
        assert_eq!(wrap_hours(25.5), 1.5);
        assert_eq!(wrap_hours(-1.0), 23.0);
        assert_eq!(wrap_hours(24.0), 0.0);
        assert!(wrap_hours(-1e-9) < 24.0);
    }
}
