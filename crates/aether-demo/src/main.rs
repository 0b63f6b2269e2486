//! Headless demo that runs the atmosphere pass through a simulated day.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p aether-demo -- --frames 96 --time-of-day 4.5`.

mod headless;

use aether_atmosphere::{
    AtmospherePass, FrameOutcome, PlanetState, SunState, TextureHandle, day_phase_at,
    uniform_names,
};
use aether_config::{CliArgs, Config, default_config_dir, wrap_hours};
use aether_math::{SplitPosition, WorldPosition};
use clap::Parser;
use glam::Vec3;
use tracing::{info, warn};

use headless::{HeadlessFactory, HeadlessRenderer};

const DEFAULT_FRAMES: u32 = 48;

/// A planet far enough from the origin that plain f32 loses centimetres.
const PLANET_CENTER: WorldPosition = WorldPosition::new(100_000_003.7, 0.0, 35_000_001.25);
const CAMERA_POSITION: WorldPosition = WorldPosition::new(100_000_000.0, 0.0, 35_000_000.0);

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Rejected config: {e}, using defaults");
        config = Config::default();
    }

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    if let Err(e) = aether_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Logging already initialised: {e}");
    }

    info!(config_dir = %config_dir.display(), "Aether demo starting");

    demonstrate_precision();
    simulate_day(config, args.frames.unwrap_or(DEFAULT_FRAMES));
}

/// Compare the camera-relative planet center in plain f32 against split encoding.
fn demonstrate_precision() {
    let exact = PLANET_CENTER - CAMERA_POSITION;

    let plain = PLANET_CENTER.as_vec3() - CAMERA_POSITION.as_vec3();
    let split =
        SplitPosition::from(PLANET_CENTER).relative_to(&SplitPosition::from(CAMERA_POSITION));

    let plain_error = (plain.as_dvec3() - glam::DVec3::from(exact)).length();
    let split_error = (split.as_dvec3() - glam::DVec3::from(exact)).length();

    info!(
        %exact,
        plain_error,
        split_error,
        "Camera-relative planet center"
    );
}

fn simulate_day(config: Config, frames: u32) {
    let start_hour = config.time_of_day.time_of_day;
    let mut pass = AtmospherePass::new(config);
    if let Err(e) = pass.setup(&mut HeadlessFactory { fail: false }) {
        warn!("Atmosphere unavailable: {e}");
        return;
    }

    let mut renderer = HeadlessRenderer::default();
    let planet = PlanetState::new(PLANET_CENTER, Vec3::splat(6.371));
    let sun = SunState::new(WorldPosition::new(0.0, 1.5e11, 0.0)).with_texture(TextureHandle(1));

    // Warm-up frame before the sun is placed.
    if let FrameOutcome::Skipped(reason) = pass.execute(&mut renderer, Some(&planet), None) {
        info!(%reason, "Warm-up frame skipped");
    }

    let hours_per_frame = 24.0 / frames.max(1) as f32;
    for frame in 0..frames {
        let hour = wrap_hours(start_hour + frame as f32 * hours_per_frame);

        let mut config = pass.config().clone();
        config.time_of_day.time_of_day = hour;
        let phase = day_phase_at(hour, &config.time_of_day);
        pass.set_config(config);

        match pass.execute(&mut renderer, Some(&planet), Some(&sun)) {
            FrameOutcome::Drawn => {
                let color = renderer
                    .last_properties()
                    .vector(uniform_names::SUN_COLOR)
                    .unwrap_or_default();
                info!(
                    frame,
                    hour = %format!("{hour:.2}"),
                    ?phase,
                    r = color.x,
                    g = color.y,
                    b = color.z,
                    "Sun color"
                );
            }
            FrameOutcome::Skipped(reason) => warn!(frame, %reason, "Frame skipped"),
        }
    }

    let radius = renderer
        .last_properties()
        .float(uniform_names::PLANET_RADIUS)
        .unwrap_or_default();
    info!(
        draws = renderer.draws,
        frames_drawn = pass.frames_drawn(),
        planet_radius = radius,
        "Simulated day complete"
    );
}
