//! Derives the scattering shader's uniform set from scene state and configuration.

use aether_config::{ScatteringConfig, SunConfig, TimeOfDayConfig};
use aether_math::{WorldPosition, encode_split, max_axis_scale};
use glam::{Vec3, Vec4};

use crate::error::{AtmosphereError, Reference};
use crate::render_state::ATMOSPHERE_RENDER_STATE;
use crate::renderer::TextureHandle;
use crate::sun_color::sun_color;
use crate::uniform::{PrecisionMode, ScatteringTunables, UniformSet};

/// Planet transform as read by the pass each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetState {
    /// World-space center in f64.
    pub center: WorldPosition,
    /// World-space scale of the planet transform, including parent scale.
    pub lossy_scale: Vec3,
}

impl PlanetState {
    pub fn new(center: WorldPosition, lossy_scale: Vec3) -> Self {
        Self {
            center,
            lossy_scale,
        }
    }

    /// State from an f32 engine transform. Prefer [`PlanetState::new`] when an
    /// f64 position is available, since the f32 one is already rounded.
    pub fn from_transform(position: Vec3, lossy_scale: Vec3) -> Self {
        Self::new(WorldPosition::from(position), lossy_scale)
    }
}

/// Sun transform and disk overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    pub position: WorldPosition,
    pub texture: Option<TextureHandle>,
}

impl SunState {
    pub fn new(position: WorldPosition) -> Self {
        Self {
            position,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// Scaled planet radius and atmosphere height for a transform scale.
///
/// `atmosphere_scale_factor` multiplies on top of the transform scale; it
/// never replaces it.
pub fn scaled_envelope(scattering: &ScatteringConfig, lossy_scale: Vec3) -> (f32, f32) {
    let world_scale = max_axis_scale(lossy_scale);
    let radius = scattering.planet_radius * world_scale;
    let height = scattering.atmosphere_height * world_scale * scattering.atmosphere_scale_factor;
    (radius, height)
}

/// Planet center fields for the chosen precision mode: `(mode, high, low, plain)`.
///
/// The fields the mode does not use are zero.
fn encode_center(
    center: WorldPosition,
    use_double_precision: bool,
) -> (PrecisionMode, Vec4, Vec4, Vec4) {
    if use_double_precision {
        let split = encode_split(center.x, center.y, center.z);
        (PrecisionMode::Split, split.high, split.low, Vec4::ZERO)
    } else {
        (
            PrecisionMode::Plain,
            Vec4::ZERO,
            Vec4::ZERO,
            center.as_vec3().extend(0.0),
        )
    }
}

/// Build the complete uniform set for one frame.
///
/// Returns [`AtmosphereError::MissingReference`] if the planet or sun is
/// absent; in that case nothing should be drawn this frame. The planet
/// center must be finite (see [`aether_math::split_f64`]).
pub fn build(
    planet: Option<&PlanetState>,
    sun: Option<&SunState>,
    scattering: &ScatteringConfig,
    sun_config: &SunConfig,
    tod: &TimeOfDayConfig,
) -> Result<UniformSet, AtmosphereError> {
    let planet = planet.ok_or(AtmosphereError::MissingReference(Reference::Planet))?;
    let sun = sun.ok_or(AtmosphereError::MissingReference(Reference::Sun))?;

    let (planet_radius, atmosphere_height) = scaled_envelope(scattering, planet.lossy_scale);
    let (precision_mode, planet_center_high, planet_center_low, planet_center) =
        encode_center(planet.center, scattering.use_double_precision);

    Ok(UniformSet {
        precision_mode,
        planet_center_high,
        planet_center_low,
        planet_center,
        planet_radius,
        atmosphere_height,
        sun_position: sun.position.as_vec3(),
        rayleigh_coefficients: Vec3::from_array(scattering.rayleigh_coefficients),
        mie_coefficient: scattering.mie_coefficient,
        sun_color: sun_color(tod),
        time_of_day: tod.wrapped_time(),
        sun_texture: sun.texture,
        sun_texture_size: sun_config.texture_size,
        tunables: ScatteringTunables {
            atmosphere_density: scattering.atmosphere_density,
            density_falloff: scattering.density_falloff,
            scattering_intensity: scattering.scattering_intensity,
            scattering_scale: scattering.scattering_scale,
            scattering_power: scattering.scattering_power,
            mie_scattering_from_space: scattering.mie_scattering_from_space,
            mie_anisotropy: scattering.mie_anisotropy,
            sun_intensity: sun_config.intensity,
            sun_falloff: sun_config.falloff,
        },
        render_state: ATMOSPHERE_RENDER_STATE,
    })
}
