//! The per-frame uniform set consumed by the scattering shader.

use glam::{Vec3, Vec4};

use crate::render_state::RenderState;
use crate::renderer::{PropertySink, TextureHandle};

/// Stable property names the scattering shader reads.
pub mod uniform_names {
    pub const PLANET_CENTER_HIGH: &str = "planet_center_high";
    pub const PLANET_CENTER_LOW: &str = "planet_center_low";
    pub const PLANET_CENTER: &str = "planet_center";
    pub const PRECISION_MODE: &str = "precision_mode";
    pub const PLANET_RADIUS: &str = "planet_radius";
    pub const ATMOSPHERE_HEIGHT: &str = "atmosphere_height";
    pub const SUN_POSITION: &str = "sun_position";
    pub const RAYLEIGH_COEFFICIENTS: &str = "rayleigh_coefficients";
    pub const MIE_COEFFICIENT: &str = "mie_coefficient";
    pub const SUN_COLOR: &str = "sun_color";
    pub const TIME_OF_DAY: &str = "time_of_day";
    pub const SUN_TEXTURE: &str = "sun_texture";
    pub const SUN_TEXTURE_SIZE: &str = "sun_texture_size";
    pub const ATMOSPHERE_DENSITY: &str = "atmosphere_density";
    pub const DENSITY_FALLOFF: &str = "density_falloff";
    pub const SCATTERING_INTENSITY: &str = "scattering_intensity";
    pub const SCATTERING_SCALE: &str = "scattering_scale";
    pub const SCATTERING_POWER: &str = "scattering_power";
    pub const MIE_SCATTERING_FROM_SPACE: &str = "mie_scattering_from_space";
    pub const MIE_ANISOTROPY: &str = "mie_anisotropy";
    pub const SUN_INTENSITY: &str = "sun_intensity";
    pub const SUN_FALLOFF: &str = "sun_falloff";
    pub const SRC_BLEND: &str = "src_blend";
    pub const DST_BLEND: &str = "dst_blend";
    pub const Z_TEST: &str = "z_test";
    pub const Z_WRITE: &str = "z_write";
    pub const RENDER_QUEUE: &str = "render_queue";
}

/// Which planet-center field the shader must read.
///
/// The unused field is zero, not absent, so consumers branch on this flag
/// instead of inspecting the vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecisionMode {
    /// `planet_center` is authoritative.
    Plain,
    /// `planet_center_high + planet_center_low` is authoritative.
    Split,
}

impl PrecisionMode {
    /// Shader-side flag value: 0.0 for plain, 1.0 for split.
    pub fn as_f32(self) -> f32 {
        match self {
            PrecisionMode::Plain => 0.0,
            PrecisionMode::Split => 1.0,
        }
    }
}

/// Shading controls copied through from configuration untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatteringTunables {
    pub atmosphere_density: f32,
    pub density_falloff: f32,
    pub scattering_intensity: f32,
    pub scattering_scale: f32,
    pub scattering_power: f32,
    pub mie_scattering_from_space: f32,
    pub mie_anisotropy: f32,
    pub sun_intensity: f32,
    pub sun_falloff: f32,
}

/// Everything the scattering shader needs for one frame.
///
/// Built fresh each frame and dropped after the draw is issued.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformSet {
    pub precision_mode: PrecisionMode,
    /// Valid when `precision_mode == Split`, otherwise zero.
    pub planet_center_high: Vec4,
    /// Valid when `precision_mode == Split`, otherwise zero.
    pub planet_center_low: Vec4,
    /// Valid when `precision_mode == Plain`, otherwise zero.
    pub planet_center: Vec4,
    /// Planet radius after transform scale.
    pub planet_radius: f32,
    /// Shell thickness after transform scale and the artistic scale factor.
    pub atmosphere_height: f32,
    pub sun_position: Vec3,
    pub rayleigh_coefficients: Vec3,
    pub mie_coefficient: f32,
    /// Time-of-day interpolated RGBA.
    pub sun_color: Vec4,
    /// Wrapped hour in `[0, 24)`.
    pub time_of_day: f32,
    pub sun_texture: Option<TextureHandle>,
    pub sun_texture_size: f32,
    pub tunables: ScatteringTunables,
    pub render_state: RenderState,
}

impl UniformSet {
    /// Write every field into the renderer's property store.
    ///
    /// The sun texture is only bound when present; all other properties are
    /// always written, including the zeroed center fields of the unused mode.
    pub fn write_to(&self, sink: &mut dyn PropertySink) {
        use uniform_names::*;

        sink.set_vector(PLANET_CENTER_HIGH, self.planet_center_high);
        sink.set_vector(PLANET_CENTER_LOW, self.planet_center_low);
        sink.set_vector(PLANET_CENTER, self.planet_center);
        sink.set_float(PRECISION_MODE, self.precision_mode.as_f32());

        sink.set_float(PLANET_RADIUS, self.planet_radius);
        sink.set_float(ATMOSPHERE_HEIGHT, self.atmosphere_height);
        sink.set_vector(SUN_POSITION, self.sun_position.extend(0.0));
        sink.set_vector(RAYLEIGH_COEFFICIENTS, self.rayleigh_coefficients.extend(0.0));
        sink.set_float(MIE_COEFFICIENT, self.mie_coefficient);

        sink.set_vector(SUN_COLOR, self.sun_color);
        sink.set_float(TIME_OF_DAY, self.time_of_day);

        if let Some(texture) = self.sun_texture {
            sink.set_texture(SUN_TEXTURE, texture);
        }
        sink.set_float(SUN_TEXTURE_SIZE, self.sun_texture_size);

        let t = &self.tunables;
        sink.set_float(ATMOSPHERE_DENSITY, t.atmosphere_density);
        sink.set_float(DENSITY_FALLOFF, t.density_falloff);
        sink.set_float(SCATTERING_INTENSITY, t.scattering_intensity);
        sink.set_float(SCATTERING_SCALE, t.scattering_scale);
        sink.set_float(SCATTERING_POWER, t.scattering_power);
        sink.set_float(MIE_SCATTERING_FROM_SPACE, t.mie_scattering_from_space);
        sink.set_float(MIE_ANISOTROPY, t.mie_anisotropy);
        sink.set_float(SUN_INTENSITY, t.sun_intensity);
        sink.set_float(SUN_FALLOFF, t.sun_falloff);

        let rs = &self.render_state;
        sink.set_int(SRC_BLEND, rs.src_blend.code());
        sink.set_int(DST_BLEND, rs.dst_blend.code());
        sink.set_int(Z_TEST, rs.depth_test.code());
        sink.set_int(Z_WRITE, i32::from(rs.depth_write));
        sink.set_int(RENDER_QUEUE, rs.queue.code());
    }
}
