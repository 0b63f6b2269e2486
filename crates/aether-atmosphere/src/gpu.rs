//! GPU-side representation of the uniform set and wgpu state for the pass.

use bytemuck::{Pod, Zeroable};

use crate::render_state::{BlendFactor, CompareFunction, RenderState};
use crate::uniform::UniformSet;

/// Atmosphere uniform buffer. Matches the WGSL struct layout.
///
/// vec4 fields lead so every vec3 lands on a 16-byte boundary with a scalar
/// packed into its fourth lane.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct AtmosphereUniform {
    /// Split planet center, high part. (offset 0)
    pub planet_center_high: [f32; 4],
    /// Split planet center, low part. (offset 16)
    pub planet_center_low: [f32; 4],
    /// Plain planet center. (offset 32)
    pub planet_center: [f32; 4],
    /// Interpolated sun color, RGBA. (offset 48)
    pub sun_color: [f32; 4],
    /// Sun world position. (offset 64)
    pub sun_position: [f32; 3],
    /// 0.0 = plain, 1.0 = split. (offset 76)
    pub precision_mode: f32,
    /// Rayleigh coefficients, RGB. (offset 80)
    pub rayleigh_coefficients: [f32; 3],
    /// (offset 92)
    pub mie_coefficient: f32,
    /// (offset 96)
    pub planet_radius: f32,
    /// (offset 100)
    pub atmosphere_height: f32,
    /// (offset 104)
    pub time_of_day: f32,
    /// (offset 108)
    pub sun_texture_size: f32,
    /// (offset 112)
    pub atmosphere_density: f32,
    pub density_falloff: f32,
    pub scattering_intensity: f32,
    pub scattering_scale: f32,
    /// (offset 128)
    pub scattering_power: f32,
    pub mie_scattering_from_space: f32,
    pub mie_anisotropy: f32,
    pub sun_intensity: f32,
    /// (offset 144)
    pub sun_falloff: f32,
    /// 1.0 when a sun texture is bound. (offset 148)
    pub has_sun_texture: f32,
    pub _padding: [f32; 2],
}

static_assertions::assert_eq_size!(AtmosphereUniform, [u8; 160]);

impl AtmosphereUniform {
    /// Pack a uniform set. Every value is copied bit-for-bit.
    pub fn from_uniform_set(set: &UniformSet) -> Self {
        let t = &set.tunables;
        Self {
            planet_center_high: set.planet_center_high.to_array(),
            planet_center_low: set.planet_center_low.to_array(),
            planet_center: set.planet_center.to_array(),
            sun_color: set.sun_color.to_array(),
            sun_position: set.sun_position.to_array(),
            precision_mode: set.precision_mode.as_f32(),
            rayleigh_coefficients: set.rayleigh_coefficients.to_array(),
            mie_coefficient: set.mie_coefficient,
            planet_radius: set.planet_radius,
            atmosphere_height: set.atmosphere_height,
            time_of_day: set.time_of_day,
            sun_texture_size: set.sun_texture_size,
            atmosphere_density: t.atmosphere_density,
            density_falloff: t.density_falloff,
            scattering_intensity: t.scattering_intensity,
            scattering_scale: t.scattering_scale,
            scattering_power: t.scattering_power,
            mie_scattering_from_space: t.mie_scattering_from_space,
            mie_anisotropy: t.mie_anisotropy,
            sun_intensity: t.sun_intensity,
            sun_falloff: t.sun_falloff,
            has_sun_texture: if set.sun_texture.is_some() { 1.0 } else { 0.0 },
            _padding: [0.0; 2],
        }
    }
}

impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        }
    }
}

impl From<CompareFunction> for wgpu::CompareFunction {
    fn from(func: CompareFunction) -> Self {
        match func {
            CompareFunction::Never => wgpu::CompareFunction::Never,
            CompareFunction::Less => wgpu::CompareFunction::Less,
            CompareFunction::Equal => wgpu::CompareFunction::Equal,
            CompareFunction::LessEqual => wgpu::CompareFunction::LessEqual,
            CompareFunction::Greater => wgpu::CompareFunction::Greater,
            CompareFunction::NotEqual => wgpu::CompareFunction::NotEqual,
            CompareFunction::GreaterEqual => wgpu::CompareFunction::GreaterEqual,
            CompareFunction::Always => wgpu::CompareFunction::Always,
        }
    }
}

impl RenderState {
    /// Blend state applied to both color and alpha.
    pub fn blend_state(&self) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor: self.src_blend.into(),
            dst_factor: self.dst_blend.into(),
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }

    pub fn color_target(&self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: Some(self.blend_state()),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    pub fn depth_stencil(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.depth_write,
            depth_compare: self.depth_test.into(),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_state::ATMOSPHERE_RENDER_STATE;
    use crate::renderer::TextureHandle;
    use crate::uniform::{PrecisionMode, ScatteringTunables};
    use glam::{Vec3, Vec4};

    fn sample_set() -> UniformSet {
        UniformSet {
            precision_mode: PrecisionMode::Split,
            planet_center_high: Vec4::new(1.0e8, 0.0, 3.5e7, 0.0),
            planet_center_low: Vec4::new(3.7, 0.0, 1.25, 0.0),
            planet_center: Vec4::ZERO,
            planet_radius: 6.371,
            atmosphere_height: 0.1,
            sun_position: Vec3::new(0.0, 1.5e11, 0.0),
            rayleigh_coefficients: Vec3::new(5.8, 13.5, 33.1),
            mie_coefficient: 0.1,
            sun_color: Vec4::new(1.0, 0.5, 0.2, 1.0),
            time_of_day: 6.0,
            sun_texture: Some(TextureHandle(1)),
            sun_texture_size: 0.1,
            tunables: ScatteringTunables {
                atmosphere_density: 2.0,
                density_falloff: 1.0,
                scattering_intensity: 3.0,
                scattering_scale: 20.0,
                scattering_power: 3.0,
                mie_scattering_from_space: 2.0,
                mie_anisotropy: 0.76,
                sun_intensity: 50.0,
                sun_falloff: 10.0,
            },
            render_state: ATMOSPHERE_RENDER_STATE,
        }
    }

    #[test]
    fn test_uniform_alignment() {
        assert_eq!(std::mem::size_of::<AtmosphereUniform>() % 16, 0);
        assert_eq!(std::mem::offset_of!(AtmosphereUniform, sun_position), 64);
        assert_eq!(std::mem::offset_of!(AtmosphereUniform, rayleigh_coefficients), 80);
        assert_eq!(std::mem::offset_of!(AtmosphereUniform, planet_radius), 96);
        assert_eq!(std::mem::offset_of!(AtmosphereUniform, sun_falloff), 144);
    }

    #[test]
    fn test_packing_is_bit_exact() {
        let set = sample_set();
        let packed = AtmosphereUniform::from_uniform_set(&set);
        assert_eq!(
            packed.planet_center_low[0].to_bits(),
            set.planet_center_low.x.to_bits()
        );
        assert_eq!(packed.precision_mode, 1.0);
        assert_eq!(packed.has_sun_texture, 1.0);
        assert_eq!(packed.mie_anisotropy, 0.76);
    }

    #[test]
    fn test_identical_sets_pack_to_identical_bytes() {
        let a = AtmosphereUniform::from_uniform_set(&sample_set());
        let b = AtmosphereUniform::from_uniform_set(&sample_set());
        assert_eq!(bytemuck::bytes_of(&a), bytemuck::bytes_of(&b));
    }

    #[test]
    fn test_no_texture_flag() {
        let mut set = sample_set();
        set.sun_texture = None;
        assert_eq!(AtmosphereUniform::from_uniform_set(&set).has_sun_texture, 0.0);
    }

    #[test]
    fn test_blend_state() {
        let blend = ATMOSPHERE_RENDER_STATE.blend_state();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(blend.color.operation, wgpu::BlendOperation::Add);
        assert_eq!(blend.alpha, blend.color);
    }

    #[test]
    fn test_depth_stencil_state() {
        let depth = ATMOSPHERE_RENDER_STATE.depth_stencil(wgpu::TextureFormat::Depth32Float);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::LessEqual);
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.format, wgpu::TextureFormat::Depth32Float);
    }

    #[test]
    fn test_color_target_writes_all_channels() {
        let target = ATMOSPHERE_RENDER_STATE.color_target(wgpu::TextureFormat::Rgba16Float);
        assert_eq!(target.write_mask, wgpu::ColorWrites::ALL);
        assert_eq!(target.blend, Some(ATMOSPHERE_RENDER_STATE.blend_state()));
    }

    #[test]
    fn test_compare_function_mapping() {
        let pairs = [
            (CompareFunction::Never, wgpu::CompareFunction::Never),
            (CompareFunction::Less, wgpu::CompareFunction::Less),
            (CompareFunction::Equal, wgpu::CompareFunction::Equal),
            (CompareFunction::LessEqual, wgpu::CompareFunction::LessEqual),
            (CompareFunction::Greater, wgpu::CompareFunction::Greater),
            (CompareFunction::NotEqual, wgpu::CompareFunction::NotEqual),
            (CompareFunction::GreaterEqual, wgpu::CompareFunction::GreaterEqual),
            (CompareFunction::Always, wgpu::CompareFunction::Always),
        ];
        for (ours, theirs) in pairs {
            assert_eq!(wgpu::CompareFunction::from(ours), theirs);
        }
    }

    #[test]
    fn test_blend_factor_mapping() {
        assert_eq!(wgpu::BlendFactor::from(BlendFactor::Zero), wgpu::BlendFactor::Zero);
        assert_eq!(
            wgpu::BlendFactor::from(BlendFactor::SrcAlpha),
            wgpu::BlendFactor::SrcAlpha
        );
    }
}
