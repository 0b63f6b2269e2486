//! Drives the atmosphere pass through a recording renderer over several frames.

use aether_atmosphere::{
    AtmosphereError, AtmospherePass, AtmosphereUniform, FrameOutcome, FrameRenderer, PlanetState,
    PropertyBlock, PropertySink, Reference, ShadingProgramFactory, SunState, TextureHandle,
    uniform_names,
};
use aether_config::Config;
use aether_math::WorldPosition;
use glam::{Vec3, Vec4};

struct Shader;

struct ShaderFactory;

impl ShadingProgramFactory for ShaderFactory {
    type Program = Shader;
    type Error = std::convert::Infallible;

    fn create_program(&mut self) -> Result<Shader, Self::Error> {
        Ok(Shader)
    }
}

/// Keeps a copy of the property block from every draw.
#[derive(Default)]
struct RecordingRenderer {
    current: PropertyBlock,
    frames: Vec<PropertyBlock>,
    binds: usize,
}

impl FrameRenderer for RecordingRenderer {
    type Program = Shader;

    fn bind_camera_targets(&mut self) {
        self.binds += 1;
        self.current.clear();
    }

    fn properties(&mut self) -> &mut dyn PropertySink {
        &mut self.current
    }

    fn draw_fullscreen(&mut self, _program: &Shader, pass_index: u32) {
        assert_eq!(pass_index, 0);
        self.frames.push(self.current.clone());
    }
}

fn far_planet() -> PlanetState {
    PlanetState::new(
        WorldPosition::new(100_000_003.7, 0.0, 35_000_001.25),
        Vec3::new(2.0, 2.0, 2.0),
    )
}

fn sun() -> SunState {
    SunState::new(WorldPosition::new(0.0, 1.5e11, 0.0)).with_texture(TextureHandle(42))
}

fn ready_pass(config: Config) -> AtmospherePass<Shader> {
    let mut pass = AtmospherePass::new(config);
    pass.setup(&mut ShaderFactory).unwrap();
    pass
}

#[test]
fn test_split_precision_frame() {
    let mut pass = ready_pass(Config::default());
    let mut renderer = RecordingRenderer::default();

    let outcome = pass.execute(&mut renderer, Some(&far_planet()), Some(&sun()));
    assert_eq!(outcome, FrameOutcome::Drawn);

    let block = &renderer.frames[0];
    assert_eq!(block.float(uniform_names::PRECISION_MODE), Some(1.0));
    assert_eq!(
        block.vector(uniform_names::PLANET_CENTER_HIGH),
        Some(Vec4::new(1.0e8, 0.0, 3.5e7, 0.0))
    );
    assert_eq!(block.vector(uniform_names::PLANET_CENTER), Some(Vec4::ZERO));
    assert_eq!(block.float(uniform_names::PLANET_RADIUS), Some(2.0));
    assert_eq!(block.texture(uniform_names::SUN_TEXTURE), Some(TextureHandle(42)));

    let low = block.vector(uniform_names::PLANET_CENTER_LOW).unwrap();
    let high = block.vector(uniform_names::PLANET_CENTER_HIGH).unwrap();
    let x = high.x as f64 + low.x as f64;
    assert!((x - 100_000_003.7).abs() < 1e-3, "reconstructed x = {x}");
}

#[test]
fn test_skipped_frames_then_recovery() {
    let mut pass = ready_pass(Config::default());
    let mut renderer = RecordingRenderer::default();

    for _ in 0..3 {
        let outcome = pass.execute(&mut renderer, Some(&far_planet()), None);
        assert_eq!(
            outcome,
            FrameOutcome::Skipped(AtmosphereError::MissingReference(Reference::Sun))
        );
    }
    assert_eq!(renderer.binds, 0);
    assert!(renderer.frames.is_empty());

    assert!(pass.execute(&mut renderer, Some(&far_planet()), Some(&sun())).is_drawn());
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(pass.frames_drawn(), 1);
}

#[test]
fn test_sun_color_follows_config_updates() {
    let mut pass = ready_pass(Config::default());
    let mut renderer = RecordingRenderer::default();
    let night = Config::default().time_of_day.night_color;
    let day = Config::default().time_of_day.daytime_color;

    pass.execute(&mut renderer, Some(&far_planet()), Some(&sun()));

    let mut config = pass.config().clone();
    config.time_of_day.time_of_day = 0.0;
    pass.set_config(config);
    pass.execute(&mut renderer, Some(&far_planet()), Some(&sun()));

    assert_eq!(
        renderer.frames[0].vector(uniform_names::SUN_COLOR),
        Some(Vec4::from_array(day))
    );
    assert_eq!(
        renderer.frames[1].vector(uniform_names::SUN_COLOR),
        Some(Vec4::from_array(night))
    );
    assert_eq!(renderer.frames[1].float(uniform_names::TIME_OF_DAY), Some(0.0));
}

#[test]
fn test_full_day_has_no_color_jumps() {
    let mut pass = ready_pass(Config::default());
    let mut renderer = RecordingRenderer::default();

    let steps = 24 * 120;
    for i in 0..steps {
        let mut config = pass.config().clone();
        config.time_of_day.time_of_day = i as f32 * 24.0 / steps as f32;
        pass.set_config(config);
        pass.execute(&mut renderer, Some(&far_planet()), Some(&sun()));
    }

    let colors: Vec<Vec4> = renderer
        .frames
        .iter()
        .map(|b| b.vector(uniform_names::SUN_COLOR).unwrap())
        .collect();
    assert_eq!(colors.len(), steps);
    for pair in colors.windows(2) {
        let step = (pair[1] - pair[0]).abs().max_element();
        assert!(step < 0.01, "color jumped by {step}");
    }
}

#[test]
fn test_gpu_packing_matches_property_block() {
    let pass = ready_pass(Config::default());
    let set = pass.prepare(Some(&far_planet()), Some(&sun())).unwrap();
    let packed = AtmosphereUniform::from_uniform_set(&set);

    let mut block = PropertyBlock::new();
    set.write_to(&mut block);

    assert_eq!(
        Some(Vec4::from_array(packed.planet_center_low)),
        block.vector(uniform_names::PLANET_CENTER_LOW)
    );
    assert_eq!(Some(packed.atmosphere_height), block.float(uniform_names::ATMOSPHERE_HEIGHT));
    assert_eq!(bytemuck::bytes_of(&packed).len(), 160);
}
