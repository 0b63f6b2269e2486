//! Atmospheric scattering pass: per-frame uniform derivation and draw driver.
//!
//! - [`sun_color`]: time-of-day interpolation of the sun tint
//! - [`builder`]: planet/sun state and configuration to a [`UniformSet`]
//! - [`pass`]: [`AtmospherePass`] lifecycle over a [`FrameRenderer`]
//! - [`gpu`]: `Pod` uniform buffer layout and wgpu blend/depth state

pub mod builder;
pub mod error;
pub mod gpu;
pub mod pass;
pub mod render_state;
pub mod renderer;
pub mod sun_color;
pub mod uniform;

pub use builder::{PlanetState, SunState, build, scaled_envelope};
pub use error::{AtmosphereError, Reference};
pub use gpu::AtmosphereUniform;
pub use pass::{ATMOSPHERE_PASS_INDEX, AtmospherePass, FrameOutcome, PassStatus};
pub use render_state::{
    ATMOSPHERE_RENDER_STATE, BlendFactor, CompareFunction, RenderQueue, RenderState,
};
pub use renderer::{
    FrameRenderer, PropertyBlock, PropertySink, PropertyValue, ShadingProgramFactory,
    TextureHandle,
};
pub use sun_color::{DayPhase, day_phase_at, sun_color, sun_color_at};
pub use uniform::{PrecisionMode, ScatteringTunables, UniformSet, uniform_names};
