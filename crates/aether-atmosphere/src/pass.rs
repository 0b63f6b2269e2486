//! Frame-level driver for the atmosphere composite.
//!
//! [`AtmospherePass`] owns the shading program and a configuration snapshot.
//! Each frame it checks its references, builds the [`UniformSet`], writes it
//! into the renderer's property store, and issues one full-screen draw.

use aether_config::Config;

use crate::builder::{PlanetState, SunState, build};
use crate::error::{AtmosphereError, Reference};
use crate::renderer::{FrameRenderer, ShadingProgramFactory};
use crate::uniform::UniformSet;

/// Index of the only shader pass the atmosphere uses.
pub const ATMOSPHERE_PASS_INDEX: u32 = 0;

/// Lifecycle state of the pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassStatus {
    /// `setup` has not run yet.
    Uninitialized,
    /// The shading program exists and frames can be drawn.
    Ready,
    /// Program creation failed. The pass stays off for the session.
    Disabled(String),
}

/// What happened to the atmosphere in one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    Drawn,
    Skipped(AtmosphereError),
}

impl FrameOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, FrameOutcome::Drawn)
    }
}

pub struct AtmospherePass<P> {
    program: Option<P>,
    status: PassStatus,
    config: Config,
    last_reported: Option<AtmosphereError>,
    frames_drawn: u64,
}

impl<P> AtmospherePass<P> {
    pub fn new(config: Config) -> Self {
        Self {
            program: None,
            status: PassStatus::Uninitialized,
            config,
            last_reported: None,
            frames_drawn: 0,
        }
    }

    /// Create the shading program.
    ///
    /// On failure the pass is disabled for the rest of the session and the
    /// error is logged once. Calling `setup` again after a failure or after
    /// success does nothing.
    pub fn setup<F>(&mut self, factory: &mut F) -> Result<(), AtmosphereError>
    where
        F: ShadingProgramFactory<Program = P>,
    {
        match &self.status {
            PassStatus::Ready => return Ok(()),
            PassStatus::Disabled(reason) => {
                return Err(AtmosphereError::ResourceCreationFailure(reason.clone()));
            }
            PassStatus::Uninitialized => {}
        }

        match factory.create_program() {
            Ok(program) => {
                self.program = Some(program);
                self.status = PassStatus::Ready;
                log::info!("Atmosphere pass ready");
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                let err = AtmosphereError::ResourceCreationFailure(reason.clone());
                log::error!("{err}; atmosphere disabled for this session");
                self.status = PassStatus::Disabled(reason);
                Err(err)
            }
        }
    }

    pub fn status(&self) -> &PassStatus {
        &self.status
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration snapshot. Takes effect on the next frame.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Build this frame's uniform set without drawing.
    pub fn prepare(
        &self,
        planet: Option<&PlanetState>,
        sun: Option<&SunState>,
    ) -> Result<UniformSet, AtmosphereError> {
        build(
            planet,
            sun,
            &self.config.scattering,
            &self.config.sun,
            &self.config.time_of_day,
        )
    }

    /// Run the pass for one frame.
    ///
    /// Nothing is bound or drawn unless every reference is present. A missing
    /// reference is logged the first time it is seen and again only after a
    /// frame has been drawn in between.
    pub fn execute<R>(
        &mut self,
        renderer: &mut R,
        planet: Option<&PlanetState>,
        sun: Option<&SunState>,
    ) -> FrameOutcome
    where
        R: FrameRenderer<Program = P>,
    {
        if let PassStatus::Disabled(reason) = &self.status {
            return FrameOutcome::Skipped(AtmosphereError::ResourceCreationFailure(
                reason.clone(),
            ));
        }

        let uniforms = match self.prepare(planet, sun) {
            Ok(uniforms) => uniforms,
            Err(e) => return self.skip(e),
        };
        let Some(program) = self.program.as_ref() else {
            return self.skip(AtmosphereError::MissingReference(Reference::ShadingProgram));
        };

        renderer.bind_camera_targets();
        uniforms.write_to(renderer.properties());
        renderer.draw_fullscreen(program, ATMOSPHERE_PASS_INDEX);

        if self.last_reported.take().is_some() {
            log::info!("Atmosphere references restored");
        }
        self.frames_drawn += 1;
        FrameOutcome::Drawn
    }

    fn skip(&mut self, err: AtmosphereError) -> FrameOutcome {
        if self.last_reported.as_ref() != Some(&err) {
            log::warn!("{err}; skipping atmosphere");
            self.last_reported = Some(err.clone());
        }
        FrameOutcome::Skipped(err)
    }
}
