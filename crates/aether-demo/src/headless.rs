//! A renderer with no GPU behind it. Records what the atmosphere pass asks for.

use aether_atmosphere::{FrameRenderer, PropertyBlock, PropertySink, ShadingProgramFactory};

/// Stand-in for a compiled scattering shader.
#[derive(Debug)]
pub struct HeadlessProgram {
    pub label: &'static str,
}

/// Produces [`HeadlessProgram`]s, or fails on demand to exercise the disabled path.
pub struct HeadlessFactory {
    pub fail: bool,
}

impl ShadingProgramFactory for HeadlessFactory {
    type Program = HeadlessProgram;
    type Error = String;

    fn create_program(&mut self) -> Result<HeadlessProgram, String> {
        if self.fail {
            return Err("headless factory configured to fail".to_string());
        }
        Ok(HeadlessProgram {
            label: "atmosphere-scatter",
        })
    }
}

#[derive(Default)]
pub struct HeadlessRenderer {
    properties: PropertyBlock,
    pub draws: u32,
}

impl HeadlessRenderer {
    /// Properties written for the most recent draw.
    pub fn last_properties(&self) -> &PropertyBlock {
        &self.properties
    }
}

impl FrameRenderer for HeadlessRenderer {
    type Program = HeadlessProgram;

    fn bind_camera_targets(&mut self) {
        self.properties.clear();
    }

    fn properties(&mut self) -> &mut dyn PropertySink {
        &mut self.properties
    }

    fn draw_fullscreen(&mut self, program: &HeadlessProgram, pass_index: u32) {
        self.draws += 1;
        tracing::trace!(program = program.label, pass_index, "full-screen draw");
    }
}
