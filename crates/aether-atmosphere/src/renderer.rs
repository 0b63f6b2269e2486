//! The narrow interface between the atmosphere pass and the frame renderer.
//!
//! The renderer owns the color/depth targets, a per-draw property store, and
//! the full-screen draw primitive. The pass only fills the property store and
//! then asks for one draw.

use std::collections::HashMap;

use glam::Vec4;

/// Opaque handle to a texture owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Per-draw key/value store the shader's uniforms are written into.
pub trait PropertySink {
    fn set_float(&mut self, name: &'static str, value: f32);
    fn set_int(&mut self, name: &'static str, value: i32);
    fn set_vector(&mut self, name: &'static str, value: Vec4);
    fn set_texture(&mut self, name: &'static str, texture: TextureHandle);
}

/// The frame renderer as seen from the atmosphere pass.
pub trait FrameRenderer {
    /// Drawable form of the scattering shader.
    type Program;

    /// Bind the camera color and depth targets without clearing them.
    fn bind_camera_targets(&mut self);

    /// Property store for the next draw.
    fn properties(&mut self) -> &mut dyn PropertySink;

    /// Draw a full-screen triangle with `program`.
    fn draw_fullscreen(&mut self, program: &Self::Program, pass_index: u32);
}

/// Turns the scattering shader into a drawable program at setup time.
pub trait ShadingProgramFactory {
    type Program;
    type Error: std::fmt::Display;

    fn create_program(&mut self) -> Result<Self::Program, Self::Error>;
}

/// A single stored property value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Int(i32),
    Vector(Vec4),
    Texture(TextureHandle),
}

/// In-memory [`PropertySink`], for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct PropertyBlock {
    values: HashMap<&'static str, PropertyValue>,
}

impl PropertyBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            PropertyValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            PropertyValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn vector(&self, name: &str) -> Option<Vec4> {
        match self.get(name)? {
            PropertyValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match self.get(name)? {
            PropertyValue::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl PropertySink for PropertyBlock {
    fn set_float(&mut self, name: &'static str, value: f32) {
        self.values.insert(name, PropertyValue::Float(value));
    }

    fn set_int(&mut self, name: &'static str, value: i32) {
        self.values.insert(name, PropertyValue::Int(value));
    }

    fn set_vector(&mut self, name: &'static str, value: Vec4) {
        self.values.insert(name, PropertyValue::Vector(value));
    }

    fn set_texture(&mut self, name: &'static str, texture: TextureHandle) {
        self.values.insert(name, PropertyValue::Texture(texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_block_typed_getters() {
        let mut block = PropertyBlock::new();
        block.set_float("radius", 2.5);
        block.set_int("queue", 3000);
        block.set_vector("center", Vec4::new(1.0, 2.0, 3.0, 0.0));
        block.set_texture("sun", TextureHandle(7));

        assert_eq!(block.float("radius"), Some(2.5));
        assert_eq!(block.int("queue"), Some(3000));
        assert_eq!(block.vector("center"), Some(Vec4::new(1.0, 2.0, 3.0, 0.0)));
        assert_eq!(block.texture("sun"), Some(TextureHandle(7)));
        assert_eq!(block.len(), 4);
    }

    #[test]
    fn test_wrong_type_reads_none() {
        let mut block = PropertyBlock::new();
        block.set_float("radius", 2.5);
        assert_eq!(block.int("radius"), None);
        assert_eq!(block.vector("missing"), None);
    }

    #[test]
    fn test_overwrite_and_clear() {
        let mut block = PropertyBlock::new();
        block.set_float("radius", 1.0);
        block.set_float("radius", 2.0);
        assert_eq!(block.float("radius"), Some(2.0));
        assert_eq!(block.len(), 1);
        block.clear();
        assert!(block.is_empty());
    }
}
