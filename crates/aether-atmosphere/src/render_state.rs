//! Fixed blend/depth policy for the atmosphere composite.
//!
//! The atmosphere is drawn after opaque geometry with premultiplied-alpha
//! blending (`src = One`, `dst = OneMinusSrcAlpha`), a `LessEqual` depth test,
//! depth writes on, in the transparent queue. None of this is configurable.

/// Blend factors, numbered the way the property block stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum BlendFactor {
    Zero = 0,
    One = 1,
    SrcAlpha = 5,
    OneMinusSrcAlpha = 10,
}

/// Depth comparison functions, numbered the way the property block stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum CompareFunction {
    Never = 1,
    Less = 2,
    Equal = 3,
    LessEqual = 4,
    Greater = 5,
    NotEqual = 6,
    GreaterEqual = 7,
    Always = 8,
}

/// Draw ordering bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum RenderQueue {
    Geometry = 2000,
    Transparent = 3000,
}

/// Blend, depth, and queue state the scattering shader is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderState {
    pub src_blend: BlendFactor,
    pub dst_blend: BlendFactor,
    pub depth_test: CompareFunction,
    pub depth_write: bool,
    pub queue: RenderQueue,
}

/// The only state the atmosphere pass uses.
pub const ATMOSPHERE_RENDER_STATE: RenderState = RenderState {
    src_blend: BlendFactor::One,
    dst_blend: BlendFactor::OneMinusSrcAlpha,
    depth_test: CompareFunction::LessEqual,
    depth_write: true,
    queue: RenderQueue::Transparent,
};

impl Default for RenderState {
    fn default() -> Self {
        ATMOSPHERE_RENDER_STATE
    }
}

impl BlendFactor {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl CompareFunction {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl RenderQueue {
    pub fn code(self) -> i32 {
        self as i32
    }
}
