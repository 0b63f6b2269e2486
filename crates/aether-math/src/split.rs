//! Split-precision encoding of f64 positions for f32 shading stages.
//!
//! A value `v` is stored as `high = f32(v)` plus `low = f32(v - f64(high))`.
//! The shader subtracts the camera (or any reference point) from each part
//! separately, so large equal magnitudes cancel exactly in `high` and the
//! sub-ulp detail carried by `low` survives the subtraction.

use glam::{DVec3, Vec3, Vec4};

use crate::WorldPosition;

/// A position encoded as two f32 vectors whose sum approximates an f64 point.
///
/// The `w` component of both vectors is always zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SplitPosition {
    /// Nearest f32 value per axis.
    pub high: Vec4,
    /// Residual `value - high`, computed in f64 then narrowed.
    pub low: Vec4,
}

impl SplitPosition {
    pub const ZERO: Self = Self {
        high: Vec4::ZERO,
        low: Vec4::ZERO,
    };

    /// Sum the two parts in f32, the way a single-precision shader would.
    pub fn reconstruct_f32(&self) -> Vec3 {
        (self.high + self.low).truncate()
    }

    /// Sum the two parts in f64.
    pub fn reconstruct_f64(&self) -> DVec3 {
        self.high.truncate().as_dvec3() + self.low.truncate().as_dvec3()
    }

    /// Difference `self - origin` evaluated in f32 per part.
    ///
    /// This is the operation the scattering shader performs against the
    /// camera position. Both parts are subtracted before they are summed.
    pub fn relative_to(&self, origin: &SplitPosition) -> Vec3 {
        ((self.high - origin.high) + (self.low - origin.low)).truncate()
    }
}

impl From<WorldPosition> for SplitPosition {
    fn from(p: WorldPosition) -> Self {
        encode_split(p.x, p.y, p.z)
    }
}

/// Split one f64 into `(high, low)` f32 parts.
///
/// Non-finite input is a precondition violation. It is only checked in debug
/// builds; release builds pass NaN or infinity straight through.
#[inline]
pub fn split_f64(value: f64) -> (f32, f32) {
    debug_assert!(value.is_finite(), "split_f64 called with {value}");
    let high = value as f32;
    let low = (value - high as f64) as f32;
    (high, low)
}

/// Encode an f64 point into a [`SplitPosition`].
///
/// Inputs must be finite; see [`split_f64`].
pub fn encode_split(x: f64, y: f64, z: f64) -> SplitPosition {
    let (xh, xl) = split_f64(x);
    let (yh, yl) = split_f64(y);
    let (zh, zl) = split_f64(z);
    SplitPosition {
        high: Vec4::new(xh, yh, zh, 0.0),
        low: Vec4::new(xl, yl, zl, 0.0),
    }
}
