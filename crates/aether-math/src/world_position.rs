use glam::{DVec3, Vec3};
use std::fmt;
use std::ops::{Add, Sub};

/// A point in world space stored in f64.
///
/// Planet-scale scenes place bodies tens or hundreds of millions of units
/// from the rendering origin. At that distance an f32 coordinate has a
/// resolution of several units, so positions are kept in f64 on the CPU and
/// only narrowed at the GPU boundary (see [`SplitPosition`](crate::SplitPosition)).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPosition {
    /// The world origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new WorldPosition with the given coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Narrow to f32 by direct cast. Loses precision far from the origin.
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Position relative to `origin`, computed in f64 and then narrowed.
    ///
    /// The subtraction happens before the cast, so nearby points stay exact
    /// even when both are far from the world origin.
    pub fn to_local_f32(&self, origin: &WorldPosition) -> Vec3 {
        (*self - *origin).as_vec3()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<DVec3> for WorldPosition {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<WorldPosition> for DVec3 {
    fn from(p: WorldPosition) -> DVec3 {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for WorldPosition {
    fn from(v: Vec3) -> Self {
        Self::new(v.x as f64, v.y as f64, v.z as f64)
    }
}

impl Add for WorldPosition {
    type Output = WorldPosition;

    fn add(self, rhs: WorldPosition) -> Self::Output {
        WorldPosition::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for WorldPosition {
    type Output = WorldPosition;

    fn sub(self, rhs: WorldPosition) -> Self::Output {
        WorldPosition::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
