//! World-space positions.
//!
//! Two coordinate types cross the host boundary:
//!
//! - [`Vec3`]: continuous world position (entity locations, drop points,
//!   impulse vectors)
//! - [`BlockPosition`]: integer block coordinates (flag bases)

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Continuous world-space vector.
///
/// Used both as a position and as a direction (drop impulse).
///
/// ```
/// use rust_ctf::core::Vec3;
///
/// let attacker = Vec3::new(1.0, 0.0, 2.0);
/// let target = Vec3::new(4.0, 0.0, 6.0);
///
/// // Impulse pushes away from the attacker.
/// assert_eq!(target - attacker, Vec3::new(3.0, 0.0, 4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component (up).
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared length. Avoids the square root for comparisons.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Integer block coordinates in the voxel world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (up).
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPosition {
    /// Create a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block origin in world space.
    #[must_use]
    pub fn to_world(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl std::fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
