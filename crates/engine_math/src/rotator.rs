//! Euler-angle orientation in degrees.
//!
//! [`Rotator`] stores yaw, pitch and roll the way level designers author
//! them. Addition and subtraction are componentwise and do not normalise, so
//! angle arithmetic can be composed before a final [`unwind_degrees`].

use std::ops::{Add, Sub};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Normalise an angle in degrees to the range `(-180, 180]`.
///
/// Angles already inside the range are returned untouched, which makes the
/// function idempotent bit-for-bit.
#[must_use]
pub fn unwind_degrees(angle: f32) -> f32 {
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }
    let mut unwound = 180.0 - (180.0 - angle).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative remainders.
    if unwound <= -180.0 {
        unwound += 360.0;
    }
    unwound
}

/// An orientation expressed as yaw, pitch and roll in degrees.
///
/// - `yaw` turns about +Z; positive yaw rotates +X toward +Y.
/// - `pitch` tilts the forward axis; positive pitch raises it toward +Z.
/// - `roll` spins about the forward axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotator {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Rotator {
    /// No rotation.
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };

    /// Create a rotator from yaw, pitch and roll in degrees.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// A pure heading with no pitch or roll.
    #[must_use]
    pub const fn from_yaw(yaw: f32) -> Self {
        Self {
            yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Convert to a unit quaternion (yaw, then pitch, then roll, applied
    /// intrinsically).
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }

    /// Rotate a vector by this orientation.
    #[must_use]
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        self.to_quat() * v
    }

    /// The unit vector this orientation faces.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// The horizontal unit vector for this orientation's heading, ignoring
    /// pitch and roll.
    #[must_use]
    pub fn yaw_forward(self) -> Vec3 {
        Self::from_yaw(self.yaw).forward()
    }

    /// Approximate equality on every axis, comparing unwound angles so that
    /// `180` and `-180` compare equal.
    #[must_use]
    pub fn abs_diff_eq(self, other: Self, max_abs_diff: f32) -> bool {
        let close = |a: f32, b: f32| unwind_degrees(a - b).abs() <= max_abs_diff;
        close(self.yaw, other.yaw) && close(self.pitch, other.pitch) && close(self.roll, other.roll)
    }
}

impl Add for Rotator {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch, self.roll - rhs.roll)
    }
}

impl std::fmt::Display for Rotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(yaw={:.2}, pitch={:.2}, roll={:.2})",
            self.yaw, self.pitch, self.roll
        )
    }
}
