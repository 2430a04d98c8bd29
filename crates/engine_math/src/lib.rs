//! # engine_math
//!
//! Math types for gameplay systems. Re-exports [`glam`] for linear algebra
//! and defines engine-specific spatial types that implement
//! [`Component`](engine_component::Component).
//!
//! Conventions: right-handed, Z up, X forward. Angles on [`Rotator`] are in
//! degrees.

pub mod rotator;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use rotator::{Rotator, unwind_degrees};
pub use transform::Transform3D;
