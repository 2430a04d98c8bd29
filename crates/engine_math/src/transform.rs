//! 3D transform component.
//!
//! [`Transform3D`] is the world-space placement of an entity: where it is and
//! which way it faces.

use engine_component::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::rotator::Rotator;

/// A world-space position plus an Euler orientation.
///
/// This is the primary spatial component; teleporters, destinations and the
/// bodies passing through them all carry one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform3D {
    /// World-space position.
    pub position: Vec3,
    /// Orientation in degrees.
    #[serde(default)]
    pub rotation: Rotator,
}

impl Transform3D {
    /// The identity transform: origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Rotator::ZERO,
    };

    /// Create a new transform at the given position with no rotation.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a new transform with position and rotation.
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Rotator) -> Self {
        Self { position, rotation }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform3D {
    fn type_name() -> &'static str {
        "Transform3D"
    }
}
