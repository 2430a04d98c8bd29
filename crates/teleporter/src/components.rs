//! Components describing the bodies a teleporter can act on.
//!
//! Each type satisfies the [`Component`] trait requirements so it can be
//! stored in the [`World`](engine_component::World) and authored in level
//! files.

use std::collections::BTreeSet;

use engine_component::Component;
use engine_math::{Rotator, Vec3};
use serde::{Deserialize, Serialize};

/// A 3D velocity component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    /// Linear velocity in world units per second.
    pub linear: Vec3,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { linear: Vec3::ZERO };

    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            linear: Vec3::new(x, y, z),
        }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// The agent steering a body. A body with a controller faces wherever the
/// controller looks, so teleports read and write the control rotation
/// instead of the body's own transform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Controller {
    pub control_rotation: Rotator,
}

impl Controller {
    /// A controller looking along `control_rotation`.
    #[must_use]
    pub fn new(control_rotation: Rotator) -> Self {
        Self { control_rotation }
    }
}

impl Component for Controller {
    fn type_name() -> &'static str {
        "Controller"
    }
}

/// What kind of body an entity is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Character,
    Projectile,
    Vehicle,
    Prop,
}

impl Component for BodyKind {
    fn type_name() -> &'static str {
        "BodyKind"
    }
}

/// Gameplay capabilities a body advertises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Teleportable,
    Pickup,
    Damageable,
}

/// The set of [`Capability`] values attached to an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Capabilities(pub BTreeSet<Capability>);

impl Capabilities {
    /// Returns `true` if the set includes `capability`.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Component for Capabilities {
    fn type_name() -> &'static str {
        "Capabilities"
    }
}

/// Team affiliation, used by team-restricted teleporters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Team(pub String);

impl Team {
    /// Create a team tag from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Component for Team {
    fn type_name() -> &'static str {
        "Team"
    }
}

/// A simple name tag component, used in logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Name {
    /// The entity's display name.
    pub value: String,
}

impl Name {
    /// Create a new name component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_contains() {
        let caps: Capabilities = [Capability::Teleportable, Capability::Pickup]
            .into_iter()
            .collect();
        assert!(caps.contains(Capability::Teleportable));
        assert!(!caps.contains(Capability::Damageable));
    }

    #[test]
    fn test_body_kind_serialization() {
        let kind = BodyKind::Projectile;
        let bytes = rmp_serde::to_vec(&kind).unwrap();
        let restored: BodyKind = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(kind, restored);
        assert_eq!(serde_json::to_string(&BodyKind::Character).unwrap(), "\"character\"");
    }
}
