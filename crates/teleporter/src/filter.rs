//! Eligibility checks deciding which bodies a teleporter accepts.
//!
//! [`TeleporterSystem`](crate::TeleporterSystem) is generic over a
//! [`TeleportFilter`], so a level can restrict a teleporter by body kind,
//! capability, team, or any closure over the world.

use engine_component::{Entity, World};
use tracing::info;

use crate::components::{BodyKind, Capabilities, Capability, Team};

/// Decides whether an entity may pass through a teleporter.
pub trait TeleportFilter {
    fn is_permitted(&self, world: &World, entity: Entity) -> bool;
}

impl<F> TeleportFilter for F
where
    F: Fn(&World, Entity) -> bool,
{
    fn is_permitted(&self, world: &World, entity: Entity) -> bool {
        self(world, entity)
    }
}

/// Accepts only [`BodyKind::Character`] bodies. The default filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharactersOnly;

impl TeleportFilter for CharactersOnly {
    fn is_permitted(&self, world: &World, entity: Entity) -> bool {
        match world.get::<BodyKind>(entity) {
            Some(BodyKind::Character) => true,
            kind => {
                info!(%entity, ?kind, "teleport rejected, body is not a character");
                false
            }
        }
    }
}

/// Accepts bodies advertising a given [`Capability`].
#[derive(Debug, Clone, Copy)]
pub struct RequireCapability(pub Capability);

impl Default for RequireCapability {
    fn default() -> Self {
        Self(Capability::Teleportable)
    }
}

impl TeleportFilter for RequireCapability {
    fn is_permitted(&self, world: &World, entity: Entity) -> bool {
        let permitted = world
            .get::<Capabilities>(entity)
            .is_some_and(|caps| caps.contains(self.0));
        if !permitted {
            info!(%entity, required = ?self.0, "teleport rejected, missing capability");
        }
        permitted
    }
}

/// Restricts another filter to members of one team.
#[derive(Debug, Clone)]
pub struct TeamOnly<F> {
    pub team: Team,
    pub inner: F,
}

impl<F: TeleportFilter> TeamOnly<F> {
    #[must_use]
    pub fn new(team: Team, inner: F) -> Self {
        Self { team, inner }
    }
}

impl<F: TeleportFilter> TeleportFilter for TeamOnly<F> {
    fn is_permitted(&self, world: &World, entity: Entity) -> bool {
        if world.get::<Team>(entity) != Some(&self.team) {
            info!(%entity, team = %self.team.0, "teleport rejected, wrong team");
            return false;
        }
        self.inner.is_permitted(world, entity)
    }
}
