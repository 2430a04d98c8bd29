//! Overlap handling and the side effects of a teleport.
//!
//! [`TeleporterSystem`] is the explicit system that replaces a
//! self-contained teleporter actor: it holds no per-teleport state, takes the
//! [`World`] and the effect sink as arguments, and handles one
//! [`OverlapEvent`] per call, in whatever order the host delivers them.

use engine_component::{Entity, World};
use engine_math::{Transform3D, Vec3};
use tracing::{debug, info, warn};

use crate::calculator::{TeleportInput, TeleportTransform, compute_teleport};
use crate::components::{Controller, Name, Velocity};
use crate::effects::TeleportEffects;
use crate::error::TeleportError;
use crate::filter::{CharactersOnly, TeleportFilter};
use crate::teleporter::Teleporter;

/// Impact data attached to a sweep overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// World-space point where the sweep first touched the trigger.
    pub location: Vec3,
    /// Surface normal at the impact point.
    pub normal: Vec3,
}

/// An overlap-begin notification from the host's collision layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapEvent {
    /// The teleporter whose trigger volume was entered.
    pub teleporter: Entity,
    /// The body that entered it.
    pub other: Entity,
    /// Index of the body within `other` that overlapped.
    pub body_index: u32,
    /// Set when the overlap was found by a continuous sweep rather than a
    /// discrete position check.
    pub from_sweep: bool,
    pub sweep_hit: Option<SweepHit>,
}

impl OverlapEvent {
    /// A discrete (non-sweep) overlap.
    #[must_use]
    pub fn new(teleporter: Entity, other: Entity) -> Self {
        Self {
            teleporter,
            other,
            body_index: 0,
            from_sweep: false,
            sweep_hit: None,
        }
    }

    /// Mark the overlap as produced by a sweep.
    #[must_use]
    pub fn swept(mut self, hit: Option<SweepHit>) -> Self {
        self.from_sweep = true;
        self.sweep_hit = hit;
        self
    }
}

/// What a completed teleport did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportReport {
    pub traveler: Entity,
    pub teleporter: Entity,
    pub destination: Entity,
    /// Traveler position before the jump.
    pub from: Vec3,
    /// Traveler position after the jump.
    pub to: Vec3,
    pub transform: TeleportTransform,
    /// `true` when the new rotation went to the traveler's controller rather
    /// than its own transform.
    pub rotated_controller: bool,
}

/// How an overlap event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Sweep overlaps are ignored so a body mid-teleport does not fire twice.
    IgnoredSweep,
    /// The filter refused the body.
    Rejected,
    Teleported(TeleportReport),
    Failed(TeleportError),
}

impl TriggerOutcome {
    /// Returns `true` if the body was moved.
    #[must_use]
    pub fn is_teleported(&self) -> bool {
        matches!(self, Self::Teleported(_))
    }
}

/// Reacts to teleporter overlaps.
#[derive(Debug, Default, Clone)]
pub struct TeleporterSystem<F = CharactersOnly> {
    filter: F,
}

impl TeleporterSystem<CharactersOnly> {
    /// A system that only teleports characters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: CharactersOnly,
        }
    }
}

impl<F: TeleportFilter> TeleporterSystem<F> {
    /// A system that admits whatever `filter` permits.
    #[must_use]
    pub fn with_filter(filter: F) -> Self {
        Self { filter }
    }

    /// Handle one overlap-begin event.
    pub fn on_overlap_begin<E>(
        &self,
        world: &mut World,
        effects: &mut E,
        event: &OverlapEvent,
    ) -> TriggerOutcome
    where
        E: TeleportEffects + ?Sized,
    {
        if event.from_sweep {
            debug!(
                teleporter = %event.teleporter,
                other = %event.other,
                body_index = event.body_index,
                hit = ?event.sweep_hit,
                "ignoring sweep overlap"
            );
            return TriggerOutcome::IgnoredSweep;
        }

        if !self.filter.is_permitted(world, event.other) {
            return TriggerOutcome::Rejected;
        }

        debug!(teleporter = %display_name(world, event.teleporter), "teleporter triggered");

        match self.perform_teleport(world, effects, event.teleporter, event.other) {
            Ok(report) => {
                info!(
                    traveler = %display_name(world, report.traveler),
                    destination = %display_name(world, report.destination),
                    yaw = report.transform.rotation.yaw,
                    "teleported"
                );
                TriggerOutcome::Teleported(report)
            }
            Err(err) => {
                warn!(error = %err, "teleport failed");
                TriggerOutcome::Failed(err)
            }
        }
    }

    /// Handle a batch of overlap events in delivery order.
    pub fn handle_overlaps<'a, E, I>(
        &self,
        world: &mut World,
        effects: &mut E,
        events: I,
    ) -> Vec<TriggerOutcome>
    where
        E: TeleportEffects + ?Sized,
        I: IntoIterator<Item = &'a OverlapEvent>,
    {
        events
            .into_iter()
            .map(|event| self.on_overlap_begin(world, effects, event))
            .collect()
    }

    /// Move `traveler` through `teleporter`.
    ///
    /// Every lookup happens before the first write, so on error neither the
    /// world nor the effect sink has been touched.
    pub fn perform_teleport<E>(
        &self,
        world: &mut World,
        effects: &mut E,
        teleporter: Entity,
        traveler: Entity,
    ) -> Result<TeleportReport, TeleportError>
    where
        E: TeleportEffects + ?Sized,
    {
        let config = world
            .get::<Teleporter>(teleporter)
            .ok_or(TeleportError::NotATeleporter(teleporter))?;
        let destination = config
            .destination
            .ok_or(TeleportError::DestinationUnset { teleporter })?;
        let policy = config.policy();

        let source = transform_of(world, teleporter)?;
        let target = transform_of(world, destination)?;
        let before = transform_of(world, traveler)?;
        let controller = world.get::<Controller>(traveler).copied();

        let input = TeleportInput {
            teleporter_rotation: source.rotation,
            destination_rotation: target.rotation,
            traveler_rotation: controller.map_or(before.rotation, |c| c.control_rotation),
            traveler_velocity: world
                .get::<Velocity>(traveler)
                .map_or(Vec3::ZERO, |v| v.linear),
        };
        let transform = compute_teleport(&input, policy);

        play_teleport_effects(config, source.position, target.position, effects);

        if let Some(body) = world.get_mut::<Transform3D>(traveler) {
            body.position = target.position;
            if controller.is_none() {
                body.rotation = transform.rotation;
            }
        }
        if let Some(controller) = world.get_mut::<Controller>(traveler) {
            controller.control_rotation = transform.rotation;
        }
        if let Some(velocity) = world.get_mut::<Velocity>(traveler) {
            velocity.linear = transform.velocity;
        }

        debug!(
            %traveler,
            from = %before.position,
            to = %target.position,
            rotation = %transform.rotation,
            velocity = %transform.velocity,
            "teleport applied"
        );

        Ok(TeleportReport {
            traveler,
            teleporter,
            destination,
            from: before.position,
            to: target.position,
            transform,
            rotated_controller: controller.is_some(),
        })
    }
}

fn transform_of(world: &World, entity: Entity) -> Result<Transform3D, TeleportError> {
    world
        .get::<Transform3D>(entity)
        .copied()
        .ok_or(TeleportError::MissingTransform(entity))
}

/// Exit cues at the source, entry cues at the destination.
fn play_teleport_effects<E>(config: &Teleporter, source: Vec3, destination: Vec3, effects: &mut E)
where
    E: TeleportEffects + ?Sized,
{
    if let Some(cue) = &config.teleport_out_sound {
        effects.play_sound_at(cue, source);
    }
    if let Some(cue) = &config.teleport_in_sound {
        effects.play_sound_at(cue, destination);
    }
    if let Some(cue) = &config.visual_effect {
        effects.play_visual_at(cue, source);
        effects.play_visual_at(cue, destination);
    }
}

fn display_name(world: &World, entity: Entity) -> String {
    world
        .get::<Name>(entity)
        .map_or_else(|| entity.to_string(), |name| name.value.clone())
}
