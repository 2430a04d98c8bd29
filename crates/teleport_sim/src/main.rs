//! # teleport_sim
//!
//! Replays the scripted overlaps of a level file through
//! [`TeleporterSystem`] and logs where every body ends up.
//!
//! ```text
//! RUST_LOG=teleporter=debug teleport_sim levels/arena.json --filter capability
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_component::World;
use engine_math::{Transform3D, Vec3};
use teleporter::{
    CharactersOnly, Controller, Level, Name, OverlapEvent, RequireCapability, SoundCue, Team,
    TeamOnly, TeleportEffects, TeleportFilter, TeleporterSystem, TriggerOutcome, Velocity,
    VisualCue,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterKind {
    /// Only character bodies may teleport.
    Characters,
    /// Any body advertising the `teleportable` capability may teleport.
    Capability,
}

#[derive(Parser)]
#[command(name = "teleport_sim", about = "Replay teleporter overlaps from a level file")]
struct Args {
    /// Path to the level JSON file.
    level: PathBuf,

    /// Which bodies the teleporters accept.
    #[arg(short, long, value_enum, default_value_t = FilterKind::Characters)]
    filter: FilterKind,

    /// Restrict teleporters to one team.
    #[arg(short, long)]
    team: Option<String>,
}

/// Effect sink that reports cues through the log instead of playing them.
struct LogEffects;

impl TeleportEffects for LogEffects {
    fn play_sound_at(&mut self, cue: &SoundCue, location: Vec3) {
        info!(cue = %cue.0, %location, "play sound");
    }

    fn play_visual_at(&mut self, cue: &VisualCue, location: Vec3) {
        info!(cue = %cue.0, %location, "spawn visual");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("teleport_sim=info".parse()?)
                .add_directive("teleporter=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let level = Level::load(&args.level)
        .with_context(|| format!("loading {}", args.level.display()))?;

    let mut world = World::new();
    let handles = level.spawn(&mut world)?;
    let events = level.overlap_events(&handles)?;

    let outcomes = match (args.filter, args.team) {
        (FilterKind::Characters, None) => replay(TeleporterSystem::new(), &mut world, &events),
        (FilterKind::Characters, Some(team)) => replay(
            TeleporterSystem::with_filter(TeamOnly::new(Team::new(team), CharactersOnly)),
            &mut world,
            &events,
        ),
        (FilterKind::Capability, None) => replay(
            TeleporterSystem::with_filter(RequireCapability::default()),
            &mut world,
            &events,
        ),
        (FilterKind::Capability, Some(team)) => replay(
            TeleporterSystem::with_filter(TeamOnly::new(
                Team::new(team),
                RequireCapability::default(),
            )),
            &mut world,
            &events,
        ),
    };

    let teleported = outcomes.iter().filter(|o| o.is_teleported()).count();
    info!(events = outcomes.len(), teleported, "replay finished");

    for (entity, name) in world.query::<Name>() {
        let Some(transform) = world.get::<Transform3D>(entity) else {
            continue;
        };
        let facing = world
            .get::<Controller>(entity)
            .map_or(transform.rotation, |c| c.control_rotation);
        let velocity = world.get::<Velocity>(entity).map_or(Vec3::ZERO, |v| v.linear);
        info!(
            name = %name.value,
            position = %transform.position,
            %facing,
            %velocity,
            "final state"
        );
    }

    Ok(())
}

fn replay<F: TeleportFilter>(
    system: TeleporterSystem<F>,
    world: &mut World,
    events: &[OverlapEvent],
) -> Vec<TriggerOutcome> {
    system.handle_overlaps(world, &mut LogEffects, events)
}

#[cfg(test)]
mod tests {
    use engine_math::Rotator;
    use teleporter::TeleportError;

    use super::*;

    const ARENA: &str = include_str!("../levels/arena.json");

    fn replay_arena<F: TeleportFilter>(
        system: TeleporterSystem<F>,
    ) -> (World, teleporter::LevelHandles, Vec<TriggerOutcome>) {
        let level = Level::from_json(ARENA).unwrap();
        let mut world = World::new();
        let handles = level.spawn(&mut world).unwrap();
        let events = level.overlap_events(&handles).unwrap();
        let outcomes = replay(system, &mut world, &events);
        (world, handles, outcomes)
    }

    #[test]
    fn test_arena_replay_with_character_filter() {
        let (world, handles, outcomes) = replay_arena(TeleporterSystem::new());
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0], TriggerOutcome::IgnoredSweep);
        assert!(outcomes[1].is_teleported());
        assert!(outcomes[2].is_teleported());
        assert_eq!(outcomes[3], TriggerOutcome::Rejected);
        assert!(matches!(
            outcomes[4],
            TriggerOutcome::Failed(TeleportError::DestinationUnset { .. })
        ));

        let player = handles.get("player").unwrap();
        let transform = world.get::<Transform3D>(player).unwrap();
        assert_eq!(transform.position, Vec3::new(0.0, -1200.0, 0.0));
        let controller = world.get::<Controller>(player).unwrap();
        assert!(controller.control_rotation.abs_diff_eq(Rotator::from_yaw(-90.0), 1e-3));
        let velocity = world.get::<Velocity>(player).unwrap();
        assert!(velocity.linear.abs_diff_eq(Vec3::new(0.0, -600.0, -20.0), 1e-2));

        let bot = handles.get("bot").unwrap();
        assert_eq!(
            world.get::<Transform3D>(bot).unwrap().position,
            Vec3::new(900.0, 0.0, 1500.0)
        );
        assert_eq!(world.get::<Velocity>(bot), Some(&Velocity::ZERO));
    }

    #[test]
    fn test_arena_replay_with_team_capability_filter() {
        let filter = TeamOnly::new(Team::new("red"), RequireCapability::default());
        let (world, handles, outcomes) = replay_arena(TeleporterSystem::with_filter(filter));

        // The blue bot and the team-less rocket are both turned away.
        assert!(outcomes[1].is_teleported());
        assert_eq!(outcomes[2], TriggerOutcome::Rejected);
        assert_eq!(outcomes[3], TriggerOutcome::Rejected);
        assert_eq!(outcomes[4], TriggerOutcome::Rejected);

        let rocket = handles.get("rocket").unwrap();
        assert_eq!(
            world.get::<Transform3D>(rocket).unwrap().position,
            Vec3::new(0.0, 1100.0, 80.0)
        );
    }
}
