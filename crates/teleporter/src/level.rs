//! Level files: named entities, teleporter links, and scripted overlaps.
//!
//! A level is a JSON document. Entities refer to each other by name, so a
//! teleporter's destination is written as the destination entity's name and
//! resolved to an [`Entity`] when the level is spawned.
//!
//! ```json
//! {
//!   "entities": [
//!     { "name": "pad", "transform": { "position": [0, 0, 0] },
//!       "teleporter": { "destination": "exit" } },
//!     { "name": "exit", "transform": { "position": [800, 0, 0], "rotation": { "yaw": 90 } } },
//!     { "name": "player", "body": "character", "controller": {}, "velocity": [300, 0, 0],
//!       "transform": { "position": [0, 0, 0] } }
//!   ],
//!   "overlaps": [ { "teleporter": "pad", "other": "player" } ]
//! }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use engine_component::{Entity, World, WorldError};
use engine_math::{Rotator, Transform3D, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::components::{BodyKind, Capabilities, Capability, Controller, Name, Team, Velocity};
use crate::system::OverlapEvent;
use crate::teleporter::{ExitRotation, SoundCue, Teleporter, VisualCue};

/// Errors raised while loading or spawning a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entity name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("`{referenced_by}` refers to unknown entity `{name}`")]
    UnknownEntity { referenced_by: String, name: String },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Teleporter settings as authored, with the destination given by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TeleporterSpec {
    pub destination: Option<String>,
    pub exit_rotation: ExitRotation,
    pub keep_momentum: bool,
    pub teleport_out_sound: Option<SoundCue>,
    pub teleport_in_sound: Option<SoundCue>,
    pub visual_effect: Option<VisualCue>,
    pub radius: f32,
    pub half_height: f32,
}

impl Default for TeleporterSpec {
    fn default() -> Self {
        let defaults = Teleporter::default();
        Self {
            destination: None,
            exit_rotation: defaults.exit_rotation,
            keep_momentum: defaults.keep_momentum,
            teleport_out_sound: None,
            teleport_in_sound: None,
            visual_effect: None,
            radius: defaults.radius,
            half_height: defaults.half_height,
        }
    }
}

impl TeleporterSpec {
    fn build(&self, destination: Option<Entity>) -> Teleporter {
        Teleporter {
            destination,
            exit_rotation: self.exit_rotation,
            keep_momentum: self.keep_momentum,
            teleport_out_sound: self.teleport_out_sound.clone(),
            teleport_in_sound: self.teleport_in_sound.clone(),
            visual_effect: self.visual_effect.clone(),
            radius: self.radius,
            half_height: self.half_height,
        }
    }
}

/// One named entity in a level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default)]
    pub transform: Transform3D,
    #[serde(default)]
    pub body: Option<BodyKind>,
    /// Control rotation, present when the body is driven by a controller.
    #[serde(default)]
    pub controller: Option<Rotator>,
    #[serde(default)]
    pub velocity: Option<Vec3>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
    #[serde(default)]
    pub teleporter: Option<TeleporterSpec>,
}

/// A scripted overlap between two named entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlapSpec {
    pub teleporter: String,
    pub other: String,
    #[serde(default)]
    pub from_sweep: bool,
}

/// A parsed level file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Level {
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub overlaps: Vec<OverlapSpec>,
}

/// Name-to-entity mapping produced by [`Level::spawn`].
#[derive(Debug, Clone, Default)]
pub struct LevelHandles {
    by_name: HashMap<String, Entity>,
}

impl LevelHandles {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    fn resolve(&self, referenced_by: &str, name: &str) -> Result<Entity, LevelError> {
        self.get(name).ok_or_else(|| LevelError::UnknownEntity {
            referenced_by: referenced_by.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl Level {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_owned(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            entities = level.entities.len(),
            overlaps = level.overlaps.len(),
            "level loaded"
        );
        Ok(level)
    }

    /// Check names and references without touching a world.
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut seen = BTreeSet::new();
        for spec in &self.entities {
            if !seen.insert(spec.name.as_str()) {
                return Err(LevelError::DuplicateName(spec.name.clone()));
            }
        }

        let unknown = |referenced_by: &str, name: &str| LevelError::UnknownEntity {
            referenced_by: referenced_by.to_owned(),
            name: name.to_owned(),
        };
        for spec in &self.entities {
            if let Some(teleporter) = &spec.teleporter
                && let Some(destination) = &teleporter.destination
                && !seen.contains(destination.as_str())
            {
                return Err(unknown(&spec.name, destination));
            }
        }
        for overlap in &self.overlaps {
            for name in [&overlap.teleporter, &overlap.other] {
                if !seen.contains(name.as_str()) {
                    return Err(unknown("overlaps", name));
                }
            }
        }
        Ok(())
    }

    /// Spawn every entity into `world`.
    ///
    /// The level is validated first, so on error nothing has been spawned.
    pub fn spawn(&self, world: &mut World) -> Result<LevelHandles, LevelError> {
        self.validate()?;

        let mut handles = LevelHandles::default();
        for spec in &self.entities {
            handles.by_name.insert(spec.name.clone(), world.spawn());
        }

        for spec in &self.entities {
            let entity = handles.resolve("entities", &spec.name)?;
            world.insert(entity, Name::new(spec.name.clone()))?;
            world.insert(entity, spec.transform)?;
            if let Some(kind) = spec.body {
                world.insert(entity, kind)?;
            }
            if let Some(rotation) = spec.controller {
                world.insert(entity, Controller::new(rotation))?;
            }
            if let Some(linear) = spec.velocity {
                world.insert(entity, Velocity { linear })?;
            }
            if let Some(team) = &spec.team {
                world.insert(entity, Team::new(team.clone()))?;
            }
            if !spec.capabilities.is_empty() {
                world.insert(entity, Capabilities(spec.capabilities.clone()))?;
            }
            if let Some(teleporter) = &spec.teleporter {
                let destination = teleporter
                    .destination
                    .as_deref()
                    .map(|name| handles.resolve(&spec.name, name))
                    .transpose()?;
                world.insert(entity, teleporter.build(destination))?;
            }
            debug!(name = %spec.name, %entity, "spawned level entity");
        }

        Ok(handles)
    }

    /// The scripted overlaps as events against spawned entities.
    pub fn overlap_events(&self, handles: &LevelHandles) -> Result<Vec<OverlapEvent>, LevelError> {
        self.overlaps
            .iter()
            .map(|spec| {
                let mut event = OverlapEvent::new(
                    handles.resolve("overlaps", &spec.teleporter)?,
                    handles.resolve("overlaps", &spec.other)?,
                );
                event.from_sweep = spec.from_sweep;
                Ok(event)
            })
            .collect()
    }
}
