//! # teleporter
//!
//! A teleporter relocates an overlapping body to a linked destination,
//! reorients it, and optionally carries its momentum across.
//!
//! The crate is split into a pure part and a side-effecting part:
//!
//! - [`calculator`]: computes the exit orientation and velocity from the
//!   source/destination/traveler state. No world access.
//! - [`system`]: [`TeleporterSystem`] reacts to overlap events, applies an
//!   injected [`TeleportFilter`], and writes the results into the [`World`].
//!
//! Host collaborators are injected: the entity store is an
//! [`engine_component::World`], sound and particle playback go through
//! [`TeleportEffects`], and logging goes through `tracing`.
//!
//! [`World`]: engine_component::World

pub mod calculator;
pub mod components;
pub mod effects;
pub mod error;
pub mod filter;
pub mod level;
pub mod system;
pub mod teleporter;

pub use calculator::{TeleportInput, TeleportTransform, compute_teleport};
pub use components::{BodyKind, Capabilities, Capability, Controller, Name, Team, Velocity};
pub use effects::{EffectEvent, EffectRecorder, NoEffects, TeleportEffects};
pub use error::TeleportError;
pub use filter::{CharactersOnly, RequireCapability, TeamOnly, TeleportFilter};
pub use level::{Level, LevelError, LevelHandles};
pub use system::{OverlapEvent, SweepHit, TeleportReport, TeleporterSystem, TriggerOutcome};
pub use teleporter::{ExitRotation, SoundCue, TeleportPolicy, Teleporter, VisualCue};
