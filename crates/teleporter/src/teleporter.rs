//! The teleporter component and its authoring-time configuration.

use engine_component::{Component, Entity};
use serde::{Deserialize, Serialize};

/// How a body's facing and momentum are oriented when it leaves the
/// destination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExitRotation {
    /// Keep the body's heading relative to the teleporter: the offset between
    /// the body's facing and the source is re-applied at the destination.
    #[default]
    Relative,
    /// Face the destination's heading outright.
    Fixed,
}

/// Exit rotation and momentum settings, as consumed by
/// [`compute_teleport`](crate::compute_teleport).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeleportPolicy {
    pub exit_rotation: ExitRotation,
    /// `true` carries velocity across (rotated into the exit frame), `false`
    /// brings the body to rest.
    pub keep_momentum: bool,
}

impl Default for TeleportPolicy {
    fn default() -> Self {
        Self {
            exit_rotation: ExitRotation::Relative,
            keep_momentum: true,
        }
    }
}

/// Reference to a sound asset played through [`TeleportEffects`](crate::TeleportEffects).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SoundCue(pub String);

impl SoundCue {
    /// Reference a sound asset by path.
    #[must_use]
    pub fn new(asset: impl Into<String>) -> Self {
        Self(asset.into())
    }
}

/// Reference to a particle/visual effect asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VisualCue(pub String);

impl VisualCue {
    /// Reference a visual effect asset by path.
    #[must_use]
    pub fn new(asset: impl Into<String>) -> Self {
        Self(asset.into())
    }
}

/// A teleporter trigger.
///
/// Everything here is set when the level is authored and only read at
/// runtime. A teleporter without a destination is inert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Teleporter {
    /// Where bodies are sent. `None` makes every teleport attempt fail.
    pub destination: Option<Entity>,
    pub exit_rotation: ExitRotation,
    pub keep_momentum: bool,
    /// Played at the teleporter when a body leaves.
    pub teleport_out_sound: Option<SoundCue>,
    /// Played at the destination when a body arrives.
    pub teleport_in_sound: Option<SoundCue>,
    /// Spawned at both ends of the jump.
    pub visual_effect: Option<VisualCue>,
    /// Trigger capsule radius.
    pub radius: f32,
    /// Trigger capsule half height.
    pub half_height: f32,
}

impl Teleporter {
    pub const DEFAULT_RADIUS: f32 = 45.0;
    pub const DEFAULT_HALF_HEIGHT: f32 = 90.0;

    /// A teleporter linked to `destination` with default settings.
    #[must_use]
    pub fn to(destination: Entity) -> Self {
        Self {
            destination: Some(destination),
            ..Self::default()
        }
    }

    /// Set how facing and momentum are oriented on exit.
    #[must_use]
    pub fn with_exit_rotation(mut self, exit_rotation: ExitRotation) -> Self {
        self.exit_rotation = exit_rotation;
        self
    }

    /// Set whether velocity is carried across or zeroed.
    #[must_use]
    pub fn with_keep_momentum(mut self, keep_momentum: bool) -> Self {
        self.keep_momentum = keep_momentum;
        self
    }

    /// Set the exit (`out`) and entry (`incoming`) sounds.
    #[must_use]
    pub fn with_sounds(mut self, out: Option<SoundCue>, incoming: Option<SoundCue>) -> Self {
        self.teleport_out_sound = out;
        self.teleport_in_sound = incoming;
        self
    }

    /// Set the visual effect spawned at both ends.
    #[must_use]
    pub fn with_visual_effect(mut self, cue: VisualCue) -> Self {
        self.visual_effect = Some(cue);
        self
    }

    /// The rotation and momentum settings as one value.
    #[must_use]
    pub fn policy(&self) -> TeleportPolicy {
        TeleportPolicy {
            exit_rotation: self.exit_rotation,
            keep_momentum: self.keep_momentum,
        }
    }
}

impl Default for Teleporter {
    fn default() -> Self {
        Self {
            destination: None,
            exit_rotation: ExitRotation::Relative,
            keep_momentum: true,
            teleport_out_sound: None,
            teleport_in_sound: None,
            visual_effect: None,
            radius: Self::DEFAULT_RADIUS,
            half_height: Self::DEFAULT_HALF_HEIGHT,
        }
    }
}

impl Component for Teleporter {
    fn type_name() -> &'static str {
        "Teleporter"
    }
}
