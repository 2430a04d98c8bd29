//! Audio and visual feedback for teleports.
//!
//! Playback is owned by the host; the teleporter only says what to play and
//! where.

use engine_math::Vec3;

use crate::teleporter::{SoundCue, VisualCue};

/// Sink for teleport effect cues.
pub trait TeleportEffects {
    /// Play a one-shot sound at a world location.
    fn play_sound_at(&mut self, cue: &SoundCue, location: Vec3);

    /// Spawn a one-shot visual effect at a world location.
    fn play_visual_at(&mut self, cue: &VisualCue, location: Vec3);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl TeleportEffects for NoEffects {
    fn play_sound_at(&mut self, _cue: &SoundCue, _location: Vec3) {}

    fn play_visual_at(&mut self, _cue: &VisualCue, _location: Vec3) {}
}

/// A cue emitted through [`TeleportEffects`].
#[derive(Debug, Clone, PartialEq)]
pub enum EffectEvent {
    Sound { cue: SoundCue, location: Vec3 },
    Visual { cue: VisualCue, location: Vec3 },
}

/// Keeps every cue in emission order. Used by the simulator to report what
/// would have played.
#[derive(Debug, Default, Clone)]
pub struct EffectRecorder {
    pub events: Vec<EffectEvent>,
}

impl EffectRecorder {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TeleportEffects for EffectRecorder {
    fn play_sound_at(&mut self, cue: &SoundCue, location: Vec3) {
        self.events.push(EffectEvent::Sound {
            cue: cue.clone(),
            location,
        });
    }

    fn play_visual_at(&mut self, cue: &VisualCue, location: Vec3) {
        self.events.push(EffectEvent::Visual {
            cue: cue.clone(),
            location,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order_and_drains() {
        let mut recorder = EffectRecorder::new();
        recorder.play_sound_at(&SoundCue::new("out"), Vec3::X);
        recorder.play_visual_at(&VisualCue::new("burst"), Vec3::Y);

        let events = recorder.drain();
        assert_eq!(
            events,
            vec![
                EffectEvent::Sound {
                    cue: SoundCue::new("out"),
                    location: Vec3::X,
                },
                EffectEvent::Visual {
                    cue: VisualCue::new("burst"),
                    location: Vec3::Y,
                },
            ]
        );
        assert!(recorder.events.is_empty());
    }
}
