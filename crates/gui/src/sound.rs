//! Sound effect boundary. Playback itself lives outside this crate; every
//! call is fire-and-forget.

use shared::SceneId;

/// Short click played by discrete controls
pub const BUTTON_CLICK: &str = "buttonClick";
/// Looping background of the garage scene
pub const GARAGE_AMBIENT: &str = "ambient";

/// Asset and mix settings of a named sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub name: &'static str,
    pub file: &'static str,
    pub volume: f32,
    pub looped: bool,
}

pub const CUES: [SoundCue; 2] = [
    SoundCue {
        name: BUTTON_CLICK,
        file: "sounds/click.mp3",
        volume: 0.5,
        looped: false,
    },
    SoundCue {
        name: GARAGE_AMBIENT,
        file: "sounds/garage-ambient.mp3",
        volume: 0.3,
        looped: true,
    },
];

pub fn cue(name: &str) -> Option<&'static SoundCue> {
    CUES.iter().find(|c| c.name == name)
}

pub trait SoundEffects {
    fn play_effect(&mut self, name: &str);
    fn set_ambient_loop(&mut self, name: &str, playing: bool);
}

/// Whether the garage ambience should be playing
pub fn ambient_wanted(scene: SceneId, audio_enabled: bool) -> bool {
    audio_enabled && scene == SceneId::Garage
}

/// Reports playback requests through `tracing` instead of an audio device
#[derive(Default)]
pub struct TracingSound {
    ambient_playing: bool,
}

impl SoundEffects for TracingSound {
    fn play_effect(&mut self, name: &str) {
        match cue(name) {
            Some(cue) => tracing::trace!("Play {} ({}, volume {})", cue.name, cue.file, cue.volume),
            None => tracing::debug!("Unknown sound effect '{name}'"),
        }
    }

    fn set_ambient_loop(&mut self, name: &str, playing: bool) {
        if self.ambient_playing != playing {
            self.ambient_playing = playing;
            tracing::debug!("Ambient loop '{name}' {}", if playing { "started" } else { "stopped" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_resolve() {
        assert_eq!(cue(BUTTON_CLICK).unwrap().volume, 0.5);
        assert!(cue(GARAGE_AMBIENT).unwrap().looped);
        assert!(cue("horn").is_none());
    }

    #[test]
    fn test_ambient_only_in_garage() {
        assert!(ambient_wanted(SceneId::Garage, true));
        assert!(!ambient_wanted(SceneId::Garage, false));
        assert!(!ambient_wanted(SceneId::Racetrack, true));
    }
}
