//! Audio collaborator
//!
//! The simulation announces phase transitions; the front end decides what to
//! play. [`MusicDirector`] tracks which music track should be running so a
//! web or native player only has to mirror `current_track()`.

use crate::sim::GamePhase;

/// Music tracks the game switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Title and difficulty menus
    Menu,
    /// In-game loop
    Game,
}

/// Receives phase transitions from the simulation
///
/// Called synchronously from `tick`; implementations must not block.
pub trait AudioSink {
    fn phase_changed(&mut self, from: GamePhase, to: GamePhase);
}

/// Sink that ignores all cues
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn phase_changed(&mut self, _from: GamePhase, _to: GamePhase) {}
}

/// Picks the music track for the current phase
#[derive(Debug, Clone)]
pub struct MusicDirector {
    track: MusicTrack,
    volume: f32,
    muted: bool,
    /// Set on every track change; cleared by `take_restart` once the player rewinds
    restart_pending: bool,
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new(0.7, false)
    }
}

impl MusicDirector {
    pub fn new(volume: f32, muted: bool) -> Self {
        let mut director = Self {
            track: MusicTrack::Menu,
            volume: 0.0,
            muted,
            restart_pending: true,
        };
        director.set_volume(volume);
        director
    }

    pub fn current_track(&self) -> MusicTrack {
        self.track
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Returns true once per track change
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_pending)
    }

    fn switch_to(&mut self, track: MusicTrack) {
        if self.track != track {
            log::debug!("Music: {:?} -> {:?}", self.track, track);
            self.track = track;
            self.restart_pending = true;
        }
    }
}

impl AudioSink for MusicDirector {
    fn phase_changed(&mut self, _from: GamePhase, to: GamePhase) {
        match to {
            GamePhase::Menu => self.switch_to(MusicTrack::Menu),
            GamePhase::Playing => self.switch_to(MusicTrack::Game),
            // Game music keeps running under the game over overlay
            GamePhase::GameOver => {}
        }
    }
}
