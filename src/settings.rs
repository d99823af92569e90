//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::Variant;

/// Largest hitbox shrink factor accepted from stored settings
pub const MAX_HITBOX_SHRINK: f32 = 0.9;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay variant ===
    /// Fire two bullets per volley instead of one
    pub dual_shot: bool,
    /// Allow the ship to move up and down within the lower half
    pub vertical_movement: bool,
    /// Fraction by which collision boxes shrink before overlap tests (0.0 - 0.9)
    pub hitbox_shrink: f32,

    // === Visual Effects ===
    /// Draw explosion particles (the simulation spawns them either way)
    pub particles: bool,

    // === Audio ===
    /// Music muted
    pub muted: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dual_shot: true,
            vertical_movement: true,
            hitbox_shrink: 0.0,

            particles: true,

            muted: false,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Clamp values that may have been hand-edited in storage
    pub fn sanitized(mut self) -> Self {
        self.hitbox_shrink = self.hitbox_shrink.clamp(0.0, MAX_HITBOX_SHRINK);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Simulation-level rules derived from these settings
    pub fn variant(&self) -> Variant {
        Variant {
            dual_shot: self.dual_shot,
            vertical_movement: self.vertical_movement,
            hitbox_shrink: self.hitbox_shrink.clamp(0.0, MAX_HITBOX_SHRINK),
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pixel_void_settings";

    /// Load settings, falling back to defaults when storage is empty or unreadable
    pub fn load() -> Self {
        match storage::read_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::write_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
