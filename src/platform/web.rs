//! JavaScript bindings
//!
//! The page owns the canvas, audio elements and `requestAnimationFrame`; it
//! forwards key events here, calls `tick` once per frame and draws from the
//! JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::audio::{MusicDirector, MusicTrack};
use crate::difficulty::Difficulty;
use crate::highscores::HighScores;
use crate::platform::input::{InputState, Key};
use crate::settings::Settings;
use crate::sim::{GameState, Hooks, Viewport, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pixel Void starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: InputState,
    scores: HighScores,
    music: MusicDirector,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        WebGame {
            state: GameState::new(seed, Viewport::new(width, height), settings.variant()),
            input: InputState::new(),
            scores: HighScores::load(),
            music: MusicDirector::new(settings.music_volume, settings.muted),
            settings,
        }
    }

    /// Returns true when the key is one the game uses (caller should preventDefault)
    pub fn key_down(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(k) => {
                self.input.key_down(k);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(k) = Key::from_dom(key) {
            self.input.key_up(k);
        }
    }

    /// Difficulty button clicked
    pub fn pick_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(d) => {
                self.input.pick(d);
                true
            }
            None => {
                log::warn!("Unknown difficulty '{}'", name);
                false
            }
        }
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.set_autopilot(on);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    pub fn tick(&mut self) {
        let input = self.input.take_tick_input();
        let mut hooks = Hooks {
            store: &mut self.scores,
            audio: &mut self.music,
        };
        tick(&mut self.state, &input, &mut hooks);
    }

    /// Current frame as JSON for the canvas renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::warn!("Snapshot encoding failed: {}", e);
            String::new()
        })
    }

    /// Events raised by the last tick as JSON
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.state.events).unwrap_or_default()
    }

    /// "menu" or "game"
    pub fn music_track(&self) -> String {
        match self.music.current_track() {
            MusicTrack::Menu => "menu".to_string(),
            MusicTrack::Game => "game".to_string(),
        }
    }

    /// True once after each track change; the page rewinds the element
    pub fn music_restart(&mut self) -> bool {
        self.music.take_restart()
    }

    pub fn music_volume(&self) -> f32 {
        self.music.effective_volume()
    }

    /// Volume slider moved; persists the preference
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music.set_volume(volume);
        self.settings.music_volume = volume.clamp(0.0, 1.0);
        self.settings.save();
    }

    /// Whether the renderer should draw particles
    pub fn particles_enabled(&self) -> bool {
        self.settings.particles
    }

    /// Menu blurb for a difficulty button
    pub fn difficulty_description(&self, name: &str) -> String {
        Difficulty::from_str(name)
            .map(|d| d.description().to_string())
            .unwrap_or_default()
    }

    /// Flip mute and persist the preference
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.music.toggle_mute();
        self.settings.muted = muted;
        self.settings.save();
        muted
    }

    pub fn high_score(&self, name: &str) -> f64 {
        use crate::highscores::HighScoreStore;
        Difficulty::from_str(name)
            .map(|d| self.scores.high_score(d) as f64)
            .unwrap_or(0.0)
    }
}
