//! Pixel Void - A retro vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state machine)
//! - `difficulty`: Difficulty tiers and their tuning profiles
//! - `platform`: Browser/native platform abstraction (input, storage, web bindings)
//! - `highscores`: Per-difficulty high score persistence
//! - `audio`: Music cues driven by phase transitions

pub mod audio;
pub mod difficulty;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use highscores::{HighScoreStore, HighScores, NoStore};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in pixels, times in ticks (one tick per display frame).
pub mod consts {
    /// Default viewport when the renderer has not reported a size yet
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Distance from the bottom edge to the lowest allowed ship position
    pub const PLAYER_BOTTOM_MARGIN: f32 = 100.0;
    /// Fraction of the viewport height above which the ship may not climb
    pub const PLAYER_MIN_Y_FRACTION: f32 = 0.5;
    pub const STARTING_LIVES: u8 = 3;
    /// Grace period after losing a life, no damage accepted
    pub const INVULNERABILITY_TICKS: u32 = 90;

    /// Player bullets
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 15.0;
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const PLAYER_BULLET_DAMAGE: u32 = 1;
    /// Bullets leave the ship this far above its centre
    pub const MUZZLE_OFFSET: f32 = 20.0;
    /// Horizontal offset of each bullet in a dual-shot volley
    pub const DUAL_SHOT_OFFSET: f32 = 15.0;

    /// Enemy bullets
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 12.0;

    /// Enemies dock somewhere in the top third of the viewport
    pub const ENEMY_DOCK_FRACTION: f32 = 1.0 / 3.0;

    /// Scoring and progression
    pub const KILL_REWARD: u64 = 100;
    pub const LEVEL_SCORE_STEP: u64 = 1000;
    pub const SPAWN_PROBABILITY_STEP: f32 = 0.005;
    pub const MAX_SPAWN_PROBABILITY: f32 = 0.5;

    /// Particles
    pub const KILL_PARTICLES: usize = 10;
    pub const DEATH_PARTICLES: usize = 20;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;

    /// Player ship colour (0xRRGGBB)
    pub const PLAYER_COLOR: u32 = 0xff2d55;
}

/// Displacement for one tick at `speed` along `angle` (radians, y down)
#[inline]
pub fn polar_step(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}
