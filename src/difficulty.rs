//! Difficulty tiers and their tuning profiles
//!
//! A profile is resolved once when a difficulty is confirmed and stays fixed
//! for the rest of the run.

use serde::{Deserialize, Serialize};

/// Selectable difficulty tier, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// All tiers in the order the menu lists them
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Menu blurb shown under the selection
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Perfect for beginners. Slower enemies, more shields.",
            Difficulty::Normal => "The classic experience. Balanced challenge.",
            Difficulty::Hard => "For veteran pilots. Fast enemies, deadly shots.",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Next tier in menu order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tier in menu order, wrapping around
    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                enemy_spawn_probability: 0.003,
                enemy_shoot_probability: 0.01,
                player_shot_interval: 30,
                enemy_speed_scale: 0.8,
                player_max_shield: 150,
                enemy_bullet_speed: 3.0,
                bullet_damage: 15,
            },
            Difficulty::Normal => DifficultyProfile {
                enemy_spawn_probability: 0.005,
                enemy_shoot_probability: 0.02,
                player_shot_interval: 40,
                enemy_speed_scale: 1.0,
                player_max_shield: 100,
                enemy_bullet_speed: 5.0,
                bullet_damage: 25,
            },
            Difficulty::Hard => DifficultyProfile {
                enemy_spawn_probability: 0.007,
                enemy_shoot_probability: 0.03,
                player_shot_interval: 50,
                enemy_speed_scale: 1.2,
                player_max_shield: 75,
                enemy_bullet_speed: 7.0,
                bullet_damage: 35,
            },
        }
    }
}

/// Shoot probability of the Normal tier; other tiers scale enemy fire relative to it
pub const BASE_SHOOT_PROBABILITY: f32 = 0.02;

/// Resolved tunables for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Per-tick chance of spawning an enemy
    pub enemy_spawn_probability: f32,
    /// Per-tick, per-enemy chance of firing (relative to enemy kind)
    pub enemy_shoot_probability: f32,
    /// Ticks between automatic player volleys
    pub player_shot_interval: u32,
    /// Multiplier on each enemy kind's descent speed
    pub enemy_speed_scale: f32,
    /// Shield granted on spawn and after each lost life
    pub player_max_shield: u32,
    /// Enemy bullet descent in pixels per tick
    pub enemy_bullet_speed: f32,
    /// Shield damage per enemy bullet
    pub bullet_damage: u32,
}

impl DifficultyProfile {
    /// Scale factor applied to an enemy kind's base shoot rate
    pub fn shoot_scale(&self) -> f32 {
        self.enemy_shoot_probability / BASE_SHOOT_PROBABILITY
    }
}
