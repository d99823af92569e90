//! Read-only view of a session for the renderer

use serde::Serialize;

use super::state::{Bullet, Enemy, GamePhase, GameState, Particle, Player, Viewport};
use crate::difficulty::Difficulty;

/// Everything a frame needs to draw, borrowed from the session
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub selection: Option<Difficulty>,
    pub difficulty: Option<Difficulty>,
    pub viewport: Viewport,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub particles: &'a [Particle],
    pub score: u64,
    pub high_score: u64,
    pub shield: u32,
    pub max_shield: u32,
    pub lives: u8,
    pub level: u32,
}

impl RenderSnapshot<'_> {
    /// Shield bar fill (0.0 - 1.0)
    pub fn shield_fraction(&self) -> f32 {
        if self.max_shield == 0 {
            return 0.0;
        }
        (self.shield as f32 / self.max_shield as f32).clamp(0.0, 1.0)
    }

    /// Whether the ship should be drawn at all
    pub fn player_visible(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            phase: self.phase,
            selection: self.selection,
            difficulty: self.difficulty,
            viewport: self.viewport,
            player: &self.player,
            enemies: &self.enemies,
            player_bullets: &self.player_bullets,
            enemy_bullets: &self.enemy_bullets,
            particles: &self.particles,
            score: self.score,
            high_score: self.high_score,
            shield: self.player.shield,
            max_shield: self.max_shield(),
            lives: self.player.lives,
            level: self.level,
        }
    }
}
