//! Collision detection and response
//!
//! Axis-aligned boxes only. Pairs are resolved in a fixed order each tick:
//! player bullets against enemies, enemy bullets against the player, then
//! enemies ramming the player. Hits only mark entities dead; the caller
//! compacts the collections once the whole pass is done, so nothing removed
//! earlier in the tick can be matched again.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::highscores::HighScoreStore;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink both dimensions by `factor` (0.2 = 20% smaller), keeping the centre
    pub fn shrunk(&self, factor: f32) -> Self {
        if factor <= 0.0 {
            return *self;
        }
        let scale = (1.0 - factor).max(0.0);
        Self::from_center(self.center(), self.size() * scale)
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Overlap test with the variant's hitbox shrink applied to both boxes
pub fn hit(a: Aabb, b: Aabb, shrink: f32) -> bool {
    a.shrunk(shrink).overlaps(&b.shrunk(shrink))
}

/// Resolve every collision for this tick
pub fn resolve(state: &mut GameState, store: &mut dyn HighScoreStore) {
    player_bullets_vs_enemies(state, store);
    enemy_bullets_vs_player(state);
    enemies_vs_player(state);
}

fn player_bullets_vs_enemies(state: &mut GameState, store: &mut dyn HighScoreStore) {
    let shrink = state.variant.hitbox_shrink;

    for bi in 0..state.player_bullets.len() {
        if !state.player_bullets[bi].alive {
            continue;
        }
        let bullet_box = state.player_bullets[bi].bounds();
        let damage = state.player_bullets[bi].damage;

        let Some(ei) = state
            .enemies
            .iter()
            .position(|e| e.alive && hit(bullet_box, e.bounds(), shrink))
        else {
            continue;
        };

        state.player_bullets[bi].alive = false;
        let enemy = &mut state.enemies[ei];
        enemy.health = enemy.health.saturating_sub(damage);
        let id = enemy.id;

        if enemy.health > 0 {
            state.events.push(GameEvent::EnemyDamaged { id });
            continue;
        }

        enemy.alive = false;
        let (kind, pos) = (enemy.kind, enemy.pos);
        state.spawn_particles(pos, kind.color(), KILL_PARTICLES);
        state.score += KILL_REWARD;
        state.events.push(GameEvent::EnemyDestroyed { id, kind, pos });
        log::debug!("Enemy {} ({:?}) destroyed, score {}", id, kind, state.score);

        report_score(state, store);
    }
}

/// Tell the store about a new best score for the current difficulty
fn report_score(state: &mut GameState, store: &mut dyn HighScoreStore) {
    let Some(difficulty) = state.difficulty else {
        return;
    };
    if state.score > store.high_score(difficulty) {
        store.set_high_score(difficulty, state.score);
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
    }
}

fn enemy_bullets_vs_player(state: &mut GameState) {
    let shrink = state.variant.hitbox_shrink;

    for bi in 0..state.enemy_bullets.len() {
        if state.player.lives == 0 {
            break;
        }
        let bullet = &state.enemy_bullets[bi];
        if !bullet.alive || !hit(bullet.bounds(), state.player.bounds(), shrink) {
            continue;
        }
        let damage = bullet.damage;
        state.enemy_bullets[bi].alive = false;
        damage_player(state, damage);
    }
}

fn enemies_vs_player(state: &mut GameState) {
    let shrink = state.variant.hitbox_shrink;
    let ram_damage = state.profile.map(|p| p.bullet_damage * 2).unwrap_or(0);

    for ei in 0..state.enemies.len() {
        if state.player.lives == 0 {
            break;
        }
        let enemy = &state.enemies[ei];
        if !enemy.alive || !hit(enemy.bounds(), state.player.bounds(), shrink) {
            continue;
        }
        if state.player.is_invulnerable() {
            continue;
        }

        let (id, kind, pos) = (enemy.id, enemy.kind, enemy.pos);
        state.enemies[ei].alive = false;
        // The rammer explodes even when it takes the last life; the death
        // burst from `tick` comes on top of these
        state.spawn_particles(pos, kind.color(), KILL_PARTICLES);
        state.events.push(GameEvent::EnemyRammed { id });
        damage_player(state, ram_damage);
    }
}

/// Shield absorbs damage; an empty shield costs a life instead
fn damage_player(state: &mut GameState, damage: u32) {
    let player = &mut state.player;
    if player.is_invulnerable() {
        return;
    }

    if player.shield > 0 {
        player.shield = player.shield.saturating_sub(damage);
        state.events.push(GameEvent::ShieldHit { damage });
        return;
    }

    player.lives = player.lives.saturating_sub(1);
    let lives_left = player.lives;
    if lives_left > 0 {
        player.shield = state.profile.map(|p| p.player_max_shield).unwrap_or(0);
        player.invulnerable_ticks = INVULNERABILITY_TICKS;
    }
    state.events.push(GameEvent::LifeLost { lives_left });
    log::info!("Life lost, {} remaining", lives_left);
}
