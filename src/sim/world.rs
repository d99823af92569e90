//! Entity advancement for one Playing tick
//!
//! Moves the ship, fires volleys, spawns and steers enemies, flies bullets
//! and particles. Entities that leave the viewport are marked dead here and
//! compacted together with collision casualties at the end of the tick.

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyKind, GameState};
use super::tick::TickInput;
use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// Advance every entity by one tick
pub fn advance(state: &mut GameState, input: &TickInput) {
    let Some(profile) = state.profile else {
        return;
    };

    move_player(state, input);
    state.player.invulnerable_ticks = state.player.invulnerable_ticks.saturating_sub(1);
    auto_fire(state, &profile);
    roll_spawn(state);
    advance_enemies(state);
    advance_bullets(state);
    advance_particles(state);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= PLAYER_SPEED;
    }
    if input.right {
        delta.x += PLAYER_SPEED;
    }
    if state.variant.vertical_movement {
        if input.up {
            delta.y -= PLAYER_SPEED;
        }
        if input.down {
            delta.y += PLAYER_SPEED;
        }
    }

    state.player.pos += delta;
    state.player.clamp_to(state.viewport);
}

/// Count down the volley timer and fire from the ship's nose when it expires
fn auto_fire(state: &mut GameState, profile: &DifficultyProfile) {
    state.player.auto_shoot_cooldown -= 1;
    if state.player.auto_shoot_cooldown > 0 {
        return;
    }

    let nose = state.player.pos - Vec2::new(0.0, MUZZLE_OFFSET);
    if state.variant.dual_shot {
        state.spawn_player_bullet(nose - Vec2::new(DUAL_SHOT_OFFSET, 0.0));
        state.spawn_player_bullet(nose + Vec2::new(DUAL_SHOT_OFFSET, 0.0));
    } else {
        state.spawn_player_bullet(nose);
    }
    state.player.auto_shoot_cooldown = profile.player_shot_interval as i32;
}

fn roll_spawn(state: &mut GameState) {
    if state.rng.random::<f32>() >= state.spawn_probability {
        return;
    }
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
    spawn_random_enemy(state, kind);
}

/// Spawn `kind` just above the viewport at a random column and dock line
pub fn spawn_random_enemy(state: &mut GameState, kind: EnemyKind) -> u32 {
    let size = kind.size();
    let viewport = state.viewport;

    let lo = size.x / 2.0;
    let hi = viewport.width - size.x / 2.0;
    let x = if hi > lo {
        state.rng.random_range(lo..hi)
    } else {
        viewport.width / 2.0
    };

    let dock_limit = viewport.height * ENEMY_DOCK_FRACTION;
    let target_y = if dock_limit > 0.0 {
        state.rng.random_range(0.0..dock_limit)
    } else {
        0.0
    };

    let id = state.spawn_enemy(kind, Vec2::new(x, -size.y), target_y);
    log::trace!("Spawned enemy {} ({:?}) at x={:.0}, docking at {:.0}", id, kind, x, target_y);
    id
}

fn advance_enemies(state: &mut GameState) {
    let bottom = state.viewport.height;
    let mut shots: Vec<(Vec2, u32)> = Vec::new();

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        // Descend until the dock line, then hold
        if enemy.pos.y < enemy.target_y {
            enemy.pos.y += enemy.speed;
        }

        if state.rng.random::<f32>() < enemy.shoot_probability {
            shots.push((
                enemy.pos + Vec2::new(0.0, enemy.size.y / 2.0),
                enemy.kind.color(),
            ));
        }

        if enemy.pos.y > bottom {
            enemy.alive = false;
        }
    }

    for (pos, color) in shots {
        state.spawn_enemy_bullet(pos, color);
    }
}

fn advance_bullets(state: &mut GameState) {
    let bottom = state.viewport.height;
    for bullet in state
        .player_bullets
        .iter_mut()
        .chain(state.enemy_bullets.iter_mut())
        .filter(|b| b.alive)
    {
        bullet.pos.y += bullet.vel_y;
        // Strict: a bullet sitting exactly on an edge is still on screen
        if bullet.pos.y < 0.0 || bullet.pos.y > bottom {
            bullet.alive = false;
        }
    }
}

fn advance_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(|p| p.life > 0.0);
}
