//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order, entity IDs never reused)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::Aabb;
pub use snapshot::RenderSnapshot;
pub use state::{
    Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, Player, Variant, Viewport,
};
pub use tick::{Hooks, MenuNav, TickInput, tick};
