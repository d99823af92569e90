//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]: there is no module-level
//! mutable state, so a session is created, ticked and dropped like any value.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::polar_step;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty selection, simulation idle
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for confirm
    GameOver,
}

/// Drawable area supplied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Rules that differ between builds of the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Two bullets per volley at symmetric offsets
    pub dual_shot: bool,
    /// Ship may move vertically within the lower half
    pub vertical_movement: bool,
    /// Collision boxes shrink by this fraction before testing
    pub hitbox_shrink: f32,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            dual_shot: true,
            vertical_movement: true,
            hitbox_shrink: 0.0,
        }
    }
}

/// Enemy ship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Scout,
    Battleship,
    Stealth,
}

impl EnemyKind {
    /// Spawn catalog, sampled uniformly
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Scout, EnemyKind::Battleship, EnemyKind::Stealth];

    /// Collision box (width, height)
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Scout => Vec2::new(50.0, 50.0),
            EnemyKind::Battleship => Vec2::new(70.0, 70.0),
            EnemyKind::Stealth => Vec2::new(60.0, 60.0),
        }
    }

    /// Base descent speed before difficulty scaling
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Scout => 1.0,
            EnemyKind::Battleship => 0.8,
            EnemyKind::Stealth => 1.2,
        }
    }

    pub fn health(&self) -> u32 {
        match self {
            EnemyKind::Scout => 2,
            EnemyKind::Battleship => 3,
            EnemyKind::Stealth => 2,
        }
    }

    /// Per-tick shoot chance at Normal difficulty
    pub fn shoot_rate(&self) -> f32 {
        match self {
            EnemyKind::Scout => 0.02,
            EnemyKind::Battleship => 0.03,
            EnemyKind::Stealth => 0.02,
        }
    }

    /// Hull colour (0xRRGGBB), also used for explosion particles
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Scout => 0xb026ff,
            EnemyKind::Battleship => 0xff0066,
            EnemyKind::Stealth => 0x9400d3,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the ship
    pub pos: Vec2,
    pub size: Vec2,
    pub shield: u32,
    pub lives: u8,
    /// Ticks until the next automatic volley (fires at <= 0)
    pub auto_shoot_cooldown: i32,
    /// Remaining grace ticks after losing a life
    pub invulnerable_ticks: u32,
}

impl Player {
    /// Fresh ship at the bottom centre of the viewport
    pub fn spawn(viewport: Viewport, max_shield: u32) -> Self {
        let mut player = Self {
            pos: Vec2::new(
                viewport.width / 2.0,
                viewport.height - PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            shield: max_shield,
            lives: STARTING_LIVES,
            auto_shoot_cooldown: 0,
            invulnerable_ticks: 0,
        };
        player.clamp_to(viewport);
        player
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Allowed centre positions (min, max) inside the viewport
    pub fn movement_bounds(&self, viewport: Viewport) -> (Vec2, Vec2) {
        let min = Vec2::new(
            self.size.x / 2.0,
            viewport.height * PLAYER_MIN_Y_FRACTION,
        );
        let max = Vec2::new(
            viewport.width - self.size.x / 2.0,
            viewport.height - PLAYER_BOTTOM_MARGIN,
        );
        // Tiny viewports collapse the range instead of inverting it
        (min, max.max(min))
    }

    /// Pull the ship back inside the viewport
    pub fn clamp_to(&mut self, viewport: Viewport) {
        let (min, max) = self.movement_bounds(viewport);
        self.pos = self.pos.clamp(min, max);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Descent per tick while above `target_y`
    pub speed: f32,
    /// Dock line: the enemy stops descending once it reaches this y
    pub target_y: f32,
    pub health: u32,
    pub shoot_probability: f32,
    /// Cleared when removed; dead entities are compacted at the end of the tick
    pub alive: bool,
}

impl Enemy {
    pub fn is_docked(&self) -> bool {
        self.pos.y >= self.target_y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A bullet fired by the player or an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity per tick (negative = up)
    pub vel_y: f32,
    pub damage: u32,
    pub color: u32,
    pub alive: bool,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub speed: f32,
    /// Direction of travel (radians)
    pub angle: f32,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Things that happened during the last tick, for audio/visual feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    SelectionChanged(Difficulty),
    EnemyDamaged { id: u32 },
    EnemyDestroyed { id: u32, kind: EnemyKind, pos: Vec2 },
    EnemyRammed { id: u32 },
    ShieldHit { damage: u32 },
    LifeLost { lives_left: u8 },
    LevelUp { level: u32 },
    NewHighScore { score: u64 },
}

/// Complete game session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Highlighted menu entry
    pub selection: Option<Difficulty>,
    /// Difficulty of the current run
    pub difficulty: Option<Difficulty>,
    /// Active tunables, fixed for the run
    pub profile: Option<DifficultyProfile>,
    /// Current enemy spawn chance (profile value raised on each level up)
    pub spawn_probability: f32,
    pub viewport: Viewport,
    pub variant: Variant,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub level: u32,
    /// Best score for the current difficulty as last reported by the store
    pub high_score: u64,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session sitting in the menu
    pub fn new(seed: u64, viewport: Viewport, variant: Variant) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            selection: None,
            difficulty: None,
            profile: None,
            spawn_probability: 0.0,
            viewport,
            variant,
            player: Player::spawn(viewport, 0),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            high_score: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Tunables of the running session, if one has started
    pub fn active_profile(&self) -> Option<&DifficultyProfile> {
        self.profile.as_ref()
    }

    pub fn max_shield(&self) -> u32 {
        self.profile.map(|p| p.player_max_shield).unwrap_or(0)
    }

    /// Apply a new viewport size and keep the ship on screen
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.player.clamp_to(self.viewport);
    }

    /// Reset the world for a fresh run at `difficulty`
    pub fn begin_run(&mut self, difficulty: Difficulty, high_score: u64) {
        let profile = difficulty.profile();
        self.clear_entities();
        self.difficulty = Some(difficulty);
        self.selection = Some(difficulty);
        self.profile = Some(profile);
        self.spawn_probability = profile.enemy_spawn_probability;
        self.player = Player::spawn(self.viewport, profile.player_max_shield);
        self.score = 0;
        self.level = 1;
        self.high_score = high_score;
        self.time_ticks = 0;
    }

    /// Drop the run and go back to an unselected menu state
    pub fn end_run(&mut self) {
        self.clear_entities();
        self.difficulty = None;
        self.selection = None;
        self.profile = None;
        self.spawn_probability = 0.0;
        self.player = Player::spawn(self.viewport, 0);
        self.score = 0;
        self.level = 1;
        self.high_score = 0;
    }

    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.particles.clear();
    }

    /// Add an enemy of `kind` scaled by the active profile
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, target_y: f32) -> u32 {
        let (speed_scale, shoot_scale) = self
            .profile
            .map(|p| (p.enemy_speed_scale, p.shoot_scale()))
            .unwrap_or((1.0, 1.0));
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            kind,
            pos,
            size: kind.size(),
            speed: kind.speed() * speed_scale,
            target_y,
            health: kind.health(),
            shoot_probability: (kind.shoot_rate() * shoot_scale).clamp(0.0, 1.0),
            alive: true,
        });
        id
    }

    pub fn spawn_player_bullet(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.player_bullets.push(Bullet {
            id,
            pos,
            size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            vel_y: -PLAYER_BULLET_SPEED,
            damage: PLAYER_BULLET_DAMAGE,
            color: 0x00ffff,
            alive: true,
        });
        id
    }

    /// Add a downward bullet using the active profile's speed and damage
    pub fn spawn_enemy_bullet(&mut self, pos: Vec2, color: u32) -> u32 {
        let (speed, damage) = self
            .profile
            .map(|p| (p.enemy_bullet_speed, p.bullet_damage))
            .unwrap_or((0.0, 0));
        let id = self.next_entity_id();
        self.enemy_bullets.push(Bullet {
            id,
            pos,
            size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            vel_y: speed,
            damage,
            color,
            alive: true,
        });
        id
    }

    /// Burst of `count` particles flying outward from `pos`
    ///
    /// Always spawns the full burst; hiding particles is up to the renderer.
    pub fn spawn_particles(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let speed = self.rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.particles.push(Particle {
                pos,
                speed,
                angle,
                color,
                life: 1.0,
            });
        }
    }

    /// Drop everything marked dead during the tick
    pub fn compact(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.player_bullets.retain(|b| b.alive);
        self.enemy_bullets.retain(|b| b.alive);
    }
}

impl Particle {
    /// Move along the heading and fade
    pub fn advance(&mut self) {
        self.pos += polar_step(self.speed, self.angle);
        self.life -= PARTICLE_DECAY;
    }
}
