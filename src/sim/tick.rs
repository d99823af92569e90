//! Fixed-step simulation tick
//!
//! Core game loop: the external scheduler calls [`tick`] once per frame and
//! the phase state machine decides what runs.

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use super::world;
use crate::audio::AudioSink;
use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::highscores::HighScoreStore;

/// Menu cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNav {
    Next,
    Prev,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Confirm (space) - one-shot
    pub confirm: bool,
    /// Menu cursor step - one-shot
    pub menu_nav: Option<MenuNav>,
    /// Difficulty picked directly (e.g. clicked) - one-shot
    pub pick: Option<Difficulty>,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// External collaborators the simulation reports to
pub struct Hooks<'a> {
    pub store: &'a mut dyn HighScoreStore,
    pub audio: &'a mut dyn AudioSink,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, hooks: &mut Hooks<'_>) {
    state.events.clear();

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu => handle_menu(state, input, hooks),

        GamePhase::GameOver => {
            if input.confirm {
                state.end_run();
                transition(state, GamePhase::Menu, hooks);
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;

            world::advance(state, input);
            collision::resolve(state, &mut *hooks.store);
            state.compact();

            if state.player.lives == 0 {
                let pos = state.player.pos;
                state.spawn_particles(pos, PLAYER_COLOR, DEATH_PARTICLES);
                transition(state, GamePhase::GameOver, hooks);
                log::info!(
                    "Game over at level {} with score {} (best {})",
                    state.level,
                    state.score,
                    state.high_score
                );
                return;
            }

            check_level_up(state);
        }
    }
}

fn handle_menu(state: &mut GameState, input: &TickInput, hooks: &mut Hooks<'_>) {
    if let Some(difficulty) = input.pick {
        start_run(state, difficulty, hooks);
        return;
    }

    if let Some(nav) = input.menu_nav {
        let selected = match (state.selection, nav) {
            (None, _) => Difficulty::ALL[0],
            (Some(d), MenuNav::Next) => d.next(),
            (Some(d), MenuNav::Prev) => d.prev(),
        };
        state.selection = Some(selected);
        state.events.push(GameEvent::SelectionChanged(selected));
    }

    if input.confirm {
        if let Some(difficulty) = state.selection {
            start_run(state, difficulty, hooks);
        }
    }
}

fn start_run(state: &mut GameState, difficulty: Difficulty, hooks: &mut Hooks<'_>) {
    let best = hooks.store.high_score(difficulty);
    state.begin_run(difficulty, best);
    transition(state, GamePhase::Playing, hooks);
    log::info!(
        "Run started on {} (seed {}, best {})",
        difficulty.as_str(),
        state.seed,
        best
    );
}

fn transition(state: &mut GameState, to: GamePhase, hooks: &mut Hooks<'_>) {
    let from = state.phase;
    state.phase = to;
    state.events.push(GameEvent::PhaseChanged { from, to });
    hooks.audio.phase_changed(from, to);
}

/// Each level threshold crossed raises the enemy spawn rate
fn check_level_up(state: &mut GameState) {
    while state.score > state.level as u64 * LEVEL_SCORE_STEP {
        state.level += 1;
        state.spawn_probability =
            (state.spawn_probability + SPAWN_PROBABILITY_STEP).min(MAX_SPAWN_PROBABILITY);
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!(
            "Level {} (spawn chance {:.3})",
            state.level,
            state.spawn_probability
        );
    }
}

/// Demo pilot: picks a difficulty in the menu and chases the lowest enemy
fn steer_autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => {
            if state.selection.is_none() {
                input.menu_nav = Some(MenuNav::Next);
            }
            input.confirm = true;
        }
        GamePhase::Playing => {
            let target = state
                .enemies
                .iter()
                .filter(|e| e.alive)
                .max_by(|a, b| {
                    a.pos
                        .y
                        .partial_cmp(&b.pos.y)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            input.left = false;
            input.right = false;
            if let Some(enemy) = target {
                let dx = enemy.pos.x - state.player.pos.x;
                // Dead zone keeps the ship from jittering under its target
                if dx < -PLAYER_SPEED {
                    input.left = true;
                } else if dx > PLAYER_SPEED {
                    input.right = true;
                }
            }
        }
        GamePhase::GameOver => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MusicDirector, MusicTrack, SilentAudio};
    use crate::highscores::{HighScores, NoStore};
    use crate::settings::Settings;
    use crate::sim::state::{EnemyKind, Variant, Viewport};
    use glam::Vec2;

    fn menu_state(seed: u64) -> GameState {
        GameState::new(seed, Viewport::default(), Variant::default())
    }

    fn run_tick(state: &mut GameState, input: &TickInput) {
        let mut store = NoStore;
        let mut audio = SilentAudio;
        let mut hooks = Hooks {
            store: &mut store,
            audio: &mut audio,
        };
        tick(state, input, &mut hooks);
    }

    /// Playing state with the spawner and first volley suppressed
    fn quiet_run(difficulty: Difficulty) -> GameState {
        let mut state = menu_state(42);
        run_tick(
            &mut state,
            &TickInput {
                pick: Some(difficulty),
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state.spawn_probability = 0.0;
        state.player.auto_shoot_cooldown = 1000;
        state
    }

    fn entity_counts(state: &GameState) -> (usize, usize, usize, usize) {
        (
            state.enemies.len(),
            state.player_bullets.len(),
            state.enemy_bullets.len(),
            state.particles.len(),
        )
    }

    #[test]
    fn test_first_nav_selects_first_difficulty() {
        let mut state = menu_state(1);
        run_tick(
            &mut state,
            &TickInput {
                menu_nav: Some(MenuNav::Prev),
                ..Default::default()
            },
        );
        assert_eq!(state.selection, Some(Difficulty::Easy));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_nav_cycles() {
        let mut state = menu_state(1);
        let next = TickInput {
            menu_nav: Some(MenuNav::Next),
            ..Default::default()
        };
        let prev = TickInput {
            menu_nav: Some(MenuNav::Prev),
            ..Default::default()
        };
        run_tick(&mut state, &next);
        run_tick(&mut state, &next);
        assert_eq!(state.selection, Some(Difficulty::Normal));
        run_tick(&mut state, &next);
        run_tick(&mut state, &next);
        assert_eq!(state.selection, Some(Difficulty::Easy));
        run_tick(&mut state, &prev);
        assert_eq!(state.selection, Some(Difficulty::Hard));
    }

    #[test]
    fn test_confirm_without_selection_ignored() {
        let mut state = menu_state(1);
        run_tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.active_profile().is_none());
    }

    #[test]
    fn test_select_then_read_profile() {
        for difficulty in Difficulty::ALL {
            let mut state = menu_state(1);
            state.selection = Some(difficulty);
            run_tick(
                &mut state,
                &TickInput {
                    confirm: true,
                    ..Default::default()
                },
            );
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.active_profile(), Some(&difficulty.profile()));
            assert_eq!(state.player.shield, difficulty.profile().player_max_shield);
        }
    }

    #[test]
    fn test_menu_and_game_over_do_not_touch_entities() {
        let mut state = menu_state(5);
        state.spawn_particles(Vec2::new(10.0, 10.0), 0xffffff, 3);
        let before = entity_counts(&state);
        for _ in 0..10 {
            run_tick(&mut state, &TickInput::default());
        }
        assert_eq!(entity_counts(&state), before);
        assert_eq!(state.particles[0].pos, Vec2::new(10.0, 10.0));

        let mut state = quiet_run(Difficulty::Normal);
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(100.0, 50.0), 0.0);
        state.phase = GamePhase::GameOver;
        let before = entity_counts(&state);
        let enemy_pos = state.enemies[0].pos;
        let input = TickInput {
            left: true,
            menu_nav: Some(MenuNav::Next),
            ..Default::default()
        };
        for _ in 0..10 {
            run_tick(&mut state, &input);
        }
        assert_eq!(entity_counts(&state), before);
        assert_eq!(state.enemies[0].pos, enemy_pos);
    }

    #[test]
    fn test_enemy_bullet_drains_shield() {
        let mut state = quiet_run(Difficulty::Easy);
        assert_eq!(state.player.shield, 150);
        let pos = state.player.pos;
        state.spawn_enemy_bullet(pos, 0xffffff);

        run_tick(&mut state, &TickInput::default());

        assert_eq!(state.player.shield, 135);
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_player_bullet_kills_weak_enemy() {
        let mut state = quiet_run(Difficulty::Normal);
        let enemy_pos = Vec2::new(300.0, 100.0);
        state.spawn_enemy(EnemyKind::Scout, enemy_pos, 0.0);
        state.enemies[0].health = 1;
        state.enemies[0].shoot_probability = 0.0;
        state.spawn_player_bullet(enemy_pos);

        run_tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.particles.len(), KILL_PARTICLES);
        assert!(state.particles.iter().all(|p| p.pos == enemy_pos));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = quiet_run(Difficulty::Normal);
        state.player.lives = 1;
        state.player.shield = 0;
        let pos = state.player.pos;
        state.spawn_enemy_bullet(pos, 0xffffff);

        run_tick(&mut state, &TickInput::default());

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), DEATH_PARTICLES);
        assert!(state.particles.iter().all(|p| p.pos == pos));
        assert!(state.events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::GameOver,
        }));
    }

    #[test]
    fn test_bullet_and_ram_same_tick() {
        let mut state = quiet_run(Difficulty::Normal);
        let pos = state.player.pos;
        state.spawn_enemy_bullet(pos, 0xffffff);
        state.spawn_enemy(EnemyKind::Scout, pos, pos.y);
        state.enemies[0].shoot_probability = 0.0;

        run_tick(&mut state, &TickInput::default());

        assert_eq!(state.player.shield, 100 - 25 - 50);
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert!(state.enemies.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ram_ends_game() {
        let mut state = quiet_run(Difficulty::Normal);
        state.player.lives = 1;
        state.player.shield = 0;
        let pos = state.player.pos;
        state.spawn_enemy(EnemyKind::Scout, pos, pos.y);
        state.enemies[0].shoot_probability = 0.0;

        run_tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
        assert!(state.enemies.is_empty());
        // Rammer's explosion plus the death burst
        assert_eq!(state.particles.len(), KILL_PARTICLES + DEATH_PARTICLES);
    }

    #[test]
    fn test_bursts_ignore_particle_setting() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut state = GameState::new(42, Viewport::default(), settings.variant());
        run_tick(
            &mut state,
            &TickInput {
                pick: Some(Difficulty::Normal),
                ..Default::default()
            },
        );
        state.spawn_probability = 0.0;
        state.player.auto_shoot_cooldown = 1000;

        let enemy_pos = Vec2::new(300.0, 100.0);
        state.spawn_enemy(EnemyKind::Scout, enemy_pos, 0.0);
        state.enemies[0].health = 1;
        state.enemies[0].shoot_probability = 0.0;
        state.spawn_player_bullet(enemy_pos);
        run_tick(&mut state, &TickInput::default());
        assert_eq!(state.particles.len(), KILL_PARTICLES);

        state.particles.clear();
        state.player.lives = 1;
        state.player.shield = 0;
        let pos = state.player.pos;
        state.spawn_enemy_bullet(pos, 0xffffff);
        run_tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), DEATH_PARTICLES);
    }

    #[test]
    fn test_level_up_raises_spawn_rate() {
        let mut state = quiet_run(Difficulty::Normal);
        let base = Difficulty::Normal.profile().enemy_spawn_probability;
        // quiet_run zeroes the spawner; restore the profile rate
        state.spawn_probability = base;
        state.score = 1001;

        run_tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        assert!((state.spawn_probability - (base + SPAWN_PROBABILITY_STEP)).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_exact_threshold_does_not_level() {
        let mut state = quiet_run(Difficulty::Normal);
        state.score = 1000;
        run_tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_game_over_confirm_returns_to_menu() {
        let mut state = quiet_run(Difficulty::Hard);
        state.score = 700;
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(100.0, 50.0), 0.0);
        state.phase = GamePhase::GameOver;

        run_tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert!(state.selection.is_none());
        assert!(state.active_profile().is_none());
        assert_eq!(entity_counts(&state), (0, 0, 0, 0));
    }

    #[test]
    fn test_playing_ignores_menu_input() {
        let mut state = quiet_run(Difficulty::Easy);
        run_tick(
            &mut state,
            &TickInput {
                confirm: true,
                menu_nav: Some(MenuNav::Next),
                pick: Some(Difficulty::Hard),
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Some(Difficulty::Easy));
        assert_eq!(state.selection, Some(Difficulty::Easy));
    }

    #[test]
    fn test_collaborators_notified() {
        let mut state = menu_state(9);
        let mut scores = HighScores::new();
        scores.set_high_score(Difficulty::Normal, 2500);
        let mut music = MusicDirector::default();

        {
            let mut hooks = Hooks {
                store: &mut scores,
                audio: &mut music,
            };
            tick(
                &mut state,
                &TickInput {
                    pick: Some(Difficulty::Normal),
                    ..Default::default()
                },
                &mut hooks,
            );
        }

        assert_eq!(state.high_score, 2500);
        assert_eq!(music.current_track(), MusicTrack::Game);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut state1 = menu_state(99999);
        let mut state2 = menu_state(99999);

        let mut inputs = vec![TickInput {
            pick: Some(Difficulty::Hard),
            ..Default::default()
        }];
        for i in 0..600 {
            inputs.push(TickInput {
                left: i % 90 < 45,
                right: i % 90 >= 45,
                ..Default::default()
            });
        }

        for input in &inputs {
            run_tick(&mut state1, input);
            run_tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(entity_counts(&state1), entity_counts(&state2));
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }

    #[test]
    fn test_autopilot_starts_and_plays() {
        let mut state = menu_state(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        run_tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Some(Difficulty::Easy));

        for _ in 0..2000 {
            run_tick(&mut state, &input);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert!(state.time_ticks > 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(left, right, up, down)| TickInput {
                    left,
                    right,
                    up,
                    down,
                    ..Default::default()
                },
            )
        }

        fn busy_run(seed: u64, difficulty: Difficulty) -> GameState {
            let mut state = menu_state(seed);
            run_tick(
                &mut state,
                &TickInput {
                    pick: Some(difficulty),
                    ..Default::default()
                },
            );
            // Crowded sky so hits actually happen
            state.spawn_probability = 0.2;
            state
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn shield_and_lives_stay_in_range(
                seed in any::<u64>(),
                tier in 0usize..3,
                inputs in proptest::collection::vec(arb_input(), 1..400),
            ) {
                let difficulty = Difficulty::ALL[tier];
                let max_shield = difficulty.profile().player_max_shield;
                let mut state = busy_run(seed, difficulty);

                for input in &inputs {
                    run_tick(&mut state, input);
                    prop_assert!(state.player.shield <= max_shield);
                    prop_assert!(state.player.lives <= STARTING_LIVES);
                    if state.phase != GamePhase::Playing {
                        break;
                    }
                }
            }

            #[test]
            fn docked_enemies_never_rise(
                seed in any::<u64>(),
                inputs in proptest::collection::vec(arb_input(), 1..300),
            ) {
                let mut state = busy_run(seed, Difficulty::Normal);
                let mut docked: Vec<(u32, f32)> = Vec::new();

                for input in &inputs {
                    run_tick(&mut state, input);
                    if state.phase != GamePhase::Playing {
                        break;
                    }
                    for (id, y) in &docked {
                        if let Some(enemy) = state.enemies.iter().find(|e| e.id == *id) {
                            prop_assert!(enemy.pos.y >= *y);
                        }
                    }
                    docked = state
                        .enemies
                        .iter()
                        .filter(|e| e.is_docked())
                        .map(|e| (e.id, e.pos.y))
                        .collect();
                }
            }
        }
    }
}
