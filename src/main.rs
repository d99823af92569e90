//! Pixel Void entry point
//!
//! On the web the page drives `platform::web::WebGame`. Natively this runs a
//! headless autopilot session and prints a summary:
//!
//! ```text
//! pixel-void [easy|normal|hard] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_void::audio::MusicDirector;
    use pixel_void::sim::{GameEvent, GamePhase, GameState, Hooks, TickInput, Viewport, tick};
    use pixel_void::{Difficulty, HighScores, Settings};

    /// Five minutes at 60 frames per second
    const MAX_DEMO_TICKS: u64 = 5 * 60 * 60;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or(Difficulty::Normal);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    log::info!("Pixel Void (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let settings = Settings::load();
    let mut scores = HighScores::load();
    let mut music = MusicDirector::new(settings.music_volume, settings.muted);
    let mut state = GameState::new(seed, Viewport::default(), settings.variant());

    let mut input = TickInput {
        pick: Some(difficulty),
        autopilot: true,
        ..Default::default()
    };
    let mut kills = 0u32;
    let mut frames = 0u64;

    while frames < MAX_DEMO_TICKS {
        let mut hooks = Hooks {
            store: &mut scores,
            audio: &mut music,
        };
        tick(&mut state, &input, &mut hooks);
        input.pick = None;
        frames += 1;

        kills += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count() as u32;

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!("Difficulty : {} ({})", difficulty.as_str(), difficulty.description());
    println!("Seed       : {}", seed);
    println!("Ticks      : {}", state.time_ticks);
    println!("Outcome    : {:?}", state.phase);
    println!("Score      : {}", state.score);
    println!("Level      : {}", state.level);
    println!("Kills      : {}", kills);
    println!("Lives left : {}", state.player.lives);
    if let Some(best) = scores.top_score() {
        println!("Best ever  : {}", best);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
