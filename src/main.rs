//! Brick Breaker entry point
//!
//! The window and renderer belong to the host. Natively this runs the
//! simulation headless in idle/demo mode and logs how the run went.

use std::path::Path;

use brick_breaker::consts::FRAME_DT;
use brick_breaker::sim::{GamePhase, GameState, TickInput, tick};
use brick_breaker::tuning::Tuning;

/// Optional balance overrides, read from the working directory
const TUNING_FILE: &str = "tuning.json";

/// Length of the demo run (two minutes of frames)
const DEMO_TICKS: u64 = 120 * 60;

fn load_tuning() -> Tuning {
    let path = Path::new(TUNING_FILE);
    if !path.exists() {
        return Tuning::default();
    }
    match Tuning::load(path) {
        Ok(tuning) => {
            for warning in tuning.validate() {
                log::warn!("tuning: {warning}");
            }
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            log::error!("{e:#}; using default tuning");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless demo) starting...");

    let seed: u64 = rand::random();
    let mut state = GameState::with_tuning(seed, load_tuning());
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut phase = state.phase;
    let mut best_score = 0;
    for _ in 0..DEMO_TICKS {
        tick(&mut state, &input, FRAME_DT);
        best_score = best_score.max(state.score);

        if state.phase != phase {
            log::info!(
                "{:?} -> {:?} (level {}, {}, score {}, lives {})",
                phase,
                state.phase,
                state.level,
                state.difficulty.name(),
                state.score,
                state.lives
            );
            if matches!(state.phase, GamePhase::GameOver | GamePhase::YouWin) {
                match serde_json::to_string(&state.snapshot()) {
                    Ok(json) => log::debug!("snapshot: {json}"),
                    Err(e) => log::warn!("snapshot serialization failed: {e}"),
                }
            }
            phase = state.phase;
        }
    }

    log::info!(
        "Demo finished after {} ticks: best score {}, current score {}",
        DEMO_TICKS,
        best_score,
        state.score
    );
}
