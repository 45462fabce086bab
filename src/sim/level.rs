//! Level generation
//!
//! Builds the brick grid, paddle and launch velocity for a difficulty tier.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{BrickGrid, Difficulty, GameState, Paddle};
use crate::consts::*;
use crate::tuning::Tuning;

/// Everything a level starts from
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub paddle_width: f32,
    pub launch_velocity: Vec2,
    pub bricks: BrickGrid,
    pub active_bricks: usize,
    pub countdown_secs: f32,
}

/// Roll a fresh layout for `difficulty`
pub fn build_level<R: Rng>(
    difficulty: Difficulty,
    tuning: &Tuning,
    rng: &mut R,
) -> LevelLayout {
    let profile = tuning.profile(difficulty);
    let mut bricks = BrickGrid::default();
    let active_rows = profile.active_rows.clamp(1, bricks.rows());

    // Every cell in the active rows is a candidate; a random share of them
    // becomes a brick.
    let mut candidates: Vec<(usize, usize)> = (0..active_rows)
        .flat_map(|row| (0..bricks.columns()).map(move |col| (row, col)))
        .collect();
    candidates.shuffle(rng);

    let density = if tuning.density_max > tuning.density_min {
        rng.random_range(tuning.density_min..=tuning.density_max)
    } else {
        tuning.density_min
    };
    // Nudge so e.g. 0.7 * 30 floors to 21, not 20
    let count = ((density * candidates.len() as f32 + 1e-3).floor() as usize).min(candidates.len());

    let max_hits = profile.max_hits.max(1);
    let bottom_row = active_rows - 1;
    for &(row, col) in &candidates[..count] {
        let Some(brick) = bricks.get_mut(row, col) else {
            continue;
        };
        brick.active = true;
        brick.hits_remaining = rng.random_range(1..=max_hits);
        if profile.moving_bricks
            && row == bottom_row
            && rng.random_bool(tuning.moving_brick_chance.clamp(0.0, 1.0))
        {
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            brick.move_speed = tuning.moving_brick_speed * direction;
        }
    }

    LevelLayout {
        paddle_width: PADDLE_BASE_WIDTH * profile.paddle_width_scale,
        launch_velocity: Vec2::new(BALL_BASE_VELOCITY_X, BALL_BASE_VELOCITY_Y)
            * profile.ball_speed_scale,
        active_bricks: count,
        bricks,
        countdown_secs: profile.countdown_secs,
    }
}

/// Generate the level for `state.difficulty` and reset the round to it
pub fn generate_level(state: &mut GameState) {
    let layout = build_level(state.difficulty, &state.tuning, &mut state.rng);

    log::info!(
        "Level {} ({}): {} bricks, {:.0}s on the clock",
        state.level,
        state.difficulty.name(),
        layout.active_bricks,
        layout.countdown_secs
    );

    state.paddle = Paddle::new(layout.paddle_width);
    state.launch_velocity = layout.launch_velocity;
    state.bricks = layout.bricks;
    state.active_bricks = layout.active_bricks;
    state.level_duration = layout.countdown_secs;
    state.countdown = layout.countdown_secs;
    state.power_ups.clear();
    state.reset_ball_and_paddle();
}
