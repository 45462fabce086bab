//! Per-frame simulation tick
//!
//! Drives the state machine: Menu -> Playing -> GameOver / YouWin, with
//! pause as a flag inside Playing.

use super::level::generate_level;
use super::physics;
use super::powerup;
use super::state::{Difficulty, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick.
///
/// `left`/`right` are held-key levels; everything else is pressed this frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle left
    pub left: bool,
    /// Paddle right
    pub right: bool,
    /// Menu cursor up
    pub up: bool,
    /// Menu cursor down
    pub down: bool,
    /// Start / continue
    pub confirm: bool,
    /// Pause toggle
    pub pause: bool,
    /// Return to menu
    pub back: bool,
    /// Idle/demo mode - the paddle plays itself
    pub idle_mode: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => tick_menu(state, input),
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::GameOver | GamePhase::YouWin => tick_finished(state, input),
    }
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    let options = Difficulty::ALL.len();
    if input.up {
        state.menu_cursor = (state.menu_cursor + options - 1) % options;
    }
    if input.down {
        state.menu_cursor = (state.menu_cursor + 1) % options;
    }
    if input.confirm || input.idle_mode {
        let difficulty = state.selected_difficulty();
        start_game(state, difficulty);
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.back {
        return_to_menu(state);
        return;
    }

    if input.pause {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }
    if state.paused {
        return;
    }

    state.time_ticks += 1;

    let dx = if input.idle_mode {
        autopilot_dx(state)
    } else {
        let mut dx = 0.0;
        if input.left {
            dx -= state.tuning.paddle_speed;
        }
        if input.right {
            dx += state.tuning.paddle_speed;
        }
        dx
    };
    state.paddle.move_by(dx);

    physics::move_bricks(state);
    let outcome = physics::step_balls(state);
    if outcome.balls_lost > 0 {
        log::debug!(
            "{} ball(s) fell, {} still in play",
            outcome.balls_lost,
            state.balls.len()
        );
    }
    for kind in powerup::update(state) {
        log::debug!("Power-up caught: {:?}", kind);
    }

    state.countdown -= dt;

    if state.active_bricks == 0 {
        log::info!(
            "Level {} cleared, score {} ({} ticks played)",
            state.level,
            state.score,
            state.time_ticks
        );
        state.balls.clear();
        state.phase = GamePhase::YouWin;
        return;
    }

    let timed_out = state.countdown <= 0.0;
    if timed_out || state.balls.is_empty() {
        lose_life(state, timed_out);
    }
}

fn tick_finished(state: &mut GameState, input: &TickInput) {
    if input.back {
        return_to_menu(state);
        return;
    }
    if !(input.confirm || input.idle_mode) {
        return;
    }

    let next = match state.phase {
        GamePhase::YouWin => state.difficulty.next(),
        _ => None,
    };
    match next {
        Some(difficulty) => advance_level(state, difficulty),
        None => return_to_menu(state),
    }
}

/// Begin a new run at `difficulty`
pub fn start_game(state: &mut GameState, difficulty: Difficulty) {
    log::info!("Starting {} game", difficulty.name());
    state.score = 0;
    state.lives = START_LIVES;
    state.level = 1;
    state.time_ticks = 0;
    state.difficulty = difficulty;
    state.paused = false;
    generate_level(state);
    state.phase = GamePhase::Playing;
}

/// Move up one difficulty tier after a win
fn advance_level(state: &mut GameState, difficulty: Difficulty) {
    state.difficulty = difficulty;
    state.level += 1;
    state.score += LEVEL_BONUS;
    state.paused = false;
    generate_level(state);
    state.phase = GamePhase::Playing;
}

/// Leave the round for the difficulty menu
pub fn return_to_menu(state: &mut GameState) {
    log::info!("Returning to menu");
    state.power_ups.clear();
    state.paused = false;
    state.phase = GamePhase::Menu;
}

/// Spend a life after the last ball fell or the clock ran out.
/// Timing out also refills the clock.
fn lose_life(state: &mut GameState, timed_out: bool) {
    state.lives = state.lives.saturating_sub(1);
    state.balls.clear();
    log::debug!(
        "Life lost ({}), {} left",
        if timed_out { "time up" } else { "ball lost" },
        state.lives
    );

    if state.lives == 0 {
        log::info!(
            "Game over, final score {} after {} ticks",
            state.score,
            state.time_ticks
        );
        state.phase = GamePhase::GameOver;
        return;
    }

    state.reset_ball_and_paddle();
    if timed_out {
        state.countdown = state.level_duration;
    }
}

/// Paddle step for idle mode: track the lowest falling ball, or drift toward
/// the nearest power-up when nothing is coming down
fn autopilot_dx(state: &GameState) -> f32 {
    let falling = state
        .active_balls()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target = match falling {
        Some(ball) => Some(ball.pos.x),
        None => state
            .power_ups
            .iter()
            .filter(|p| p.active)
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
            .map(|p| p.rect.center().x),
    };

    let Some(target) = target else {
        return 0.0;
    };
    let speed = state.tuning.paddle_speed;
    (target - state.paddle.center_x()).clamp(-speed, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing(seed: u64, difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(seed);
        start_game(&mut state, difficulty);
        state
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let mut state = GameState::new(1);
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up, FRAME_DT);
        assert_eq!(state.selected_difficulty(), Difficulty::Hard);

        let down = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &down, FRAME_DT);
        assert_eq!(state.selected_difficulty(), Difficulty::Easy);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_confirm_starts_selected_difficulty() {
        let mut state = GameState::new(2);
        state.menu_cursor = 1;
        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(3, Difficulty::Easy);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_DT);
        assert!(state.paused);

        let ball = state.balls[0].clone();
        let countdown = state.countdown;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.balls[0], ball);
        assert_eq!(state.countdown, countdown);

        tick(&mut state, &pause, FRAME_DT);
        assert!(!state.paused);
        assert_ne!(state.balls[0].pos, ball.pos);
    }

    #[test]
    fn test_tick_counter_runs_only_while_playing() {
        let mut state = GameState::new(11);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.time_ticks, 0);

        start_game(&mut state, Difficulty::Easy);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.time_ticks, 2);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_DT);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.time_ticks, 2);

        start_game(&mut state, Difficulty::Medium);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_back_works_while_paused() {
        let mut state = playing(4, Difficulty::Easy);
        state.paused = true;
        state.power_ups.push(crate::sim::state::PowerUp::new(
            crate::sim::state::PowerUpKind::ExtraLife,
            Vec2::new(100.0, 100.0),
        ));
        let back = TickInput {
            back: true,
            ..Default::default()
        };
        tick(&mut state, &back, FRAME_DT);

        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.paused);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_paddle_moves_with_held_keys() {
        let mut state = playing(5, Difficulty::Medium);
        let x = state.paddle.rect.x;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, FRAME_DT);
        assert_eq!(state.paddle.rect.x, x - state.tuning.paddle_speed);
    }

    #[test]
    fn test_ball_loss_keeps_clock() {
        let mut state = playing(6, Difficulty::Easy);
        state.balls[0].pos = Vec2::new(20.0, SCREEN_HEIGHT - 12.0);
        state.balls[0].vel = Vec2::new(2.0, 4.0);
        state.countdown = 50.0;

        tick(&mut state, &TickInput::default(), 0.5);

        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, state.paddle.ball_start());
        assert_eq!(state.countdown, 49.5);
    }

    #[test]
    fn test_timeout_refills_clock() {
        let mut state = playing(7, Difficulty::Hard);
        state.countdown = 0.01;

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.countdown, state.level_duration);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_game_over_then_menu() {
        let mut state = playing(8, Difficulty::Easy);
        state.lives = 1;
        state.balls.clear();
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.balls.is_empty());

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_clearing_last_brick_wins() {
        let mut state = playing(9, Difficulty::Easy);
        for brick in state.bricks.iter_mut() {
            brick.active = false;
        }
        state.active_bricks = 0;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::YouWin);
    }

    #[test]
    fn test_autopilot_tracks_falling_ball() {
        let mut state = playing(10, Difficulty::Easy);
        state.balls[0].pos = Vec2::new(700.0, 300.0);
        state.balls[0].vel = Vec2::new(2.0, 4.0);
        let x = state.paddle.rect.x;
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle, FRAME_DT);
        assert!(state.paddle.rect.x > x);
    }
}
