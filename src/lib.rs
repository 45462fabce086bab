//! Brick Breaker - A single-screen arcade brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering and input polling belong to the host; it feeds a
//! [`sim::TickInput`] into [`sim::tick`] every frame and draws the
//! [`sim::Snapshot`] returned by [`sim::GameState::snapshot`].

pub mod sim;
pub mod tuning;

pub use sim::{Difficulty, GamePhase, GameState, Snapshot, TickInput, tick};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame duration the host drives the simulation at (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults (width is scaled per difficulty)
    pub const PADDLE_BASE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle's bottom edge and the bottom of the screen
    pub const PADDLE_FLOOR_GAP: f32 = 30.0;

    /// Ball defaults. Velocities are in pixels per tick.
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_VELOCITY_X: f32 = 4.0;
    pub const BALL_BASE_VELOCITY_Y: f32 = -4.0;
    /// Clearance between a freshly placed ball and the paddle top
    pub const BALL_SPAWN_GAP: f32 = 5.0;
    /// Minimum horizontal speed (stops near-vertical stalls)
    pub const MIN_SPEED_X: f32 = 1.5;
    /// Minimum vertical speed (stops near-horizontal stalls)
    pub const MIN_SPEED_Y: f32 = 2.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = SCREEN_WIDTH / BRICK_COLUMNS as f32;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_SPACING: f32 = 1.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;

    /// Power-up capsule size
    pub const POWER_UP_SIZE: f32 = 20.0;

    /// Scoring and lives
    pub const BRICK_REWARD: u64 = 10;
    pub const LEVEL_BONUS: u64 = 100;
    pub const START_LIVES: u32 = 3;
}
