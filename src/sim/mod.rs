//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, velocities in pixels per tick
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (bricks row-major, balls and power-ups by spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod powerup;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{ReflectAxis, WallContact, apply_speed_floor};
pub use geometry::{Rect, circle_intersects_rect};
pub use level::{LevelLayout, build_level, generate_level};
pub use physics::StepOutcome;
pub use snapshot::{BallView, BrickView, PowerUpView, Snapshot};
pub use state::{
    Ball, Brick, BrickGrid, Color, Difficulty, GamePhase, GameState, Paddle, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, return_to_menu, start_game, tick};
