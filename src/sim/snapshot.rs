//! Read-only view of the game handed to the renderer each frame

use glam::Vec2;
use serde::Serialize;

use super::geometry::Rect;
use super::state::{Color, Difficulty, GamePhase, GameState, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: Color,
    pub hits_remaining: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub rect: Rect,
    pub color: Color,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub paused: bool,
    /// Difficulty highlighted in the menu
    pub menu_selection: Difficulty,
    pub difficulty: Difficulty,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    /// Seconds left, never negative
    pub time_remaining: f32,
    pub paddle: Rect,
    pub paddle_color: Color,
    pub bricks: Vec<BrickView>,
    pub power_ups: Vec<PowerUpView>,
    pub balls: Vec<BallView>,
}

impl GameState {
    /// Capture the drawable state; only active entities are included
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            paused: self.paused,
            menu_selection: self.selected_difficulty(),
            difficulty: self.difficulty,
            level: self.level,
            score: self.score,
            lives: self.lives,
            time_remaining: self.countdown.max(0.0),
            paddle: self.paddle.rect,
            paddle_color: self.paddle.color,
            bricks: self
                .bricks
                .active()
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                    hits_remaining: b.hits_remaining,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    rect: p.rect,
                    color: p.color,
                    kind: p.kind,
                })
                .collect(),
            balls: self
                .active_balls()
                .map(|b| BallView {
                    pos: b.pos,
                    radius: b.radius,
                    color: b.color,
                })
                .collect(),
        }
    }
}
