//! Game state and core simulation types
//!
//! Everything a round needs lives on [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, circle_intersects_rect};
use crate::consts::*;
use crate::tuning::Tuning;

/// Difficulty tiers, ordered easiest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Tier for a menu cursor index (wraps)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The next harder tier, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }
}

/// Top-level state machine phase. Pausing is a flag on `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty selection
    #[default]
    Menu,
    /// Active round
    Playing,
    /// Out of lives
    GameOver,
    /// Every brick destroyed
    YouWin,
}

/// RGBA color tag handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const MAROON: Color = Color::rgb(190, 33, 55);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);
    pub const PINK: Color = Color::rgb(255, 109, 194);
    pub const LIME: Color = Color::rgb(0, 158, 47);
    pub const SKYBLUE: Color = Color::rgb(102, 191, 255);

    /// Same color with alpha scaled by `factor`
    pub fn faded(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Brick colors cycle by row
pub const ROW_COLORS: [Color; 4] = [Color::RED, Color::ORANGE, Color::YELLOW, Color::GREEN];

/// Alpha multiplier applied each time a brick survives a hit
pub const DAMAGE_FADE: f32 = 0.6;

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub color: Color,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(PADDLE_BASE_WIDTH)
    }
}

impl Paddle {
    /// Paddle of the given width at the start position
    pub fn new(width: f32) -> Self {
        let mut paddle = Self {
            rect: Rect::new(0.0, 0.0, width, PADDLE_HEIGHT),
            color: Color::BLUE,
        };
        paddle.reset_position();
        paddle
    }

    /// Center horizontally, rest just above the floor
    pub fn reset_position(&mut self) {
        self.rect.x = (SCREEN_WIDTH - self.rect.width) / 2.0;
        self.rect.y = SCREEN_HEIGHT - self.rect.height - PADDLE_FLOOR_GAP;
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.rect.x + self.rect.width / 2.0
    }

    /// Move horizontally, staying on screen
    pub fn move_by(&mut self, dx: f32) {
        self.rect.x += dx;
        self.rect.clamp_x(SCREEN_WIDTH);
    }

    /// Change width around the current center, staying on screen
    pub fn set_width(&mut self, width: f32) {
        let center = self.center_x();
        self.rect.width = width;
        self.rect.x = center - width / 2.0;
        self.rect.clamp_x(SCREEN_WIDTH);
    }

    /// Where a fresh ball sits: centered, just above the paddle
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.rect.y - BALL_RADIUS - BALL_SPAWN_GAP)
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
    pub color: Color,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            active: true,
            color: Color::MAROON,
        }
    }
}

/// A brick cell in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub active: bool,
    pub hits_remaining: u8,
    /// Sideways speed in pixels/tick (0 = stationary)
    pub move_speed: f32,
    pub color: Color,
}

impl Brick {
    /// Inactive placeholder occupying its grid cell
    pub fn empty(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            active: false,
            hits_remaining: 0,
            move_speed: 0.0,
            color,
        }
    }

    /// Slide by `move_speed`, bouncing off the side walls
    pub fn slide(&mut self) {
        if self.move_speed == 0.0 {
            return;
        }
        self.rect.x += self.move_speed;
        if self.rect.x <= 0.0 {
            self.rect.x = 0.0;
            self.move_speed = self.move_speed.abs();
        } else if self.rect.right() >= SCREEN_WIDTH {
            self.rect.x = SCREEN_WIDTH - self.rect.width;
            self.move_speed = -self.move_speed.abs();
        }
    }
}

/// Fixed rows x columns arena of bricks, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new(BRICK_ROWS, BRICK_COLUMNS)
    }
}

impl BrickGrid {
    /// Grid of inactive bricks laid out in their cells
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(Brick::empty(
                    Self::cell_rect(row, col),
                    ROW_COLORS[row % ROW_COLORS.len()],
                ));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Screen rectangle of a grid cell
    pub fn cell_rect(row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * BRICK_WIDTH + BRICK_SPACING / 2.0,
            BRICK_TOP_OFFSET + row as f32 * BRICK_HEIGHT + BRICK_SPACING / 2.0,
            BRICK_WIDTH - BRICK_SPACING,
            BRICK_HEIGHT - BRICK_SPACING,
        )
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row < self.rows && col < self.columns {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row < self.rows && col < self.columns {
            let idx = self.index(row, col);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// Row-major iteration
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// First active brick, in row-major order, that the circle overlaps.
    /// Earlier cells win ties so a ball resolves at most one brick per tick.
    pub fn first_hit(&self, center: Vec2, radius: f32) -> Option<usize> {
        self.cells
            .iter()
            .position(|b| b.active && circle_intersects_rect(center, radius, &b.rect))
    }

    /// Brick at a row-major index returned by [`BrickGrid::first_hit`]
    pub fn cell_mut(&mut self, idx: usize) -> &mut Brick {
        &mut self.cells[idx]
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    EnlargePaddle,
    SpeedUp,
    ExtraLife,
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::EnlargePaddle,
        PowerUpKind::SpeedUp,
        PowerUpKind::ExtraLife,
        PowerUpKind::MultiBall,
    ];

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::EnlargePaddle => Color::SKYBLUE,
            PowerUpKind::SpeedUp => Color::PINK,
            PowerUpKind::ExtraLife => Color::LIME,
            PowerUpKind::MultiBall => Color::PURPLE,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub active: bool,
    pub color: Color,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, center: Vec2) -> Self {
        Self {
            rect: Rect::centered(center, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            active: true,
            color: kind.color(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub phase: GamePhase,
    pub paused: bool,
    /// Highlighted menu entry, index into `Difficulty::ALL`
    pub menu_cursor: usize,

    pub difficulty: Difficulty,
    /// 1-based, bumps on every win-advance
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    /// Seconds left on the level clock
    pub countdown: f32,
    /// Full clock for the current level
    pub level_duration: f32,
    /// Velocity a fresh ball starts with on this level
    pub launch_velocity: Vec2,

    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: BrickGrid,
    pub power_ups: Vec<PowerUp>,
    /// Cached number of active bricks; drives the win check
    pub active_bricks: usize,

    /// Ticks played this run (advances only while playing and unpaused)
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session at the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Fresh session at the menu; out-of-range tuning values are clamped
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.sanitized(),
            phase: GamePhase::Menu,
            paused: false,
            menu_cursor: 0,
            difficulty: Difficulty::Easy,
            level: 1,
            score: 0,
            lives: START_LIVES,
            countdown: 0.0,
            level_duration: 0.0,
            launch_velocity: Vec2::new(BALL_BASE_VELOCITY_X, BALL_BASE_VELOCITY_Y),
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: BrickGrid::default(),
            power_ups: Vec::new(),
            active_bricks: 0,
            time_ticks: 0,
        }
    }

    /// Difficulty under the menu cursor
    pub fn selected_difficulty(&self) -> Difficulty {
        Difficulty::from_index(self.menu_cursor)
    }

    /// Re-center the paddle and replace all balls with one fresh ball
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle.reset_position();
        self.balls.clear();
        self.balls
            .push(Ball::new(self.paddle.ball_start(), self.launch_velocity));
    }

    pub fn active_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_order_and_next() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
        assert_eq!(Difficulty::Easy.next(), Some(Difficulty::Medium));
        assert_eq!(Difficulty::Hard.next(), None);
        assert_eq!(Difficulty::from_index(4), Difficulty::Medium);
    }

    #[test]
    fn test_grid_layout_row_major() {
        let grid = BrickGrid::default();
        assert_eq!(grid.iter().count(), BRICK_ROWS * BRICK_COLUMNS);
        assert_eq!(grid.active_count(), 0);

        let b = grid.get(1, 2).unwrap();
        assert_eq!(b.rect, BrickGrid::cell_rect(1, 2));
        assert_eq!(b.color, Color::ORANGE);
        assert!(grid.get(BRICK_ROWS, 0).is_none());
        assert_eq!(grid.index(1, 2), BRICK_COLUMNS + 2);
    }

    #[test]
    fn test_first_hit_prefers_earlier_cell() {
        let mut grid = BrickGrid::default();
        grid.get_mut(0, 0).unwrap().active = true;
        grid.get_mut(1, 0).unwrap().active = true;

        // Ball straddling the boundary between rows 0 and 1
        let boundary = BrickGrid::cell_rect(1, 0).y;
        let hit = grid.first_hit(Vec2::new(20.0, boundary), BALL_RADIUS);
        assert_eq!(hit, Some(grid.index(0, 0)));
    }

    #[test]
    fn test_paddle_clamps_on_move_and_resize() {
        let mut paddle = Paddle::new(100.0);
        paddle.move_by(-1000.0);
        assert_eq!(paddle.rect.x, 0.0);

        paddle.set_width(180.0);
        assert_eq!(paddle.rect.x, 0.0);
        assert_eq!(paddle.rect.width, 180.0);

        paddle.move_by(1000.0);
        assert_eq!(paddle.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_brick_slide_bounces() {
        let mut brick = Brick::empty(Rect::new(2.0, 0.0, 79.0, 29.0), Color::RED);
        brick.active = true;
        brick.move_speed = -3.0;
        brick.slide();
        assert_eq!(brick.rect.x, 0.0);
        assert!(brick.move_speed > 0.0);
    }

    #[test]
    fn test_faded_reduces_alpha() {
        let c = Color::RED.faded(DAMAGE_FADE);
        assert!(c.a < Color::RED.a);
        assert_eq!((c.r, c.g, c.b), (Color::RED.r, Color::RED.g, Color::RED.b));
    }

    #[test]
    fn test_reset_ball_and_paddle() {
        let mut state = GameState::new(7);
        state.paddle.move_by(-200.0);
        state.reset_ball_and_paddle();
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos.x, state.paddle.center_x());
        assert!(state.balls[0].pos.y < state.paddle.rect.y);
    }

    #[test]
    fn test_with_tuning_clamps_degenerate_values() {
        let tuning = Tuning {
            paddle_deadzone: 0.0,
            power_up_chance: 3.0,
            ..Default::default()
        };
        let state = GameState::with_tuning(1, tuning);
        assert!(state.tuning.paddle_deadzone > 0.0);
        assert_eq!(state.tuning.power_up_chance, 1.0);
        assert!(state.tuning.validate().is_empty());
    }
}
