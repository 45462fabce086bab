//! Data-driven game balance
//!
//! Everything here can be overridden from a JSON file. Missing top-level
//! fields fall back to the defaults, which reproduce the stock rules; a
//! difficulty profile, when given, must be complete.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Per-difficulty level parameters. Overrides must list every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Paddle width as a multiple of `PADDLE_BASE_WIDTH`
    pub paddle_width_scale: f32,
    /// Initial ball velocity as a multiple of the base velocity
    pub ball_speed_scale: f32,
    /// Number of grid rows (from the top) that can hold bricks
    pub active_rows: usize,
    /// Bricks take 1..=max_hits hits, chosen uniformly
    pub max_hits: u8,
    /// Countdown length for one level, in seconds
    pub countdown_secs: f32,
    /// Whether the bottom active row can contain sliding bricks
    pub moving_bricks: bool,
}

impl DifficultyProfile {
    pub fn easy() -> Self {
        Self {
            paddle_width_scale: 1.5,
            ball_speed_scale: 0.8,
            active_rows: 3,
            max_hits: 1,
            countdown_secs: 180.0,
            moving_bricks: false,
        }
    }

    pub fn medium() -> Self {
        Self {
            paddle_width_scale: 1.0,
            ball_speed_scale: 1.0,
            active_rows: 4,
            max_hits: 2,
            countdown_secs: 150.0,
            moving_bricks: false,
        }
    }

    pub fn hard() -> Self {
        Self {
            paddle_width_scale: 0.7,
            ball_speed_scale: 1.2,
            active_rows: 5,
            max_hits: 3,
            countdown_secs: 120.0,
            moving_bricks: true,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,

    // === Bricks ===
    /// Fraction of candidate cells that become bricks, drawn uniformly per level
    pub density_min: f32,
    pub density_max: f32,
    /// Chance a bottom-row brick slides sideways (only where enabled)
    pub moving_brick_chance: f64,
    /// Sideways brick speed (pixels/tick)
    pub moving_brick_speed: f32,

    // === Paddle ===
    /// Paddle speed while a direction is held (pixels/tick)
    pub paddle_speed: f32,
    /// Outgoing horizontal speed off a paddle edge, as a fraction of ball speed
    pub paddle_edge_fraction: f32,
    /// Half-width of the paddle's central band, in normalized hit offset
    pub paddle_deadzone: f32,
    /// Relative jitter added when the horizontal speed floor kicks in
    pub floor_jitter: f32,

    // === Power-ups ===
    pub power_up_chance: f64,
    /// Fall speed (pixels/tick)
    pub power_up_fall_speed: f32,
    pub enlarge_factor: f32,
    /// Cap on paddle width, as a multiple of the level's starting width
    pub enlarge_cap: f32,
    pub speed_up_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::easy(),
            medium: DifficultyProfile::medium(),
            hard: DifficultyProfile::hard(),

            density_min: 0.70,
            density_max: 0.90,
            moving_brick_chance: 0.3,
            moving_brick_speed: 1.5,

            paddle_speed: 8.0,
            paddle_edge_fraction: 0.75,
            paddle_deadzone: 0.3,
            floor_jitter: 0.1,

            power_up_chance: 0.1,
            power_up_fall_speed: 3.0,
            enlarge_factor: 1.2,
            enlarge_cap: 2.0,
            speed_up_factor: 1.2,
        }
    }
}

impl Tuning {
    /// Profile for a difficulty tier
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Parse tuning from JSON (unspecified fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("read tuning file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parse tuning file {}", path.display()))
    }

    /// Report values that would make the game misbehave. Non-fatal.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if !(0.0..=1.0).contains(&self.density_min)
            || !(0.0..=1.0).contains(&self.density_max)
            || self.density_min > self.density_max
        {
            w.push(format!(
                "brick density range {}..{} must be ordered and within 0..1",
                self.density_min, self.density_max
            ));
        }
        if !(0.0..=1.0).contains(&self.moving_brick_chance) {
            w.push(format!(
                "moving_brick_chance {} outside 0..1",
                self.moving_brick_chance
            ));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            w.push(format!("power_up_chance {} outside 0..1", self.power_up_chance));
        }
        if self.paddle_deadzone <= 0.0 || self.paddle_deadzone > 0.5 {
            w.push(format!(
                "paddle_deadzone {} must be in (0, 0.5]",
                self.paddle_deadzone
            ));
        }
        if self.floor_jitter < 0.0 {
            w.push(format!("floor_jitter {} is negative", self.floor_jitter));
        }
        if self.enlarge_cap < 1.0 {
            w.push(format!("enlarge_cap {} shrinks the paddle", self.enlarge_cap));
        }
        for difficulty in Difficulty::ALL {
            let p = self.profile(difficulty);
            let name = difficulty.name();
            if p.active_rows == 0 || p.active_rows > crate::consts::BRICK_ROWS {
                w.push(format!(
                    "{name}: active_rows {} must be in 1..={}",
                    p.active_rows,
                    crate::consts::BRICK_ROWS
                ));
            }
            if p.max_hits == 0 {
                w.push(format!("{name}: max_hits must be at least 1"));
            }
            if p.countdown_secs <= 0.0 {
                w.push(format!("{name}: countdown_secs must be > 0"));
            }
            if p.paddle_width_scale <= 0.0 || p.ball_speed_scale <= 0.0 {
                w.push(format!("{name}: paddle and ball scales must be > 0"));
            }
        }
        w
    }

    /// Clamp values that `validate` would flag into a playable range
    pub fn sanitized(mut self) -> Self {
        self.density_min = self.density_min.clamp(0.0, 1.0);
        self.density_max = self.density_max.clamp(self.density_min, 1.0);
        self.moving_brick_chance = self.moving_brick_chance.clamp(0.0, 1.0);
        self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        self.paddle_deadzone = self.paddle_deadzone.clamp(0.01, 0.5);
        self.floor_jitter = self.floor_jitter.max(0.0);
        self.enlarge_cap = self.enlarge_cap.max(1.0);
        for p in [&mut self.easy, &mut self.medium, &mut self.hard] {
            p.active_rows = p.active_rows.clamp(1, crate::consts::BRICK_ROWS);
            p.max_hits = p.max_hits.max(1);
            if p.countdown_secs <= 0.0 {
                p.countdown_secs = 1.0;
            }
            if p.paddle_width_scale <= 0.0 {
                p.paddle_width_scale = 1.0;
            }
            if p.ball_speed_scale <= 0.0 {
                p.ball_speed_scale = 1.0;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_empty());
    }

    #[test]
    fn test_harder_means_less_time() {
        let t = Tuning::default();
        assert!(t.easy.countdown_secs > t.medium.countdown_secs);
        assert!(t.medium.countdown_secs > t.hard.countdown_secs);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(
            r#"{
                "power_up_chance": 0.5,
                "hard": {
                    "paddle_width_scale": 0.5,
                    "ball_speed_scale": 1.5,
                    "active_rows": 5,
                    "max_hits": 4,
                    "countdown_secs": 90.0,
                    "moving_bricks": true
                }
            }"#,
        )
        .unwrap();
        assert_eq!(t.power_up_chance, 0.5);
        assert_eq!(t.hard.max_hits, 4);
        assert_eq!(t.easy, DifficultyProfile::easy());
        assert_eq!(t.paddle_speed, Tuning::default().paddle_speed);
    }

    #[test]
    fn test_incomplete_profile_is_an_error() {
        assert!(Tuning::from_json(r#"{ "hard": { "max_hits": 4 } }"#).is_err());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_validate_and_sanitize() {
        let mut t = Tuning::default();
        t.density_min = 0.95;
        t.density_max = 0.5;
        t.easy.active_rows = 0;
        t.power_up_chance = 2.0;
        let warnings = t.validate();
        assert_eq!(warnings.len(), 3);

        let t = t.sanitized();
        assert!(t.validate().is_empty());
    }
}
