//! Collision response for the ball against walls, paddle and bricks
//!
//! Reflections always point the ball away from the surface it touched, so a
//! ball still overlapping a wall on the next tick is not flipped back.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use super::state::Ball;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which screen edges a ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
    /// Ball left through the floor
    pub bottom: bool,
}

/// Direction a brick bounce reflects the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectAxis {
    Horizontal,
    Vertical,
    /// Corner contact
    Both,
}

/// Raise each velocity component to its minimum magnitude, keeping its sign.
/// A zero component is pushed in the positive direction.
pub fn apply_speed_floor(vel: Vec2) -> Vec2 {
    Vec2::new(floor_component(vel.x, MIN_SPEED_X), floor_component(vel.y, MIN_SPEED_Y))
}

#[inline]
fn floor_component(v: f32, min: f32) -> f32 {
    if v.abs() >= min {
        v
    } else if v < 0.0 {
        -min
    } else {
        min
    }
}

/// Bounce off the side and top walls; flag the floor
pub fn resolve_walls(ball: &mut Ball, width: f32, height: f32) -> WallContact {
    let mut contact = WallContact::default();
    let r = ball.radius;

    if ball.pos.x - r <= 0.0 && ball.vel.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = r;
        contact.side = true;
    } else if ball.pos.x + r >= width && ball.vel.x > 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = width - r;
        contact.side = true;
    }

    if ball.pos.y - r <= 0.0 && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = r;
        contact.top = true;
    }

    if ball.pos.y + r >= height {
        contact.bottom = true;
    }

    contact
}

/// Send a downward ball back up off the paddle.
///
/// The outgoing angle depends on where along the paddle the ball landed:
/// beyond the central deadzone it leaves at a fixed share of its speed toward
/// that side, inside it the horizontal speed scales with the offset. Total
/// speed is preserved unless the horizontal floor has to kick in.
pub fn bounce_off_paddle<R: Rng>(ball: &mut Ball, paddle: &Rect, tuning: &Tuning, rng: &mut R) {
    let speed = ball.vel.length();
    let hit = ((ball.pos.x - paddle.x) / paddle.width).clamp(0.0, 1.0);
    let offset = hit - 0.5;
    let edge_speed = speed * tuning.paddle_edge_fraction;

    let mut vx = if offset.abs() > tuning.paddle_deadzone {
        edge_speed.copysign(offset)
    } else if tuning.paddle_deadzone > 0.0 {
        edge_speed * offset / tuning.paddle_deadzone
    } else {
        0.0
    };

    if vx.abs() < MIN_SPEED_X {
        let direction = if vx != 0.0 {
            vx.signum()
        } else if ball.vel.x != 0.0 {
            ball.vel.x.signum()
        } else {
            1.0
        };
        let jitter = if tuning.floor_jitter > 0.0 {
            rng.random_range(0.0..tuning.floor_jitter)
        } else {
            0.0
        };
        vx = direction * MIN_SPEED_X * (1.0 + jitter);
    }

    let vy = (speed * speed - vx * vx).max(0.0).sqrt().max(MIN_SPEED_Y);
    ball.vel = Vec2::new(vx, -vy);
    ball.pos.y = paddle.y - ball.radius - 0.1;
}

/// Pick the reflection axis from where the ball center sits relative to the
/// brick: beside it reflects horizontally, above/below reflects vertically,
/// and a center inside the brick falls back to vertical.
pub fn brick_reflect_axis(ball_pos: Vec2, brick: &Rect) -> ReflectAxis {
    let d = ball_pos - brick.center();
    let half = brick.half_extents();
    match (d.x.abs() > half.x, d.y.abs() > half.y) {
        (true, true) => ReflectAxis::Both,
        (true, false) => ReflectAxis::Horizontal,
        _ => ReflectAxis::Vertical,
    }
}

/// Reflect off a brick and re-apply the speed floor
pub fn bounce_off_brick(ball: &mut Ball, brick: &Rect) {
    let d = ball.pos - brick.center();
    let half = brick.half_extents();
    match brick_reflect_axis(ball.pos, brick) {
        ReflectAxis::Horizontal => ball.vel.x = away(ball.vel.x, d.x),
        ReflectAxis::Both => {
            ball.vel.x = away(ball.vel.x, d.x);
            ball.vel.y = away(ball.vel.y, d.y);
        }
        ReflectAxis::Vertical => {
            if d.y.abs() > half.y {
                ball.vel.y = away(ball.vel.y, d.y);
            } else {
                ball.vel.y = -ball.vel.y;
            }
        }
    }
    ball.vel = apply_speed_floor(ball.vel);
}

/// Velocity component pointing along `side` (the ball's offset from the
/// surface), magnitude unchanged
#[inline]
fn away(v: f32, side: f32) -> f32 {
    if side == 0.0 { -v } else { v.abs().copysign(side) }
}
