//! Per-tick ball and brick motion
//!
//! One Euler step per tick, no substepping. Each ball is resolved against
//! walls, then the paddle, then at most one brick.

use glam::Vec2;

use super::collision::{bounce_off_brick, bounce_off_paddle, resolve_walls};
use super::geometry::circle_intersects_rect;
use super::powerup;
use super::state::{DAMAGE_FADE, GameState};
use crate::consts::*;

/// What happened to the balls during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub bricks_hit: u32,
    pub bricks_destroyed: u32,
    pub balls_lost: u32,
}

/// Slide every moving brick
pub fn move_bricks(state: &mut GameState) {
    for brick in state.bricks.iter_mut().filter(|b| b.active) {
        brick.slide();
    }
}

/// Advance all active balls one tick and resolve their collisions.
///
/// Balls that fall through the floor are dropped from `state.balls` once
/// every ball has moved. Destroyed bricks roll for a power-up afterwards, in
/// the order they were destroyed.
pub fn step_balls(state: &mut GameState) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let mut destroyed_at: Vec<Vec2> = Vec::new();

    let GameState {
        balls,
        bricks,
        paddle,
        tuning,
        rng,
        score,
        active_bricks,
        ..
    } = state;

    for ball in balls.iter_mut().filter(|b| b.active) {
        ball.pos += ball.vel;

        let walls = resolve_walls(ball, SCREEN_WIDTH, SCREEN_HEIGHT);
        if walls.bottom {
            ball.active = false;
            outcome.balls_lost += 1;
            continue;
        }

        // Only a descending ball can hit the paddle
        if ball.vel.y > 0.0 && circle_intersects_rect(ball.pos, ball.radius, &paddle.rect) {
            bounce_off_paddle(ball, &paddle.rect, tuning, rng);
        }

        let Some(idx) = bricks.first_hit(ball.pos, ball.radius) else {
            continue;
        };
        let brick = bricks.cell_mut(idx);
        outcome.bricks_hit += 1;
        brick.hits_remaining = brick.hits_remaining.saturating_sub(1);
        if brick.hits_remaining == 0 {
            brick.active = false;
            *score += BRICK_REWARD;
            *active_bricks = active_bricks.saturating_sub(1);
            destroyed_at.push(brick.rect.center());
            outcome.bricks_destroyed += 1;
        } else {
            brick.color = brick.color.faded(DAMAGE_FADE);
        }
        bounce_off_brick(ball, &brick.rect);
    }

    balls.retain(|b| b.active);

    for center in destroyed_at {
        powerup::try_spawn(state, center);
    }

    if outcome.bricks_destroyed > 0 {
        log::debug!(
            "{} brick(s) destroyed, {} left, score {}",
            outcome.bricks_destroyed,
            state.active_bricks,
            state.score
        );
    }

    outcome
}
