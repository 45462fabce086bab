//! Power-up spawning, falling and effects

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::apply_speed_floor;
use super::state::{Ball, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Roll for a power-up at a destroyed brick's center
pub fn try_spawn(state: &mut GameState, center: Vec2) -> Option<PowerUpKind> {
    let chance = state.tuning.power_up_chance.clamp(0.0, 1.0);
    if !state.rng.random_bool(chance) {
        return None;
    }
    let kind = *PowerUpKind::ALL.choose(&mut state.rng)?;
    log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, center.x, center.y);
    state.power_ups.push(PowerUp::new(kind, center));
    Some(kind)
}

/// Drop every capsule, apply the ones the paddle caught, purge the rest.
/// Returns the kinds caught this tick, in catch order.
pub fn update(state: &mut GameState) -> Vec<PowerUpKind> {
    let fall = state.tuning.power_up_fall_speed;
    let paddle = state.paddle.rect;
    let mut caught = Vec::new();

    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        power_up.rect.y += fall;
        if power_up.rect.intersects(&paddle) {
            power_up.active = false;
            caught.push(power_up.kind);
        } else if power_up.rect.y > SCREEN_HEIGHT {
            power_up.active = false;
        }
    }

    state.power_ups.retain(|p| p.active);

    for &kind in &caught {
        apply(state, kind);
    }
    caught
}

/// Apply a caught power-up's effect
pub fn apply(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::EnlargePaddle => {
            let current = state.paddle.rect.width;
            let cap = (PADDLE_BASE_WIDTH * state.tuning.enlarge_cap).max(current);
            let width = (current * state.tuning.enlarge_factor).min(cap);
            state.paddle.set_width(width);
        }
        PowerUpKind::SpeedUp => {
            let factor = state.tuning.speed_up_factor;
            for ball in state.balls.iter_mut().filter(|b| b.active) {
                ball.vel = apply_speed_floor(ball.vel * factor);
            }
        }
        PowerUpKind::ExtraLife => {
            state.lives = state.lives.saturating_add(1);
        }
        PowerUpKind::MultiBall => {
            let Some(source) = state.balls.iter().find(|b| b.active).cloned() else {
                return;
            };
            let up = -source.vel.y.abs();
            state.balls.push(Ball {
                vel: Vec2::new(-source.vel.x, up),
                ..source.clone()
            });
            state.balls.push(Ball {
                vel: Vec2::new(source.vel.x, up),
                ..source
            });
        }
    }
}
