use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, Field, MotionState};

/// Result of advancing the ball by one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The ball was already at rest and stays there.
    Idle,
    /// Still moving after this step.
    Moving,
    /// Came to rest during this step; input is accepted again.
    Stopped,
}

/// Advance the ball by `dt` seconds under linear friction.
///
/// Friction is the only force after release, so any impulse acceleration
/// still on the ball is replaced here. Once speed and acceleration on both
/// axes are below `epsilon` they are snapped to exactly zero; linear drag
/// only decays asymptotically and would otherwise never reach it.
pub fn step(ball: &mut Ball, field: &Field, dt: f32, epsilon: f32) -> StepOutcome {
    let was_moving = ball.motion == MotionState::Moving;

    let friction = -ball.velocity * field.friction_factor;
    ball.acceleration = friction / ball.weight;
    ball.velocity += ball.acceleration * dt;

    if !(ball.velocity.is_finite() && ball.acceleration.is_finite()) {
        tracing::warn!(
            vx = ball.velocity.x,
            vy = ball.velocity.y,
            "Non-finite motion, stopping ball"
        );
        return settle(ball, was_moving);
    }

    ball.position += ball.velocity * dt;

    if below(ball.velocity, epsilon) && below(ball.acceleration, epsilon) {
        settle(ball, was_moving)
    } else {
        ball.motion = MotionState::Moving;
        StepOutcome::Moving
    }
}

fn settle(ball: &mut Ball, was_moving: bool) -> StepOutcome {
    ball.velocity = Vec2::ZERO;
    ball.acceleration = Vec2::ZERO;
    ball.motion = MotionState::Stopped;
    if was_moving {
        StepOutcome::Stopped
    } else {
        StepOutcome::Idle
    }
}

fn below(v: Vec2, epsilon: f32) -> bool {
    v.x.abs() < epsilon && v.y.abs() < epsilon
}
