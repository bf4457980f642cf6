use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, MotionState};

/// Kinematics produced by releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    pub force: Vec2,
    pub acceleration: Vec2,
    pub velocity: Vec2,
}

impl Impulse {
    pub const ZERO: Self = Self {
        force: Vec2::ZERO,
        acceleration: Vec2::ZERO,
        velocity: Vec2::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        self.force == Vec2::ZERO
    }
}

/// Convert a drag vector into an impulse.
///
/// The launch velocity is a single explicit step of the impulse
/// acceleration (`a * dt`), so `force_scale` and `dt` together set how hard
/// a given drag length hits. `weight` must be positive; the config layer
/// guarantees it.
///
/// A drag that is not finite, or large enough to overflow, yields
/// [`Impulse::ZERO`].
pub fn compute_impulse(drag_vector: Vec2, force_scale: f32, weight: f32, dt: f32) -> Impulse {
    let force = drag_vector * force_scale;
    let acceleration = force / weight;
    let velocity = acceleration * dt;
    if !(force.is_finite() && acceleration.is_finite() && velocity.is_finite()) {
        tracing::warn!(
            dx = drag_vector.x,
            dy = drag_vector.y,
            "Ignoring non-finite impulse"
        );
        return Impulse::ZERO;
    }
    Impulse {
        force,
        acceleration,
        velocity,
    }
}

/// Overwrite the ball's kinematics with `impulse`.
///
/// A zero impulse leaves the ball stopped so input stays enabled.
pub fn apply_impulse(ball: &mut Ball, impulse: &Impulse) {
    ball.acceleration = impulse.acceleration;
    ball.velocity = impulse.velocity;
    ball.motion = if impulse.is_zero() {
        MotionState::Stopped
    } else {
        MotionState::Moving
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Field;
    use crate::config::{BallConfig, FieldConfig};

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).abs().max_element() < 0.01,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn reference_drag() {
        let impulse = compute_impulse(Vec2::new(50.0, 0.0), 8.0, 0.21, 0.033);

        assert_eq!(impulse.force, Vec2::new(400.0, 0.0));
        assert_close(impulse.acceleration, Vec2::new(1904.76, 0.0));
        assert_close(impulse.velocity, Vec2::new(62.86, 0.0));
    }

    #[test]
    fn diagonal_drag_keeps_direction() {
        let impulse = compute_impulse(Vec2::new(-30.0, 40.0), 8.0, 0.21, 0.033);
        let dir = impulse.velocity.normalize();
        assert_close(dir, Vec2::new(-0.6, 0.8));
    }

    #[test]
    fn zero_drag_is_zero_impulse() {
        let impulse = compute_impulse(Vec2::ZERO, 8.0, 0.21, 0.033);
        assert!(impulse.is_zero());
        assert_eq!(impulse.acceleration, Vec2::ZERO);
        assert_eq!(impulse.velocity, Vec2::ZERO);
    }

    #[test]
    fn apply_overwrites_previous_kinematics() {
        let field = Field::new(&FieldConfig::default());
        let mut ball = Ball::at_center(&field, &BallConfig::default());
        ball.velocity = Vec2::new(-5.0, 5.0);
        ball.acceleration = Vec2::new(1.0, 1.0);

        let impulse = compute_impulse(Vec2::new(0.0, 10.0), 8.0, 0.21, 0.033);
        apply_impulse(&mut ball, &impulse);

        assert_eq!(ball.velocity, impulse.velocity);
        assert_eq!(ball.acceleration, impulse.acceleration);
        assert_eq!(ball.motion, MotionState::Moving);
    }

    #[test]
    fn zero_impulse_keeps_ball_stopped() {
        let field = Field::new(&FieldConfig::default());
        let mut ball = Ball::at_center(&field, &BallConfig::default());

        apply_impulse(&mut ball, &compute_impulse(Vec2::ZERO, 8.0, 0.21, 0.033));

        assert_eq!(ball.motion, MotionState::Stopped);
        assert!(ball.accepts_input());
    }

    #[test]
    fn non_finite_drag_is_zero_impulse() {
        for drag in [
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(0.0, f32::INFINITY),
            Vec2::new(f32::NEG_INFINITY, 3.0),
            Vec2::new(1e37, 0.0),
        ] {
            let impulse = compute_impulse(drag, 8.0, 0.21, 0.033);
            assert_eq!(impulse, Impulse::ZERO, "drag {drag:?}");
        }
    }

    #[test]
    fn huge_finite_drag_still_strikes() {
        let impulse = compute_impulse(Vec2::new(1e30, 0.0), 8.0, 0.21, 0.033);
        assert!(!impulse.is_zero());
        assert!(impulse.velocity.is_finite());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn impulse_is_deterministic(
                dx in -400.0f32..400.0,
                dy in -400.0f32..400.0,
                scale in 0.5f32..20.0,
                weight in 0.05f32..5.0,
                dt in 0.005f32..0.1,
            ) {
                let drag = Vec2::new(dx, dy);
                let a = compute_impulse(drag, scale, weight, dt);
                let b = compute_impulse(drag, scale, weight, dt);
                prop_assert_eq!(a, b);
            }

            #[test]
            fn velocity_is_parallel_to_drag(
                dx in -400.0f32..400.0,
                dy in -400.0f32..400.0,
            ) {
                let drag = Vec2::new(dx, dy);
                prop_assume!(drag.length() > 1.0);
                let impulse = compute_impulse(drag, 8.0, 0.21, 0.033);
                let cross = drag.perp_dot(impulse.velocity) / (drag.length() * impulse.velocity.length());
                prop_assert!(cross.abs() < 1e-4, "cross = {}", cross);
                prop_assert!(drag.dot(impulse.velocity) > 0.0);
            }

            #[test]
            fn velocity_scales_with_drag(
                dx in -200.0f32..200.0,
                dy in -200.0f32..200.0,
                k in 0.0f32..10.0,
            ) {
                let drag = Vec2::new(dx, dy);
                let base = compute_impulse(drag, 8.0, 0.21, 0.033);
                let scaled = compute_impulse(drag * k, 8.0, 0.21, 0.033);
                let expected = base.velocity * k;
                let tolerance = 1e-4 * expected.length().max(1.0);
                prop_assert!(
                    (scaled.velocity - expected).length() <= tolerance,
                    "k = {}, got {:?}, expected {:?}", k, scaled.velocity, expected
                );
            }
        }
    }
}
