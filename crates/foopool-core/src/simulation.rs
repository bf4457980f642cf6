use glam::Vec2;

use crate::ball::{Ball, Field};
use crate::config::PoolConfig;
use crate::error::ConfigError;
use crate::frame::Frame;
use crate::gesture::{GestureEvent, GestureMachine, TimerToken};
use crate::impulse::{Impulse, apply_impulse, compute_impulse};
use crate::integrator::{StepOutcome, step};
use crate::scene::{Scene, compose};

/// One table, one ball. Owns every piece of mutable state; the driver calls
/// into it from a single thread and each call runs to completion.
#[derive(Debug)]
pub struct Simulation {
    config: PoolConfig,
    field: Field,
    ball: Ball,
    gestures: GestureMachine,
    tick: u64,
}

impl Simulation {
    /// Validate `config` and place a resting ball at the centre of the field.
    pub fn new(config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::new(&config.field);
        let ball = Ball::at_center(&field, &config.ball);
        Ok(Self {
            config,
            field,
            ball,
            gestures: GestureMachine::new(),
            tick: 0,
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Number of physics steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The inactivity timeout the driver should currently have scheduled.
    pub fn pending_timeout(&self) -> Option<TimerToken> {
        self.gestures.pending_timeout()
    }

    pub fn press(&mut self, cursor: Vec2) -> GestureEvent {
        if !self.field.contains(cursor) {
            tracing::trace!(x = cursor.x, y = cursor.y, "Press outside field");
        }
        self.gestures.press(&mut self.ball, cursor)
    }

    pub fn pointer_move(&mut self, cursor: Vec2) -> GestureEvent {
        self.gestures.pointer_move(&mut self.ball, cursor)
    }

    /// Finish the current drag and strike the ball. Returns the impulse
    /// applied, or `None` when no drag was live.
    pub fn release(&mut self) -> Option<Impulse> {
        let GestureEvent::Released { drag_vector } = self.gestures.release(&mut self.ball) else {
            return None;
        };

        let impulse = compute_impulse(
            drag_vector,
            self.config.motion.force_scale,
            self.ball.weight,
            self.config.timing.dt(),
        );
        apply_impulse(&mut self.ball, &impulse);
        tracing::info!(
            tick = self.tick,
            fx = impulse.force.x,
            fy = impulse.force.y,
            vx = impulse.velocity.x,
            vy = impulse.velocity.y,
            "Ball struck"
        );
        Some(impulse)
    }

    pub fn drag_timeout(&mut self, token: TimerToken) -> GestureEvent {
        self.gestures.expire(&mut self.ball, token)
    }

    /// Advance the ball by one fixed timestep.
    pub fn update(&mut self) -> StepOutcome {
        self.tick += 1;
        let outcome = step(
            &mut self.ball,
            &self.field,
            self.config.timing.dt(),
            self.config.motion.stop_epsilon,
        );
        if outcome == StepOutcome::Stopped {
            tracing::info!(
                tick = self.tick,
                x = self.ball.position.x,
                y = self.ball.position.y,
                "Ball stopped"
            );
        }
        outcome
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.ball, self.tick)
    }

    pub fn scene(&self) -> Scene {
        compose(&self.frame(), &self.config.ball)
    }
}
