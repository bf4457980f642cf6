use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, DragGrip, InteractionState, MotionState};

/// Snapshot of the ball published after every physics step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub interaction: InteractionState,
    pub motion: MotionState,
    pub drag_anchor: Vec2,
    pub drag_vector: Vec2,
    pub grip: Option<DragGrip>,
}

impl Frame {
    pub fn capture(ball: &Ball, tick: u64) -> Self {
        Self {
            tick,
            position: ball.position,
            velocity: ball.velocity,
            acceleration: ball.acceleration,
            interaction: ball.interaction,
            motion: ball.motion,
            drag_anchor: ball.drag_anchor,
            drag_vector: ball.drag_vector,
            grip: ball.grip,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction == InteractionState::Dragging
    }

    pub fn readout(&self) -> Readout {
        Readout {
            x: round2(self.position.x),
            y: round2(self.position.y),
            sx: round2(self.velocity.x),
            sy: round2(self.velocity.y),
            ax: round2(self.acceleration.x),
            ay: round2(self.acceleration.y),
        }
    }
}

/// The six numeric read-outs shown next to the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub x: f32,
    pub y: f32,
    pub sx: f32,
    pub sy: f32,
    pub ax: f32,
    pub ay: f32,
}

/// Round to two decimals, halves toward positive infinity.
pub fn round2(v: f32) -> f32 {
    (v * 100.0 + 0.5).floor() / 100.0
}
