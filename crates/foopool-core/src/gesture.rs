//! Pointer gesture state machine: hover, press, drag, release and the
//! inactivity timeout that cancels an abandoned drag.
//!
//! Every handler is a no-op while the ball is still rolling from a previous
//! strike. The machine never touches the ball's kinematics; a release only
//! hands the final drag vector back to the caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, DragGrip, InteractionState};

/// Handle to one armed inactivity timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// Tracks the single pending drag timeout.
///
/// Arming always issues a fresh token and invalidates every older one, so a
/// timeout scheduled for an earlier move can never cancel a later drag.
#[derive(Debug, Default)]
pub struct DragTimer {
    generation: u64,
    armed: Option<TimerToken>,
}

impl DragTimer {
    pub fn arm(&mut self) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.armed = Some(token);
        token
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// The token whose expiry would currently cancel the drag, if any.
    pub fn pending(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Consume `token` if it is the armed one.
    fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

/// What a pointer event did to the gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Nothing changed (input disabled, stale event, or same hover state).
    Noop,
    HoverChanged(InteractionState),
    DragStarted { anchor: Vec2, grip: DragGrip },
    Dragged { drag_vector: Vec2 },
    /// The drag completed; the caller turns `drag_vector` into an impulse.
    Released { drag_vector: Vec2 },
    /// The drag timed out and was discarded.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct GestureMachine {
    timer: DragTimer,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_timeout(&self) -> Option<TimerToken> {
        self.timer.pending()
    }

    /// Button pressed at `cursor`.
    pub fn press(&mut self, ball: &mut Ball, cursor: Vec2) -> GestureEvent {
        if !cursor.is_finite()
            || !ball.accepts_input()
            || ball.is_dragging()
            || !ball.within_hover(cursor)
        {
            return GestureEvent::Noop;
        }

        let (anchor, grip) = if ball.touches(cursor) {
            (ball.position, DragGrip::Body)
        } else {
            (cursor, DragGrip::Handle)
        };

        ball.interaction = InteractionState::Dragging;
        ball.drag_anchor = anchor;
        ball.drag_vector = Vec2::ZERO;
        ball.grip = Some(grip);
        self.timer.arm();

        tracing::debug!(?grip, x = anchor.x, y = anchor.y, "Drag started");
        GestureEvent::DragStarted { anchor, grip }
    }

    /// Pointer moved to `cursor`, button held or not.
    pub fn pointer_move(&mut self, ball: &mut Ball, cursor: Vec2) -> GestureEvent {
        if !cursor.is_finite() || !ball.accepts_input() {
            return GestureEvent::Noop;
        }

        if ball.is_dragging() {
            self.timer.cancel();
            ball.drag_vector = cursor - ball.drag_anchor;
            self.timer.arm();
            return GestureEvent::Dragged {
                drag_vector: ball.drag_vector,
            };
        }

        let next = if ball.within_hover(cursor) {
            InteractionState::Hovered
        } else {
            InteractionState::Idle
        };
        if next == ball.interaction {
            return GestureEvent::Noop;
        }
        ball.interaction = next;
        tracing::trace!(state = ?next, "Hover changed");
        GestureEvent::HoverChanged(next)
    }

    /// Button released. Only a drag that is still live produces an impulse.
    pub fn release(&mut self, ball: &mut Ball) -> GestureEvent {
        if !ball.is_dragging() {
            return GestureEvent::Noop;
        }

        self.timer.cancel();
        ball.interaction = InteractionState::Idle;
        ball.grip = None;

        let drag_vector = ball.drag_vector;
        tracing::debug!(dx = drag_vector.x, dy = drag_vector.y, "Drag released");
        GestureEvent::Released { drag_vector }
    }

    /// The inactivity timeout identified by `token` elapsed.
    pub fn expire(&mut self, ball: &mut Ball, token: TimerToken) -> GestureEvent {
        if !self.timer.fire(token) {
            return GestureEvent::Noop;
        }
        if !ball.is_dragging() {
            return GestureEvent::Noop;
        }

        ball.interaction = InteractionState::Idle;
        ball.grip = None;
        ball.drag_vector = Vec2::ZERO;
        tracing::debug!("Drag cancelled after inactivity");
        GestureEvent::Cancelled
    }
}
