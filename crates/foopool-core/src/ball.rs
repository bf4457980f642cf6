use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{BallConfig, FieldConfig};

/// The table the ball rolls on. Bounds are informational only: nothing
/// keeps the ball inside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub friction_factor: f32,
}

impl Field {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            friction_factor: config.friction_factor,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Pointer relationship with the ball, as seen by the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Cursor inside the hover radius, no button held.
    Hovered,
    Dragging,
}

/// Motion as observed by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Stopped,
    Moving,
}

/// Where the drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragGrip {
    /// Pressed on the ball itself; the drag is measured from its centre.
    Body,
    /// Pressed in the hover ring; the drag is measured from the press point.
    Handle,
}

/// State of the single ball on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Holds the impulse acceleration right after a release, and the friction
    /// acceleration after every integrator step. The next step always
    /// overwrites whatever the impulse left here.
    pub acceleration: Vec2,
    pub weight: f32,
    pub radius: f32,
    pub hover_radius: f32,
    pub interaction: InteractionState,
    pub motion: MotionState,
    pub drag_anchor: Vec2,
    pub drag_vector: Vec2,
    pub grip: Option<DragGrip>,
}

impl Ball {
    pub fn new(position: Vec2, config: &BallConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            weight: config.weight,
            radius: config.radius,
            hover_radius: config.hover_radius,
            interaction: InteractionState::Idle,
            motion: MotionState::Stopped,
            drag_anchor: Vec2::ZERO,
            drag_vector: Vec2::ZERO,
            grip: None,
        }
    }

    /// Place a resting ball at the centre of `field`.
    pub fn at_center(field: &Field, config: &BallConfig) -> Self {
        Self::new(field.center(), config)
    }

    /// Whether `point` lies on the ball itself.
    pub fn touches(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }

    /// Whether `point` lies within the interactive zone.
    pub fn within_hover(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.hover_radius
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction == InteractionState::Dragging
    }

    pub fn is_moving(&self) -> bool {
        self.motion == MotionState::Moving
    }

    /// Whether a press could start a new drag right now.
    pub fn accepts_input(&self) -> bool {
        !self.is_moving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball() -> Ball {
        let field = Field::new(&FieldConfig::default());
        Ball::at_center(&field, &BallConfig::default())
    }

    #[test]
    fn starts_at_rest_in_the_middle() {
        let ball = ball();
        assert_eq!(ball.position, Vec2::new(320.0, 240.0));
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert_eq!(ball.acceleration, Vec2::ZERO);
        assert_eq!(ball.interaction, InteractionState::Idle);
        assert_eq!(ball.motion, MotionState::Stopped);
        assert!(ball.grip.is_none());
        assert!(ball.accepts_input());
    }

    #[test]
    fn hit_zones_are_inclusive() {
        let ball = ball();
        let edge = ball.position + Vec2::new(ball.radius, 0.0);
        let ring_edge = ball.position + Vec2::new(0.0, ball.hover_radius);

        assert!(ball.touches(edge));
        assert!(ball.within_hover(edge));
        assert!(!ball.touches(ring_edge));
        assert!(ball.within_hover(ring_edge));
        assert!(!ball.within_hover(ring_edge + Vec2::new(0.0, 0.5)));
    }

    #[test]
    fn field_contains_its_corners_only() {
        let field = Field::new(&FieldConfig::default());
        assert!(field.contains(Vec2::ZERO));
        assert!(field.contains(Vec2::new(640.0, 480.0)));
        assert!(!field.contains(Vec2::new(-1.0, 10.0)));
        assert!(!field.contains(Vec2::new(10.0, 481.0)));
    }
}
