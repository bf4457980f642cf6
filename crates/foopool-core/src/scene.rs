//! Display list for one drawn frame. Building it is pure; a
//! [`Surface`](crate::sink::Surface) turns it into pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::{DragGrip, InteractionState};
use crate::config::BallConfig;
use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Ball colour when not grabbed.
pub const BALL_FREE: Color = Color::rgb(255, 94, 94);
/// Ball colour while being dragged.
pub const BALL_CLICKED: Color = Color::rgb(121, 125, 242);
/// Fill of the interactive zone.
pub const HOVER_ZONE: Color = Color::rgb(150, 255, 150);

/// Length of the arrowhead strokes on the direction cross.
const ARROW_HEAD: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

const OUTLINE: Stroke = Stroke {
    color: Color::BLACK,
    width: 2.0,
};
const AXIS: Stroke = Stroke {
    color: Color::BLACK,
    width: 1.0,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands.len() - self.circles()
    }
}

/// Rotation that turns the "up" axis (0, -1) toward `drag_vector`, in
/// y-down field coordinates. `None` for a zero vector.
pub fn indicator_angle(drag_vector: Vec2) -> Option<f32> {
    if drag_vector == Vec2::ZERO {
        return None;
    }
    Some(drag_vector.x.atan2(-drag_vector.y))
}

/// Build the display list for `frame`.
///
/// Draw order: hover zone, direction cross, ball, drag line.
pub fn compose(frame: &Frame, ball: &BallConfig) -> Scene {
    let mut commands = Vec::new();

    let handle_drag = frame.is_dragging() && frame.grip == Some(DragGrip::Handle);
    let show_zone = frame.interaction == InteractionState::Hovered || handle_drag;

    if show_zone {
        commands.push(DrawCommand::Circle {
            center: frame.position,
            radius: ball.hover_radius,
            fill: HOVER_ZONE,
            stroke: None,
        });

        if handle_drag {
            let angle = indicator_angle(frame.drag_vector).unwrap_or(0.0);
            push_cross(&mut commands, frame.position, ball.hover_radius, angle);
        }
    }

    let fill = if frame.is_dragging() {
        BALL_CLICKED
    } else {
        BALL_FREE
    };
    commands.push(DrawCommand::Circle {
        center: frame.position,
        radius: ball.radius,
        fill,
        stroke: Some(OUTLINE),
    });

    if frame.is_dragging() {
        commands.push(DrawCommand::Line {
            from: frame.drag_anchor,
            to: frame.drag_anchor + frame.drag_vector,
            stroke: OUTLINE,
        });
    }

    Scene { commands }
}

/// Two arrowed axes through the ball centre; the vertical one points along
/// the drag.
fn push_cross(commands: &mut Vec<DrawCommand>, center: Vec2, r: f32, angle: f32) {
    let rot = Vec2::from_angle(angle);
    let at = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));
    let h = ARROW_HEAD;

    let segments = [
        // forward axis and its arrowhead
        (at(0.0, r), at(0.0, -r)),
        (at(0.0, -r), at(-h, -r + h)),
        (at(0.0, -r), at(h, -r + h)),
        // lateral axis and its arrowhead
        (at(-r, 0.0), at(r, 0.0)),
        (at(r, 0.0), at(r - h, -h)),
        (at(r, 0.0), at(r - h, h)),
    ];
    commands.extend(segments.into_iter().map(|(from, to)| DrawCommand::Line {
        from,
        to,
        stroke: AXIS,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{Ball, Field};
    use crate::config::FieldConfig;

    fn frame_with(edit: impl FnOnce(&mut Ball)) -> Frame {
        let field = Field::new(&FieldConfig::default());
        let mut ball = Ball::at_center(&field, &BallConfig::default());
        edit(&mut ball);
        Frame::capture(&ball, 0)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn idle_ball_is_a_single_circle() {
        let scene = compose(&frame_with(|_| {}), &BallConfig::default());
        assert_eq!(scene.commands.len(), 1);
        assert!(matches!(
            scene.commands[0],
            DrawCommand::Circle {
                fill: BALL_FREE,
                radius: 10.0,
                ..
            }
        ));
    }

    #[test]
    fn hovered_ball_shows_zone() {
        let frame = frame_with(|b| b.interaction = InteractionState::Hovered);
        let scene = compose(&frame, &BallConfig::default());
        assert_eq!(scene.circles(), 2);
        assert!(matches!(
            scene.commands[0],
            DrawCommand::Circle {
                fill: HOVER_ZONE,
                radius: 40.0,
                ..
            }
        ));
    }

    #[test]
    fn body_drag_draws_ball_and_drag_line_only() {
        let frame = frame_with(|b| {
            b.interaction = InteractionState::Dragging;
            b.grip = Some(DragGrip::Body);
            b.drag_anchor = b.position;
            b.drag_vector = Vec2::new(30.0, 0.0);
        });
        let scene = compose(&frame, &BallConfig::default());

        assert_eq!(scene.circles(), 1);
        assert_eq!(scene.lines(), 1);
        assert!(matches!(
            scene.commands[0],
            DrawCommand::Circle {
                fill: BALL_CLICKED,
                ..
            }
        ));
        let DrawCommand::Line { from, to, .. } = scene.commands[1] else {
            panic!("expected drag line");
        };
        assert_eq!(from, frame.position);
        assert_eq!(to, frame.position + Vec2::new(30.0, 0.0));
    }

    #[test]
    fn handle_drag_adds_zone_and_cross() {
        let frame = frame_with(|b| {
            b.interaction = InteractionState::Dragging;
            b.grip = Some(DragGrip::Handle);
            b.drag_anchor = b.position + Vec2::new(20.0, 0.0);
            b.drag_vector = Vec2::new(0.0, -15.0);
        });
        let scene = compose(&frame, &BallConfig::default());

        // zone + ball, six cross segments + drag line
        assert_eq!(scene.circles(), 2);
        assert_eq!(scene.lines(), 7);
    }

    #[test]
    fn handle_drag_without_movement_draws_upright_cross() {
        let frame = frame_with(|b| {
            b.interaction = InteractionState::Dragging;
            b.grip = Some(DragGrip::Handle);
        });
        let scene = compose(&frame, &BallConfig::default());
        assert_eq!(scene.lines(), 7);

        let DrawCommand::Line { to, .. } = scene.commands[1] else {
            panic!("expected forward axis");
        };
        assert!(close(to, frame.position + Vec2::new(0.0, -40.0)), "tip at {to:?}");
    }

    #[test]
    fn cross_points_along_drag() {
        let frame = frame_with(|b| {
            b.interaction = InteractionState::Dragging;
            b.grip = Some(DragGrip::Handle);
            b.drag_vector = Vec2::new(10.0, 0.0);
        });
        let scene = compose(&frame, &BallConfig::default());

        let DrawCommand::Line { to, .. } = scene.commands[1] else {
            panic!("expected forward axis");
        };
        assert!(close(to, frame.position + Vec2::new(40.0, 0.0)), "tip at {to:?}");
    }

    #[test]
    fn indicator_angle_quadrants() {
        use std::f32::consts::{FRAC_PI_2, PI};
        assert_eq!(indicator_angle(Vec2::ZERO), None);
        assert!((indicator_angle(Vec2::new(0.0, -1.0)).unwrap()).abs() < 1e-6);
        assert!((indicator_angle(Vec2::new(1.0, 0.0)).unwrap() - FRAC_PI_2).abs() < 1e-6);
        assert!((indicator_angle(Vec2::new(0.0, 1.0)).unwrap().abs() - PI).abs() < 1e-6);
    }
}
