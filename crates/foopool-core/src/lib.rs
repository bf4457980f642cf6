pub mod ball;
pub mod config;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod impulse;
pub mod integrator;
pub mod scene;
pub mod simulation;
pub mod sink;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use glam::Vec2;

    use crate::config::PoolConfig;
    use crate::frame::Frame;
    use crate::impulse::Impulse;
    use crate::integrator::StepOutcome;
    use crate::scene::Scene;
    use crate::simulation::Simulation;
    use crate::sink::{ReportSink, Surface};

    /// A simulation with the default table and ball.
    pub fn default_simulation() -> Simulation {
        Simulation::new(PoolConfig::default()).expect("default config must validate")
    }

    /// Grab the ball at its centre, drag by `drag`, and let go.
    pub fn strike(sim: &mut Simulation, drag: Vec2) -> Option<Impulse> {
        let center = sim.ball().position;
        sim.press(center);
        sim.pointer_move(center + drag);
        sim.release()
    }

    /// Step until the ball comes to rest, returning the number of steps.
    /// Panics after `max_steps`.
    pub fn run_until_stopped(sim: &mut Simulation, max_steps: usize) -> usize {
        for n in 1..=max_steps {
            if sim.update() != StepOutcome::Moving {
                return n;
            }
        }
        panic!("ball still moving after {max_steps} steps");
    }

    /// Sink that keeps everything it is given.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub frames: Vec<Frame>,
        pub scenes: Vec<Scene>,
    }

    impl ReportSink for RecordingSink {
        fn publish(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    impl Surface for RecordingSink {
        fn render(&mut self, scene: &Scene) {
            self.scenes.push(scene.clone());
        }
    }

    // ================================================================
    // Motion contract checks shared by core and runtime tests
    // ================================================================

    /// Speed never grows from one frame to the next.
    pub fn assert_speed_non_increasing(frames: &[Frame]) {
        for pair in frames.windows(2) {
            let (a, b) = (pair[0].velocity.length(), pair[1].velocity.length());
            assert!(
                b <= a + 1e-3,
                "speed grew from {a} to {b} between ticks {} and {}",
                pair[0].tick,
                pair[1].tick
            );
        }
    }

    /// Once a frame shows the ball at rest, every later frame does too and
    /// the ball stays put.
    pub fn assert_rest_is_final(frames: &[Frame]) {
        let Some(first_rest) = frames
            .iter()
            .position(|f| f.velocity == Vec2::ZERO && f.acceleration == Vec2::ZERO)
        else {
            return;
        };
        let rest = &frames[first_rest];
        for f in &frames[first_rest..] {
            assert_eq!(f.velocity, Vec2::ZERO, "tick {}", f.tick);
            assert_eq!(f.acceleration, Vec2::ZERO, "tick {}", f.tick);
            assert_eq!(f.position, rest.position, "tick {}", f.tick);
        }
    }
}
