use std::process::ExitCode;

use glam::Vec2;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use foopool_core::config::PoolConfig;
use foopool_core::simulation::Simulation;
use foopool_core::sink::ReportSink;
use foopool_runtime::sim_loop::{InputCommand, SimBroadcast, run_simulation_loop};
use foopool_runtime::sinks::{JsonLinesSink, TracingReportSink, TracingSurface};

const DEFAULT_DRAG: Vec2 = Vec2::new(50.0, 0.0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let drag = drag_from_args(std::env::args());

    let mut sim = match Simulation::new(PoolConfig::load()) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        },
    };

    let mut report: Vec<Box<dyn ReportSink>> = vec![
        Box::new(TracingReportSink),
        Box::new(JsonLinesSink::new(std::io::stdout())),
    ];
    let mut surface = TracingSurface::default();

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, mut broadcast_rx) = mpsc::unbounded_channel();

    let start = sim.ball().position;
    tracing::info!(dx = drag.x, dy = drag.y, "FooPool starting");

    // One scripted stroke: grab the ball, pull, let go, wait for it to settle.
    let driver = async move {
        let _ = cmd_tx.send(InputCommand::Press(start));
        let _ = cmd_tx.send(InputCommand::Move(start + drag));
        let _ = cmd_tx.send(InputCommand::Release);

        while let Some(event) = broadcast_rx.recv().await {
            match event {
                SimBroadcast::Struck(impulse) if impulse.is_zero() => break,
                SimBroadcast::Stopped { tick, position } => {
                    tracing::info!(tick, x = position.x, y = position.y, "Ball came to rest");
                    break;
                },
                SimBroadcast::DragCancelled | SimBroadcast::Ended => break,
                _ => {},
            }
        }
        let _ = cmd_tx.send(InputCommand::Shutdown);
    };

    tokio::join!(
        run_simulation_loop(&mut sim, &mut report, &mut surface, cmd_rx, broadcast_tx),
        driver
    );

    tracing::info!(ticks = sim.tick(), frames_drawn = surface.drawn(), "FooPool finished");
    ExitCode::SUCCESS
}

/// The `--drag=DX,DY` flag, or [`DEFAULT_DRAG`] when absent or malformed.
fn drag_from_args(mut args: impl Iterator<Item = String>) -> Vec2 {
    let Some(raw) = args.find_map(|a| a.strip_prefix("--drag=").map(String::from)) else {
        return DEFAULT_DRAG;
    };
    parse_drag(&raw).unwrap_or_else(|| {
        tracing::warn!(value = %raw, "Invalid --drag, expected DX,DY; using default");
        DEFAULT_DRAG
    })
}

/// Parse `DX,DY`. Both components must be finite.
fn parse_drag(s: &str) -> Option<Vec2> {
    let (x, y) = s.split_once(',')?;
    let drag = Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?);
    drag.is_finite().then_some(drag)
}
