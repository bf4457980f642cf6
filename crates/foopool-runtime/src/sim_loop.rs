use std::pin::Pin;
use std::time::Duration;

use glam::Vec2;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep};

use foopool_core::gesture::{GestureEvent, TimerToken};
use foopool_core::impulse::Impulse;
use foopool_core::integrator::StepOutcome;
use foopool_core::simulation::Simulation;
use foopool_core::sink::{ReportSink, Surface};

/// Pointer input, already in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    Press(Vec2),
    Move(Vec2),
    Release,
    Shutdown,
}

/// Notable transitions, sent from the loop to whoever drives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimBroadcast {
    DragStarted { anchor: Vec2 },
    Struck(Impulse),
    DragCancelled,
    Stopped { tick: u64, position: Vec2 },
    /// The loop has exited.
    Ended,
}

/// The single armed inactivity timeout. Replacing it drops the old sleep,
/// so only the most recently scheduled timeout can ever fire.
type TimeoutSlot = Option<(TimerToken, Pin<Box<Sleep>>)>;

/// Drive `sim` until a [`InputCommand::Shutdown`] arrives or the command
/// channel closes.
///
/// Draw and physics callbacks run on independent fixed-period intervals;
/// input and the drag timeout share the same loop, so every handler runs
/// to completion before the next one starts.
pub async fn run_simulation_loop<R, S>(
    sim: &mut Simulation,
    report: &mut R,
    surface: &mut S,
    mut cmd_rx: mpsc::UnboundedReceiver<InputCommand>,
    broadcast_tx: mpsc::UnboundedSender<SimBroadcast>,
) where
    R: ReportSink + ?Sized,
    S: Surface + ?Sized,
{
    let timing = sim.config().timing.clone();
    let mut draw = fixed_interval(timing.draw_period());
    let mut update = fixed_interval(timing.update_period());
    let drag_timeout = timing.drag_timeout();
    let mut timeout: TimeoutSlot = None;

    tracing::info!(
        draw_ms = timing.draw_period_ms,
        update_ms = timing.update_period_ms,
        "Simulation loop started"
    );

    loop {
        tokio::select! {
            _ = draw.tick() => {
                surface.render(&sim.scene());
            }
            _ = update.tick() => {
                let outcome = sim.update();
                let frame = sim.frame();
                report.publish(&frame);
                if outcome == StepOutcome::Stopped {
                    let _ = broadcast_tx.send(SimBroadcast::Stopped {
                        tick: frame.tick,
                        position: frame.position,
                    });
                }
            }
            token = expire(&mut timeout) => {
                if sim.drag_timeout(token) == GestureEvent::Cancelled {
                    let _ = broadcast_tx.send(SimBroadcast::DragCancelled);
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(InputCommand::Shutdown) | None => break,
                    Some(cmd) => handle_input(sim, cmd, &broadcast_tx),
                }
            }
        }

        sync_timeout(sim, &mut timeout, drag_timeout);
    }

    tracing::info!(tick = sim.tick(), "Simulation loop stopped");
    let _ = broadcast_tx.send(SimBroadcast::Ended);
}

fn fixed_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

fn handle_input(
    sim: &mut Simulation,
    cmd: InputCommand,
    broadcast_tx: &mpsc::UnboundedSender<SimBroadcast>,
) {
    match cmd {
        InputCommand::Press(at) => {
            if let GestureEvent::DragStarted { anchor, .. } = sim.press(at) {
                let _ = broadcast_tx.send(SimBroadcast::DragStarted { anchor });
            }
        },
        InputCommand::Move(at) => {
            sim.pointer_move(at);
        },
        InputCommand::Release => {
            if let Some(impulse) = sim.release() {
                let _ = broadcast_tx.send(SimBroadcast::Struck(impulse));
            }
        },
        InputCommand::Shutdown => {},
    }
}

/// Resolve when the armed timeout elapses; never resolves when none is armed.
async fn expire(slot: &mut TimeoutSlot) -> TimerToken {
    match slot {
        Some((token, sleep)) => {
            sleep.as_mut().await;
            *token
        },
        None => std::future::pending().await,
    }
}

/// Make the slot match the timeout the simulation wants armed.
fn sync_timeout(sim: &Simulation, slot: &mut TimeoutSlot, duration: Duration) {
    let wanted = sim.pending_timeout();
    let armed = slot.as_ref().map(|(token, _)| *token);
    if wanted == armed {
        return;
    }
    *slot = wanted.map(|token| {
        let deadline = Instant::now() + duration;
        (token, Box::pin(tokio::time::sleep_until(deadline)))
    });
}
