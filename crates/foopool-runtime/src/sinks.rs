use std::io::Write;

use foopool_core::ball::MotionState;
use foopool_core::frame::Frame;
use foopool_core::scene::Scene;
use foopool_core::sink::{ReportSink, Surface};

/// Emits the rounded read-outs as structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingReportSink;

impl ReportSink for TracingReportSink {
    fn publish(&mut self, frame: &Frame) {
        let r = frame.readout();
        if frame.motion == MotionState::Moving {
            tracing::debug!(
                tick = frame.tick,
                x = r.x,
                y = r.y,
                sx = r.sx,
                sy = r.sy,
                ax = r.ax,
                ay = r.ay,
                "Ball moving"
            );
        } else {
            tracing::trace!(
                tick = frame.tick,
                x = r.x,
                y = r.y,
                state = ?frame.interaction,
                "Ball at rest"
            );
        }
    }
}

/// Writes one JSON object per frame, newline separated.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Frames successfully written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn publish(&mut self, frame: &Frame) {
        match self.write_frame(frame) {
            Ok(()) => self.written += 1,
            Err(e) => tracing::error!(tick = frame.tick, error = %e, "Failed to write frame"),
        }
    }
}

/// Headless surface: counts frames and logs the size of each display list.
#[derive(Debug, Default)]
pub struct TracingSurface {
    drawn: u64,
}

impl TracingSurface {
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl Surface for TracingSurface {
    fn render(&mut self, scene: &Scene) {
        self.drawn += 1;
        tracing::trace!(
            frame = self.drawn,
            circles = scene.circles(),
            lines = scene.lines(),
            "Scene drawn"
        );
    }
}
