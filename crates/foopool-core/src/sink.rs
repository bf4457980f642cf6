use crate::frame::Frame;
use crate::scene::Scene;

/// Receives the ball state after every physics step.
///
/// Sinks only observe; nothing they do feeds back into the simulation.
pub trait ReportSink {
    fn publish(&mut self, frame: &Frame);
}

/// Receives a display list once per draw period.
pub trait Surface {
    fn render(&mut self, scene: &Scene);
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn publish(&mut self, frame: &Frame) {
        (**self).publish(frame);
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn render(&mut self, scene: &Scene) {
        (**self).render(scene);
    }
}

/// Fan a frame out to several sinks, in order.
impl<S: ReportSink> ReportSink for [S] {
    fn publish(&mut self, frame: &Frame) {
        for sink in self.iter_mut() {
            sink.publish(frame);
        }
    }
}

impl<S: ReportSink> ReportSink for Vec<S> {
    fn publish(&mut self, frame: &Frame) {
        self.as_mut_slice().publish(frame);
    }
}
