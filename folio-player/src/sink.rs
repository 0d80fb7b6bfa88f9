//! Output side of the host: where frames and ambient highlights go

use std::sync::Arc;

use folio_core::{AmbientStep, RenderFrame};
use parking_lot::Mutex;

/// Implemented by the UI layer that draws the paged strip.
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);

    /// Bring `step.sub_index` of item `step.item` forward.
    fn highlight(&mut self, _step: &AmbientStep) {}
}

/// Everything a [`RecordingSink`] has seen, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Frame(RenderFrame),
    Highlight(AmbientStep),
}

/// Sink that records into a shared buffer; handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Frame(f) => Some(*f),
                SinkEvent::Highlight(_) => None,
            })
            .collect()
    }

    pub fn highlights(&self) -> Vec<AmbientStep> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Highlight(h) => Some(*h),
                SinkEvent::Frame(_) => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.frames().last().copied()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &RenderFrame) {
        self.events.lock().push(SinkEvent::Frame(*frame));
    }

    fn highlight(&mut self, step: &AmbientStep) {
        self.events.lock().push(SinkEvent::Highlight(*step));
    }
}
