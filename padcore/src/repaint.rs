//! Frame scheduling.
//!
//! egui only repaints when poked, so anything time-driven (the
//! autosave timer) has to ask for a wakeup. Callers register the
//! soonest deadline they care about during the frame and
//! [`FrameScheduler::end_frame`] turns it into a single
//! `request_repaint_after` call.

use std::time::Duration;

#[derive(Default)]
pub struct FrameScheduler {
    next_wake: Option<Duration>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a repaint no later than `delay` from now. The earliest
    /// request across the frame wins.
    pub fn wake_within(&mut self, delay: Duration) {
        self.next_wake = Some(self.next_wake.map_or(delay, |d| d.min(delay)));
    }

    /// Flush the pending wakeup, if any. Call once at the end of
    /// `update`.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if let Some(delay) = self.next_wake.take() {
            ctx.request_repaint_after(delay);
        }
    }
}
