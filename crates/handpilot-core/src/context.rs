//! Per-frame evaluation context shared by all channels

use std::time::Duration;

use crate::config::GestureConfig;

/// Clock sample and configuration for one frame.
///
/// `now` is taken once per frame so every channel agrees on the current time.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Monotonic time since the run started
    pub now: Duration,
    pub config: &'a GestureConfig,
}

impl<'a> FrameContext<'a> {
    pub fn new(now: Duration, config: &'a GestureConfig) -> Self {
        Self { now, config }
    }

    /// Seconds elapsed since `then`, zero if `then` lies in the future.
    pub fn secs_since(&self, then: Duration) -> f64 {
        self.now.saturating_sub(then).as_secs_f64()
    }

    /// Whether more than `window` seconds have passed since `last`.
    /// An event that never happened is always outside the window.
    pub fn outside_window(&self, last: Option<Duration>, window: f64) -> bool {
        last.map(|t| self.secs_since(t) > window).unwrap_or(true)
    }
}
