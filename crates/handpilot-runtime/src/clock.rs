//! Frame timestamps

use std::time::{Duration, Instant};

use handpilot_core::LandmarkFrame;

/// Turns frames into monotonic time since the run started.
#[derive(Debug, Clone)]
pub enum FrameClock {
    /// Time of arrival
    Wall { started: Instant },
    /// Timestamps recorded in the frames, relative to the first one.
    /// Frames without a timestamp reuse the last known time.
    Recorded { first: Option<f64>, last: Duration },
}

impl FrameClock {
    pub fn wall() -> Self {
        FrameClock::Wall {
            started: Instant::now(),
        }
    }

    pub fn recorded() -> Self {
        FrameClock::Recorded {
            first: None,
            last: Duration::ZERO,
        }
    }

    /// Time for `frame`
    pub fn stamp(&mut self, frame: &LandmarkFrame) -> Duration {
        match self {
            FrameClock::Wall { started } => started.elapsed(),
            FrameClock::Recorded { first, last } => {
                if let Some(ts) = frame.timestamp.filter(|t| t.is_finite()) {
                    let origin = *first.get_or_insert(ts);
                    let offset = Duration::try_from_secs_f64(ts - origin).unwrap_or(Duration::ZERO);
                    *last = (*last).max(offset);
                }
                *last
            }
        }
    }

    /// Time for an event that is not tied to a frame
    pub fn now(&self) -> Duration {
        match self {
            FrameClock::Wall { started } => started.elapsed(),
            FrameClock::Recorded { last, .. } => *last,
        }
    }
}
