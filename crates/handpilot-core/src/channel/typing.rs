//! Zone typing: finger count plus fingertip zone selects a symbol

use std::time::Duration;

use tracing::debug;

use super::state::{ChannelPhase, ChannelState};
use crate::context::FrameContext;
use crate::event::GestureEvent;
use crate::layout::Zone;
use crate::mode::TypingMode;

/// Candidate gesture: finger count and zone
type Candidate = (u8, Option<Zone>);

/// Confirms a (count, zone) pair after it holds steady, then emits its symbol once.
///
/// Armed: counting consecutive frames of the same pair.
/// Active: confirmed and latched until the pair changes.
#[derive(Debug, Clone, Default)]
pub struct ZoneTypingChannel {
    state: ChannelState,
    candidate: Option<Candidate>,
    run: u32,
    last_emit: Option<Duration>,
}

impl ZoneTypingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChannelPhase {
        self.state.phase()
    }

    /// Consecutive frames the current pair has held
    pub fn run_length(&self) -> u32 {
        self.run
    }

    /// Last typing or mode emission, shared with the mode switch cooldown
    pub fn last_emission(&self) -> Option<Duration> {
        self.last_emit
    }

    pub fn note_emission(&mut self, now: Duration) {
        self.last_emit = Some(now);
    }

    /// `suppressed` lets the gesture confirm and latch without emitting.
    pub fn update(
        &mut self,
        ctx: &FrameContext<'_>,
        finger_count: u8,
        zone: Option<Zone>,
        mode: TypingMode,
        suppressed: bool,
        out: &mut Vec<GestureEvent>,
    ) {
        let cfg = ctx.config;
        let pair = (finger_count, zone);

        if self.candidate != Some(pair) {
            self.candidate = Some(pair);
            self.run = 1;
            self.state.enter(ChannelPhase::Armed, ctx.now);
        } else {
            self.run = self.run.saturating_add(1);
        }

        if self.phase() != ChannelPhase::Armed {
            return;
        }

        let steady = self.run >= cfg.required_confirmation
            && self.state.elapsed(ctx.now) >= cfg.confirmation_min_duration;
        if !steady || !ctx.outside_window(self.last_emit, cfg.gesture_debounce) {
            return;
        }

        self.state.enter(ChannelPhase::Active, ctx.now);
        debug!(finger_count, zone = zone.map(|z| z.name()), run = self.run, "typing gesture confirmed");

        if suppressed {
            return;
        }
        if let Some(event) = resolve(finger_count, zone, mode) {
            self.last_emit = Some(ctx.now);
            out.push(event);
        }
    }

    /// Hand lost: forget the candidate and the run
    pub fn reset(&mut self, now: Duration) {
        self.candidate = None;
        self.run = 0;
        self.state.enter(ChannelPhase::Idle, now);
    }
}

/// Fist types a space; an open hand in the top row erases
fn resolve(finger_count: u8, zone: Option<Zone>, mode: TypingMode) -> Option<GestureEvent> {
    let zone = zone?;
    match finger_count {
        0 => Some(GestureEvent::EmitChar(' ')),
        5 if zone.is_top_row() => Some(GestureEvent::Backspace),
        n => mode.symbol(n, zone).map(GestureEvent::from_stroke),
    }
}
