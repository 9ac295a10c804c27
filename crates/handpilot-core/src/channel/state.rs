//! Explicit per-channel state: phase tag plus entry timestamp

use std::time::Duration;

/// Lifecycle of a channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelPhase {
    /// Waiting for a precondition
    #[default]
    Idle,
    /// Precondition met; release or escalation pending
    Armed,
    /// Escalated or confirmed (drag held, symbol latched)
    Active,
    /// Fired recently; new arming is blocked
    Cooldown,
}

impl ChannelPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelPhase::Idle => "idle",
            ChannelPhase::Armed => "armed",
            ChannelPhase::Active => "active",
            ChannelPhase::Cooldown => "cooldown",
        }
    }
}

/// Phase and the time it was entered.
///
/// The entry timestamp never moves backwards, even if a caller passes an older clock sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    phase: ChannelPhase,
    entered_at: Duration,
}

impl ChannelState {
    pub fn phase(&self) -> ChannelPhase {
        self.phase
    }

    pub fn entered_at(&self) -> Duration {
        self.entered_at
    }

    pub fn is(&self, phase: ChannelPhase) -> bool {
        self.phase == phase
    }

    /// Move to `phase` at `now`
    pub fn enter(&mut self, phase: ChannelPhase, now: Duration) {
        self.entered_at = self.entered_at.max(now);
        self.phase = phase;
    }

    /// Seconds spent in the current phase
    pub fn elapsed(&self, now: Duration) -> f64 {
        now.saturating_sub(self.entered_at).as_secs_f64()
    }
}
