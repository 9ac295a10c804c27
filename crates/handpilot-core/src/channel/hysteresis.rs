//! Two-threshold arm/release gate shared by every pinch-style channel

use std::time::Duration;

use tracing::debug;

use super::state::{ChannelPhase, ChannelState};

/// Hysteresis band: arm strictly below `on`, release strictly above `off`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub on: f64,
    pub off: f64,
}

impl Band {
    pub fn new(on: f64, off: f64) -> Self {
        Self { on, off }
    }
}

/// What a gate step observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateEdge {
    /// Not armed and not arming
    Quiet,
    /// Armed on this step
    Armed,
    /// Still armed or active; seconds since arming
    Holding { held: f64 },
    /// Released on this step, from `phase`, after `held` seconds
    Released { held: f64, phase: ChannelPhase },
    /// In cooldown; arming is blocked
    Cooling,
}

/// Generic arm/release state machine over one distance signal.
///
/// Arm predicate: engaged and value below `band.on`.
/// Release predicate: value above `band.off` or no longer engaged.
/// Escalation (Armed to Active) and the fired effect belong to the owning channel.
#[derive(Debug, Clone, Default)]
pub struct HysteresisGate {
    state: ChannelState,
    armed_at: Duration,
    label: &'static str,
}

impl HysteresisGate {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> ChannelPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    /// Armed or Active
    pub fn is_engaged(&self) -> bool {
        matches!(self.phase(), ChannelPhase::Armed | ChannelPhase::Active)
    }

    /// Seconds since the gate armed
    pub fn held_for(&self, now: Duration) -> f64 {
        now.saturating_sub(self.armed_at).as_secs_f64()
    }

    pub fn step(&mut self, now: Duration, band: Band, value: f64, engaged: bool) -> GateEdge {
        match self.phase() {
            ChannelPhase::Idle => {
                if engaged && value < band.on {
                    self.state.enter(ChannelPhase::Armed, now);
                    self.armed_at = self.state.entered_at();
                    debug!(gate = self.label, value, "armed");
                    GateEdge::Armed
                } else {
                    GateEdge::Quiet
                }
            }
            phase @ (ChannelPhase::Armed | ChannelPhase::Active) => {
                let held = self.held_for(now);
                if value > band.off || !engaged {
                    self.state.enter(ChannelPhase::Idle, now);
                    debug!(gate = self.label, value, held, "released");
                    GateEdge::Released { held, phase }
                } else {
                    GateEdge::Holding { held }
                }
            }
            ChannelPhase::Cooldown => GateEdge::Cooling,
        }
    }

    /// Armed to Active
    pub fn escalate(&mut self, now: Duration) {
        if self.phase() == ChannelPhase::Armed {
            self.state.enter(ChannelPhase::Active, now);
            debug!(gate = self.label, "escalated");
        }
    }

    /// Block arming until `reset`
    pub fn cool_down(&mut self, now: Duration) {
        self.state.enter(ChannelPhase::Cooldown, now);
    }

    /// Back to Idle without firing; returns the phase that was left
    pub fn reset(&mut self, now: Duration) -> ChannelPhase {
        let previous = self.phase();
        self.state.enter(ChannelPhase::Idle, now);
        previous
    }
}
