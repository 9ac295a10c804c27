//! Primary pinch: click on a short pinch, drag on a long one

use std::time::Duration;

use tracing::debug;

use super::hysteresis::{Band, GateEdge, HysteresisGate};
use super::state::ChannelPhase;
use crate::context::FrameContext;
use crate::event::GestureEvent;
use crate::features::FeatureSnapshot;

/// Thumb-index pinch while pointing.
///
/// Armed: pinch held, not yet a drag. Active: drag in progress (button down).
#[derive(Debug, Clone)]
pub struct PrimaryPinchChannel {
    gate: HysteresisGate,
    last_click: Option<Duration>,
}

impl Default for PrimaryPinchChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimaryPinchChannel {
    pub fn new() -> Self {
        Self {
            gate: HysteresisGate::new("primary"),
            last_click: None,
        }
    }

    pub fn phase(&self) -> ChannelPhase {
        self.gate.phase()
    }

    /// Pinch held or drag in progress
    pub fn is_engaged(&self) -> bool {
        self.gate.is_engaged()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == ChannelPhase::Active
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>, snap: &FeatureSnapshot, out: &mut Vec<GestureEvent>) {
        let cfg = ctx.config;
        let band = Band::new(cfg.pinch_on, cfg.pinch_off);

        match self.gate.step(ctx.now, band, snap.thumb_index, snap.pointing) {
            GateEdge::Released {
                phase: ChannelPhase::Active,
                ..
            } => {
                out.push(GestureEvent::DragEnd);
            }
            GateEdge::Released { held, .. } if held >= cfg.drag_hold_threshold => {
                // Held past the drag threshold between two samples; still a drag
                debug!(held, "drag completed within one frame");
                out.push(GestureEvent::DragStart);
                out.push(GestureEvent::DragEnd);
            }
            GateEdge::Released { held, .. } => {
                if held <= cfg.click_max_duration
                    && ctx.outside_window(self.last_click, cfg.click_debounce)
                {
                    self.last_click = Some(ctx.now);
                    out.push(GestureEvent::Click);
                } else {
                    debug!(held, "pinch released without click");
                }
            }
            GateEdge::Holding { held }
                if self.phase() == ChannelPhase::Armed && held >= cfg.drag_hold_threshold =>
            {
                self.gate.escalate(ctx.now);
                out.push(GestureEvent::DragStart);
            }
            _ => {}
        }
    }

    /// Force the channel back to Idle, releasing an active drag
    pub fn release(&mut self, now: Duration, out: &mut Vec<GestureEvent>) {
        if self.gate.reset(now) == ChannelPhase::Active {
            out.push(GestureEvent::DragEnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;

    fn pinch(distance: f64) -> FeatureSnapshot {
        FeatureSnapshot {
            pointing: true,
            thumb_index: distance,
            ..FeatureSnapshot::default()
        }
    }

    fn run(channel: &mut PrimaryPinchChannel, config: &GestureConfig, frames: &[(u64, f64)]) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        for (ms, distance) in frames {
            let ctx = FrameContext::new(Duration::from_millis(*ms), config);
            channel.update(&ctx, &pinch(*distance), &mut out);
        }
        out
    }

    #[test]
    fn test_dip_and_recover_series() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let series = [50.0, 40.0, 30.0, 20.0, 30.0, 40.0, 50.0];
        let frames: Vec<(u64, f64)> = series.iter().enumerate().map(|(i, d)| (i as u64 * 50, *d)).collect();

        let mut out = Vec::new();
        for (i, (ms, distance)) in frames.iter().enumerate() {
            let ctx = FrameContext::new(Duration::from_millis(*ms), &config);
            channel.update(&ctx, &pinch(*distance), &mut out);
            match i {
                // armed on the first sample under 35
                2..=5 => assert_eq!(channel.phase(), ChannelPhase::Armed),
                _ => assert_eq!(channel.phase(), ChannelPhase::Idle),
            }
        }
        // held from 100ms to 300ms
        assert_eq!(out, vec![GestureEvent::Click]);
    }

    #[test]
    fn test_short_pinch_clicks() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(&mut channel, &config, &[(0, 50.0), (100, 30.0), (150, 30.0), (250, 50.0)]);
        assert_eq!(events, vec![GestureEvent::Click]);
        assert_eq!(channel.phase(), ChannelPhase::Idle);
    }

    #[test]
    fn test_long_pinch_drags() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(
            &mut channel,
            &config,
            &[(0, 30.0), (200, 30.0), (400, 30.0), (600, 30.0), (700, 60.0)],
        );
        assert_eq!(events, vec![GestureEvent::DragStart, GestureEvent::DragEnd]);
    }

    #[test]
    fn test_medium_pinch_does_nothing() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(&mut channel, &config, &[(0, 30.0), (300, 60.0)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_release_past_drag_threshold_without_escalation() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(&mut channel, &config, &[(0, 30.0), (500, 60.0)]);
        assert_eq!(events, vec![GestureEvent::DragStart, GestureEvent::DragEnd]);
    }

    #[test]
    fn test_click_debounce() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(
            &mut channel,
            &config,
            &[(0, 30.0), (100, 60.0), (200, 30.0), (300, 60.0), (800, 30.0), (900, 60.0)],
        );
        // second pinch lands inside the 0.5s window
        assert_eq!(events, vec![GestureEvent::Click, GestureEvent::Click]);
    }

    #[test]
    fn test_not_pointing_releases_drag() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let mut out = run(&mut channel, &config, &[(0, 30.0), (400, 30.0)]);
        assert!(channel.is_dragging());

        let ctx = FrameContext::new(Duration::from_millis(500), &config);
        let closed = FeatureSnapshot {
            pointing: false,
            thumb_index: 30.0,
            ..FeatureSnapshot::default()
        };
        channel.update(&ctx, &closed, &mut out);
        assert_eq!(out, vec![GestureEvent::DragStart, GestureEvent::DragEnd]);
    }

    #[test]
    fn test_forced_release() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let mut out = run(&mut channel, &config, &[(0, 30.0), (400, 30.0)]);
        channel.release(Duration::from_millis(450), &mut out);
        channel.release(Duration::from_millis(460), &mut out);
        assert_eq!(out, vec![GestureEvent::DragStart, GestureEvent::DragEnd]);
    }

    #[test]
    fn test_hysteresis_band_holds_pinch() {
        let config = GestureConfig::default();
        let mut channel = PrimaryPinchChannel::new();
        let events = run(
            &mut channel,
            &config,
            &[(0, 30.0), (50, 40.0), (100, 44.0), (150, 36.0), (200, 50.0)],
        );
        assert_eq!(events, vec![GestureEvent::Click]);
    }
}
