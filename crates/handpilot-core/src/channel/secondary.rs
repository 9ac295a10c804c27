//! Secondary pinch: right click on a held thumb-middle pinch

use std::time::Duration;

use tracing::debug;

use super::hysteresis::{Band, GateEdge, HysteresisGate};
use super::state::ChannelPhase;
use crate::context::FrameContext;
use crate::event::GestureEvent;
use crate::features::FeatureSnapshot;

/// Thumb-middle pinch, yielding to the primary pinch.
///
/// After firing the channel sits in Cooldown until the right-click debounce passes.
#[derive(Debug, Clone)]
pub struct SecondaryPinchChannel {
    gate: HysteresisGate,
    last_fire: Option<Duration>,
}

impl Default for SecondaryPinchChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondaryPinchChannel {
    pub fn new() -> Self {
        Self {
            gate: HysteresisGate::new("secondary"),
            last_fire: None,
        }
    }

    pub fn phase(&self) -> ChannelPhase {
        self.gate.phase()
    }

    /// `primary_engaged` cancels any pending secondary pinch without firing
    pub fn update(
        &mut self,
        ctx: &FrameContext<'_>,
        snap: &FeatureSnapshot,
        primary_engaged: bool,
        out: &mut Vec<GestureEvent>,
    ) {
        let cfg = ctx.config;

        if primary_engaged {
            if self.gate.is_engaged() {
                self.gate.reset(ctx.now);
                debug!("secondary pinch cancelled by primary");
            }
            return;
        }

        if self.phase() == ChannelPhase::Cooldown
            && ctx.outside_window(self.last_fire, cfg.right_click_debounce)
        {
            self.gate.reset(ctx.now);
        }

        let band = Band::new(cfg.right_on, cfg.right_off);
        if let GateEdge::Released { held, .. } = self.gate.step(ctx.now, band, snap.thumb_middle, true) {
            if held >= cfg.right_click_hold_threshold {
                self.last_fire = Some(ctx.now);
                self.gate.cool_down(ctx.now);
                out.push(GestureEvent::RightClick);
            } else {
                debug!(held, "secondary pinch too short");
            }
        }
    }

    /// Drop any pending pinch; the debounce window is kept
    pub fn reset(&mut self, now: Duration) {
        if self.gate.is_engaged() {
            self.gate.reset(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;

    fn middle(distance: f64) -> FeatureSnapshot {
        FeatureSnapshot {
            thumb_middle: distance,
            thumb_index: 100.0,
            ..FeatureSnapshot::default()
        }
    }

    fn run(
        channel: &mut SecondaryPinchChannel,
        config: &GestureConfig,
        frames: &[(u64, f64, bool)],
    ) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        for (ms, distance, primary) in frames {
            let ctx = FrameContext::new(Duration::from_millis(*ms), config);
            channel.update(&ctx, &middle(*distance), *primary, &mut out);
        }
        out
    }

    #[test]
    fn test_held_pinch_right_clicks() {
        let config = GestureConfig::default();
        let mut channel = SecondaryPinchChannel::new();
        let events = run(&mut channel, &config, &[(0, 30.0, false), (100, 30.0, false), (200, 60.0, false)]);
        assert_eq!(events, vec![GestureEvent::RightClick]);
        assert_eq!(channel.phase(), ChannelPhase::Cooldown);
    }

    #[test]
    fn test_brief_pinch_ignored() {
        let config = GestureConfig::default();
        let mut channel = SecondaryPinchChannel::new();
        let events = run(&mut channel, &config, &[(0, 30.0, false), (100, 60.0, false)]);
        assert!(events.is_empty());
        assert_eq!(channel.phase(), ChannelPhase::Idle);
    }

    #[test]
    fn test_primary_cancels_without_event() {
        let config = GestureConfig::default();
        let mut channel = SecondaryPinchChannel::new();
        let events = run(
            &mut channel,
            &config,
            &[(0, 30.0, false), (200, 30.0, true), (300, 60.0, false)],
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_debounce_blocks_rearm() {
        let config = GestureConfig::default();
        let mut channel = SecondaryPinchChannel::new();
        let events = run(
            &mut channel,
            &config,
            &[
                (0, 30.0, false),
                (200, 60.0, false),
                // inside the 0.8s window
                (400, 30.0, false),
                (600, 60.0, false),
                // window passed
                (1100, 30.0, false),
                (1300, 60.0, false),
            ],
        );
        assert_eq!(events, vec![GestureEvent::RightClick, GestureEvent::RightClick]);
    }
}
