//! Two open hands cycle the typing layer

use std::time::Duration;

use tracing::debug;

use super::state::{ChannelPhase, ChannelState};
use crate::context::FrameContext;

/// Fires once per continuous two-hands-open hold.
///
/// Armed while the hold accumulates; Active once fired, until a hand closes.
#[derive(Debug, Clone, Default)]
pub struct ModeSwitchChannel {
    state: ChannelState,
}

impl ModeSwitchChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChannelPhase {
        self.state.phase()
    }

    /// Returns true on the frame the switch fires.
    ///
    /// `last_emission` is the most recent typing or mode emission; firing
    /// waits until the cooldown since then has passed.
    pub fn update(&mut self, ctx: &FrameContext<'_>, both_open: bool, last_emission: Option<Duration>) -> bool {
        let cfg = ctx.config;

        if !both_open {
            if self.phase() != ChannelPhase::Idle {
                self.state.enter(ChannelPhase::Idle, ctx.now);
            }
            return false;
        }

        match self.phase() {
            ChannelPhase::Idle => {
                self.state.enter(ChannelPhase::Armed, ctx.now);
                debug!("both hands open");
                false
            }
            ChannelPhase::Armed => {
                let held = self.state.elapsed(ctx.now);
                if held >= cfg.mode_switch_hold && ctx.outside_window(last_emission, cfg.mode_switch_cooldown) {
                    self.state.enter(ChannelPhase::Active, ctx.now);
                    true
                } else {
                    false
                }
            }
            ChannelPhase::Active | ChannelPhase::Cooldown => false,
        }
    }

    pub fn reset(&mut self, now: Duration) {
        self.state.enter(ChannelPhase::Idle, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_once_per_hold() {
        let config = GestureConfig::default();
        let mut channel = ModeSwitchChannel::new();
        let fired: Vec<bool> = (0..40u64)
            .map(|i| channel.update(&FrameContext::new(ms(i * 50), &config), true, None))
            .collect();
        assert_eq!(fired.iter().filter(|f| **f).count(), 1);
        // 0.3s hold reached at the seventh frame
        assert!(fired[6]);
    }

    #[test]
    fn test_short_hold_does_not_fire() {
        let config = GestureConfig::default();
        let mut channel = ModeSwitchChannel::new();
        assert!(!channel.update(&FrameContext::new(ms(0), &config), true, None));
        assert!(!channel.update(&FrameContext::new(ms(200), &config), true, None));
        assert!(!channel.update(&FrameContext::new(ms(250), &config), false, None));
        assert!(!channel.update(&FrameContext::new(ms(300), &config), true, None));
        assert!(!channel.update(&FrameContext::new(ms(500), &config), true, None));
        assert!(channel.update(&FrameContext::new(ms(600), &config), true, None));
    }

    #[test]
    fn test_cooldown_since_last_emission() {
        let config = GestureConfig::default();
        let mut channel = ModeSwitchChannel::new();
        let last = Some(ms(1000));
        assert!(!channel.update(&FrameContext::new(ms(1500), &config), true, last));
        assert!(!channel.update(&FrameContext::new(ms(2900), &config), true, last));
        assert!(channel.update(&FrameContext::new(ms(3100), &config), true, last));
    }

    #[test]
    fn test_release_and_rehold_fires_again() {
        let config = GestureConfig::default();
        let mut channel = ModeSwitchChannel::new();
        channel.update(&FrameContext::new(ms(0), &config), true, None);
        assert!(channel.update(&FrameContext::new(ms(400), &config), true, None));
        channel.update(&FrameContext::new(ms(500), &config), false, Some(ms(400)));
        channel.update(&FrameContext::new(ms(2500), &config), true, Some(ms(400)));
        assert!(channel.update(&FrameContext::new(ms(2900), &config), true, Some(ms(400))));
    }
}
