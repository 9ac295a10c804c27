//! Virtual keyboard selection by dwell or pinch

use std::time::Duration;

use tracing::{debug, info};

use super::hysteresis::{Band, GateEdge, HysteresisGate};
use super::state::ChannelPhase;
use crate::config::SelectionMethod;
use crate::context::FrameContext;
use crate::event::{GestureEvent, KeyStroke};
use crate::features::FeatureSnapshot;
use crate::mode::Modifiers;

/// Selects the hovered virtual key and applies keyboard modifiers.
#[derive(Debug, Clone)]
pub struct SelectionChannel {
    method: SelectionMethod,
    hovered: Option<&'static str>,
    hover_started: Duration,
    gate: HysteresisGate,
    last_select: Option<Duration>,
}

impl Default for SelectionChannel {
    fn default() -> Self {
        Self::new(SelectionMethod::default())
    }
}

impl SelectionChannel {
    pub fn new(method: SelectionMethod) -> Self {
        Self {
            method,
            hovered: None,
            hover_started: Duration::ZERO,
            gate: HysteresisGate::new("select"),
            last_select: None,
        }
    }

    pub fn method(&self) -> SelectionMethod {
        self.method
    }

    pub fn hovered(&self) -> Option<&'static str> {
        self.hovered
    }

    pub fn pinch_phase(&self) -> ChannelPhase {
        self.gate.phase()
    }

    /// Switch method; pending hover and pinch state is dropped
    pub fn set_method(&mut self, method: SelectionMethod, now: Duration) {
        self.method = method;
        self.reset(now);
        info!(method = method.name(), "selection method changed");
    }

    pub fn update(
        &mut self,
        ctx: &FrameContext<'_>,
        snap: &FeatureSnapshot,
        modifiers: &mut Modifiers,
        out: &mut Vec<GestureEvent>,
    ) {
        match self.method {
            SelectionMethod::Dwell => self.update_dwell(ctx, snap.hovered_key, modifiers, out),
            SelectionMethod::Pinch => self.update_pinch(ctx, snap, modifiers, out),
        }
    }

    fn update_dwell(
        &mut self,
        ctx: &FrameContext<'_>,
        hovered: Option<&'static str>,
        modifiers: &mut Modifiers,
        out: &mut Vec<GestureEvent>,
    ) {
        let Some(label) = hovered else {
            self.hovered = None;
            self.hover_started = ctx.now;
            return;
        };

        if self.hovered != Some(label) {
            self.hovered = Some(label);
            self.hover_started = ctx.now;
            return;
        }

        let threshold = ctx.config.dwell_threshold;
        if ctx.secs_since(self.hover_started) >= threshold {
            // Next period starts when this one was due, not when the frame arrived
            let period = Duration::try_from_secs_f64(threshold).unwrap_or(Duration::ZERO);
            self.hover_started = (self.hover_started + period).min(ctx.now);
            out.extend(self.select(ctx, label, modifiers));
        }
    }

    fn update_pinch(
        &mut self,
        ctx: &FrameContext<'_>,
        snap: &FeatureSnapshot,
        modifiers: &mut Modifiers,
        out: &mut Vec<GestureEvent>,
    ) {
        self.hovered = snap.hovered_key;
        let band = Band::new(ctx.config.pinch_on, ctx.config.pinch_off);
        let engaged = snap.pointing && snap.hovered_key.is_some();

        if let GateEdge::Released { .. } = self.gate.step(ctx.now, band, snap.thumb_index, engaged) {
            if let Some(label) = snap.hovered_key {
                out.extend(self.select(ctx, label, modifiers));
            }
        }
    }

    /// Select `label` now, unless a selection happened within the debounce window.
    ///
    /// Caps and Shift update `modifiers`; a latched shift is consumed by any other key.
    pub fn select(
        &mut self,
        ctx: &FrameContext<'_>,
        label: &'static str,
        modifiers: &mut Modifiers,
    ) -> Option<GestureEvent> {
        if let Some(last) = self.last_select {
            if ctx.secs_since(last) < ctx.config.select_debounce {
                debug!(key = label, "selection throttled");
                return None;
            }
        }
        self.last_select = Some(ctx.now);

        let output = match label {
            "Caps" => {
                modifiers.caps = !modifiers.caps;
                None
            }
            "Shift" => {
                modifiers.shift_latched = true;
                None
            }
            "Ctrl" | "Alt" | "Win" | "Menu" => None,
            "Backspace" => Some(KeyStroke::Named("backspace")),
            "Tab" => Some(KeyStroke::Named("tab")),
            "Enter" => Some(KeyStroke::Named("enter")),
            "Space" => Some(KeyStroke::Char(' ')),
            other => single_char(other).map(|c| KeyStroke::Char(modifiers.apply(c))),
        };

        if !matches!(label, "Shift" | "Caps") {
            modifiers.shift_latched = false;
        }

        debug!(key = label, ?output, "key selected");
        Some(GestureEvent::SelectKey { label, output })
    }

    /// Drop hover progress and any pending pinch
    pub fn reset(&mut self, now: Duration) {
        self.hovered = None;
        self.hover_started = now;
        self.gate.reset(now);
    }

    /// Drop only a pending pinch
    pub fn reset_pinch(&mut self, now: Duration) {
        self.gate.reset(now);
    }
}

fn single_char(label: &str) -> Option<char> {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn hovering(key: Option<&'static str>) -> FeatureSnapshot {
        FeatureSnapshot {
            hovered_key: key,
            pointing: true,
            thumb_index: 100.0,
            ..FeatureSnapshot::default()
        }
    }

    fn output(event: Option<GestureEvent>) -> Option<KeyStroke> {
        match event {
            Some(GestureEvent::SelectKey { output, .. }) => output,
            other => panic!("expected selection, got {:?}", other),
        }
    }

    #[test]
    fn test_dwell_selects_after_threshold() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();
        let mut out = Vec::new();
        for i in 0..=8u64 {
            let ctx = FrameContext::new(ms(i * 100), &config);
            channel.update(&ctx, &hovering(Some("Q")), &mut modifiers, &mut out);
        }
        assert_eq!(
            out,
            vec![GestureEvent::SelectKey {
                label: "Q",
                output: Some(KeyStroke::Char('q'))
            }]
        );
    }

    #[test]
    fn test_dwell_repeats_while_hovering() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();
        let mut out = Vec::new();
        // 2.2s of continuous hover
        for i in 0..=22u64 {
            let ctx = FrameContext::new(ms(i * 100), &config);
            channel.update(&ctx, &hovering(Some("W")), &mut modifiers, &mut out);
        }
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_dwell_cadence_ignores_frame_jitter() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();
        let mut out = Vec::new();
        // 33ms frames never land on a multiple of the threshold
        for i in 0..=64u64 {
            let ctx = FrameContext::new(ms(i * 33), &config);
            channel.update(&ctx, &hovering(Some("W")), &mut modifiers, &mut out);
        }
        let hovered_for = 64.0 * 0.033;
        assert_eq!(out.len(), (hovered_for / config.dwell_threshold).floor() as usize);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_dwell_restarts_on_key_change() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();
        let mut out = Vec::new();
        let path = [(0, "Q"), (400, "W"), (800, "Q"), (1200, "Q")];
        for (t, key) in path {
            let ctx = FrameContext::new(ms(t), &config);
            channel.update(&ctx, &hovering(Some(key)), &mut modifiers, &mut out);
        }
        assert!(out.is_empty());
        assert_eq!(channel.hovered(), Some("Q"));
    }

    #[test]
    fn test_pinch_selects_on_release() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Pinch);
        let mut modifiers = Modifiers::default();
        let mut out = Vec::new();
        for (t, distance) in [(0, 50.0), (100, 20.0), (200, 20.0), (300, 60.0)] {
            let ctx = FrameContext::new(ms(t), &config);
            let snap = FeatureSnapshot {
                thumb_index: distance,
                ..hovering(Some("Enter"))
            };
            channel.update(&ctx, &snap, &mut modifiers, &mut out);
        }
        assert_eq!(
            out,
            vec![GestureEvent::SelectKey {
                label: "Enter",
                output: Some(KeyStroke::Named("enter"))
            }]
        );
        assert_eq!(channel.pinch_phase(), ChannelPhase::Idle);
    }

    #[test]
    fn test_shift_applies_to_next_key_only() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();

        let shift = channel.select(&FrameContext::new(ms(0), &config), "Shift", &mut modifiers);
        assert_eq!(output(shift), None);
        assert!(modifiers.shift_latched);

        let a = channel.select(&FrameContext::new(ms(500), &config), "A", &mut modifiers);
        assert_eq!(output(a), Some(KeyStroke::Char('A')));
        assert!(!modifiers.shift_latched);

        let b = channel.select(&FrameContext::new(ms(1000), &config), "B", &mut modifiers);
        assert_eq!(output(b), Some(KeyStroke::Char('b')));
    }

    #[test]
    fn test_caps_toggle_and_shifted_symbols() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();

        channel.select(&FrameContext::new(ms(0), &config), "Caps", &mut modifiers);
        assert!(modifiers.caps);
        let q = channel.select(&FrameContext::new(ms(400), &config), "Q", &mut modifiers);
        assert_eq!(output(q), Some(KeyStroke::Char('Q')));

        channel.select(&FrameContext::new(ms(800), &config), "Shift", &mut modifiers);
        let one = channel.select(&FrameContext::new(ms(1200), &config), "1", &mut modifiers);
        assert_eq!(output(one), Some(KeyStroke::Char('!')));
        assert!(modifiers.caps);
    }

    #[test]
    fn test_modifier_keys_consume_shift() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();

        channel.select(&FrameContext::new(ms(0), &config), "Shift", &mut modifiers);
        let ctrl = channel.select(&FrameContext::new(ms(400), &config), "Ctrl", &mut modifiers);
        assert_eq!(output(ctrl), None);
        assert!(!modifiers.shift_latched);
    }

    #[test]
    fn test_throttled_selection_keeps_shift() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();

        channel.select(&FrameContext::new(ms(0), &config), "Shift", &mut modifiers);
        assert_eq!(channel.select(&FrameContext::new(ms(100), &config), "A", &mut modifiers), None);
        assert!(modifiers.shift_latched);
    }

    #[test]
    fn test_space_and_backspace() {
        let config = GestureConfig::default();
        let mut channel = SelectionChannel::new(SelectionMethod::Dwell);
        let mut modifiers = Modifiers::default();
        let space = channel.select(&FrameContext::new(ms(0), &config), "Space", &mut modifiers);
        assert_eq!(output(space), Some(KeyStroke::Char(' ')));
        let back = channel.select(&FrameContext::new(ms(400), &config), "Backspace", &mut modifiers);
        assert_eq!(output(back), Some(KeyStroke::Named("backspace")));
    }
}
