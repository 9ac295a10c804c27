//! Frame-driven gesture engine
//!
//! Owns every channel plus the cursor smoother and mode state. Each call to
//! [`GestureEngine::process`] extracts features for the primary hand, steps the
//! active channels in priority order and returns what should be dispatched.

use std::time::Duration;

use tracing::{debug, info};

use crate::channel::{
    ModeSwitchChannel, PrimaryPinchChannel, SecondaryPinchChannel, SelectionChannel, ZoneTypingChannel,
};
use crate::config::{Controller, GestureConfig, SelectionMethod};
use crate::context::FrameContext;
use crate::event::GestureEvent;
use crate::features::{count_extended_fingers, FeatureExtractor, FeatureSnapshot};
use crate::landmark::LandmarkFrame;
use crate::layout::{KeyRect, KeyboardLayout};
use crate::mode::ModeState;
use crate::smoothing::CursorSmoother;

/// Runtime switches that gate whole channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub mouse: bool,
    pub click: bool,
    pub typing: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            mouse: true,
            click: true,
            typing: true,
        }
    }
}

/// Operator commands from the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualControl {
    ToggleMouse,
    ToggleClick,
    ToggleTyping,
    /// Clear the preview buffer; handled by the dispatcher
    ClearText,
    CycleMode,
    /// Clear smoothing history and release any held pinch
    Recalibrate,
    ToggleSelectionMethod,
    Quit,
}

/// Everything one frame produced, cursor first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Smoothed cursor position, when the cursor should move
    pub cursor: Option<(i32, i32)>,
    /// Fired events in channel priority order
    pub events: Vec<GestureEvent>,
    /// Features of the primary hand, absent when no hand was detected
    pub snapshot: Option<FeatureSnapshot>,
}

impl FrameOutput {
    pub fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.events.is_empty()
    }
}

/// The gesture pipeline for one controller.
pub struct GestureEngine {
    config: GestureConfig,
    controller: Controller,
    toggles: Toggles,
    extractor: FeatureExtractor,
    layout: KeyboardLayout,
    keys: Option<((u32, u32), Vec<KeyRect>)>,
    smoother: CursorSmoother,
    mode: ModeState,
    primary: PrimaryPinchChannel,
    secondary: SecondaryPinchChannel,
    typing: ZoneTypingChannel,
    mode_switch: ModeSwitchChannel,
    selection: SelectionChannel,
    last_now: Duration,
    hands_present: bool,
}

impl GestureEngine {
    /// `screen` is the cursor destination size in pixels
    pub fn new(config: GestureConfig, controller: Controller, screen: (u32, u32)) -> Self {
        let smoother = CursorSmoother::new(config.smoothing_window);
        Self {
            config,
            controller,
            toggles: Toggles::default(),
            extractor: FeatureExtractor::new(screen),
            layout: KeyboardLayout::standard(),
            keys: None,
            smoother,
            mode: ModeState::default(),
            primary: PrimaryPinchChannel::new(),
            secondary: SecondaryPinchChannel::new(),
            typing: ZoneTypingChannel::new(),
            mode_switch: ModeSwitchChannel::new(),
            selection: SelectionChannel::default(),
            last_now: Duration::ZERO,
            hands_present: false,
        }
    }

    pub fn with_selection_method(mut self, method: SelectionMethod) -> Self {
        self.selection = SelectionChannel::new(method);
        self
    }

    pub fn with_toggles(mut self, toggles: Toggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    pub fn selection_method(&self) -> SelectionMethod {
        self.selection.method()
    }

    pub fn is_dragging(&self) -> bool {
        self.primary.is_dragging()
    }

    /// Virtual key rectangles for the last seen frame size
    pub fn key_rects(&self) -> &[KeyRect] {
        self.keys.as_ref().map(|(_, rects)| rects.as_slice()).unwrap_or(&[])
    }

    /// Clock samples never go backwards, even if the caller's do
    fn tick(&mut self, now: Duration) -> Duration {
        self.last_now = self.last_now.max(now);
        self.last_now
    }

    fn refresh_keys(&mut self, size: (u32, u32)) {
        if self.controller != Controller::Keyboard {
            return;
        }
        if self.keys.as_ref().map(|(cached, _)| *cached) != Some(size) {
            let rects = self.layout.key_rects(size.0, size.1);
            debug!(width = size.0, height = size.1, keys = rects.len(), "keyboard layout computed");
            self.keys = Some((size, rects));
        }
    }

    /// Run one frame through the pipeline
    pub fn process(&mut self, frame: &LandmarkFrame, now: Duration) -> FrameOutput {
        let now = self.tick(now);
        let mut output = FrameOutput::default();

        let Some(hand) = frame.primary() else {
            if self.hands_present {
                self.hands_present = false;
                debug!("hand lost");
            }
            self.on_hands_lost(now);
            return output;
        };
        if !self.hands_present {
            self.hands_present = true;
            debug!(hands = frame.hands.len(), "hand detected");
        }

        let size = (frame.width, frame.height);
        self.refresh_keys(size);
        let snap = self.extractor.extract(hand, size, self.key_rects());
        let ctx = FrameContext::new(now, &self.config);
        let events = &mut output.events;

        match self.controller {
            Controller::Pointer => {
                if self.toggles.mouse && snap.pointing {
                    let (x, y) = self.smoother.smooth(snap.cursor.0, snap.cursor.1);
                    output.cursor = Some((x as i32, y as i32));
                }
                if self.toggles.click {
                    self.primary.update(&ctx, &snap, events);
                    self.secondary.update(&ctx, &snap, self.primary.is_engaged(), events);
                }
            }
            Controller::Typing => {
                let both_open = frame.hands.len() >= 2
                    && frame.hands.iter().take(2).all(|h| count_extended_fingers(h) == 5);
                self.typing.update(
                    &ctx,
                    snap.finger_count,
                    snap.zone,
                    self.mode.mode,
                    both_open || !self.toggles.typing,
                    events,
                );
                if self.mode_switch.update(&ctx, both_open, self.typing.last_emission()) {
                    let mode = self.mode.cycle();
                    self.typing.note_emission(now);
                    info!(mode = mode.name(), "typing mode switched");
                    events.push(GestureEvent::ModeCycle(mode));
                }
            }
            Controller::Keyboard => {
                self.selection.update(&ctx, &snap, &mut self.mode.modifiers, events);
            }
        }

        for event in &output.events {
            debug!(event = event.name(), "gesture fired");
        }
        output.snapshot = Some(snap);
        output
    }

    /// Per-hand channels restart; a drag in progress stays held
    fn on_hands_lost(&mut self, now: Duration) {
        self.typing.reset(now);
        self.mode_switch.reset(now);
        self.selection.reset(now);
    }

    /// Apply an operator command; returns any events it forces
    pub fn apply(&mut self, control: ManualControl, now: Duration) -> Vec<GestureEvent> {
        let now = self.tick(now);
        let mut events = Vec::new();

        match control {
            ManualControl::ToggleMouse => {
                self.toggles.mouse = !self.toggles.mouse;
                info!(enabled = self.toggles.mouse, "mouse control toggled");
            }
            ManualControl::ToggleClick => {
                self.toggles.click = !self.toggles.click;
                if !self.toggles.click {
                    self.primary.release(now, &mut events);
                    self.secondary.reset(now);
                }
                info!(enabled = self.toggles.click, "click control toggled");
            }
            ManualControl::ToggleTyping => {
                self.toggles.typing = !self.toggles.typing;
                info!(enabled = self.toggles.typing, "typing toggled");
            }
            ManualControl::CycleMode => {
                let mode = self.mode.cycle();
                info!(mode = mode.name(), "typing mode switched");
                events.push(GestureEvent::ModeCycle(mode));
            }
            ManualControl::Recalibrate => {
                self.smoother.reset();
                self.primary.release(now, &mut events);
                self.secondary.reset(now);
                self.selection.reset_pinch(now);
                info!("recalibrated");
            }
            ManualControl::ToggleSelectionMethod => {
                let method = self.selection.method().toggled();
                self.selection.set_method(method, now);
            }
            ManualControl::ClearText | ManualControl::Quit => {}
        }

        events
    }

    /// Events needed to leave the OS in a clean state (a held drag is released)
    pub fn shutdown(&mut self, now: Duration) -> Vec<GestureEvent> {
        let now = self.tick(now);
        let mut events = Vec::new();
        self.primary.release(now, &mut events);
        if !events.is_empty() {
            info!("released drag on shutdown");
        }
        events
    }
}
