//! Tunable thresholds for the gesture channels

use serde::{Deserialize, Serialize};

/// Which interactive controller drives the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    /// Cursor movement, click/drag and right-click
    #[default]
    Pointer,
    /// Finger-count plus zone typing with two-hand mode switch
    Typing,
    /// Dwell or pinch selection on the virtual keyboard
    Keyboard,
}

impl Controller {
    pub fn name(&self) -> &'static str {
        match self {
            Controller::Pointer => "pointer",
            Controller::Typing => "typing",
            Controller::Keyboard => "keyboard",
        }
    }
}

/// How a virtual key gets selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Hover on a key for `dwell_threshold`
    #[default]
    Dwell,
    /// Pinch and release while hovering a key
    Pinch,
}

impl SelectionMethod {
    pub fn toggled(self) -> Self {
        match self {
            SelectionMethod::Dwell => SelectionMethod::Pinch,
            SelectionMethod::Pinch => SelectionMethod::Dwell,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionMethod::Dwell => "dwell",
            SelectionMethod::Pinch => "pinch",
        }
    }
}

/// Gesture thresholds. Distances are in frame pixels, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-index distance below which a pinch arms
    pub pinch_on: f64,
    /// Thumb-index distance above which an armed pinch releases
    pub pinch_off: f64,
    /// Thumb-middle distance below which a right pinch arms
    pub right_on: f64,
    /// Thumb-middle distance above which a right pinch releases
    pub right_off: f64,
    /// Hold time before a pinch escalates to a drag
    pub drag_hold_threshold: f64,
    /// Longest hold still counted as a click
    pub click_max_duration: f64,
    /// Minimum spacing between clicks
    pub click_debounce: f64,
    /// Minimum hold to accept a right-click
    pub right_click_hold_threshold: f64,
    /// Minimum spacing between right-clicks
    pub right_click_debounce: f64,
    /// Hover time that selects a virtual key
    pub dwell_threshold: f64,
    /// Minimum spacing between key selections
    pub select_debounce: f64,
    /// Consecutive stable frames before a typing gesture is accepted
    pub required_confirmation: u32,
    /// Optional wall-clock stability requirement on top of the frame count
    pub confirmation_min_duration: f64,
    /// Cooldown after a confirmed typing symbol
    pub gesture_debounce: f64,
    /// How long both hands must stay open before a mode switch
    pub mode_switch_hold: f64,
    /// Minimum time since the last typing or mode emission before a mode switch
    pub mode_switch_cooldown: f64,
    /// Cursor smoothing history length
    pub smoothing_window: usize,
    /// Characters kept in the text preview
    pub preview_capacity: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_on: 35.0,
            pinch_off: 45.0,
            right_on: 35.0,
            right_off: 45.0,
            drag_hold_threshold: 0.35,
            click_max_duration: 0.25,
            click_debounce: 0.5,
            right_click_hold_threshold: 0.15,
            right_click_debounce: 0.8,
            dwell_threshold: 0.7,
            select_debounce: 0.35,
            required_confirmation: 8,
            confirmation_min_duration: 0.0,
            gesture_debounce: 1.0,
            mode_switch_hold: 0.3,
            mode_switch_cooldown: 2.0,
            smoothing_window: 5,
            preview_capacity: 60,
        }
    }
}
