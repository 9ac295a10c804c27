//! handpilot-core: gesture classification and action dispatch
//!
//! Turns per-frame hand landmarks into debounced input actions:
//! - Feature extraction (cursor, pinch distances, finger count, zone, hovered key)
//! - Cursor smoothing over a bounded weighted history
//! - Independent gesture channels (click/drag, right-click, zone typing,
//!   virtual keyboard selection, two-hand mode switch)
//! - Action dispatch against an abstract input sink

pub mod channel;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod features;
pub mod landmark;
pub mod layout;
pub mod mode;
pub mod smoothing;

// Re-export commonly used types
pub use config::{Controller, GestureConfig, SelectionMethod};
pub use context::FrameContext;
pub use dispatch::{ActionDispatcher, InputSink, PreviewBuffer, RecordingSink, SinkCall, SinkError};
pub use engine::{FrameOutput, GestureEngine, ManualControl, Toggles};
pub use event::{GestureEvent, KeyStroke};
pub use features::{FeatureExtractor, FeatureSnapshot};
pub use landmark::{HandFrame, HandLandmark, Landmark, LandmarkFrame};
pub use layout::{KeyRect, KeyboardLayout, Zone, ZoneGrid};
pub use mode::{ModeState, Modifiers, TypingMode};
pub use smoothing::CursorSmoother;
