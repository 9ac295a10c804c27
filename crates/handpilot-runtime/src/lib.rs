//! handpilot-runtime: drives the gesture engine from a landmark stream
//!
//! - [`source`]: where landmark frames come from (JSON lines, scripted frames)
//! - [`clock`]: frame timestamps, wall clock or recorded
//! - [`controls`]: operator keyboard commands from the terminal
//! - [`sink`]: OS input backends
//! - [`runner`]: the frame loop tying them together

pub mod clock;
pub mod controls;
pub mod runner;
pub mod sink;
pub mod source;

pub use clock::FrameClock;
pub use controls::{control_for_key, ControlInput};
pub use runner::{FrameLoop, RunSummary, RuntimeError};
pub use sink::TracingSink;
pub use source::{JsonLinesSource, LandmarkSource, ScriptedSource, SourceError};
