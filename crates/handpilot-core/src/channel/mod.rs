//! Gesture channels
//!
//! Each channel is a small state machine that owns its state, consumes the
//! frame's feature snapshot and clock sample, and pushes the events it fires.
//! Channels never call each other; the engine evaluates them in a fixed order
//! and passes any cross-channel facts in as read-only arguments.

mod hysteresis;
mod mode_switch;
mod pointer;
mod secondary;
mod selection;
mod state;
mod typing;

pub use hysteresis::{Band, GateEdge, HysteresisGate};
pub use mode_switch::ModeSwitchChannel;
pub use pointer::PrimaryPinchChannel;
pub use secondary::SecondaryPinchChannel;
pub use selection::SelectionChannel;
pub use state::{ChannelPhase, ChannelState};
pub use typing::ZoneTypingChannel;
