//! Action dispatch
//!
//! Maps gesture events onto an abstract input sink and keeps the typed-text
//! preview in step with what the sink actually accepted.

mod dispatcher;
mod preview;
mod sink;

pub use dispatcher::ActionDispatcher;
pub use preview::PreviewBuffer;
pub use sink::{InputSink, RecordingSink, SinkCall, SinkError};
