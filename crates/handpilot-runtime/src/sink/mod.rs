//! Input sink backends

#[cfg(feature = "os-input")]
mod os_input;
mod tracing_sink;

#[cfg(feature = "os-input")]
pub use os_input::EnigoSink;
pub use tracing_sink::TracingSink;
