//! Dry-run sink that logs instead of touching the OS

use handpilot_core::dispatch::InputSink;
use handpilot_core::SinkError;
use tracing::{info, trace};

type Result<T> = std::result::Result<T, SinkError>;

/// Logs every call; cursor moves go to trace level
#[derive(Debug, Default)]
pub struct TracingSink {
    calls: u64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl InputSink for TracingSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.calls += 1;
        trace!(x, y, "move cursor");
        Ok(())
    }

    fn mouse_down(&mut self) -> Result<()> {
        self.calls += 1;
        info!("mouse down");
        Ok(())
    }

    fn mouse_up(&mut self) -> Result<()> {
        self.calls += 1;
        info!("mouse up");
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.calls += 1;
        info!("click");
        Ok(())
    }

    fn right_click(&mut self) -> Result<()> {
        self.calls += 1;
        info!("right click");
        Ok(())
    }

    fn key_press(&mut self, key: &str) -> Result<()> {
        self.calls += 1;
        info!(key, "key press");
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.calls += 1;
        info!(text, "type");
        Ok(())
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<()> {
        self.calls += 1;
        info!(keys = %keys.join("+"), "hotkey");
        Ok(())
    }
}
