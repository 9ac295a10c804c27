//! The OS input boundary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Input backend unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("{call} failed: {reason}")]
    Call { call: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SinkError>;

/// Synthesized mouse and keyboard input.
///
/// Key names are lowercase ("enter", "space", "pageup", "f5", "ctrl").
pub trait InputSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()>;
    fn mouse_down(&mut self) -> Result<()>;
    fn mouse_up(&mut self) -> Result<()>;
    fn click(&mut self) -> Result<()>;
    fn right_click(&mut self) -> Result<()>;
    /// Press and release one named key
    fn key_press(&mut self, key: &str) -> Result<()>;
    /// Type literal text
    fn type_text(&mut self, text: &str) -> Result<()>;
    /// Press keys in order, release in reverse
    fn hotkey(&mut self, keys: &[&str]) -> Result<()>;
}

impl<S: InputSink + ?Sized> InputSink for Box<S> {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        (**self).move_cursor(x, y)
    }

    fn mouse_down(&mut self) -> Result<()> {
        (**self).mouse_down()
    }

    fn mouse_up(&mut self) -> Result<()> {
        (**self).mouse_up()
    }

    fn click(&mut self) -> Result<()> {
        (**self).click()
    }

    fn right_click(&mut self) -> Result<()> {
        (**self).right_click()
    }

    fn key_press(&mut self, key: &str) -> Result<()> {
        (**self).key_press(key)
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        (**self).type_text(text)
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<()> {
        (**self).hotkey(keys)
    }
}

/// A sink call as seen by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    MoveCursor(i32, i32),
    MouseDown,
    MouseUp,
    Click,
    RightClick,
    KeyPress(String),
    TypeText(String),
    Hotkey(Vec<String>),
}

/// In-memory sink that records accepted calls; can be told to reject everything.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
    failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every call fails
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            failing: true,
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, name: &'static str, call: SinkCall) -> Result<()> {
        if self.failing {
            return Err(SinkError::Call {
                call: name,
                reason: "rejected by recording sink".to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

impl InputSink for RecordingSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.record("move_cursor", SinkCall::MoveCursor(x, y))
    }

    fn mouse_down(&mut self) -> Result<()> {
        self.record("mouse_down", SinkCall::MouseDown)
    }

    fn mouse_up(&mut self) -> Result<()> {
        self.record("mouse_up", SinkCall::MouseUp)
    }

    fn click(&mut self) -> Result<()> {
        self.record("click", SinkCall::Click)
    }

    fn right_click(&mut self) -> Result<()> {
        self.record("right_click", SinkCall::RightClick)
    }

    fn key_press(&mut self, key: &str) -> Result<()> {
        self.record("key_press", SinkCall::KeyPress(key.to_string()))
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.record("type_text", SinkCall::TypeText(text.to_string()))
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<()> {
        self.record(
            "hotkey",
            SinkCall::Hotkey(keys.iter().map(|k| k.to_string()).collect()),
        )
    }
}
