//! Operator keyboard commands read from the terminal

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures::StreamExt;
use handpilot_core::ManualControl;
use tracing::{debug, warn};

/// Map a key press to an operator command
pub fn control_for_key(key: KeyEvent) -> Option<ManualControl> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ManualControl::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(ManualControl::Quit),
        KeyCode::Char('m') => Some(ManualControl::ToggleMouse),
        KeyCode::Char('c') => Some(ManualControl::ToggleClick),
        KeyCode::Char('t') => Some(ManualControl::ToggleTyping),
        KeyCode::Char('x') => Some(ManualControl::ClearText),
        KeyCode::Char('n') => Some(ManualControl::CycleMode),
        KeyCode::Char(' ') => Some(ManualControl::Recalibrate),
        KeyCode::Char('p') => Some(ManualControl::ToggleSelectionMethod),
        _ => None,
    }
}

/// Async terminal key reader.
///
/// Raw mode is held for the lifetime of the value and restored on drop.
pub struct ControlInput {
    events: EventStream,
}

impl ControlInput {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        debug!("terminal raw mode enabled");
        Ok(Self {
            events: EventStream::new(),
        })
    }

    /// Next operator command; `None` once the terminal stops producing events
    pub async fn next(&mut self) -> Option<io::Result<ManualControl>> {
        while let Some(event) = self.events.next().await {
            match event {
                Ok(Event::Key(key)) => {
                    if let Some(control) = control_for_key(key) {
                        return Some(Ok(control));
                    }
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl Drop for ControlInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "failed to restore terminal mode");
        }
    }
}
