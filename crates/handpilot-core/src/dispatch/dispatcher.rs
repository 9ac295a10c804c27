//! Event to sink translation

use tracing::{debug, info, warn};

use super::preview::PreviewBuffer;
use super::sink::{InputSink, Result};
use crate::engine::FrameOutput;
use crate::event::{GestureEvent, KeyStroke};

/// Sends events to an [`InputSink`] and mirrors typed text into a preview.
///
/// Sink failures are logged and dropped; the preview only changes when the
/// sink accepted the call.
pub struct ActionDispatcher<S: InputSink> {
    sink: S,
    preview: PreviewBuffer,
}

impl<S: InputSink> ActionDispatcher<S> {
    pub fn new(sink: S, preview_capacity: usize) -> Self {
        Self {
            sink,
            preview: PreviewBuffer::new(preview_capacity),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn preview(&self) -> &PreviewBuffer {
        &self.preview
    }

    pub fn clear_preview(&mut self) {
        self.preview.clear();
        info!("preview cleared");
    }

    /// Cursor move first, then events in order
    pub fn dispatch(&mut self, output: &FrameOutput) {
        if let Some((x, y)) = output.cursor {
            self.call("move_cursor", |sink| sink.move_cursor(x, y));
        }
        for event in &output.events {
            self.dispatch_event(event);
        }
    }

    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GestureEvent>) {
        for event in events {
            self.dispatch_event(event);
        }
    }

    pub fn dispatch_event(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::Click => {
                self.call("click", |sink| sink.click());
            }
            GestureEvent::DragStart => {
                self.call("mouse_down", |sink| sink.mouse_down());
            }
            GestureEvent::DragEnd => {
                self.call("mouse_up", |sink| sink.mouse_up());
            }
            GestureEvent::RightClick => {
                self.call("right_click", |sink| sink.right_click());
            }
            GestureEvent::EmitChar(c) => self.stroke(KeyStroke::Char(*c)),
            GestureEvent::Backspace => self.stroke(KeyStroke::Named("backspace")),
            GestureEvent::PressKey(name) => self.stroke(KeyStroke::Named(*name)),
            GestureEvent::Hotkey(keys) => self.stroke(KeyStroke::Hotkey(*keys)),
            GestureEvent::ModeCycle(mode) => {
                info!(mode = mode.name(), "typing mode");
            }
            GestureEvent::SelectKey { label, output } => match output {
                Some(stroke) => self.stroke(*stroke),
                None => debug!(key = label, "modifier key selected"),
            },
        }
    }

    fn stroke(&mut self, stroke: KeyStroke) {
        match stroke {
            KeyStroke::Char(' ') => {
                if self.call("key_press", |sink| sink.key_press("space")) {
                    self.preview.push(' ');
                }
            }
            KeyStroke::Char(c) => {
                let mut buf = [0u8; 4];
                let text: &str = c.encode_utf8(&mut buf);
                if self.call("type_text", |sink| sink.type_text(text)) {
                    self.preview.push(c);
                }
            }
            KeyStroke::Named(name) => {
                if self.call("key_press", |sink| sink.key_press(name)) {
                    match name {
                        "backspace" => {
                            self.preview.pop();
                        }
                        "enter" => self.preview.push('\n'),
                        "tab" => self.preview.push('\t'),
                        _ => {}
                    }
                }
            }
            KeyStroke::Hotkey(keys) => {
                self.call("hotkey", |sink| sink.hotkey(keys));
            }
        }
    }

    /// Run one sink call; false if it failed
    fn call(&mut self, name: &'static str, f: impl FnOnce(&mut S) -> Result<()>) -> bool {
        match f(&mut self.sink) {
            Ok(()) => true,
            Err(e) => {
                warn!(call = name, error = %e, "input sink call failed");
                false
            }
        }
    }
}
