//! Discrete actions produced by the gesture channels

use crate::mode::TypingMode;

/// A keyboard action resolved from a typing symbol or a virtual key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStroke {
    /// Visible text
    Char(char),
    /// A single named key ("enter", "tab", "backspace", "f5", ...)
    Named(&'static str),
    /// Keys pressed together ("ctrl", "c")
    Hotkey(&'static [&'static str]),
}

/// One firing of one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    Click,
    DragStart,
    DragEnd,
    RightClick,
    EmitChar(char),
    Backspace,
    PressKey(&'static str),
    Hotkey(&'static [&'static str]),
    /// Typing layer advanced; carries the new layer
    ModeCycle(TypingMode),
    /// A virtual key was selected; `output` is what it types after modifiers
    SelectKey {
        label: &'static str,
        output: Option<KeyStroke>,
    },
}

impl GestureEvent {
    /// Event equivalent of a resolved keystroke
    pub fn from_stroke(stroke: KeyStroke) -> Self {
        match stroke {
            KeyStroke::Char(c) => GestureEvent::EmitChar(c),
            KeyStroke::Named("backspace") => GestureEvent::Backspace,
            KeyStroke::Named(name) => GestureEvent::PressKey(name),
            KeyStroke::Hotkey(combo) => GestureEvent::Hotkey(combo),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureEvent::Click => "click",
            GestureEvent::DragStart => "drag_start",
            GestureEvent::DragEnd => "drag_end",
            GestureEvent::RightClick => "right_click",
            GestureEvent::EmitChar(_) => "emit_char",
            GestureEvent::Backspace => "backspace",
            GestureEvent::PressKey(_) => "press_key",
            GestureEvent::Hotkey(_) => "hotkey",
            GestureEvent::ModeCycle(_) => "mode_cycle",
            GestureEvent::SelectKey { .. } => "select_key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stroke() {
        assert_eq!(GestureEvent::from_stroke(KeyStroke::Char('a')), GestureEvent::EmitChar('a'));
        assert_eq!(GestureEvent::from_stroke(KeyStroke::Named("backspace")), GestureEvent::Backspace);
        assert_eq!(GestureEvent::from_stroke(KeyStroke::Named("enter")), GestureEvent::PressKey("enter"));
    }
}
