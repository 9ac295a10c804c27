//! Typing layers, symbol tables and keyboard modifiers

use crate::event::KeyStroke;
use crate::layout::Zone;

/// Typing layers, cycled in declaration order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypingMode {
    #[default]
    Letters,
    Numbers,
    Actions,
}

/// Nine zone symbols per finger count 1-5
type SymbolTable = [[&'static str; 9]; 5];

const LETTERS: SymbolTable = [
    ["a", "b", "c", "d", "e", "f", "g", "h", "i"],
    ["j", "k", "l", "m", "n", "o", "p", "q", "r"],
    ["s", "t", "u", "v", "w", "x", "y", "z", "."],
    ["A", "B", "C", "D", "E", "F", "G", "H", "I"],
    ["J", "K", "L", "M", "N", "O", "P", "Q", "R"],
];

const NUMBERS: SymbolTable = [
    ["1", "2", "3", "4", "5", "6", "7", "8", "9"],
    ["0", "+", "-", "*", "/", "=", "(", ")", "%"],
    ["!", "@", "#", "$", "&", "?", ",", ";", ":"],
    ["<", ">", "[", "]", "{", "}", "|", "\\", "\""],
    ["~", "`", "^", "_", "'", ".", ",", "!", "?"],
];

const ACTIONS: SymbolTable = [
    ["ENTER", "TAB", "ESC", "DELETE", "HOME", "END", "UP", "DOWN", "LEFT"],
    ["RIGHT", "PGUP", "PGDN", "F1", "F2", "F3", "F4", "F5", "F6"],
    ["F7", "F8", "F9", "F10", "F11", "F12", "CTRL", "ALT", "SHIFT"],
    ["COPY", "PASTE", "CUT", "UNDO", "REDO", "SAVE", "FIND", "REPLACE", "SELECT"],
    ["CAPS", "NUM", "SCROLL", "PAUSE", "PRINT", "INSERT", "MENU", "WIN", "CMD"],
];

impl TypingMode {
    pub const ALL: [TypingMode; 3] = [TypingMode::Letters, TypingMode::Numbers, TypingMode::Actions];

    /// Next layer, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypingMode::Letters => "LETTERS",
            TypingMode::Numbers => "NUMBERS",
            TypingMode::Actions => "ACTIONS",
        }
    }

    fn table(&self) -> &'static SymbolTable {
        match self {
            TypingMode::Letters => &LETTERS,
            TypingMode::Numbers => &NUMBERS,
            TypingMode::Actions => &ACTIONS,
        }
    }

    /// Raw table entry for a finger count and zone
    pub fn label(&self, finger_count: u8, zone: Zone) -> Option<&'static str> {
        let row = (finger_count as usize).checked_sub(1)?;
        self.table().get(row)?.get(zone.index()).copied()
    }

    /// Keystroke for a finger count and zone, `None` when the entry does nothing
    pub fn symbol(&self, finger_count: u8, zone: Zone) -> Option<KeyStroke> {
        self.label(finger_count, zone).and_then(resolve_label)
    }
}

/// Single characters type themselves; action names map to keys or shortcuts.
fn resolve_label(label: &'static str) -> Option<KeyStroke> {
    let mut chars = label.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyStroke::Char(c));
    }

    let stroke = match label {
        "ENTER" => KeyStroke::Named("enter"),
        "TAB" => KeyStroke::Named("tab"),
        "ESC" => KeyStroke::Named("esc"),
        "DELETE" => KeyStroke::Named("delete"),
        "HOME" => KeyStroke::Named("home"),
        "END" => KeyStroke::Named("end"),
        "UP" => KeyStroke::Named("up"),
        "DOWN" => KeyStroke::Named("down"),
        "LEFT" => KeyStroke::Named("left"),
        "RIGHT" => KeyStroke::Named("right"),
        "PGUP" => KeyStroke::Named("pageup"),
        "PGDN" => KeyStroke::Named("pagedown"),
        "F1" => KeyStroke::Named("f1"),
        "F2" => KeyStroke::Named("f2"),
        "F3" => KeyStroke::Named("f3"),
        "F4" => KeyStroke::Named("f4"),
        "F5" => KeyStroke::Named("f5"),
        "F6" => KeyStroke::Named("f6"),
        "F7" => KeyStroke::Named("f7"),
        "F8" => KeyStroke::Named("f8"),
        "F9" => KeyStroke::Named("f9"),
        "F10" => KeyStroke::Named("f10"),
        "F11" => KeyStroke::Named("f11"),
        "F12" => KeyStroke::Named("f12"),
        "COPY" => KeyStroke::Hotkey(&["ctrl", "c"]),
        "PASTE" => KeyStroke::Hotkey(&["ctrl", "v"]),
        "CUT" => KeyStroke::Hotkey(&["ctrl", "x"]),
        "UNDO" => KeyStroke::Hotkey(&["ctrl", "z"]),
        "REDO" => KeyStroke::Hotkey(&["ctrl", "y"]),
        "SAVE" => KeyStroke::Hotkey(&["ctrl", "s"]),
        "FIND" => KeyStroke::Hotkey(&["ctrl", "f"]),
        "REPLACE" => KeyStroke::Hotkey(&["ctrl", "h"]),
        "SELECT" => KeyStroke::Hotkey(&["ctrl", "a"]),
        // Bare modifiers and lock keys would leave sticky state behind
        _ => return None,
    };
    Some(stroke)
}

/// Character produced by a shifted non-letter key
pub fn shifted_char(c: char) -> char {
    match c {
        '`' => '~',
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        other => other,
    }
}

/// Caps is a persistent toggle; shift applies to the next key only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub caps: bool,
    pub shift_latched: bool,
}

impl Modifiers {
    /// Apply the modifiers to a typed character without consuming the latch
    pub fn apply(&self, c: char) -> char {
        if c.is_alphabetic() {
            if self.caps ^ self.shift_latched {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        } else if self.shift_latched {
            shifted_char(c)
        } else {
            c
        }
    }
}

/// Current typing layer plus modifier flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    pub mode: TypingMode,
    pub modifiers: Modifiers,
}

impl ModeState {
    /// Advance to the next layer and return it
    pub fn cycle(&mut self) -> TypingMode {
        self.mode = self.mode.next();
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(i: u8) -> Zone {
        Zone::new(i).unwrap()
    }

    #[test]
    fn test_mode_cycle_wraps() {
        let mut state = ModeState::default();
        assert_eq!(state.mode, TypingMode::Letters);
        assert_eq!(state.cycle(), TypingMode::Numbers);
        assert_eq!(state.cycle(), TypingMode::Actions);
        assert_eq!(state.cycle(), TypingMode::Letters);
    }

    #[test]
    fn test_letter_lookup() {
        assert_eq!(TypingMode::Letters.symbol(1, zone(0)), Some(KeyStroke::Char('a')));
        assert_eq!(TypingMode::Letters.symbol(3, zone(8)), Some(KeyStroke::Char('.')));
        assert_eq!(TypingMode::Letters.symbol(5, zone(4)), Some(KeyStroke::Char('N')));
    }

    #[test]
    fn test_unmapped_counts() {
        assert_eq!(TypingMode::Letters.symbol(0, zone(0)), None);
        assert_eq!(TypingMode::Letters.symbol(6, zone(0)), None);
    }

    #[test]
    fn test_action_lookup() {
        assert_eq!(TypingMode::Actions.symbol(1, zone(0)), Some(KeyStroke::Named("enter")));
        assert_eq!(TypingMode::Actions.symbol(2, zone(1)), Some(KeyStroke::Named("pageup")));
        assert_eq!(
            TypingMode::Actions.symbol(4, zone(0)),
            Some(KeyStroke::Hotkey(&["ctrl", "c"]))
        );
        assert_eq!(TypingMode::Actions.symbol(3, zone(6)), None);
    }

    #[test]
    fn test_numbers_backslash() {
        assert_eq!(TypingMode::Numbers.symbol(4, zone(7)), Some(KeyStroke::Char('\\')));
    }

    #[test]
    fn test_modifiers() {
        let plain = Modifiers::default();
        assert_eq!(plain.apply('A'), 'a');
        assert_eq!(plain.apply('1'), '1');

        let shift = Modifiers { caps: false, shift_latched: true };
        assert_eq!(shift.apply('a'), 'A');
        assert_eq!(shift.apply('1'), '!');
        assert_eq!(shift.apply('/'), '?');

        let caps_and_shift = Modifiers { caps: true, shift_latched: true };
        assert_eq!(caps_and_shift.apply('A'), 'a');

        let caps = Modifiers { caps: true, shift_latched: false };
        assert_eq!(caps.apply('q'), 'Q');
        assert_eq!(caps.apply('-'), '-');
    }
}
