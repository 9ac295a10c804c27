//! OS input through enigo

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use handpilot_core::dispatch::InputSink;
use handpilot_core::SinkError;
use tracing::debug;

type Result<T> = std::result::Result<T, SinkError>;

/// Real mouse and keyboard
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| SinkError::Unavailable(format!("{:?}", e)))?;
        debug!("enigo input backend ready");
        Ok(Self { enigo })
    }
}

fn call_err(call: &'static str) -> impl FnOnce(enigo::InputError) -> SinkError {
    move |e| SinkError::Call {
        call,
        reason: format!("{:?}", e),
    }
}

/// Lowercase key name to an enigo key
fn key_for(name: &str) -> Result<Key> {
    let key = match name {
        "enter" => Key::Return,
        "tab" => Key::Tab,
        "esc" => Key::Escape,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        "home" => Key::Home,
        "end" => Key::End,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "ctrl" => Key::Control,
        "alt" => Key::Alt,
        "shift" => Key::Shift,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return Err(SinkError::UnknownKey(other.to_string())),
            }
        }
    };
    Ok(key)
}

impl InputSink for EnigoSink {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(call_err("move_cursor"))
    }

    fn mouse_down(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Press)
            .map_err(call_err("mouse_down"))
    }

    fn mouse_up(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Release)
            .map_err(call_err("mouse_up"))
    }

    fn click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(call_err("click"))
    }

    fn right_click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Right, Direction::Click)
            .map_err(call_err("right_click"))
    }

    fn key_press(&mut self, key: &str) -> Result<()> {
        let key = key_for(key)?;
        self.enigo.key(key, Direction::Click).map_err(call_err("key_press"))
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.enigo.text(text).map_err(call_err("type_text"))
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<()> {
        let keys = keys.iter().map(|k| key_for(k)).collect::<Result<Vec<_>>>()?;
        press_chord(&mut self.enigo, &keys).map_err(call_err("hotkey"))
    }
}

/// The one enigo call a chord needs
trait KeyBackend {
    fn key_event(&mut self, key: Key, direction: Direction) -> std::result::Result<(), enigo::InputError>;
}

impl KeyBackend for Enigo {
    fn key_event(&mut self, key: Key, direction: Direction) -> std::result::Result<(), enigo::InputError> {
        self.key(key, direction)
    }
}

/// Press `keys` in order and release whatever went down in reverse.
///
/// Keys that were pressed are always released, even when a later press
/// fails; the first error is returned.
fn press_chord<B: KeyBackend>(backend: &mut B, keys: &[Key]) -> std::result::Result<(), enigo::InputError> {
    let mut pressed = Vec::with_capacity(keys.len());
    let mut first_err = None;
    for key in keys {
        match backend.key_event(*key, Direction::Press) {
            Ok(()) => pressed.push(*key),
            Err(e) => {
                first_err = Some(e);
                break;
            }
        }
    }
    for key in pressed.into_iter().rev() {
        if let Err(e) = backend.key_event(key, Direction::Release) {
            debug!(?key, "hotkey release failed");
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert!(matches!(key_for("enter"), Ok(Key::Return)));
        assert!(matches!(key_for("pagedown"), Ok(Key::PageDown)));
        assert!(matches!(key_for("a"), Ok(Key::Unicode('a'))));
        assert!(matches!(key_for("hyper"), Err(SinkError::UnknownKey(_))));
    }

    #[derive(Default)]
    struct FakeKeys {
        events: Vec<(Key, Direction)>,
        fail_press: Option<Key>,
    }

    impl KeyBackend for FakeKeys {
        fn key_event(&mut self, key: Key, direction: Direction) -> std::result::Result<(), enigo::InputError> {
            if direction == Direction::Press && self.fail_press == Some(key) {
                return Err(enigo::InputError::Simulate("key press rejected"));
            }
            self.events.push((key, direction));
            Ok(())
        }
    }

    #[test]
    fn test_chord_releases_in_reverse() {
        let mut keys = FakeKeys::default();
        press_chord(&mut keys, &[Key::Control, Key::Shift, Key::Unicode('s')]).unwrap();
        assert_eq!(
            keys.events,
            vec![
                (Key::Control, Direction::Press),
                (Key::Shift, Direction::Press),
                (Key::Unicode('s'), Direction::Press),
                (Key::Unicode('s'), Direction::Release),
                (Key::Shift, Direction::Release),
                (Key::Control, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_failed_press_still_releases_held_modifiers() {
        let mut keys = FakeKeys {
            fail_press: Some(Key::Unicode('c')),
            ..FakeKeys::default()
        };
        let result = press_chord(&mut keys, &[Key::Control, Key::Unicode('c')]);
        assert!(result.is_err());
        assert_eq!(
            keys.events,
            vec![(Key::Control, Direction::Press), (Key::Control, Direction::Release)]
        );
    }
}
