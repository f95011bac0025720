use crossterm::event::{KeyCode, KeyEvent};

use crate::dialogue::KeyInput;

/// Translate a terminal key event into a dialogue key.
/// Keys the dialogue has no meaning for map to `None`.
pub fn to_key_input(key: KeyEvent) -> Option<KeyInput> {
    match key.code {
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Esc => Some(KeyInput::Escape),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn dialogue_keys_are_translated() {
        assert_eq!(to_key_input(key(KeyCode::Enter)), Some(KeyInput::Enter));
        assert_eq!(to_key_input(key(KeyCode::Esc)), Some(KeyInput::Escape));
        assert_eq!(
            to_key_input(key(KeyCode::Backspace)),
            Some(KeyInput::Backspace)
        );
        assert_eq!(
            to_key_input(key(KeyCode::Char('a'))),
            Some(KeyInput::Char('a'))
        );
    }

    #[test]
    fn navigation_keys_are_not_dialogue_input() {
        assert_eq!(to_key_input(key(KeyCode::Up)), None);
        assert_eq!(to_key_input(key(KeyCode::Tab)), None);
        assert_eq!(to_key_input(key(KeyCode::F(1))), None);
    }
}
