use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Heading;

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Heading),
    Pause,
    Restart,
    Faster,
    Slower,
    Quit,
    None,
}

/// Translate a key press into an action
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up => KeyAction::Turn(Heading::Up),
        KeyCode::Down => KeyAction::Turn(Heading::Down),
        KeyCode::Left => KeyAction::Turn(Heading::Left),
        KeyCode::Right => KeyAction::Turn(Heading::Right),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => KeyAction::Turn(Heading::Up),
            's' => KeyAction::Turn(Heading::Down),
            'a' => KeyAction::Turn(Heading::Left),
            'd' => KeyAction::Turn(Heading::Right),
            ' ' | 'p' => KeyAction::Pause,
            'r' => KeyAction::Restart,
            '+' | '=' => KeyAction::Faster,
            '-' | '_' => KeyAction::Slower,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        },

        KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
