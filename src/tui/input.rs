use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Show the next image
    Advance,
    /// Move the current image to `deleted`, then show the next one
    DeleteThenAdvance,
    /// Toggle help overlay
    Help,
    /// Close the viewer
    Quit,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    // Release and repeat events are reported on some platforms
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => KeyAction::Advance,
        KeyCode::Char('x') | KeyCode::Char('X') => KeyAction::DeleteThenAdvance,

        KeyCode::Char('?') => KeyAction::Help,

        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_key_advance() {
        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Advance);
    }

    #[test]
    fn test_key_delete_case_insensitive() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::DeleteThenAdvance);

        let key = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(key), KeyAction::DeleteThenAdvance);
    }

    #[test]
    fn test_key_quit() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);
    }

    #[test]
    fn test_key_help() {
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Help);
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in [
            KeyCode::Char('k'),
            KeyCode::Char('t'),
            KeyCode::Char('z'),
            KeyCode::Enter,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Backspace,
        ] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::None, "{:?}", code);
        }

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::None);
    }

    #[test]
    fn test_release_events_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(key), KeyAction::None);
    }
}
