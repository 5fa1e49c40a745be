// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch between landscape and portrait
    ToggleOrientation,
    /// Start (or restart) the capture countdown
    TakeShot,
    /// Raise the threshold upper bound
    ThresholdUp,
    /// Lower the threshold upper bound
    ThresholdDown,
    /// Tilt the sensor up
    TiltUp,
    /// Tilt the sensor down
    TiltDown,
    Quit,
}

impl KeyAction {
    /// Map a terminal key press to an action; releases and repeats are ignored
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(KeyAction::Quit);
        }
        match key.code {
            KeyCode::Char('o') => Some(KeyAction::ToggleOrientation),
            KeyCode::Char(' ') => Some(KeyAction::TakeShot),
            // '=' shares the key with '+' on most layouts
            KeyCode::Char('+') | KeyCode::Char('=') => Some(KeyAction::ThresholdUp),
            KeyCode::Char('-') => Some(KeyAction::ThresholdDown),
            KeyCode::Up => Some(KeyAction::TiltUp),
            KeyCode::Down => Some(KeyAction::TiltDown),
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
            _ => None,
        }
    }
}

/// One-line key reference shown under the live view
pub fn instructions() -> &'static str {
    "space: record | Up/Down: tilt | +/-: threshold | o: orientation | q: quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(
            KeyAction::from_key_event(&press(KeyCode::Char(' '))),
            Some(KeyAction::TakeShot)
        );
        assert_eq!(
            KeyAction::from_key_event(&press(KeyCode::Char('='))),
            Some(KeyAction::ThresholdUp)
        );
        assert_eq!(
            KeyAction::from_key_event(&press(KeyCode::Down)),
            Some(KeyAction::TiltDown)
        );
        assert_eq!(KeyAction::from_key_event(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(&key), Some(KeyAction::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char('o'));
        key.kind = KeyEventKind::Release;
        assert_eq!(KeyAction::from_key_event(&key), None);
    }
}
