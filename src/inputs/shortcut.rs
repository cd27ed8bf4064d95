use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ctrl+T, or Cmd+T on macOS keyboards. Shift and other keys do not matter.
pub fn is_toggle_shortcut(key: &KeyEvent) -> bool {
    let command = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER)
        || key.modifiers.contains(KeyModifiers::META);
    command && matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T'))
}
