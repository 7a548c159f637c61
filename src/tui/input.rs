use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Swipe the top card right
    SwipeRight,
    /// Swipe the top card left
    SwipeLeft,
    /// Deal the deck again from the first card
    Reload,
    /// No action
    None,
}

/// Pointer sample in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release { column: u16, row: u16 },
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::SwipeRight,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::SwipeRight,

        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::SwipeLeft,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::SwipeLeft,

        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reload,

        _ => KeyAction::None,
    }
}

/// Maps left-button mouse events to pointer samples; other buttons are ignored
pub fn handle_mouse_event(event: MouseEvent) -> PointerAction {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press { column, row },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag { column, row },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release { column, row },
        _ => PointerAction::None,
    }
}
