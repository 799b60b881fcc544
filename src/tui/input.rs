use crate::gesture::{DragTracker, SwipeCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Keep the current file
    Keep,
    /// Trash the current file
    Trash,
    /// Confirm trash action
    ConfirmTrash,
    /// Cancel trash action
    CancelTrash,
    /// Cycle the review order
    CycleSort,
    /// Open the current file with the default application
    Open,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Keep: Right arrow or k
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Keep,

        // Trash: Left arrow or t
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Trash,
        (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::Trash,

        // Sort order
        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::CycleSort,

        // Open with default application
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,

        // Help: ?
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events to confirmation actions
/// Used when ViewState is ConfirmTrash
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Confirm: y or Enter
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::ConfirmTrash,
        (KeyCode::Char('Y'), KeyModifiers::SHIFT) => KeyAction::ConfirmTrash,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::ConfirmTrash,

        // Cancel: n or Esc
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::CancelTrash,
        (KeyCode::Char('N'), KeyModifiers::SHIFT) => KeyAction::CancelTrash,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::CancelTrash,

        _ => KeyAction::None,
    }
}

/// Feeds a terminal mouse event into the drag tracker.
///
/// Only a released left-button drag produces a command; presses and moves
/// just accumulate. The caller maps `CommitKeep`/`CommitDiscard` onto the
/// same paths as the keyboard actions.
pub fn handle_mouse_event(tracker: &mut DragTracker, event: MouseEvent) -> SwipeCommand {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            tracker.press(event.column);
            SwipeCommand::None
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            tracker.drag(event.column);
            SwipeCommand::None
        }
        MouseEventKind::Up(MouseButton::Left) => tracker.release(event.column),
        _ => SwipeCommand::None,
    }
}
