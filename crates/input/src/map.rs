//! Key mapping from firmware-style key events to game commands.

use crate::types::{KeyEvent, ScanCode, TickInput};

/// A recognized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCcw,
    RotateCw,
    Exit,
}

impl KeyCommand {
    /// Signed contribution of this command to a tick's input.
    pub fn delta(self) -> TickInput {
        match self {
            KeyCommand::MoveLeft => TickInput::new(-1, 0, 0),
            KeyCommand::MoveRight => TickInput::new(1, 0, 0),
            KeyCommand::SoftDrop => TickInput::new(0, 1, 0),
            KeyCommand::RotateCcw => TickInput::new(0, 0, -1),
            KeyCommand::RotateCw => TickInput::new(0, 0, 1),
            KeyCommand::Exit => TickInput::NONE,
        }
    }
}

/// Map a key event to a command. Unknown keys map to `None`.
pub fn map_key(key: &KeyEvent) -> Option<KeyCommand> {
    match key.scan_code {
        ScanCode::ESCAPE => return Some(KeyCommand::Exit),
        ScanCode::LEFT => return Some(KeyCommand::MoveLeft),
        ScanCode::RIGHT => return Some(KeyCommand::MoveRight),
        ScanCode::DOWN => return Some(KeyCommand::SoftDrop),
        _ => {}
    }

    match key.ch {
        Some('z') | Some('Z') => Some(KeyCommand::RotateCcw),
        Some('x') | Some('X') => Some(KeyCommand::RotateCw),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: &KeyEvent) -> bool {
    key.is_escape()
}
