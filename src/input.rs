//! Input mapping
//!
//! Translates raw key names into game commands. This is the only layer
//! that knows what a keyboard looks like; the engine only ever sees
//! [`Direction`] values.

use crate::engine::Direction;

/// A player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Slide tiles in a direction
    Move(Direction),
    /// Abandon the run and start a fresh one
    Restart,
}

/// Map a key name (DOM `KeyboardEvent.key` or a terminal keystroke) to a
/// command. Unrecognized keys map to `None` and must be left to the
/// platform; callers suppress the platform default (page scrolling)
/// exactly for the keys mapped here.
pub fn map_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Command::Move(Direction::Up)),
        "ArrowDown" | "s" | "S" => Some(Command::Move(Direction::Down)),
        "ArrowLeft" | "a" | "A" => Some(Command::Move(Direction::Left)),
        "ArrowRight" | "d" | "D" => Some(Command::Move(Direction::Right)),
        "r" | "R" => Some(Command::Restart),
        _ => None,
    }
}
