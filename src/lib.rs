//! Merge 2048 - a sliding-tile merge game
//!
//! Core modules:
//! - `engine`: deterministic game core (grid, moves, scoring, terminal states)
//! - `input`: raw key names mapped to game commands
//! - `render`: projection of engine output (tile text, colors, banner)
//! - `settings`: tunables, persisted to LocalStorage on the web
//! - `highscores`: local best-score table

pub mod engine;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;

pub use engine::{Board, Direction, Game, GameConfig, GameStatus, MoveResult};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Board side length
    pub const BOARD_SIZE: usize = 4;
    /// Tile value that ends the game as a win
    pub const WIN_TILE: u32 = 2048;
    /// A spawned tile is a 4 one time in this many, else a 2
    pub const FOUR_CHANCE: u32 = 10;
    /// Tiles placed on the board when a game starts
    pub const STARTING_TILES: usize = 2;
}
