//! Core N-in-a-row game logic: board and line scanning, player rotation,
//! player kinds, and the game state that advances turns.

mod board;
mod player;
mod rotation;
mod state;

pub use board::{Board, Mark, Pos, EMPTY_SYMBOL};
pub use player::{Player, PlayerKind};
pub use rotation::Rotation;
pub use state::{GameOutcome, GameState, MoveError};
