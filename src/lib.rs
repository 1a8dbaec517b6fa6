//! # tictac
//!
//! Tic-tac-toe generalized to any board size, any number of players and any
//! winning streak length, with a concurrent minimax opponent and a terminal UI
//! built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, line scanning, turn rotation, state machine
//! - [`ai`]: Agent trait, parallel minimax search, random agent
//! - [`ui`]: Terminal UI: game view and debug panel
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
