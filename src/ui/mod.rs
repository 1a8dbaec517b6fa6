//! Terminal UI for playing against human or computer opponents.

mod app;
mod game_view;

pub use app::App;
