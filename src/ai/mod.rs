mod agent;
pub mod minimax;
mod random;

pub use agent::{Agent, MinimaxAgent};
pub use minimax::{
    auto_depth, Minimax, Prediction, SearchConfig, SearchNode, SearchReport, DRAW_SCORE,
    LOSE_SCORE, MAX_DEPTH, NODE_BUDGET, WIN_SCORE,
};
pub use random::RandomAgent;

use crate::game::PlayerKind;

/// Build the agent that plays for a player of the given kind; `None` for humans.
pub fn agent_for(kind: PlayerKind, search: &SearchConfig) -> Option<Box<dyn Agent>> {
    match kind {
        PlayerKind::Human => None,
        PlayerKind::Minimax => Some(Box::new(MinimaxAgent::new(search.clone()))),
        PlayerKind::Random => Some(Box::new(RandomAgent::new())),
    }
}
