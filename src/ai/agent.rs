use tracing::info;

use crate::game::{GameState, Pos};

use super::minimax::{Minimax, SearchConfig, SearchNode, SearchReport};

/// Universal interface for computer players.
pub trait Agent {
    /// Pick a free cell for the current player, or `None` when the game is over.
    fn select_move(&mut self, state: &GameState) -> Option<Pos>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Details of the most recent decision, if the agent searches.
    fn last_report(&self) -> Option<&SearchReport> {
        None
    }
}

/// Agent that runs a minimax search for the current player.
pub struct MinimaxAgent {
    engine: Minimax,
    last_report: Option<SearchReport>,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAgent {
            engine: Minimax::new(config),
            last_report: None,
        }
    }

    /// Search node for the position the current player faces.
    ///
    /// The opening move has no previous mark; the origin stands in for it
    /// since an unmarked cell never completes a line.
    pub fn search_node(state: &GameState) -> SearchNode {
        SearchNode::new(
            state.board().clone(),
            state.last_move().unwrap_or_default(),
            state.players().map(|player| player.mark),
            state.streak(),
        )
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Pos> {
        if state.is_terminal() {
            return None;
        }

        let maximizer = state.current_player().mark;
        let report = self.engine.analyze(&Self::search_node(state), maximizer);
        info!(
            mark = %maximizer,
            score = report.prediction.score,
            pos = %report.prediction.pos,
            nodes = report.nodes,
            horizon = report.horizon,
            "minimax move"
        );
        self.last_report = Some(report);
        Some(report.prediction.pos)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOutcome, Mark, Player, Rotation};

    fn versus_computer(height: usize, width: usize, streak: usize) -> GameState {
        let players = Rotation::new([Player::human('x'), Player::computer('o')]).unwrap();
        GameState::new(height, width, streak, players)
    }

    fn agent() -> MinimaxAgent {
        MinimaxAgent::new(SearchConfig::default())
    }

    #[test]
    fn selects_free_cell() {
        let mut state = versus_computer(3, 3, 3);
        state.apply_move_mut(Pos::new(1, 1)).unwrap();
        let pos = agent().select_move(&state).unwrap();
        assert_eq!(state.board().get(pos), Some(None));
    }

    #[test]
    fn takes_winning_move() {
        let mut state = versus_computer(3, 3, 3);
        // x: (2,0) (2,2) (1,2); o: (0,0) (0,1)
        for (row, col) in [(2, 0), (0, 0), (2, 2), (0, 1), (1, 2)] {
            state.apply_move_mut(Pos::new(row, col)).unwrap();
        }
        let mut agent = agent();
        let pos = agent.select_move(&state).unwrap();
        assert_eq!(pos, Pos::new(0, 2));
        assert_eq!(agent.last_report().unwrap().prediction.score, 9);
    }

    #[test]
    fn blocks_opponent_win() {
        let mut state = versus_computer(3, 3, 3);
        // x threatens the top row
        for (row, col) in [(0, 0), (1, 1), (0, 1)] {
            state.apply_move_mut(Pos::new(row, col)).unwrap();
        }
        let pos = agent().select_move(&state).unwrap();
        assert_eq!(pos, Pos::new(0, 2));
    }

    #[test]
    fn opening_move_without_last_move() {
        let players = Rotation::new([Player::computer('o'), Player::human('x')]).unwrap();
        let state = GameState::new(2, 2, 2, players);
        let pos = agent().select_move(&state).unwrap();
        assert!(state.board().contains(pos));
    }

    #[test]
    fn full_game_vs_self_is_draw() {
        let players = Rotation::new([Player::computer('x'), Player::computer('o')]).unwrap();
        let mut state = GameState::new(3, 3, 3, players);
        state.apply_move_mut(Pos::new(1, 1)).unwrap();
        let mut agent = agent();

        while let Some(pos) = agent.select_move(&state) {
            state.apply_move_mut(pos).unwrap();
        }

        // perfect play from both sides
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(state.board().mark_at(Pos::new(1, 1)), Some(Mark::new('x')));
    }

    #[test]
    fn none_when_game_over() {
        let mut state = versus_computer(1, 1, 1);
        state.apply_move_mut(Pos::new(0, 0)).unwrap();
        assert!(state.is_terminal());
        assert_eq!(agent().select_move(&state), None);
    }

    #[test]
    fn name_is_minimax() {
        assert_eq!(agent().name(), "Minimax");
    }
}
