use super::{Board, Mark, Player, Pos, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("game is over")]
    GameOver,
}

/// A game in progress: the shared board, whose turn it is, and whether the
/// game has ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    players: Rotation<Player>,
    streak: usize,
    turns_left: usize,
    last_move: Option<Pos>,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create a fresh game; the head of `players` moves first
    pub fn new(height: usize, width: usize, streak: usize, players: Rotation<Player>) -> Self {
        let board = Board::new(height, width);
        GameState {
            turns_left: height * width,
            outcome: board.is_full().then_some(GameOutcome::Draw),
            board,
            players,
            streak,
            last_move: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the player whose turn it is
    pub fn current_player(&self) -> &Player {
        self.players.current()
    }

    /// Get players in turn order, current player first
    pub fn players(&self) -> &Rotation<Player> {
        &self.players
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn turns_left(&self) -> usize {
        self.turns_left
    }

    /// Coordinates of the most recent mark, if any
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Place the current player's mark at `pos` and advance the turn.
    pub fn apply_move_mut(&mut self, pos: Pos) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mark = self.players.current().mark;
        match self.board.get(pos) {
            None => {
                return Err(MoveError::OutOfBounds {
                    row: pos.row,
                    col: pos.col,
                })
            }
            Some(Some(_)) => {
                return Err(MoveError::Occupied {
                    row: pos.row,
                    col: pos.col,
                })
            }
            Some(None) => {}
        }
        self.board.place(pos, mark);
        self.last_move = Some(pos);

        if self.board.check_win(pos, self.streak) {
            self.outcome = Some(GameOutcome::Winner(mark));
            return Ok(());
        }

        self.turns_left -= 1;
        if self.turns_left == 0 {
            self.outcome = Some(GameOutcome::Draw);
            return Ok(());
        }

        self.players.advance();
        Ok(())
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, pos: Pos) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(pos)?;
        Ok(next)
    }
}
