use serde::{Deserialize, Serialize};

use super::board::Mark;

/// Who decides a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    /// Computer player searching with minimax
    Minimax,
    /// Computer player picking a random free cell
    Random,
}

impl PlayerKind {
    pub fn is_computer(self) -> bool {
        !matches!(self, PlayerKind::Human)
    }

    /// Get kind name for display
    pub fn name(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Minimax => "Minimax",
            PlayerKind::Random => "Random",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq)]
pub struct Player {
    pub mark: Mark,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(mark: Mark, kind: PlayerKind) -> Self {
        Player { mark, kind }
    }

    pub fn human(symbol: char) -> Self {
        Player::new(Mark::new(symbol), PlayerKind::Human)
    }

    pub fn computer(symbol: char) -> Self {
        Player::new(Mark::new(symbol), PlayerKind::Minimax)
    }

    pub fn is_computer(&self) -> bool {
        self.kind.is_computer()
    }
}

/// Players are identified by their mark.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.mark == other.mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_compare_by_mark() {
        assert_eq!(Player::human('x'), Player::computer('x'));
        assert_ne!(Player::human('x'), Player::human('o'));
    }

    #[test]
    fn test_kind_is_computer() {
        assert!(!PlayerKind::Human.is_computer());
        assert!(PlayerKind::Minimax.is_computer());
        assert!(PlayerKind::Random.is_computer());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(PlayerKind::Human.name(), "Human");
        assert_eq!(PlayerKind::Minimax.name(), "Minimax");
    }
}
