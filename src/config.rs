use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::{SearchConfig, MAX_DEPTH};
use crate::error::ConfigError;
use crate::game::{GameState, Mark, Player, PlayerKind, Rotation, EMPTY_SYMBOL};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
}

/// Board shape, win rule, and who plays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    /// Marks in a row needed to win
    pub streak: usize,
    /// Turn order; the first entry moves first
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub mark: Mark,
    #[serde(default)]
    pub kind: PlayerKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: 3,
            width: 3,
            streak: 3,
            players: vec![
                PlayerConfig {
                    mark: Mark::new('X'),
                    kind: PlayerKind::Human,
                },
                PlayerConfig {
                    mark: Mark::new('O'),
                    kind: PlayerKind::Minimax,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Players in turn order
    pub fn rotation(&self) -> Result<Rotation<Player>, ConfigError> {
        Rotation::new(self.players.iter().map(|p| Player::new(p.mark, p.kind)))
            .map_err(|e| ConfigError::Validation(format!("game.players: {e}")))
    }

    /// Fresh game with this board shape and these players
    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        Ok(GameState::new(
            self.height,
            self.width,
            self.streak,
            self.rotation()?,
        ))
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        if game.height == 0 {
            return Err(ConfigError::Validation("game.height must be > 0".into()));
        }
        if game.width == 0 {
            return Err(ConfigError::Validation("game.width must be > 0".into()));
        }
        if game.streak == 0 {
            return Err(ConfigError::Validation("game.streak must be > 0".into()));
        }
        if game.streak > game.height.max(game.width) {
            return Err(ConfigError::Validation(
                "game.streak must fit on the board".into(),
            ));
        }

        if game.players.is_empty() {
            return Err(ConfigError::Validation(
                "game.players must not be empty".into(),
            ));
        }
        for player in &game.players {
            let symbol = player.mark.symbol();
            if symbol.is_whitespace() || symbol == EMPTY_SYMBOL || symbol == '/' {
                return Err(ConfigError::Validation(format!(
                    "game.players: {symbol:?} cannot be used as a mark"
                )));
            }
        }
        game.rotation()?;

        match self.search.max_depth {
            Some(0) => {
                return Err(ConfigError::Validation(
                    "search.max_depth must be > 0".into(),
                ))
            }
            Some(depth) if depth > MAX_DEPTH => {
                return Err(ConfigError::Validation(format!(
                    "search.max_depth must be <= {MAX_DEPTH}"
                )))
            }
            _ => {}
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
