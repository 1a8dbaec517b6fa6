use std::path::PathBuf;

/// Errors that can occur when building a board from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur when building a player rotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    #[error("rotation needs at least one entry")]
    Empty,

    #[error("entry {index} repeats an earlier entry")]
    Duplicate { index: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "row 1 has 2 cells, expected 3");
    }

    #[test]
    fn test_rotation_error_display() {
        assert_eq!(
            RotationError::Duplicate { index: 2 }.to_string(),
            "entry 2 repeats an earlier entry"
        );
        assert_eq!(
            RotationError::Empty.to_string(),
            "rotation needs at least one entry"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.streak must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.streak must be >= 1"
        );
    }
}
