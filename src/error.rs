use std::path::PathBuf;

use crate::game::MoveError;

/// Errors raised while validating a board configuration or loading the
/// application config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board must have between {min} and {max} columns, got {got}")]
    ColumnCount { got: usize, min: usize, max: usize },

    #[error("exactly {expected} don't-care cells are required, got {got}")]
    DontCareCount { got: usize, expected: usize },

    #[error("column height '{0}' is not a positive integer")]
    MalformedHeight(String),

    #[error("don't-care cell '{0}' must be a column letter followed by a row number")]
    MalformedCell(String),

    #[error("don't-care cell '{0}' is outside the playable board")]
    CellOutOfBounds(String),

    #[error("don't-care cell '{0}' is listed twice")]
    DuplicateDontCare(String),

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

/// Errors from the move selector. These signal a broken caller, not a bad
/// position: the selector is only ever asked to move in a live game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("no legal column left on the board")]
    NoLegalMoves,
}

/// Errors that end a game loop abnormally.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the game finished")]
    InputClosed,

    #[error("move selection failed: {0}")]
    Selector(#[from] SelectorError),

    #[error("agent {agent} selected illegal column {column}: {source}")]
    IllegalAiMove {
        agent: String,
        column: usize,
        source: MoveError,
    },
}

/// Errors raised by the batch experiment harness.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("failed to write results to {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid board in experiment: {0}")]
    Config(#[from] ConfigError),

    #[error("game failed: {0}")]
    Game(#[from] GameError),
}
