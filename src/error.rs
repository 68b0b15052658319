//! Error types shared by every layer of the engine.

use thiserror::Error;

/// Problems found while reading the serialized board text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("serialized state is empty")]
    Empty,

    #[error("line {line} is empty")]
    EmptyRow { line: usize },

    #[error("line {line} is not newline-terminated")]
    MissingTrailingNewline { line: usize },

    #[error("line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line} falls outside the derived {rows}-row board")]
    RowOverflow { line: usize, rows: usize },
}

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("coordinate ({x}, {y}) is outside the {cols}x{rows} grid")]
    InvalidCoordinate {
        x: i64,
        y: i64,
        cols: usize,
        rows: usize,
    },

    #[error("index {index} is outside a grid of {len} cells")]
    InvalidIndex { index: usize, len: usize },

    #[error("grid dimensions must be positive, got {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("malformed board text: {0}")]
    Format(#[from] FormatError),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a scheduler error
    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::Scheduler(msg.into())
    }
}
