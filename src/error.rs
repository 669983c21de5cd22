//! Error types for the rules engine.
//!
//! Every failure is scoped to a single move or query: the caller gets an
//! error back, the game state is left untouched, and the transport decides
//! how to report it to the originating client.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Game, player or card absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Wrong game status, not the player's turn, dead player, nothing to resolve.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Missing field, bad target, out-of-range position, empty draw pile.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// The player lacks the card the action requires.
    #[error("Gameplay violation: {0}")]
    GameplayViolation(String),
}

impl EngineError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }

    pub fn invalid_move(detail: impl Into<String>) -> Self {
        Self::InvalidMove(detail.into())
    }

    pub fn gameplay_violation(detail: impl Into<String>) -> Self {
        Self::GameplayViolation(detail.into())
    }

    /// Stable machine-readable code for error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InvalidMove(_) => "INVALID_MOVE",
            Self::GameplayViolation(_) => "GAMEPLAY_VIOLATION",
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Rejected engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
