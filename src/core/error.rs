use thiserror::Error;

use crate::core::types::PlayerId;

/// Every engine rejection is recoverable; callers may drop the `Err` and treat
/// it as a no-op.
#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Action not allowed during {0:?}")]
    WrongPhase(crate::game::round::RoundPhase),

    #[error("Player {0} is not the turn player")]
    NotTurnPlayer(PlayerId),

    #[error("Only non-turn players may do this")]
    IsTurnPlayer,

    #[error("A question request is already pending")]
    SelectionPending,

    #[error("Category not offered in this game: {0}")]
    UnknownCategory(String),

    #[error("Category already used: {0}")]
    CategoryUsed(String),

    #[error("Difficulty not offered in this game: {0}")]
    UnknownDifficulty(f64),

    #[error("Difficulty already used: {0}")]
    DifficultyUsed(f64),

    #[error("Player {0} already answered this round")]
    AlreadyAnswered(PlayerId),

    #[error("Power-up unavailable: {0}")]
    PowerupUnavailable(String),

    #[error("No question for category {category} in difficulty [{min:.2}, {max:.2}]")]
    NoMatchingQuestion { category: String, min: f64, max: f64 },

    #[error("Discarded stale result for request {0}")]
    StaleResult(u64),

    #[error("Game is over")]
    GameOver,

    #[error("Question not found: {0}")]
    QuestionNotFound(crate::core::types::QuestionId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TriviaError>;
