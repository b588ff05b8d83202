//! Error types shared by the quiz core.

use thiserror::Error;

use crate::db::StorageError;

/// Errors surfaced by the quiz core to the boundary layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("history storage unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    #[error("invalid difficulty profile: {0}")]
    InvalidProfile(String),

    #[error("no non-zero divisor could be drawn for profile {0}")]
    NoDivisor(String),
}

pub type QuizResult<T> = Result<T, QuizError>;
