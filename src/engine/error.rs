// src/engine/error.rs

use thiserror::Error;

use super::archetype::Archetype;

/// Broad classes of engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The question bank cannot produce a valid quiz. Fails initialization.
    Configuration,
    /// An attempt received or produced data it cannot score. Fails the attempt.
    DataIntegrity,
}

/// Errors raised by the quiz engine.
///
/// All of them are local to one attempt (or to startup, for configuration
/// errors); none of them touches the question bank.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("question bank is empty")]
    EmptyQuestionBank,

    #[error("question {question_id} has {count} options, expected {expected}")]
    WrongOptionCount {
        question_id: i64,
        count: usize,
        expected: usize,
    },

    #[error("question {question_id} has no option for {archetype}")]
    MissingArchetype { question_id: i64, archetype: Archetype },

    #[error("question {question_id} has more than one option with id {option_id}")]
    DuplicateOptionId { question_id: i64, option_id: i64 },

    #[error("option {option_id} of question {question_id} is worth {points} points, expected 1 to {max}", max = super::bank::MAX_POINTS)]
    InvalidPoints {
        question_id: i64,
        option_id: i64,
        points: i64,
    },

    #[error("failed to load question bank: {0}")]
    BankSource(String),

    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("question {question_index} has no option with id {option_id}")]
    UnknownOption { question_index: usize, option_id: i64 },

    #[error("expected an answer for question {expected}, got {got}")]
    UnexpectedQuestion { expected: usize, got: usize },

    #[error("attempt is already complete")]
    AttemptComplete,

    #[error("attempt is incomplete: {answered} of {total} questions answered")]
    IncompleteAttempt { answered: usize, total: usize },

    #[error("cannot resolve an archetype from an empty tally")]
    EmptyTally,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::EmptyQuestionBank
            | EngineError::WrongOptionCount { .. }
            | EngineError::MissingArchetype { .. }
            | EngineError::DuplicateOptionId { .. }
            | EngineError::InvalidPoints { .. }
            | EngineError::BankSource(_) => ErrorKind::Configuration,
            EngineError::UnknownArchetype(_)
            | EngineError::UnknownOption { .. }
            | EngineError::UnexpectedQuestion { .. }
            | EngineError::AttemptComplete
            | EngineError::IncompleteAttempt { .. }
            | EngineError::EmptyTally => ErrorKind::DataIntegrity,
        }
    }
}
