//! Quiz error types.
//!
//! Every variant is recoverable: the worst outcome of any of them is an empty
//! quiz or a rejected user action, never a crashed process.

use thiserror::Error;

/// Errors produced by the feed parser and the quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The feed payload could not be parsed as the expected table.
    #[error("malformed feed payload: {0}")]
    SourceFormat(String),

    /// The requested question count is not a positive whole number.
    #[error("question count must be a whole number greater than 0, got {0:?}")]
    InvalidCount(String),

    /// A retry was requested but every answer was correct.
    #[error("no wrong answers to retry")]
    NothingToRetry,

    /// An option was selected after the round was submitted.
    #[error("answers are frozen after submission")]
    AnswersFrozen,

    /// The action is not a legal transition from the current state.
    #[error("cannot {action} while {state}")]
    IllegalTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl QuizError {
    /// Returns `true` if the user has to correct their input before retrying
    /// the same action.
    pub fn needs_user_action(&self) -> bool {
        matches!(self, QuizError::InvalidCount(_))
    }
}
