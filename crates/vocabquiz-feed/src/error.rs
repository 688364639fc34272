//! Feed error types.

use thiserror::Error;

use vocabquiz_core::QuizError;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("feed request failed (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// A saved payload could not be read.
    #[error("failed to read feed file: {0}")]
    Io(String),

    /// The payload was not a valid table.
    #[error(transparent)]
    Format(#[from] QuizError),
}
