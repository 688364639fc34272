//! vocabquiz-feed — Vocabulary feed sources.
//!
//! Implements the `VocabularySource` trait for the published spreadsheet, a
//! saved payload on disk, and a fixed in-memory corpus, and loads the quiz
//! configuration.

pub mod config;
pub mod error;
pub mod file;
pub mod mock;
pub mod sheet;

pub use config::{create_source, load_config, QuizConfig, SourceSpec, SpeechConfig};
pub use error::FeedError;
