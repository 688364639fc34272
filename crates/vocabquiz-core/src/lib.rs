//! vocabquiz-core — Quiz session state machine, question building, and scoring.
//!
//! This crate defines the data model, the spreadsheet feed parser, and the
//! pure quiz logic that the feed sources and the terminal front end build on.

pub mod builder;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod traits;

pub use error::QuizError;
