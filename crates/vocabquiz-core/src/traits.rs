//! Capability traits at the edges of the quiz.
//!
//! Feed sources live in `vocabquiz-feed`; the speech and celebration
//! capabilities are implemented by the front end. Keeping them behind traits
//! lets the session and the data pipeline be tested without a network, a
//! sound card, or a wall clock.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::model::RawEntry;
use crate::parser::ParsedFeed;

// ---------------------------------------------------------------------------
// Vocabulary source
// ---------------------------------------------------------------------------

/// Somewhere a corpus can be loaded from.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Human-readable source name for logs (e.g. "sheet").
    fn name(&self) -> &str;

    /// Fetch and parse the feed, keeping the count of rows that were dropped.
    async fn fetch_feed(&self) -> anyhow::Result<ParsedFeed>;

    /// Fetch and parse the full corpus. Called once per program run; failures
    /// are not retried.
    async fn fetch(&self) -> anyhow::Result<Vec<RawEntry>> {
        Ok(self.fetch_feed().await?.entries)
    }
}

// ---------------------------------------------------------------------------
// Front-end capabilities
// ---------------------------------------------------------------------------

/// Pronounces a word. Fire-and-forget.
pub trait Speaker: Send + Sync {
    fn say(&self, word: &str);
}

/// Reacts to a submitted score. Called once per submission.
pub trait Celebration: Send + Sync {
    fn celebrate(&self, percent: u8);
}

/// A source of periodic ticks.
pub trait Clock: Send + Sync {
    /// A fresh stream that yields once per period, starting one period from
    /// now.
    fn ticks(&self) -> BoxStream<'static, ()>;
}

/// A speaker that says nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn say(&self, _: &str) {}
}

/// A celebration that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&self, _: u8) {}
}
