//! In-memory source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use vocabquiz_core::model::RawEntry;
use vocabquiz_core::parser::ParsedFeed;
use vocabquiz_core::traits::VocabularySource;

/// A source that always returns the same corpus, or always fails.
pub struct StaticSource {
    entries: Vec<RawEntry>,
    failure: Option<String>,
    fetch_count: AtomicU32,
}

impl StaticSource {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries,
            failure: None,
            fetch_count: AtomicU32::new(0),
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.to_string()),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl VocabularySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_feed(&self) -> anyhow::Result<ParsedFeed> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(ParsedFeed {
                entries: self.entries.clone(),
                skipped_rows: 0,
            }),
        }
    }
}
