//! Saved feed payloads on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use vocabquiz_core::parser::{parse_feed, ParsedFeed};
use vocabquiz_core::traits::VocabularySource;

use crate::error::FeedError;

/// Loads the corpus from a file holding a gviz payload (wrapped or bare JSON).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VocabularySource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_feed(&self) -> anyhow::Result<ParsedFeed> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Io(format!("{}: {e}", self.path.display())))?;
        let parsed = parse_feed(&text).map_err(FeedError::from)?;
        tracing::info!(
            entries = parsed.entries.len(),
            skipped = parsed.skipped_rows,
            "loaded vocabulary file"
        );
        Ok(parsed)
    }
}
