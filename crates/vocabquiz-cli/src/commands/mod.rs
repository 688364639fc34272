pub mod init;
pub mod play;
pub mod topics;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use vocabquiz_core::model::RawEntry;
use vocabquiz_core::traits::VocabularySource;
use vocabquiz_feed::config::load_config_from;
use vocabquiz_feed::{create_source, QuizConfig, SourceSpec};

/// Feed selection flags shared by every command that loads vocabulary.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FeedArgs {
    /// Read a saved feed payload instead of fetching the sheet
    #[arg(long)]
    pub feed_file: Option<PathBuf>,

    /// Sheet URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl FeedArgs {
    pub fn load_config(&self) -> Result<QuizConfig> {
        load_config_from(self.config.as_deref())
    }

    pub fn source_spec(&self) -> SourceSpec {
        SourceSpec::from_overrides(self.feed_file.clone(), self.url.clone())
    }
}

/// Fetch the corpus once. A failed fetch is logged and yields an empty
/// corpus, so the quiz still runs.
pub async fn load_corpus(spec: &SourceSpec, config: &QuizConfig) -> Vec<RawEntry> {
    let source = match create_source(spec, config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("could not create vocabulary source: {e:#}");
            return Vec::new();
        }
    };
    match source.fetch().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(source = source.name(), "failed to load vocabulary: {e:#}");
            Vec::new()
        }
    }
}
