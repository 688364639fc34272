//! The `vocabquiz topics` command.

use anyhow::{Context, Result};

use vocabquiz_core::model::TopicIndex;
use vocabquiz_core::traits::VocabularySource;
use vocabquiz_feed::create_source;

use super::FeedArgs;
use crate::quiz::render::topic_table;

pub async fn execute(feed: FeedArgs) -> Result<()> {
    let config = feed.load_config()?;
    let source = create_source(&feed.source_spec(), &config)?;
    let corpus = source
        .fetch()
        .await
        .with_context(|| format!("failed to load vocabulary from {} source", source.name()))?;

    let topics = TopicIndex::from_corpus(&corpus);
    println!("{}", topic_table(&topics, corpus.len()));

    let untagged = corpus.iter().filter(|e| e.topic.is_empty()).count();
    if untagged > 0 {
        println!("{untagged} word(s) have no topic and only appear under \"all\".");
    }

    Ok(())
}
