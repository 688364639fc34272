//! The `vocabquiz validate` command.

use anyhow::{Context, Result};

use vocabquiz_core::parser::validate_corpus;
use vocabquiz_core::traits::VocabularySource;
use vocabquiz_feed::create_source;

use super::FeedArgs;

pub async fn execute(feed: FeedArgs) -> Result<()> {
    let config = feed.load_config()?;
    let source = create_source(&feed.source_spec(), &config)?;
    let parsed = source
        .fetch_feed()
        .await
        .with_context(|| format!("failed to load vocabulary from {} source", source.name()))?;

    println!(
        "Feed: {} entries ({} rows skipped)",
        parsed.entries.len(),
        parsed.skipped_rows
    );

    let warnings = validate_corpus(&parsed.entries);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.word, w.message);
    }

    if parsed.entries.is_empty() {
        println!("\nNo usable entries; every quiz will be empty.");
    } else if warnings.is_empty() {
        println!("Feed valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
