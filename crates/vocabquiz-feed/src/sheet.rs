//! Published Google Sheet feed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use vocabquiz_core::parser::{parse_feed, ParsedFeed};
use vocabquiz_core::traits::VocabularySource;

use crate::error::FeedError;

/// The spreadsheet the quiz was originally published from.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1NdwXWfig1nRRvAcrt6IHwYrjMuLvAcxRIPzeLMxOn9Q/gviz/tq?tqx=out:json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Loads the corpus with a single GET of a sheet's gviz JSON endpoint.
pub struct SheetSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl SheetSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        let url = if url.is_empty() {
            DEFAULT_SHEET_URL
        } else {
            url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_text(&self) -> Result<String, FeedError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout(self.timeout_secs)
            } else {
                FeedError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Http {
                status,
                message: body,
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout(self.timeout_secs)
            } else {
                FeedError::Network(format!("failed to read response body: {e}"))
            }
        })
    }
}

#[async_trait]
impl VocabularySource for SheetSource {
    fn name(&self) -> &str {
        "sheet"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_feed(&self) -> anyhow::Result<ParsedFeed> {
        let text = self.fetch_text().await?;
        let parsed = parse_feed(&text).map_err(FeedError::from)?;
        tracing::info!(
            entries = parsed.entries.len(),
            skipped = parsed.skipped_rows,
            "loaded vocabulary sheet"
        );
        Ok(parsed)
    }
}
