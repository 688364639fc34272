//! The `vocabquiz play` command.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use vocabquiz_core::model::TopicFilter;
use vocabquiz_core::timer::IntervalClock;

use super::{load_corpus, FeedArgs};
use crate::capabilities::{speaker_for, TerminalCelebration};
use crate::quiz::{Capabilities, QuizApp};

pub async fn execute(
    feed: FeedArgs,
    count: Option<String>,
    topic: Option<String>,
    no_speech: bool,
) -> Result<()> {
    let config = feed.load_config()?;

    let count_text = count.unwrap_or_else(|| config.default_count.clone());
    let topic_text = topic.unwrap_or_else(|| config.default_topic.clone());
    let topic = topic_text.parse::<TopicFilter>().unwrap_or_else(|e| {
        tracing::warn!("ignoring topic {topic_text:?}: {e}");
        TopicFilter::All
    });

    let corpus = load_corpus(&feed.source_spec(), &config).await;
    if corpus.is_empty() {
        eprintln!(
            "No vocabulary loaded; quizzes will be empty. \
             Run with RUST_LOG=vocabquiz=debug for details."
        );
    }

    let capabilities = Capabilities {
        speaker: speaker_for(&config.speech, no_speech),
        celebration: Box::new(TerminalCelebration::new(config.celebrate_threshold)),
        clock: Arc::new(IntervalClock::default()),
    };

    let mut app = QuizApp::new(
        corpus,
        count_text,
        topic,
        capabilities,
        StdRng::from_entropy(),
        std::io::stdout(),
    );
    app.run(stdin_lines()).await?;
    tracing::debug!(
        session = %app.session().id(),
        elapsed = app.session().elapsed_seconds(),
        "quiz closed"
    );

    Ok(())
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown. The channel closes at end of input.
fn stdin_lines() -> UnboundedReceiver<String> {
    let (tx, rx) = unbounded_channel();
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), &tx));
    rx
}

/// Send each line of `reader` until end of input, a read error, or a closed
/// channel. Lines that are not valid UTF-8 are skipped.
fn forward_lines(mut reader: impl BufRead, tx: &UnboundedSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("stopped reading input: {e}");
                break;
            }
        }
        let line = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("skipping input line that is not valid UTF-8: {e}");
                continue;
            }
        };
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if tx.send(line.to_string()).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> Vec<String> {
        let (tx, mut rx) = unbounded_channel();
        forward_lines(Cursor::new(input.to_vec()), &tx);
        drop(tx);
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn forwards_lines_without_terminators() {
        assert_eq!(collect(b"start\r\n1 a\nquit"), vec!["start", "1 a", "quit"]);
    }

    #[test]
    fn invalid_utf8_line_is_skipped_not_fatal() {
        assert_eq!(
            collect(b"count 2\n\xff\xfe oops\nstart\n"),
            vec!["count 2", "start"]
        );
    }
}
