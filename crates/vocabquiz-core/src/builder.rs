//! Question set construction.
//!
//! Filters the corpus by topic, draws a uniformly random sample, and turns
//! each sampled entry into a question with independently shuffled options.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Question, QuestionCount, RawEntry, TopicFilter};

/// Entries eligible under `topic`, in corpus order.
pub fn filter_corpus<'a>(corpus: &'a [RawEntry], topic: &TopicFilter) -> Vec<&'a RawEntry> {
    corpus.iter().filter(|e| topic.matches(e)).collect()
}

/// Build up to `count` questions from the entries matching `topic`.
///
/// The result has `min(count, matching)` questions. Sampling is a
/// Fisher–Yates shuffle of the matching entries truncated to that length, so
/// every entry is equally likely to be picked and no entry appears twice.
/// An empty selection yields an empty vector.
pub fn build<R: Rng + ?Sized>(
    corpus: &[RawEntry],
    topic: &TopicFilter,
    count: QuestionCount,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = filter_corpus(corpus, topic);
    pool.shuffle(rng);
    pool.truncate(count.get());

    pool.into_iter()
        .map(|entry| Question::from_entry(entry, rng))
        .collect()
}
