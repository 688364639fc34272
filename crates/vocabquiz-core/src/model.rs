//! Core data model types for vocabquiz.
//!
//! These are the types shared by the feed parser, the question builder, and
//! the quiz session.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A validated vocabulary entry from the spreadsheet feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// The word being quizzed.
    pub word: String,
    /// Part of speech or similar label (e.g. "noun").
    #[serde(rename = "type")]
    pub word_type: String,
    /// Category used to filter quiz runs. May be empty.
    pub topic: String,
    /// The correct meaning.
    pub answer: String,
    /// Distinct, non-empty incorrect meanings, none equal to `answer`.
    pub distractors: Vec<String>,
    /// Example sentence shown after submission.
    pub example: String,
}

impl RawEntry {
    /// Build an entry from cell values, returning `None` if the row is not a
    /// usable quiz item.
    ///
    /// Empty distractors and duplicates (including copies of the answer) are
    /// dropped. A row needs a word, an answer, and at least one remaining
    /// distractor.
    pub fn new(
        word: impl Into<String>,
        word_type: impl Into<String>,
        topic: impl Into<String>,
        answer: impl Into<String>,
        distractors: impl IntoIterator<Item = String>,
        example: impl Into<String>,
    ) -> Option<Self> {
        let word = word.into();
        let answer = answer.into();
        if word.is_empty() || answer.is_empty() {
            return None;
        }

        let mut kept: Vec<String> = Vec::new();
        for d in distractors {
            if d.is_empty() || d == answer || kept.contains(&d) {
                continue;
            }
            kept.push(d);
        }
        if kept.is_empty() {
            return None;
        }

        Some(Self {
            word,
            word_type: word_type.into(),
            topic: topic.into(),
            answer,
            distractors: kept,
            example: example.into(),
        })
    }

    /// The answer followed by the distractors, in column order.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(self.answer.clone())
            .chain(self.distractors.iter().cloned())
            .collect()
    }
}

/// A single multiple-choice quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub word: String,
    #[serde(rename = "type")]
    pub word_type: String,
    pub example: String,
    pub answer: String,
    /// Shuffled options; contains `answer` exactly once.
    pub options: Vec<String>,
}

impl Question {
    /// Derive a question from a corpus entry, shuffling its options into a new
    /// vector. The entry itself is left untouched.
    pub fn from_entry<R: Rng + ?Sized>(entry: &RawEntry, rng: &mut R) -> Self {
        let mut options = entry.options();
        options.shuffle(rng);
        Self {
            word: entry.word.clone(),
            word_type: entry.word_type.clone(),
            example: entry.example.clone(),
            answer: entry.answer.clone(),
            options,
        }
    }

    /// A copy of this question with freshly shuffled options.
    pub fn reshuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut options = self.options.clone();
        options.shuffle(rng);
        Self {
            options,
            ..self.clone()
        }
    }

    /// Whether `choice` is exactly the correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

/// Selected option per question index. Absence means unanswered.
pub type AnswerMap = BTreeMap<usize, String>;

/// Which part of the corpus a quiz run draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicFilter {
    #[default]
    All,
    Topic(String),
}

impl TopicFilter {
    /// Whether an entry is eligible under this filter.
    pub fn matches(&self, entry: &RawEntry) -> bool {
        match self {
            TopicFilter::All => true,
            TopicFilter::Topic(name) => entry.topic == *name,
        }
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicFilter::All => write!(f, "all"),
            TopicFilter::Topic(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for TopicFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Err("topic must not be empty".to_string()),
            "all" => Ok(TopicFilter::All),
            name => Ok(TopicFilter::Topic(name.to_string())),
        }
    }
}

/// A validated, positive whole number of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionCount(NonZeroUsize);

impl QuestionCount {
    /// Questions per round when the user has not chosen.
    pub const DEFAULT: QuestionCount = QuestionCount(NonZeroUsize::MIN.saturating_add(9));

    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionCount {
    type Err = QuizError;

    /// Parses free text the way a numeric input box would: surrounding
    /// whitespace is ignored and whole-valued decimals such as `"10.0"` are
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QuizError::InvalidCount(s.to_string());
        let trimmed = s.trim();

        if let Ok(n) = trimmed.parse::<usize>() {
            return QuestionCount::new(n).ok_or_else(invalid);
        }

        let value: f64 = trimmed.parse().map_err(|_| invalid())?;
        if !value.is_finite()
            || value.fract() != 0.0
            || value < 1.0
            || value > usize::MAX as f64
        {
            return Err(invalid());
        }
        QuestionCount::new(value as usize).ok_or_else(invalid)
    }
}

/// Number of corpus entries per non-empty topic, ordered by topic name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicIndex(BTreeMap<String, usize>);

impl TopicIndex {
    pub fn from_corpus(corpus: &[RawEntry]) -> Self {
        let mut counts = BTreeMap::new();
        for entry in corpus.iter().filter(|e| !e.topic.is_empty()) {
            *counts.entry(entry.topic.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn count(&self, topic: &str) -> usize {
        self.0.get(topic).copied().unwrap_or(0)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.0.contains_key(topic)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Format elapsed seconds as `m:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(word: &str, topic: &str) -> RawEntry {
        RawEntry::new(
            word,
            "noun",
            topic,
            format!("{word}-meaning"),
            vec!["x".to_string(), "y".to_string()],
            "",
        )
        .unwrap()
    }

    #[test]
    fn entry_requires_word_and_answer() {
        assert!(RawEntry::new("", "n", "t", "a", vec!["b".into()], "").is_none());
        assert!(RawEntry::new("w", "n", "t", "", vec!["b".into()], "").is_none());
    }

    #[test]
    fn entry_dedupes_and_drops_empty_options() {
        let e = RawEntry::new(
            "cat",
            "noun",
            "animals",
            "con mèo",
            vec![
                "".into(),
                "con chó".into(),
                "con mèo".into(),
                "con chó".into(),
            ],
            "",
        )
        .unwrap();
        assert_eq!(e.options(), vec!["con mèo", "con chó"]);
    }

    #[test]
    fn entry_with_only_answer_is_rejected() {
        let e = RawEntry::new("cat", "n", "t", "a", vec!["a".into(), "".into()], "");
        assert!(e.is_none());
    }

    #[test]
    fn question_keeps_answer_once_and_leaves_entry_alone() {
        let e = RawEntry::new(
            "dog",
            "noun",
            "animals",
            "con chó",
            vec!["con mèo".into(), "con gà".into(), "con vịt".into()],
            "The dog barks.",
        )
        .unwrap();
        let before = e.clone();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let q = Question::from_entry(&e, &mut rng);
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| *o == &q.answer).count(), 1);
        }
        assert_eq!(e, before);
    }

    #[test]
    fn reshuffled_preserves_everything_but_order() {
        let e = entry("owl", "birds");
        let mut rng = StdRng::seed_from_u64(1);
        let q = Question::from_entry(&e, &mut rng);
        let r = q.reshuffled(&mut rng);
        assert_eq!(r.word, q.word);
        assert_eq!(r.answer, q.answer);
        let mut a = q.options.clone();
        let mut b = r.options.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn topic_filter_parse_and_match() {
        assert_eq!("all".parse::<TopicFilter>().unwrap(), TopicFilter::All);
        assert_eq!(
            " animals ".parse::<TopicFilter>().unwrap(),
            TopicFilter::Topic("animals".into())
        );
        assert!("  ".parse::<TopicFilter>().is_err());

        let e = entry("cat", "animals");
        assert!(TopicFilter::All.matches(&e));
        assert!(TopicFilter::Topic("animals".into()).matches(&e));
        assert!(!TopicFilter::Topic("Animals".into()).matches(&e));
    }

    #[test]
    fn question_count_accepts_whole_numbers() {
        assert_eq!("10".parse::<QuestionCount>().unwrap().get(), 10);
        assert_eq!(" 7 ".parse::<QuestionCount>().unwrap().get(), 7);
        assert_eq!("10.0".parse::<QuestionCount>().unwrap().get(), 10);
    }

    #[test]
    fn default_question_count_is_ten() {
        assert_eq!(QuestionCount::DEFAULT.get(), 10);
    }

    #[test]
    fn question_count_rejects_everything_else() {
        for bad in ["", "abc", "0", "-3", "2.5", "NaN", "inf", "1e400"] {
            assert_eq!(
                bad.parse::<QuestionCount>(),
                Err(QuizError::InvalidCount(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn topic_index_counts_non_empty_topics() {
        let corpus = vec![
            entry("cat", "animals"),
            entry("dog", "animals"),
            entry("red", "colors"),
            entry("misc", ""),
        ];
        let index = TopicIndex::from_corpus(&corpus);
        assert_eq!(index.len(), 2);
        assert_eq!(index.count("animals"), 2);
        assert_eq!(index.count("colors"), 1);
        assert!(!index.contains(""));
        let names: Vec<&str> = index.iter().map(|(t, _)| t).collect();
        assert_eq!(names, vec!["animals", "colors"]);
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(61), "1:01");
        assert_eq!(format_elapsed(600), "10:00");
    }
}
