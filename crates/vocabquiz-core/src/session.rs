//! Quiz session state machine.
//!
//! A session starts in [`Phase::Setup`]. Starting a run moves it to
//! [`Phase::Testing`], where the user answers, submits, and may retry the
//! questions they got wrong. Returning to setup discards the round.
//!
//! Every rejected action leaves the session exactly as it was.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder;
use crate::error::QuizError;
use crate::model::{AnswerMap, Question, QuestionCount, RawEntry, TopicFilter};
use crate::scoring::{self, ScoreReport};

/// Top-level session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Testing,
}

/// Result of a successful [`QuizSession::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The round has this many questions.
    Ready(usize),
    /// No corpus entry matched the selected topic; the round is empty.
    EmptySelection,
}

/// State of one quiz session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    phase: Phase,
    questions: Vec<Question>,
    answers: AnswerMap,
    submitted: bool,
    elapsed_seconds: u64,
    selected_topic: TopicFilter,
    requested_count: QuestionCount,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Setup,
            questions: Vec::new(),
            answers: AnswerMap::new(),
            submitted: false,
            elapsed_seconds: 0,
            selected_topic: TopicFilter::All,
            requested_count: QuestionCount::DEFAULT,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn selected_topic(&self) -> &TopicFilter {
        &self.selected_topic
    }

    pub fn requested_count(&self) -> QuestionCount {
        self.requested_count
    }

    /// Questions without a selected option.
    pub fn unanswered_count(&self) -> usize {
        self.questions.len().saturating_sub(self.answers.len())
    }

    /// Whether the elapsed-time timer should be running.
    pub fn timer_should_run(&self) -> bool {
        self.phase == Phase::Testing && !self.submitted
    }

    fn state_name(&self) -> &'static str {
        match (self.phase, self.submitted) {
            (Phase::Setup, _) => "in setup",
            (Phase::Testing, false) => "answering",
            (Phase::Testing, true) => "submitted",
        }
    }

    fn reject(&self, action: &'static str) -> QuizError {
        let err = QuizError::IllegalTransition {
            action,
            state: self.state_name(),
        };
        tracing::debug!(session = %self.id, "rejected: {err}");
        err
    }

    /// Begin a round of up to `count_text` questions drawn from `topic`.
    ///
    /// `count_text` is the raw user input; anything other than a positive
    /// whole number is rejected with [`QuizError::InvalidCount`] and the
    /// session stays in setup.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        corpus: &[RawEntry],
        count_text: &str,
        topic: TopicFilter,
        rng: &mut R,
    ) -> Result<StartOutcome, QuizError> {
        if self.phase != Phase::Setup {
            return Err(self.reject("start a new round"));
        }
        let count = count_text.parse::<QuestionCount>().inspect_err(|e| {
            tracing::debug!(session = %self.id, "rejected start: {e}");
        })?;

        let questions = builder::build(corpus, &topic, count, rng);

        self.id = Uuid::new_v4();
        self.requested_count = count;
        self.selected_topic = topic;
        self.questions = questions;
        self.answers.clear();
        self.elapsed_seconds = 0;
        self.submitted = false;
        self.phase = Phase::Testing;

        tracing::debug!(
            session = %self.id,
            topic = %self.selected_topic,
            requested = count.get(),
            built = self.questions.len(),
            "round started"
        );

        Ok(if self.questions.is_empty() {
            StartOutcome::EmptySelection
        } else {
            StartOutcome::Ready(self.questions.len())
        })
    }

    /// Record `value` as the answer to question `index`, replacing any
    /// earlier choice. Out-of-range indices are ignored.
    pub fn select_option(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), QuizError> {
        match (self.phase, self.submitted) {
            (Phase::Setup, _) => return Err(self.reject("select an option")),
            (Phase::Testing, true) => {
                tracing::debug!(session = %self.id, index, "rejected selection after submit");
                return Err(QuizError::AnswersFrozen);
            }
            (Phase::Testing, false) => {}
        }

        if index >= self.questions.len() {
            tracing::debug!(session = %self.id, index, "ignoring selection out of range");
            return Ok(());
        }

        self.answers.insert(index, value.into());
        Ok(())
    }

    /// Freeze the answers and score the round.
    pub fn submit(&mut self) -> Result<ScoreReport, QuizError> {
        if self.phase != Phase::Testing || self.submitted {
            return Err(self.reject("submit"));
        }

        self.submitted = true;
        let report = self.score();
        tracing::debug!(
            session = %self.id,
            correct = report.correct_count,
            total = report.total,
            elapsed = self.elapsed_seconds,
            "round submitted"
        );
        Ok(report)
    }

    /// Score the current answers without changing anything.
    pub fn score(&self) -> ScoreReport {
        scoring::score(&self.questions, &self.answers)
    }

    /// Replace the round with the questions answered wrongly, each with
    /// freshly shuffled options. Returns the size of the new round.
    pub fn retry_wrong<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, QuizError> {
        if self.phase != Phase::Testing || !self.submitted {
            return Err(self.reject("retry wrong answers"));
        }

        let report = self.score();
        if report.wrong_questions.is_empty() {
            return Err(QuizError::NothingToRetry);
        }

        self.questions = report
            .wrong_questions
            .iter()
            .map(|q| q.reshuffled(rng))
            .collect();
        self.answers.clear();
        self.elapsed_seconds = 0;
        self.submitted = false;

        tracing::debug!(
            session = %self.id,
            retrying = self.questions.len(),
            "retrying wrong answers"
        );
        Ok(self.questions.len())
    }

    /// Discard the round and return to setup. A no-op in setup.
    pub fn back_to_setup(&mut self) {
        if self.phase == Phase::Setup {
            return;
        }
        self.phase = Phase::Setup;
        self.questions.clear();
        self.answers.clear();
        self.elapsed_seconds = 0;
        self.submitted = false;
        tracing::debug!(session = %self.id, "back to setup");
    }

    /// Count one second of answering time. Returns `false` (and changes
    /// nothing) unless a round is being answered.
    pub fn tick(&mut self) -> bool {
        if !self.timer_should_run() {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }
}
