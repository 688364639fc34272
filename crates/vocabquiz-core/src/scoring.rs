//! Answer scoring.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Question};

/// Outcome of scoring one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Questions answered with exactly the correct option.
    pub correct_count: usize,
    /// Number of questions in the round.
    pub total: usize,
    /// `correct_count / total` as a percentage rounded half-up; 0 for an
    /// empty round.
    pub percent: u8,
    /// Incorrect and unanswered questions, in round order.
    pub wrong_questions: Vec<Question>,
}

impl ScoreReport {
    pub fn wrong_count(&self) -> usize {
        self.wrong_questions.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct_count == self.total
    }
}

/// Score `answers` against `questions`.
///
/// A question is correct only if its index maps to a string equal to its
/// answer (case-sensitive, untrimmed).
pub fn score(questions: &[Question], answers: &AnswerMap) -> ScoreReport {
    let mut correct_count = 0;
    let mut wrong_questions = Vec::new();

    for (i, question) in questions.iter().enumerate() {
        match answers.get(&i) {
            Some(choice) if question.is_correct(choice) => correct_count += 1,
            _ => wrong_questions.push(question.clone()),
        }
    }

    let total = questions.len();
    ScoreReport {
        correct_count,
        total,
        percent: percent(correct_count, total),
        wrong_questions,
    }
}

fn percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // round(100 * correct / total), half-up, without floating point
    let rounded = (200 * correct + total) / (2 * total);
    rounded.min(100) as u8
}
