//! The grading engine: one shared correctness predicate plus the scorer.
//!
//! `is_correct` is the single source of truth for per-question correctness.
//! Both the score computation here and the review rendering in
//! `examdeck-report` call it, so the reported score and the displayed
//! correct/incorrect markers cannot drift apart.

use crate::answers::AnswerSheet;
use crate::model::{AnswerValue, Question, QuestionKind};

/// The result of grading one sitting.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    /// Sum of marks over questions judged correct.
    pub score: f64,
    /// Sum of marks over all auto-gradable questions.
    pub total_gradable_marks: f64,
}

impl GradeOutcome {
    /// Score as a percentage of the gradable total; 0 when nothing is
    /// gradable.
    pub fn percentage(&self) -> f64 {
        if self.total_gradable_marks > 0.0 {
            self.score / self.total_gradable_marks * 100.0
        } else {
            0.0
        }
    }
}

/// Decide whether `answer` is a correct response to `question`.
///
/// Total over every reachable input: a missing answer, an empty answer, or
/// an answer whose shape does not match the question's correct-answer shape
/// is simply not correct. This function never panics and never errors.
pub fn is_correct(question: &Question, answer: Option<&AnswerValue>) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    if !answer.is_present() {
        return false;
    }

    match question.kind {
        QuestionKind::McqMulti => match (&question.correct_answer, answer) {
            (AnswerValue::Selection(correct), AnswerValue::Selection(candidate)) => {
                // Empty correct sets can never be matched; guards against a
                // vacuous-truth pass when the candidate is also empty.
                !correct.is_empty()
                    && correct.len() == candidate.len()
                    && correct.iter().all(|c| candidate.contains(c))
            }
            _ => false,
        },
        QuestionKind::MatchTheFollowing => match (&question.correct_answer, answer) {
            (AnswerValue::Matches(correct), AnswerValue::Matches(candidate)) => {
                !correct.is_empty()
                    && correct.len() == candidate.len()
                    && correct
                        .iter()
                        .all(|(stem, resp)| candidate.get(stem) == Some(resp))
            }
            _ => false,
        },
        QuestionKind::FillInTheBlank | QuestionKind::TrueFalse | QuestionKind::McqSingle => {
            match (&question.correct_answer, answer) {
                (AnswerValue::Text(correct), AnswerValue::Text(candidate)) => {
                    normalize(candidate) == normalize(correct)
                }
                _ => false,
            }
        }
        // Never auto-graded, regardless of what is on file.
        QuestionKind::BriefAnswer
        | QuestionKind::HtmlCoding
        | QuestionKind::JavascriptProgramming => false,
    }
}

/// Case-fold and strip surrounding whitespace for text comparison.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Grade a flat question sequence against a sheet of captured answers.
pub fn grade(questions: &[&Question], answers: &AnswerSheet) -> GradeOutcome {
    // Fold from +0.0: the stdlib's `Sum` for floats uses a -0.0 identity,
    // which would render an empty sum as "-0".
    let total_gradable_marks = questions
        .iter()
        .filter(|q| q.kind.is_auto_gradable())
        .map(|q| q.marks)
        .fold(0.0, |acc, m| acc + m);

    let score = questions
        .iter()
        .filter(|q| is_correct(q, answers.get(&q.id)))
        .map(|q| q.marks)
        .fold(0.0, |acc, m| acc + m);

    GradeOutcome {
        score,
        total_gradable_marks,
    }
}
