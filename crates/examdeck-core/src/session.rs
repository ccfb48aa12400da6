//! One exam sitting: state machine, navigation, palette, and submission.
//!
//! The session takes a defensive snapshot of the exam at construction, so
//! administrative edits during an in-flight sitting do not affect it. The
//! answer sheet is owned exclusively by the session and is discarded on
//! try-again; it is never persisted.

use crate::answers::AnswerSheet;
use crate::grading::{self, GradeOutcome};
use crate::model::{AnswerValue, ExamData, Question, Section};

/// Lifecycle state of a sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, instructions shown, timer not running.
    Start,
    /// Taking the exam.
    InProgress,
    /// Submitted; the outcome is fixed.
    Result,
}

/// Palette status for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Answered,
    Unanswered,
}

/// One palette cell: a question's global position and status.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    /// Index into the flat question sequence.
    pub index: usize,
    /// 1-based number within the owning section.
    pub number_in_section: usize,
    pub question_id: String,
    pub status: QuestionStatus,
}

/// Palette cells for one section.
#[derive(Debug, Clone)]
pub struct PaletteSection {
    pub section_id: String,
    pub section_title: String,
    pub entries: Vec<PaletteEntry>,
}

/// An active exam sitting.
#[derive(Debug)]
pub struct ExamSession {
    exam: ExamData,
    state: SessionState,
    current_index: usize,
    answers: AnswerSheet,
    outcome: Option<GradeOutcome>,
}

impl ExamSession {
    /// Start a fresh sitting over a snapshot of the exam definition.
    pub fn new(exam: ExamData) -> Self {
        Self {
            exam,
            state: SessionState::Start,
            current_index: 0,
            answers: AnswerSheet::new(),
            outcome: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn exam(&self) -> &ExamData {
        &self.exam
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.exam.question_count()
    }

    pub fn total_gradable_marks(&self) -> f64 {
        self.exam.total_gradable_marks()
    }

    /// Move from Start into InProgress. No-op in any other state.
    pub fn begin(&mut self) {
        if self.state == SessionState::Start {
            self.state = SessionState::InProgress;
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The active question, by the canonical flat ordering.
    pub fn current_question(&self) -> Option<&Question> {
        self.exam.flat_questions().get(self.current_index).copied()
    }

    /// The section that owns the active question.
    pub fn current_section(&self) -> Option<&Section> {
        let mut remaining = self.current_index;
        for section in &self.exam.sections {
            if remaining < section.questions.len() {
                return Some(section);
            }
            remaining -= section.questions.len();
        }
        None
    }

    /// 1-based position of the active question within its section.
    pub fn number_in_section(&self) -> usize {
        let mut remaining = self.current_index;
        for section in &self.exam.sections {
            if remaining < section.questions.len() {
                return remaining + 1;
            }
            remaining -= section.questions.len();
        }
        1
    }

    /// Step back; no-op at index 0.
    pub fn previous(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Step forward; no-op at the last index.
    pub fn next(&mut self) {
        let last = self.question_count().saturating_sub(1);
        if self.current_index < last {
            self.current_index += 1;
        }
    }

    /// Jump directly to a question. Out-of-range indices clamp to the last
    /// valid position; never panics.
    pub fn jump_to(&mut self, index: usize) {
        let last = self.question_count().saturating_sub(1);
        self.current_index = index.min(last);
    }

    /// Record a free-text answer for the active question.
    pub fn answer_text(&mut self, text: impl Into<String>) {
        if let Some(id) = self.current_question().map(|q| q.id.clone()) {
            self.answers.set_text(&id, text);
        }
    }

    /// Toggle a multi-select option for the active question.
    pub fn toggle_option(&mut self, option: &str) {
        if let Some(id) = self.current_question().map(|q| q.id.clone()) {
            self.answers.toggle_option(&id, option);
        }
    }

    /// Assign a match response for one stem of the active question.
    pub fn answer_match(&mut self, stem_id: &str, response_id: &str) {
        if let Some(id) = self.current_question().map(|q| q.id.clone()) {
            self.answers.set_match(&id, stem_id, response_id);
        }
    }

    /// Overwrite the active question's answer with an arbitrary value.
    pub fn answer_value(&mut self, value: AnswerValue) {
        if let Some(id) = self.current_question().map(|q| q.id.clone()) {
            self.answers.set(&id, value);
        }
    }

    /// Submit the sitting and fix the outcome.
    ///
    /// Idempotent: the first call grades and transitions to Result; any
    /// later call (a lost timer/manual race, a double click) returns the
    /// stored outcome without recomputing or re-transitioning.
    pub fn submit(&mut self) -> &GradeOutcome {
        if self.outcome.is_none() {
            let questions = self.exam.flat_questions();
            let outcome = grading::grade(&questions, &self.answers);
            tracing::debug!(
                score = outcome.score,
                total = outcome.total_gradable_marks,
                "sitting submitted"
            );
            self.outcome = Some(outcome);
            self.state = SessionState::Result;
        }
        self.outcome.as_ref().expect("outcome set above")
    }

    /// The fixed outcome, once submitted.
    pub fn outcome(&self) -> Option<&GradeOutcome> {
        self.outcome.as_ref()
    }

    /// Discard the sitting and return to a fresh Start state.
    pub fn try_again(&mut self) {
        self.answers.clear();
        self.outcome = None;
        self.current_index = 0;
        self.state = SessionState::Start;
    }

    /// Palette view: questions grouped by owning section, each with one
    /// global status. Current takes precedence over Answered.
    pub fn palette(&self) -> Vec<PaletteSection> {
        let mut global = 0usize;
        self.exam
            .sections
            .iter()
            .map(|section| {
                let entries = section
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(sub, q)| {
                        let status = if global == self.current_index {
                            QuestionStatus::Current
                        } else if self.answers.is_answered(&q.id) {
                            QuestionStatus::Answered
                        } else {
                            QuestionStatus::Unanswered
                        };
                        let entry = PaletteEntry {
                            index: global,
                            number_in_section: sub + 1,
                            question_id: q.id.clone(),
                            status,
                        };
                        global += 1;
                        entry
                    })
                    .collect();
                PaletteSection {
                    section_id: section.id.clone(),
                    section_title: section.title.clone(),
                    entries,
                }
            })
            .collect()
    }
}
