//! Answer capture state for one exam sitting.
//!
//! The sheet records exactly one current answer per question id; later
//! writes overwrite in place, no history. It is owned by the active
//! session, created empty at session start, and discarded on try-again.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::model::AnswerValue;

/// In-memory map from question id to the student's current answer.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: HashMap<String, AnswerValue>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a free-text answer, overwriting any prior value.
    pub fn set_text(&mut self, question_id: &str, text: impl Into<String>) {
        self.answers
            .insert(question_id.to_string(), AnswerValue::Text(text.into()));
    }

    /// Toggle an option on a multi-select answer: remove it when already
    /// chosen, append it otherwise. Accumulation order is preserved so the
    /// UI re-renders stably; grading ignores order.
    pub fn toggle_option(&mut self, question_id: &str, option: &str) {
        let entry = self
            .answers
            .entry(question_id.to_string())
            .or_insert_with(|| AnswerValue::Selection(Vec::new()));

        // A prior answer of a different shape is replaced outright.
        if !matches!(entry, AnswerValue::Selection(_)) {
            *entry = AnswerValue::Selection(Vec::new());
        }
        if let AnswerValue::Selection(items) = entry {
            if let Some(pos) = items.iter().position(|o| o == option) {
                items.remove(pos);
            } else {
                items.push(option.to_string());
            }
        }
    }

    /// Assign a response to one stem of a match question without disturbing
    /// the other stems' assignments.
    pub fn set_match(&mut self, question_id: &str, stem_id: &str, response_id: &str) {
        let entry = self
            .answers
            .entry(question_id.to_string())
            .or_insert_with(|| AnswerValue::Matches(BTreeMap::new()));

        if !matches!(entry, AnswerValue::Matches(_)) {
            *entry = AnswerValue::Matches(BTreeMap::new());
        }
        if let AnswerValue::Matches(map) = entry {
            map.insert(stem_id.to_string(), response_id.to_string());
        }
    }

    /// Overwrite the answer for a question with an arbitrary value.
    pub fn set(&mut self, question_id: &str, value: AnswerValue) {
        self.answers.insert(question_id.to_string(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Whether the question counts as answered for the palette.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(AnswerValue::is_present)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.answers.iter()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
