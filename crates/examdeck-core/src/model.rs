//! Core data model types for examdeck.
//!
//! These are the fundamental types the whole system uses to represent an
//! exam definition: sections, questions of eight kinds, and the three answer
//! shapes that both correct answers and student answers share.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Marker inside fill-in-the-blank prompts that splits prefix from suffix.
pub const BLANK_SENTINEL: &str = "___";

/// The eight supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    FillInTheBlank,
    TrueFalse,
    McqSingle,
    McqMulti,
    MatchTheFollowing,
    BriefAnswer,
    HtmlCoding,
    JavascriptProgramming,
}

impl QuestionKind {
    /// Whether this kind participates in automatic grading.
    ///
    /// Brief-answer and coding questions are permanently excluded: their
    /// marks never count toward the gradable total, even when a correct
    /// answer is on file and the candidate answer is textually identical.
    pub fn is_auto_gradable(self) -> bool {
        !matches!(
            self,
            QuestionKind::BriefAnswer
                | QuestionKind::HtmlCoding
                | QuestionKind::JavascriptProgramming
        )
    }

    /// Whether this kind presents a fixed option list to choose from.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            QuestionKind::TrueFalse | QuestionKind::McqSingle | QuestionKind::McqMulti
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionKind::FillInTheBlank => "fill-in-the-blank",
            QuestionKind::TrueFalse => "true-false",
            QuestionKind::McqSingle => "mcq-single",
            QuestionKind::McqMulti => "mcq-multi",
            QuestionKind::MatchTheFollowing => "match-the-following",
            QuestionKind::BriefAnswer => "brief-answer",
            QuestionKind::HtmlCoding => "html-coding",
            QuestionKind::JavascriptProgramming => "javascript-programming",
        };
        write!(f, "{s}")
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fill-in-the-blank" | "fib" => Ok(QuestionKind::FillInTheBlank),
            "true-false" | "tf" => Ok(QuestionKind::TrueFalse),
            "mcq-single" => Ok(QuestionKind::McqSingle),
            "mcq-multi" => Ok(QuestionKind::McqMulti),
            "match-the-following" | "match" => Ok(QuestionKind::MatchTheFollowing),
            "brief-answer" | "brief" => Ok(QuestionKind::BriefAnswer),
            "html-coding" | "html" => Ok(QuestionKind::HtmlCoding),
            "javascript-programming" | "js" => Ok(QuestionKind::JavascriptProgramming),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// An answer value, for both `Question::correct_answer` and student input.
///
/// Serialized untagged so the on-disk blob stays a plain
/// string | array | object, matching the original exam-definition format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text: fill-in-the-blank, true/false, single choice, and the
    /// ungraded free-text kinds.
    Text(String),
    /// Multi-select: the chosen options, in accumulation order.
    Selection(Vec<String>),
    /// Match-the-following: stem id -> response id.
    Matches(BTreeMap<String, String>),
}

impl AnswerValue {
    /// Whether this value counts as "answered" for progress display.
    ///
    /// Distinct from correctness: a present answer may still be wrong, and
    /// an absent answer is never correct. Text is checked for exact
    /// emptiness, not trimmed.
    pub fn is_present(&self) -> bool {
        match self {
            AnswerValue::Text(s) => !s.is_empty(),
            AnswerValue::Selection(items) => !items.is_empty(),
            AnswerValue::Matches(map) => !map.is_empty(),
        }
    }

    /// Convenience constructor for match answers.
    pub fn matches<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        AnswerValue::Matches(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::Selection(items.into_iter().map(String::from).collect())
    }
}

/// One side of a match-the-following pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOption {
    pub id: String,
    pub text: String,
}

/// The two columns of a match-the-following question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPairs {
    pub stems: Vec<MatchOption>,
    pub responses: Vec<MatchOption>,
}

/// A single exam question. Immutable once loaded for a sitting.
///
/// Field names follow the camelCase of the stored exam blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier within the exam.
    pub id: String,
    /// Question kind; decides the expected answer shape.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Prompt text; fill-in-the-blank prompts contain `___`.
    pub text: String,
    /// Fixed option list for choice-backed kinds.
    #[serde(default)]
    pub options: Vec<String>,
    /// Stem/response columns; present only for match-the-following.
    #[serde(default)]
    pub match_pairs: Option<MatchPairs>,
    /// The reference answer, shaped per `kind`.
    pub correct_answer: AnswerValue,
    /// Marks awarded on a correct answer.
    pub marks: f64,
}

impl Question {
    /// Split a fill-in-the-blank prompt around the `___` sentinel.
    ///
    /// Returns (prefix, suffix); a prompt without the sentinel yields the
    /// whole text as prefix and an empty suffix.
    pub fn blank_parts(&self) -> (&str, &str) {
        match self.text.split_once(BLANK_SENTINEL) {
            Some((prefix, suffix)) => (prefix, suffix),
            None => (self.text.as_str(), ""),
        }
    }
}

/// An ordered group of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// The root exam aggregate: a title plus ordered sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamData {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ExamData {
    /// Sections concatenated in order: the canonical flat question sequence
    /// used by navigation, the palette, and the grading iteration.
    pub fn flat_questions(&self) -> Vec<&Question> {
        self.sections.iter().flat_map(|s| &s.questions).collect()
    }

    /// Total number of questions across all sections.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Sum of marks over auto-gradable questions only.
    pub fn total_gradable_marks(&self) -> f64 {
        self.sections
            .iter()
            .flat_map(|s| &s.questions)
            .filter(|q| q.kind.is_auto_gradable())
            .map(|q| q.marks)
            .sum()
    }
}
