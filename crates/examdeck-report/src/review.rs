//! Per-question answer review.

use serde::{Deserialize, Serialize};

use examdeck_core::answers::AnswerSheet;
use examdeck_core::grading::is_correct;
use examdeck_core::model::{AnswerValue, ExamData, Question};

/// One row of the answer review, in canonical flat order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    pub question_id: String,
    pub section_title: String,
    /// 1-based number within the owning section.
    pub number_in_section: usize,
    pub prompt: String,
    /// The student's answer, rendered; `None` when unanswered.
    pub your_answer: Option<String>,
    /// The reference answer, rendered.
    pub correct_answer: String,
    /// False for the free-text kinds that are never auto-graded.
    pub gradable: bool,
    /// Verdict from the shared grading predicate.
    pub correct: bool,
}

/// Build review rows for a whole sitting.
///
/// Correctness here comes from `examdeck_core::grading::is_correct`, the
/// exact predicate the score was computed with.
pub fn build_review(exam: &ExamData, answers: &AnswerSheet) -> Vec<ReviewRow> {
    let mut rows = Vec::with_capacity(exam.question_count());
    for section in &exam.sections {
        for (sub, q) in section.questions.iter().enumerate() {
            let answer = answers.get(&q.id);
            rows.push(ReviewRow {
                question_id: q.id.clone(),
                section_title: section.title.clone(),
                number_in_section: sub + 1,
                prompt: q.text.clone(),
                your_answer: answer
                    .filter(|a| a.is_present())
                    .map(|a| render_answer(q, a)),
                correct_answer: render_answer(q, &q.correct_answer),
                gradable: q.kind.is_auto_gradable(),
                correct: is_correct(q, answer),
            });
        }
    }
    rows
}

/// Render an answer value for display, resolving match ids to their text
/// when the question carries pairs.
fn render_answer(question: &Question, answer: &AnswerValue) -> String {
    match answer {
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Selection(items) => items.join(", "),
        AnswerValue::Matches(map) => map
            .iter()
            .map(|(stem, resp)| {
                format!(
                    "{} -> {}",
                    resolve_match_text(question, stem, true),
                    resolve_match_text(question, resp, false)
                )
            })
            .collect::<Vec<_>>()
            .join("; "),
    }
}

fn resolve_match_text(question: &Question, id: &str, stem_side: bool) -> String {
    let Some(pairs) = &question.match_pairs else {
        return id.to_string();
    };
    let column = if stem_side { &pairs.stems } else { &pairs.responses };
    column
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.text.clone())
        .unwrap_or_else(|| id.to_string())
}
