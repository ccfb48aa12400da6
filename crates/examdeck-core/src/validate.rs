//! Exam definition lint checks.
//!
//! Authoring mistakes (a correct answer whose shape doesn't fit the
//! question kind, options that don't contain the correct value, dangling
//! match ids) surface as warnings. Loading never fails on these: grading
//! already treats shape mismatches as "not correct".

use crate::model::{AnswerValue, ExamData, Question, QuestionKind, BLANK_SENTINEL};

/// A warning from exam validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending question id, when the warning is question-scoped.
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an exam definition for common authoring issues.
pub fn validate_exam(exam: &ExamData) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate question ids break answer capture (one answer per id).
    let mut seen_ids = std::collections::HashSet::new();
    for q in exam.sections.iter().flat_map(|s| &s.questions) {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in exam.sections.iter().flat_map(|s| &s.questions) {
        check_answer_shape(q, &mut warnings);
        check_options(q, &mut warnings);
        check_match_pairs(q, &mut warnings);

        if q.kind == QuestionKind::FillInTheBlank && !q.text.contains(BLANK_SENTINEL) {
            warn(&mut warnings, q, "fill-in-the-blank prompt has no ___ marker");
        }
        if q.kind.is_auto_gradable() && q.marks <= 0.0 {
            warn(&mut warnings, q, "gradable question has non-positive marks");
        }
    }

    warnings
}

fn warn(warnings: &mut Vec<ValidationWarning>, q: &Question, message: &str) {
    warnings.push(ValidationWarning {
        question_id: Some(q.id.clone()),
        message: message.to_string(),
    });
}

/// The correct answer's shape must match what the kind expects.
fn check_answer_shape(q: &Question, warnings: &mut Vec<ValidationWarning>) {
    let ok = match q.kind {
        QuestionKind::McqMulti => matches!(q.correct_answer, AnswerValue::Selection(_)),
        QuestionKind::MatchTheFollowing => matches!(q.correct_answer, AnswerValue::Matches(_)),
        _ => matches!(q.correct_answer, AnswerValue::Text(_)),
    };
    if !ok {
        warn(
            warnings,
            q,
            &format!("correct answer shape does not match kind {}", q.kind),
        );
    }
    if q.kind == QuestionKind::McqMulti {
        if let AnswerValue::Selection(items) = &q.correct_answer {
            if items.is_empty() {
                warn(warnings, q, "multi-select correct answer is empty");
            }
        }
    }
}

/// Options, when present, must contain the literal correct value(s).
fn check_options(q: &Question, warnings: &mut Vec<ValidationWarning>) {
    if !q.kind.has_options() {
        return;
    }
    if q.options.is_empty() {
        warn(warnings, q, "choice question has no options");
        return;
    }
    match &q.correct_answer {
        AnswerValue::Text(correct) => {
            if !q.options.contains(correct) {
                warn(warnings, q, "correct answer is not among the options");
            }
        }
        AnswerValue::Selection(correct) => {
            for item in correct {
                if !q.options.contains(item) {
                    warn(
                        warnings,
                        q,
                        &format!("correct answer '{item}' is not among the options"),
                    );
                }
            }
        }
        AnswerValue::Matches(_) => {}
    }
}

/// Match questions need pairs, and the correct mapping must reference
/// existing stem and response ids.
fn check_match_pairs(q: &Question, warnings: &mut Vec<ValidationWarning>) {
    if q.kind != QuestionKind::MatchTheFollowing {
        return;
    }
    let Some(pairs) = &q.match_pairs else {
        warn(warnings, q, "match question has no stems/responses");
        return;
    };
    if let AnswerValue::Matches(correct) = &q.correct_answer {
        if correct.is_empty() {
            warn(warnings, q, "match correct mapping is empty");
        }
        for (stem, resp) in correct {
            if !pairs.stems.iter().any(|s| &s.id == stem) {
                warn(warnings, q, &format!("unknown stem id '{stem}' in correct mapping"));
            }
            if !pairs.responses.iter().any(|r| &r.id == resp) {
                warn(
                    warnings,
                    q,
                    &format!("unknown response id '{resp}' in correct mapping"),
                );
            }
        }
    }
}
