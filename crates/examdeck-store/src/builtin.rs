//! The built-in default exam dataset.
//!
//! Served whenever the store has nothing usable, so the student view always
//! has an exam to run. Mirrors the seeded HSC IT mock paper: eight sections
//! covering every question kind, 53 questions, 54 auto-gradable marks.

use examdeck_core::model::{
    AnswerValue, ExamData, MatchOption, MatchPairs, Question, QuestionKind, Section,
};

fn text_question(id: String, kind: QuestionKind, text: &str, correct: &str, marks: f64) -> Question {
    Question {
        id,
        kind,
        text: text.into(),
        options: vec![],
        match_pairs: None,
        correct_answer: AnswerValue::Text(correct.into()),
        marks,
    }
}

/// Build the default dataset.
pub fn default_exam() -> ExamData {
    let fill_in_blanks = Section {
        id: "sec1".into(),
        title: "Q1. Fill in the Blanks".into(),
        description: "Select the correct option to fill in the blank.".into(),
        questions: (1..=10)
            .map(|i| {
                text_question(
                    format!("fib{i}"),
                    QuestionKind::FillInTheBlank,
                    "A ___ is a set of instructions.",
                    "program",
                    1.0,
                )
            })
            .collect(),
    };

    let true_false = Section {
        id: "sec2".into(),
        title: "Q2. True/False".into(),
        description: "State whether the following statements are true or false.".into(),
        questions: (1..=10)
            .map(|i| {
                let mut q = text_question(
                    format!("tf{i}"),
                    QuestionKind::TrueFalse,
                    "HTML is a programming language.",
                    "False",
                    1.0,
                );
                q.options = vec!["True".into(), "False".into()];
                q
            })
            .collect(),
    };

    let mcq_single = Section {
        id: "sec3".into(),
        title: "Q3. MCQ (Single Correct)".into(),
        description: "Select the most appropriate option.".into(),
        questions: (1..=10)
            .map(|i| {
                let mut q = text_question(
                    format!("mcqs{i}"),
                    QuestionKind::McqSingle,
                    "What does CSS stand for?",
                    "Cascading Style Sheets",
                    1.0,
                );
                q.options = vec![
                    "Cascading Style Sheets".into(),
                    "Creative Style Sheets".into(),
                    "Computer Style Sheets".into(),
                    "Colorful Style Sheets".into(),
                ];
                q
            })
            .collect(),
    };

    let mcq_multi = Section {
        id: "sec4".into(),
        title: "Q4. MCQ (Multiple Correct)".into(),
        description: "Select all the correct options (2 or 3 correct answers).".into(),
        questions: (1..=10)
            .map(|i| Question {
                id: format!("mcqm{i}"),
                kind: QuestionKind::McqMulti,
                text: "Which of the following are block-level elements in HTML?".into(),
                options: vec!["<div>".into(), "<span>".into(), "<p>".into(), "<a>".into()],
                match_pairs: None,
                correct_answer: AnswerValue::from(vec!["<div>", "<p>"]),
                marks: 2.0,
            })
            .collect(),
    };

    let match_following = Section {
        id: "sec5".into(),
        title: "Q5. Match the Following".into(),
        description: "Match the items in Column A with Column B.".into(),
        questions: vec![Question {
            id: "match1".into(),
            kind: QuestionKind::MatchTheFollowing,
            text: "Match the technology with its primary use case.".into(),
            options: vec![],
            match_pairs: Some(MatchPairs {
                stems: vec![
                    MatchOption { id: "m1a".into(), text: "HTML".into() },
                    MatchOption { id: "m1b".into(), text: "CSS".into() },
                    MatchOption { id: "m1c".into(), text: "JavaScript".into() },
                    MatchOption { id: "m1d".into(), text: "SQL".into() },
                ],
                responses: vec![
                    MatchOption { id: "m1r1".into(), text: "Styling".into() },
                    MatchOption { id: "m1r2".into(), text: "Database Query".into() },
                    MatchOption { id: "m1r3".into(), text: "Structure".into() },
                    MatchOption { id: "m1r4".into(), text: "Interactivity".into() },
                ],
            }),
            correct_answer: AnswerValue::matches([
                ("m1a", "m1r3"),
                ("m1b", "m1r1"),
                ("m1c", "m1r4"),
                ("m1d", "m1r2"),
            ]),
            marks: 4.0,
        }],
    };

    let brief = Section {
        id: "sec6".into(),
        title: "Q6. Brief Answer".into(),
        description: "Answer the following in brief.".into(),
        questions: (1..=8)
            .map(|i| {
                text_question(
                    format!("brief{i}"),
                    QuestionKind::BriefAnswer,
                    "Explain the concept of SEO.",
                    "",
                    1.25,
                )
            })
            .collect(),
    };

    let html_coding = Section {
        id: "sec7".into(),
        title: "Q7. HTML Coding".into(),
        description: "Write the HTML code for the following.".into(),
        questions: (1..=2)
            .map(|i| {
                text_question(
                    format!("html{i}"),
                    QuestionKind::HtmlCoding,
                    "Create an HTML form with a text input for 'Name' and a submit button.",
                    "<form><input type=\"text\" name=\"name\"><input type=\"submit\"></form>",
                    5.0,
                )
            })
            .collect(),
    };

    let js_programming = Section {
        id: "sec8".into(),
        title: "Q8. JavaScript Programming".into(),
        description: "Write the JavaScript code for the following.".into(),
        questions: (1..=2)
            .map(|i| {
                text_question(
                    format!("js{i}"),
                    QuestionKind::JavascriptProgramming,
                    "Write a JavaScript function to find the sum of two numbers.",
                    "function sum(a, b) { return a + b; }",
                    5.0,
                )
            })
            .collect(),
    };

    ExamData {
        title: "HSC IT Mock Online Exam".into(),
        sections: vec![
            fill_in_blanks,
            true_false,
            mcq_single,
            mcq_multi,
            match_following,
            brief,
            html_coding,
            js_programming,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use examdeck_core::validate::validate_exam;

    #[test]
    fn dataset_shape() {
        let exam = default_exam();
        assert_eq!(exam.sections.len(), 8);
        assert_eq!(exam.question_count(), 53);
        // 10 + 10 + 10 + 20 + 4; brief/HTML/JS marks excluded.
        assert!((exam.total_gradable_marks() - 54.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dataset_passes_validation() {
        let warnings = validate_exam(&default_exam());
        assert!(warnings.is_empty(), "built-in dataset invalid: {warnings:?}");
    }

    #[test]
    fn dataset_serializes_to_blob_format() {
        let exam = default_exam();
        let json = serde_json::to_string(&exam).unwrap();
        assert!(json.contains("\"type\":\"MATCH_THE_FOLLOWING\""));
        let back: ExamData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.question_count(), 53);
    }
}
