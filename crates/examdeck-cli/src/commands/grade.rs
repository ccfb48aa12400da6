//! The `examdeck grade` command: batch-grade an answers file.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examdeck_core::answers::AnswerSheet;
use examdeck_core::grading;
use examdeck_core::model::AnswerValue;
use examdeck_report::{build_review, feedback, GradeReport, ReviewRow};

pub fn execute(
    exam_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let exam = super::parse_exam_file(&exam_path)?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers file: {}", answers_path.display()))?;
    let raw: HashMap<String, AnswerValue> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", answers_path.display()))?;
    let answers: AnswerSheet = raw.into_iter().collect();

    let outcome = grading::grade(&exam.flat_questions(), &answers);
    let rows = build_review(&exam, &answers);
    let report = GradeReport::new(&exam.title, &outcome, rows);

    println!(
        "{}: {} / {} ({:.1}%) — {}",
        report.exam_title,
        report.score,
        report.total_gradable_marks,
        report.percentage(),
        feedback(report.percentage())
    );
    println!("{}", review_table(&report.rows));

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Grade report saved to: {}", path.display());
    }

    Ok(())
}

pub(crate) fn review_table(rows: &[ReviewRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Section", "Your Answer", "Correct Answer", "Verdict"]);

    for row in rows {
        let verdict = if !row.gradable {
            "not auto-graded"
        } else if row.correct {
            "correct"
        } else {
            "incorrect"
        };
        table.add_row(vec![
            Cell::new(row.number_in_section),
            Cell::new(&row.section_title),
            Cell::new(row.your_answer.as_deref().unwrap_or("Not Answered")),
            Cell::new(&row.correct_answer),
            Cell::new(verdict),
        ]);
    }

    table
}
