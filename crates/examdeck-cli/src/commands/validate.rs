//! The `examdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examdeck_core::validate::validate_exam;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let exam = super::parse_exam_file(&exam_path)?;
    let warnings = validate_exam(&exam);

    println!(
        "{}: {} questions, {} gradable marks",
        exam.title,
        exam.question_count(),
        exam.total_gradable_marks()
    );

    if warnings.is_empty() {
        println!("Exam definition valid");
    } else {
        println!("{} warning(s):", warnings.len());
        for w in &warnings {
            match &w.question_id {
                Some(id) => println!("  [{id}] {}", w.message),
                None => println!("  {}", w.message),
            }
        }
    }

    Ok(())
}
