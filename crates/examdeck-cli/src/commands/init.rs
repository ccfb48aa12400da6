//! The `examdeck init` command.

use anyhow::{Context, Result};

use examdeck_store::builtin;

const EXAM_FILE: &str = "exam.json";

pub fn execute(force: bool) -> Result<()> {
    if std::path::Path::new(EXAM_FILE).exists() && !force {
        println!("{EXAM_FILE} already exists (use --force to overwrite)");
        return Ok(());
    }

    let exam = builtin::default_exam();
    let json = serde_json::to_string_pretty(&exam).context("failed to serialize starter exam")?;
    std::fs::write(EXAM_FILE, json).with_context(|| format!("failed to write {EXAM_FILE}"))?;

    println!(
        "Created {EXAM_FILE} ({} questions, {} gradable marks)",
        exam.question_count(),
        exam.total_gradable_marks()
    );
    Ok(())
}
