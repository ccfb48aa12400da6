pub mod grade;
pub mod init;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use examdeck_core::model::ExamData;

/// Parse an exam definition file, strictly.
///
/// Explicit file arguments fail loudly; only the stored blob behind
/// `examdeck take` gets the silent built-in fallback.
pub fn parse_exam_file(path: &Path) -> Result<ExamData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;
    let exam: ExamData = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse exam JSON: {}", path.display()))?;
    Ok(exam)
}
