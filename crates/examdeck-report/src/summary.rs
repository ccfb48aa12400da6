//! Grade report persistence, feedback banding, and clock formatting.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use examdeck_core::grading::GradeOutcome;

use crate::review::ReviewRow;

/// A persisted record of one graded sitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the sitting was submitted.
    pub created_at: DateTime<Utc>,
    pub exam_title: String,
    pub score: f64,
    pub total_gradable_marks: f64,
    /// Per-question review rows, flat order.
    pub rows: Vec<ReviewRow>,
}

impl GradeReport {
    pub fn new(exam_title: impl Into<String>, outcome: &GradeOutcome, rows: Vec<ReviewRow>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exam_title: exam_title.into(),
            score: outcome.score,
            total_gradable_marks: outcome.total_gradable_marks,
            rows,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total_gradable_marks > 0.0 {
            self.score / self.total_gradable_marks * 100.0
        } else {
            0.0
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize grade report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write grade report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grade report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse grade report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", self.exam_title));
        md.push_str(&format!(
            "**Score:** {} / {} ({:.1}%) — {}\n\n",
            self.score,
            self.total_gradable_marks,
            self.percentage(),
            feedback(self.percentage())
        ));
        md.push_str("| # | Section | Your Answer | Correct Answer | Verdict |\n");
        md.push_str("|---|---------|-------------|----------------|--------|\n");
        for row in &self.rows {
            let verdict = if !row.gradable {
                "not auto-graded"
            } else if row.correct {
                "correct"
            } else {
                "incorrect"
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.number_in_section,
                row.section_title,
                row.your_answer.as_deref().unwrap_or("Not Answered"),
                row.correct_answer,
                verdict
            ));
        }
        md
    }
}

/// Feedback band for a score percentage.
pub fn feedback(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "Excellent!"
    } else if percentage >= 75.0 {
        "Good Job!"
    } else if percentage >= 50.0 {
        "You Can Do Better!"
    } else {
        "Keep Practicing!"
    }
}

/// Render whole seconds as HH:MM:SS for the countdown display.
pub fn format_clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(score: f64, total: f64) -> GradeOutcome {
        GradeOutcome {
            score,
            total_gradable_marks: total,
        }
    }

    #[test]
    fn feedback_bands() {
        assert_eq!(feedback(95.0), "Excellent!");
        assert_eq!(feedback(90.0), "Excellent!");
        assert_eq!(feedback(80.0), "Good Job!");
        assert_eq!(feedback(50.0), "You Can Do Better!");
        assert_eq!(feedback(49.9), "Keep Practicing!");
        assert_eq!(feedback(0.0), "Keep Practicing!");
    }

    #[test]
    fn percentage_guards_zero_total() {
        let report = GradeReport::new("t", &outcome(0.0, 0.0), vec![]);
        assert_eq!(report.percentage(), 0.0);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(59), "00:00:59");
        assert_eq!(format_clock(61), "00:01:01");
        assert_eq!(format_clock(3 * 60 * 60), "03:00:00");
        assert_eq!(format_clock(10799), "02:59:59");
    }

    #[test]
    fn json_roundtrip() {
        let rows = vec![ReviewRow {
            question_id: "q1".into(),
            section_title: "Q1".into(),
            number_in_section: 1,
            prompt: "A ___ is a set of instructions.".into(),
            your_answer: Some("Program".into()),
            correct_answer: "program".into(),
            gradable: true,
            correct: true,
        }];
        let report = GradeReport::new("Mock", &outcome(1.0, 3.0), rows);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/grade.json");
        report.save_json(&path).unwrap();

        let loaded = GradeReport::load_json(&path).unwrap();
        assert_eq!(loaded.exam_title, "Mock");
        assert_eq!(loaded.rows.len(), 1);
        assert!((loaded.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn markdown_contains_verdicts() {
        let rows = vec![
            ReviewRow {
                question_id: "q1".into(),
                section_title: "Q1".into(),
                number_in_section: 1,
                prompt: "p".into(),
                your_answer: None,
                correct_answer: "program".into(),
                gradable: true,
                correct: false,
            },
            ReviewRow {
                question_id: "b1".into(),
                section_title: "Q6".into(),
                number_in_section: 1,
                prompt: "p".into(),
                your_answer: Some("essay".into()),
                correct_answer: String::new(),
                gradable: false,
                correct: false,
            },
        ];
        let md = GradeReport::new("Mock", &outcome(0.0, 1.0), rows).to_markdown();
        assert!(md.contains("Not Answered"));
        assert!(md.contains("not auto-graded"));
        assert!(md.contains("Keep Practicing!"));
    }
}
