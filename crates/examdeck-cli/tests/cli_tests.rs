//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examdeck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examdeck").unwrap()
}

/// A two-question exam: one fill-in-the-blank (1 mark) and one multi-select
/// (2 marks).
const SMALL_EXAM: &str = r#"{
    "title": "Small Exam",
    "sections": [
        {
            "id": "s1",
            "title": "Q1. Fill in the Blanks",
            "description": "",
            "questions": [
                {
                    "id": "fib1",
                    "type": "FILL_IN_THE_BLANK",
                    "text": "A ___ is a set of instructions.",
                    "correctAnswer": "program",
                    "marks": 1
                }
            ]
        },
        {
            "id": "s2",
            "title": "Q2. MCQ (Multiple Correct)",
            "description": "",
            "questions": [
                {
                    "id": "mcqm1",
                    "type": "MCQ_MULTI",
                    "text": "Which are block-level elements?",
                    "options": ["<div>", "<span>", "<p>", "<a>"],
                    "correctAnswer": ["<div>", "<p>"],
                    "marks": 2
                }
            ]
        }
    ]
}"#;

#[test]
fn init_creates_starter_exam() {
    let dir = TempDir::new().unwrap();

    examdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created exam.json"))
        .stdout(predicate::str::contains("53 questions"));

    assert!(dir.path().join("exam.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examdeck().current_dir(dir.path()).arg("init").assert().success();

    examdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_starter_exam() {
    let dir = TempDir::new().unwrap();
    examdeck().current_dir(dir.path()).arg("init").assert().success();

    examdeck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--exam")
        .arg("exam.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("53 questions"))
        .stdout(predicate::str::contains("54 gradable marks"))
        .stdout(predicate::str::contains("Exam definition valid"));
}

#[test]
fn validate_reports_authoring_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exam.json");
    // correctAnswer is not among the options
    std::fs::write(
        &path,
        r#"{
            "title": "Broken",
            "sections": [{
                "id": "s1", "title": "S1", "description": "",
                "questions": [{
                    "id": "tf1",
                    "type": "TRUE_FALSE",
                    "text": "Statement.",
                    "options": ["True", "False"],
                    "correctAnswer": "Maybe",
                    "marks": 1
                }]
            }]
        }"#,
    )
    .unwrap();

    examdeck()
        .arg("validate")
        .arg("--exam")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("not among the options"));
}

#[test]
fn validate_nonexistent_file() {
    examdeck()
        .arg("validate")
        .arg("--exam")
        .arg("no_such_exam.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exam.json");
    std::fs::write(&path, "not { json ]").unwrap();

    examdeck()
        .arg("validate")
        .arg("--exam")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse exam JSON"));
}

#[test]
fn grade_end_to_end_scenario() {
    let dir = TempDir::new().unwrap();
    let exam_path = dir.path().join("exam.json");
    let answers_path = dir.path().join("answers.json");
    std::fs::write(&exam_path, SMALL_EXAM).unwrap();
    // Q1 matches case-insensitively; Q2 fails the cardinality check.
    std::fs::write(
        &answers_path,
        r#"{"fib1": "Program", "mcqm1": ["<div>", "<p>", "<span>"]}"#,
    )
    .unwrap();

    examdeck()
        .arg("grade")
        .arg("--exam")
        .arg(&exam_path)
        .arg("--answers")
        .arg(&answers_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 / 3"))
        .stdout(predicate::str::contains("incorrect"));
}

#[test]
fn grade_writes_report_json() {
    let dir = TempDir::new().unwrap();
    let exam_path = dir.path().join("exam.json");
    let answers_path = dir.path().join("answers.json");
    let report_path = dir.path().join("reports/grade.json");
    std::fs::write(&exam_path, SMALL_EXAM).unwrap();
    std::fs::write(&answers_path, r#"{"fib1": "program", "mcqm1": ["<p>", "<div>"]}"#).unwrap();

    examdeck()
        .arg("grade")
        .arg("--exam")
        .arg(&exam_path)
        .arg("--answers")
        .arg(&answers_path)
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 / 3"))
        .stdout(predicate::str::contains("Grade report saved"));

    let saved = std::fs::read_to_string(&report_path).unwrap();
    assert!(saved.contains("\"exam_title\": \"Small Exam\""));
}

#[test]
fn take_manual_submit_grades_the_sitting() {
    let dir = TempDir::new().unwrap();
    let exam_path = dir.path().join("exam.json");
    std::fs::write(&exam_path, SMALL_EXAM).unwrap();

    // Enter to start, answer Q1, then submit.
    examdeck()
        .arg("take")
        .arg("--exam")
        .arg(&exam_path)
        .write_stdin("\nProgram\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Small Exam"))
        .stdout(predicate::str::contains("Result: 1 / 3"));
}

#[test]
fn take_falls_back_to_builtin_dataset() {
    let dir = TempDir::new().unwrap();
    let exam_path = dir.path().join("exam.json");
    std::fs::write(&exam_path, "garbage, not json").unwrap();

    examdeck()
        .arg("take")
        .arg("--exam")
        .arg(&exam_path)
        .write_stdin("\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("HSC IT Mock Online Exam"))
        .stdout(predicate::str::contains("Sitting abandoned"));
}

#[test]
fn take_expiry_force_submits() {
    let dir = TempDir::new().unwrap();
    let exam_path = dir.path().join("exam.json");
    std::fs::write(&exam_path, SMALL_EXAM).unwrap();

    // One-second sitting with no input after the start: the countdown
    // expires and submits exactly once.
    let mut cmd = examdeck();
    cmd.arg("take")
        .arg("--exam")
        .arg(&exam_path)
        .arg("--duration")
        .arg("1")
        .write_stdin("\n")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Time is up"))
        .stdout(predicate::str::contains("Result: 0 / 3"));
}

#[test]
fn help_output() {
    examdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timed-exam runner and auto-grader"));
}

#[test]
fn version_output() {
    examdeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("examdeck"));
}
