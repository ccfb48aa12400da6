//! The `examdeck take` command: an interactive sitting on stdin with a
//! live countdown. Timer expiry and a manual `submit` race through the
//! same idempotent submission path.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use examdeck_core::model::{AnswerValue, Question, QuestionKind};
use examdeck_core::session::{ExamSession, QuestionStatus};
use examdeck_core::timer::Countdown;
use examdeck_report::{build_review, feedback, format_clock, GradeReport};
use examdeck_store::{ExamStore, JsonFileStore};

#[derive(PartialEq)]
enum Flow {
    Continue,
    Submit,
    Quit,
}

pub async fn execute(exam_file: Option<PathBuf>, data_dir: PathBuf, duration: u64) -> Result<()> {
    // The stored blob gets the silent built-in fallback; a sitting never
    // fails to start because of a missing or malformed definition.
    let exam = match exam_file {
        Some(path) => JsonFileStore::at_path(path).load(),
        None => JsonFileStore::new(&data_dir).load(),
    };

    let mut session = ExamSession::new(exam);

    println!("{}", session.exam().title);
    println!(
        "{} questions, {} gradable marks, duration {}",
        session.question_count(),
        session.total_gradable_marks(),
        format_clock(duration)
    );
    println!("The exam auto-submits when the timer runs out.");
    println!("Commands: n(ext), p(rev), g <n>, pal, submit, quit");
    println!("\nPress Enter to start.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if lines.next_line().await?.is_none() {
        return Ok(());
    }

    session.begin();
    tracing::debug!(duration, "sitting started");
    let mut countdown = Countdown::start(duration);

    print_question(&session);
    let mut stdin_open = true;
    loop {
        let low = if countdown.is_low() { " LOW" } else { "" };
        println!(
            "\n[{}{low}] question {} of {}",
            format_clock(countdown.remaining()),
            session.current_index() + 1,
            session.question_count()
        );

        tokio::select! {
            _ = countdown.expired() => {
                println!("Time is up, submitting.");
                session.submit();
                break;
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    // stdin closed: keep the sitting alive until the
                    // countdown forces submission.
                    None => stdin_open = false,
                    Some(line) => match handle_input(&mut session, line.trim()) {
                        Flow::Submit => {
                            session.submit();
                            break;
                        }
                        Flow::Quit => {
                            countdown.cancel();
                            println!("Sitting abandoned; nothing was graded.");
                            return Ok(());
                        }
                        Flow::Continue => print_question(&session),
                    },
                }
            }
        }
    }

    // No tick may fire once the sitting has left in-progress.
    countdown.cancel();

    let outcome = match session.outcome() {
        Some(outcome) => outcome.clone(),
        None => return Ok(()),
    };
    let rows = build_review(session.exam(), session.answers());
    let report = GradeReport::new(&session.exam().title, &outcome, rows);

    println!(
        "\nResult: {} / {} ({:.1}%) — {}",
        report.score,
        report.total_gradable_marks,
        report.percentage(),
        feedback(report.percentage())
    );
    println!("Note: brief-answer, HTML, and JavaScript questions are not graded automatically.");
    println!("{}", super::grade::review_table(&report.rows));

    Ok(())
}

fn handle_input(session: &mut ExamSession, input: &str) -> Flow {
    match input {
        "" => Flow::Continue,
        "n" | "next" => {
            session.next();
            Flow::Continue
        }
        "p" | "prev" => {
            session.previous();
            Flow::Continue
        }
        "pal" => {
            print_palette(session);
            Flow::Continue
        }
        "submit" => Flow::Submit,
        "quit" => Flow::Quit,
        _ => {
            if let Some(n) = input.strip_prefix("g ").and_then(|s| s.trim().parse::<usize>().ok()) {
                session.jump_to(n.saturating_sub(1));
            } else {
                record_answer(session, input);
            }
            Flow::Continue
        }
    }
}

/// Interpret raw input as an answer to the active question.
fn record_answer(session: &mut ExamSession, input: &str) {
    let Some(question) = session.current_question() else {
        return;
    };
    match question.kind {
        QuestionKind::TrueFalse | QuestionKind::McqSingle => {
            let answer = option_by_number(question, input)
                .unwrap_or_else(|| input.to_string());
            session.answer_text(answer);
        }
        QuestionKind::McqMulti => {
            let option = option_by_number(question, input)
                .unwrap_or_else(|| input.to_string());
            session.toggle_option(&option);
        }
        QuestionKind::MatchTheFollowing => {
            let Some(pairs) = &question.match_pairs else {
                return;
            };
            let mut parts = input.split_whitespace();
            let stem = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .and_then(|n| pairs.stems.get(n.saturating_sub(1)));
            let resp = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .and_then(|n| pairs.responses.get(n.saturating_sub(1)));
            if let (Some(stem), Some(resp)) = (stem, resp) {
                let (stem_id, resp_id) = (stem.id.clone(), resp.id.clone());
                session.answer_match(&stem_id, &resp_id);
            } else {
                println!("Enter two numbers: <stem> <response>");
            }
        }
        QuestionKind::FillInTheBlank
        | QuestionKind::BriefAnswer
        | QuestionKind::HtmlCoding
        | QuestionKind::JavascriptProgramming => {
            session.answer_text(input);
        }
    }
}

/// Resolve a 1-based option number to the option text.
fn option_by_number(question: &Question, input: &str) -> Option<String> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| question.options.get(n.saturating_sub(1)))
        .cloned()
}

fn print_question(session: &ExamSession) {
    let Some(question) = session.current_question() else {
        println!("This exam has no questions.");
        return;
    };
    if let Some(section) = session.current_section() {
        println!("\n== {} ==", section.title);
        if !section.description.is_empty() {
            println!("{}", section.description);
        }
    }

    let number = session.number_in_section();
    match question.kind {
        QuestionKind::FillInTheBlank => {
            let (prefix, suffix) = question.blank_parts();
            println!("{number}. {prefix}_____{suffix}");
        }
        _ => println!("{number}. {}", question.text),
    }

    if question.kind.has_options() {
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
    }
    if let Some(pairs) = &question.match_pairs {
        println!("  Column A:");
        for (i, stem) in pairs.stems.iter().enumerate() {
            println!("    {}. {}", i + 1, stem.text);
        }
        println!("  Column B:");
        for (i, resp) in pairs.responses.iter().enumerate() {
            println!("    {}. {}", i + 1, resp.text);
        }
        println!("  Answer with: <stem number> <response number>");
    }

    if let Some(answer) = session.answers().get(&question.id) {
        if answer.is_present() {
            println!("  Current answer: {}", render_current(answer));
        }
    }
}

fn render_current(answer: &AnswerValue) -> String {
    match answer {
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Selection(items) => items.join(", "),
        AnswerValue::Matches(map) => map
            .iter()
            .map(|(k, v)| format!("{k}->{v}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn print_palette(session: &ExamSession) {
    for section in session.palette() {
        println!("{}", section.section_title);
        let cells: Vec<String> = section
            .entries
            .iter()
            .map(|e| {
                let marker = match e.status {
                    QuestionStatus::Current => '>',
                    QuestionStatus::Answered => 'x',
                    QuestionStatus::Unanswered => ' ',
                };
                format!("[{marker}{}]", e.index + 1)
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
}
