//! examdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use examdeck_core::timer::DEFAULT_DURATION_SECS;

mod commands;

#[derive(Parser)]
#[command(name = "examdeck", version, about = "Timed-exam runner and auto-grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sit the exam interactively with a live countdown
    Take {
        /// Exam definition JSON file (defaults to the stored blob)
        #[arg(long)]
        exam: Option<PathBuf>,

        /// Directory holding the stored exam blob
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Sitting duration in seconds
        #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
        duration: u64,
    },

    /// Grade an answers file against an exam definition
    Grade {
        /// Exam definition JSON file
        #[arg(long)]
        exam: PathBuf,

        /// Answers JSON file (question id -> answer value)
        #[arg(long)]
        answers: PathBuf,

        /// Write the full grade report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check an exam definition for authoring issues
    Validate {
        /// Exam definition JSON file
        #[arg(long)]
        exam: PathBuf,
    },

    /// Write a starter exam definition to exam.json
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            exam,
            data_dir,
            duration,
        } => commands::take::execute(exam, data_dir, duration).await,
        Commands::Grade {
            exam,
            answers,
            output,
        } => commands::grade::execute(exam, answers, output),
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Init { force } => commands::init::execute(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
