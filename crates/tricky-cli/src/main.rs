//! tricky CLI — take quizzes from a question bank and review your scores.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tricky", version, about = "Quiz scoring and score history")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw questions for a new quiz
    Start {
        /// User taking the quiz
        #[arg(long, env = "TRICKY_USER")]
        user: String,

        /// Seed for question selection (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade and store a quiz attempt
    Submit {
        /// User submitting the quiz
        #[arg(long, env = "TRICKY_USER")]
        user: String,

        /// An answer as QUESTION_ID=CHOICE (repeatable)
        #[arg(long = "answer", value_name = "ID=CHOICE")]
        answers: Vec<String>,
    },

    /// Show score statistics and quiz history
    Score {
        /// User whose scores to show
        #[arg(long, env = "TRICKY_USER")]
        user: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Review the answers of one quiz
    Review {
        /// Owner of the quiz
        #[arg(long, env = "TRICKY_USER")]
        user: String,

        /// Quiz identifier
        #[arg(long)]
        quiz: uuid::Uuid,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Create a starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tricky=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Start { user, seed, format } => {
            commands::start::execute(user, seed, format, config).await
        }
        Commands::Submit { user, answers } => commands::submit::execute(user, answers, config).await,
        Commands::Score { user, format } => commands::score::execute(user, format, config).await,
        Commands::Review { user, quiz, format } => {
            commands::review::execute(user, quiz, format, config).await
        }
        Commands::Validate { bank } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
