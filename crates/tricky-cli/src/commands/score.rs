//! The `tricky score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use tricky_core::model::{Quiz, UserId};
use tricky_core::statistics::QuizSummary;

use super::App;

#[derive(Serialize)]
struct ScorePage<'a> {
    user: &'a UserId,
    summary: QuizSummary,
    quizzes: Vec<QuizRow>,
}

/// One quiz of the history with its answer counts.
#[derive(Serialize)]
struct QuizRow {
    #[serde(flatten)]
    quiz: Quiz,
    answer_count: usize,
    correct_count: usize,
}

pub async fn execute(user: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let app = App::load(config_path.as_deref()).await?;
    let reporter = app.reporter();
    let user = UserId::from(user);

    let summary = reporter.summarize(&user).await?;
    let mut quizzes = Vec::new();
    for quiz in reporter.history(&user).await? {
        let answers = reporter.list_answers(quiz.id).await?;
        quizzes.push(QuizRow {
            answer_count: answers.len(),
            correct_count: answers.iter().filter(|a| a.is_correct).count(),
            quiz,
        });
    }

    if format == "json" {
        let page = ScorePage {
            user: &user,
            summary,
            quizzes,
        };
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!("Scores for {user}");

    let mut table = Table::new();
    table.set_header(vec!["Quizzes", "Average", "Highest", "Lowest", "Total"]);
    table.add_row(vec![
        Cell::new(summary.count),
        Cell::new(format!("{:.1}%", summary.average)),
        Cell::new(format!("{:.1}%", summary.highest)),
        Cell::new(format!("{:.1}%", summary.lowest)),
        Cell::new(format!("{:.1}", summary.total)),
    ]);
    println!("{table}");

    if quizzes.is_empty() {
        println!("No quizzes taken yet.");
        return Ok(());
    }

    let mut history = Table::new();
    history.set_header(vec!["Quiz", "Taken", "Score", "Correct"]);
    for QuizRow {
        quiz,
        answer_count,
        correct_count,
    } in &quizzes
    {
        history.add_row(vec![
            Cell::new(quiz.id),
            Cell::new(quiz.taken_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(
                quiz.score()
                    .map(|s| format!("{s:.1}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{correct_count}/{answer_count}")),
        ]);
    }
    println!("\n{history}");

    Ok(())
}
