//! The `tricky review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use uuid::Uuid;

use tricky_core::model::UserId;

use super::App;

pub async fn execute(
    user: String,
    quiz_id: Uuid,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let app = App::load(config_path.as_deref()).await?;
    let user = UserId::from(user);

    let review = app.reporter().review(&user, quiz_id).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&review)?);
        return Ok(());
    }

    println!(
        "Quiz {} taken {}: {:.1}% ({}/{} correct)",
        review.quiz.id,
        review.quiz.taken_at.format("%Y-%m-%d %H:%M:%S"),
        review.quiz.score().unwrap_or_default(),
        review.correct_count(),
        review.entries.len()
    );

    if review.entries.is_empty() {
        println!("No answers were submitted for this quiz.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Question", "Prompt", "Your answer", "Correct answer", "Result"]);
    for entry in &review.entries {
        table.add_row(vec![
            Cell::new(&entry.answer.question_id),
            Cell::new(entry.prompt.as_deref().unwrap_or("(no longer in bank)")),
            Cell::new(&entry.answer.selected_choice),
            Cell::new(entry.correct_choice.as_deref().unwrap_or("-")),
            Cell::new(if entry.answer.is_correct { "correct" } else { "wrong" }),
        ]);
    }
    println!("{table}");

    Ok(())
}
