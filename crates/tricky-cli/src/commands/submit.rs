//! The `tricky submit` command.

use std::path::PathBuf;

use anyhow::Result;

use tricky_core::model::{Submission, UserId};

use super::App;

pub async fn execute(
    user: String,
    answers: Vec<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let submission = Submission::parse_pairs(&answers)?;
    let app = App::load(config_path.as_deref()).await?;
    let user = UserId::from(user);

    let quiz = app.engine().submit_quiz(&user, &submission).await?;

    println!(
        "Quiz {} scored {:.1}% ({} answer(s))",
        quiz.id,
        quiz.score().unwrap_or_default(),
        submission.len()
    );
    println!("Review with: tricky review --user {user} --quiz {}", quiz.id);

    Ok(())
}
