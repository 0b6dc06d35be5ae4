//! The `tricky start` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use tricky_core::model::{QuestionId, UserId};

use super::App;

/// A drawn question as shown to the quiz taker, without its answer.
#[derive(Serialize)]
struct QuestionView<'a> {
    id: &'a QuestionId,
    prompt: &'a str,
    choices: &'a [String],
}

pub async fn execute(
    user: String,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let app = App::load(config_path.as_deref()).await?;
    let engine = app.engine();
    let user = UserId::from(user);

    let mut rng = match seed.or(app.config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let questions: Vec<QuestionView<'_>> = engine
        .start_quiz(&user, &mut rng)
        .map(|q| QuestionView {
            id: q.id(),
            prompt: q.prompt(),
            choices: q.choices(),
        })
        .collect();

    anyhow::ensure!(
        !questions.is_empty(),
        "question bank '{}' has no questions",
        engine.bank().name()
    );

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    println!(
        "Quiz for {user}: {} question(s) from {}\n",
        questions.len(),
        engine.bank().name()
    );
    for (i, q) in questions.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, q.id, q.prompt);
        for choice in q.choices {
            println!("     - {choice}");
        }
        println!();
    }

    let answer_args: Vec<String> = questions
        .iter()
        .map(|q| format!("--answer '{}=<choice>'", q.id))
        .collect();
    println!("Submit with: tricky submit --user {user} {}", answer_args.join(" "));

    Ok(())
}
