//! End-to-end tests of the quiz flow against the real store backends.
//!
//! These drive sampling → submission → storage → aggregation → review the
//! same way the CLI does, without going through a process boundary.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tricky_core::bank::{parse_bank_str, QuestionBank};
use tricky_core::engine::{EngineConfig, ScoringEngine};
use tricky_core::model::{Submission, UserId};
use tricky_core::report::AggregationReporter;
use tricky_core::traits::RecordStore;
use tricky_store::{JsonFileStore, MemoryStore};

const BANK: &str = r#"
[bank]
id = "e2e"
name = "E2E"

[[questions]]
id = "Q1"
prompt = "First"
choices = ["A", "B", "C"]
correct = "A"

[[questions]]
id = "Q2"
prompt = "Second"
choices = ["A", "B", "C"]
correct = "B"

[[questions]]
id = "Q3"
prompt = "Third"
choices = ["A", "B", "C"]
correct = "C"

[[questions]]
id = "Q4"
prompt = "Fourth"
choices = ["A", "B", "C"]
correct = "A"

[[questions]]
id = "Q5"
prompt = "Fifth"
choices = ["A", "B", "C"]
correct = "B"

[[questions]]
id = "Q6"
prompt = "Sixth"
choices = ["A", "B", "C"]
correct = "C"
"#;

fn bank() -> Arc<QuestionBank> {
    Arc::new(parse_bank_str(BANK, &PathBuf::from("e2e.toml")).unwrap())
}

fn wire(store: Arc<dyn RecordStore>) -> (ScoringEngine, AggregationReporter) {
    let bank = bank();
    let engine = ScoringEngine::new(bank.clone(), store.clone(), EngineConfig::default());
    let reporter = AggregationReporter::new(store, bank);
    (engine, reporter)
}

#[tokio::test]
async fn sampled_quiz_answered_perfectly_scores_hundred() {
    let (engine, reporter) = wire(Arc::new(MemoryStore::new()));
    let user = UserId::from("alice");
    let mut rng = StdRng::seed_from_u64(2024);

    let drawn: Vec<_> = engine.start_quiz(&user, &mut rng).collect();
    assert_eq!(drawn.len(), 5);
    assert_eq!(
        drawn.iter().map(|q| q.id()).collect::<HashSet<_>>().len(),
        5
    );

    let submission =
        Submission::from_pairs(drawn.iter().map(|q| (q.id().clone(), q.correct_choice()))).unwrap();
    let quiz = engine.submit_quiz(&user, &submission).await.unwrap();
    assert_eq!(quiz.score(), Some(100.0));

    let answers = reporter.list_answers(quiz.id).await.unwrap();
    assert_eq!(answers.len(), 5);
    assert!(answers.iter().all(|a| a.is_correct));
}

#[tokio::test]
async fn json_store_keeps_history_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let user = UserId::from("alice");

    {
        let (engine, _) = wire(Arc::new(JsonFileStore::open(&path).await.unwrap()));
        for answers in [
            vec![("Q1", "A"), ("Q2", "B")],
            vec![("Q1", "A"), ("Q2", "C")],
            vec![("Q1", "C"), ("Q2", "C")],
        ] {
            let submission = Submission::from_pairs(answers).unwrap();
            engine.submit_quiz(&user, &submission).await.unwrap();
        }
    }

    let (_, reporter) = wire(Arc::new(JsonFileStore::open(&path).await.unwrap()));
    let summary = reporter.summarize(&user).await.unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average, 50.0);
    assert_eq!(summary.highest, 100.0);
    assert_eq!(summary.lowest, 0.0);

    let history = reporter.history(&user).await.unwrap();
    let review = reporter.review(&user, history[1].id).await.unwrap();
    assert_eq!(review.correct_count(), 1);
    assert_eq!(review.entries[1].correct_choice.as_deref(), Some("B"));
}

#[tokio::test]
async fn failed_submission_leaves_json_store_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let (engine, reporter) = wire(Arc::new(JsonFileStore::open(&path).await.unwrap()));
    let user = UserId::from("alice");

    let submission = Submission::from_pairs([("Q1", "A"), ("missing", "A")]).unwrap();
    let err = engine.submit_quiz(&user, &submission).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(!path.exists());
    assert_eq!(reporter.summarize(&user).await.unwrap().count, 0);
}
