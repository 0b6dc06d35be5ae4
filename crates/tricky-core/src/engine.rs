//! The scoring engine.
//!
//! Draws questions for a new attempt, grades submitted answer sheets, and
//! hands the scored quiz and its answers to the record store in one commit.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::bank::{QuestionBank, QuestionSample};
use crate::error::QuizError;
use crate::model::{Answer, Quiz, QuizId, Submission, UserId};
use crate::sampling::DEFAULT_QUIZ_SIZE;
use crate::statistics::Tally;
use crate::traits::RecordStore;

/// Configuration for the scoring engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of questions drawn for one attempt.
    pub quiz_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quiz_size: DEFAULT_QUIZ_SIZE,
        }
    }
}

pub struct ScoringEngine {
    bank: Arc<QuestionBank>,
    store: Arc<dyn RecordStore>,
    config: EngineConfig,
}

impl ScoringEngine {
    pub fn new(bank: Arc<QuestionBank>, store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        Self {
            bank,
            store,
            config,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draw the questions for a new attempt by `user`.
    ///
    /// Nothing is stored until the attempt is submitted.
    pub fn start_quiz<R: Rng + ?Sized>(&self, user: &UserId, rng: &mut R) -> QuestionSample<'_> {
        let questions = self.bank.sample(rng, self.config.quiz_size);
        tracing::debug!(
            user = %user,
            bank = self.bank.id(),
            drawn = questions.len(),
            "started quiz"
        );
        questions
    }

    /// Grade every answer of `submission` for the quiz `quiz_id`.
    ///
    /// Fails with `NotFound` on the first question that is not in the bank.
    pub fn grade(
        &self,
        quiz_id: QuizId,
        submission: &Submission,
    ) -> Result<(Vec<Answer>, Tally), QuizError> {
        let mut answers = Vec::with_capacity(submission.len());
        let mut tally = Tally::default();

        for (question_id, selected) in submission.iter() {
            let question = self.bank.get(question_id)?;
            let answer = Answer::graded(quiz_id, question, selected);
            tally.record(answer.is_correct);
            answers.push(answer);
        }

        Ok((answers, tally))
    }

    /// Grade and store one attempt by `user`.
    ///
    /// Every call creates a new quiz, even for an identical submission. An
    /// unknown question id aborts the submission before anything is written.
    pub async fn submit_quiz(
        &self,
        user: &UserId,
        submission: &Submission,
    ) -> Result<Quiz, QuizError> {
        let mut quiz = Quiz::new(user.clone(), Utc::now());

        let (answers, tally) = self.grade(quiz.id, submission).map_err(|e| {
            tracing::warn!(user = %user, "submission rejected: {e}");
            e
        })?;
        quiz.record_score(tally.percentage())?;

        self.store.commit_attempt(&quiz, &answers).await?;

        tracing::info!(
            user = %user,
            quiz = %quiz.id,
            correct = tally.correct,
            total = tally.total,
            score = tally.percentage(),
            store = self.store.name(),
            "quiz scored"
        );

        Ok(quiz)
    }
}
