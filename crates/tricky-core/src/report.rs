//! Score summaries, quiz history, and quiz reviews.

use std::sync::Arc;

use serde::Serialize;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{Answer, Quiz, QuizId, UserId};
use crate::statistics::{summarize_quizzes, QuizSummary};
use crate::traits::RecordStore;

/// Read-side view over the record store.
pub struct AggregationReporter {
    store: Arc<dyn RecordStore>,
    bank: Arc<QuestionBank>,
}

/// One reviewed answer.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub answer: Answer,
    /// Prompt of the question, if it is still in the bank.
    pub prompt: Option<String>,
    /// Correct choice of the question, if it is still in the bank.
    pub correct_choice: Option<String>,
}

/// A quiz together with everything needed to review it.
#[derive(Debug, Clone, Serialize)]
pub struct QuizReview {
    pub quiz: Quiz,
    pub entries: Vec<ReviewEntry>,
}

impl QuizReview {
    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.answer.is_correct).count()
    }
}

impl AggregationReporter {
    pub fn new(store: Arc<dyn RecordStore>, bank: Arc<QuestionBank>) -> Self {
        Self { store, bank }
    }

    /// Count, average, highest, and lowest score over all of `user`'s quizzes.
    pub async fn summarize(&self, user: &UserId) -> Result<QuizSummary, QuizError> {
        let quizzes = self.store.quizzes_for(user).await?;
        let summary = summarize_quizzes(&quizzes);
        tracing::debug!(user = %user, count = summary.count, "summarized scores");
        Ok(summary)
    }

    /// All of `user`'s quizzes, oldest first.
    pub async fn history(&self, user: &UserId) -> Result<Vec<Quiz>, QuizError> {
        let mut quizzes = self.store.quizzes_for(user).await?;
        quizzes.sort_by_key(|q| q.taken_at);
        Ok(quizzes)
    }

    /// The answers recorded for one quiz.
    ///
    /// Fails with `NotFound` if the quiz does not exist, even though a missing
    /// quiz would otherwise just have no answers.
    pub async fn list_answers(&self, quiz_id: QuizId) -> Result<Vec<Answer>, QuizError> {
        self.store.quiz(quiz_id).await?;
        self.store.answers_for(quiz_id).await
    }

    /// Review one of `user`'s quizzes.
    ///
    /// A quiz owned by somebody else is reported as `NotFound`.
    pub async fn review(&self, user: &UserId, quiz_id: QuizId) -> Result<QuizReview, QuizError> {
        let quiz = self.store.quiz(quiz_id).await?;
        if &quiz.user != user {
            tracing::warn!(user = %user, quiz = %quiz_id, "review of another user's quiz");
            return Err(QuizError::quiz_not_found(quiz_id));
        }

        let entries = self
            .store
            .answers_for(quiz_id)
            .await?
            .into_iter()
            .map(|answer| {
                let question = self.bank.get(&answer.question_id).ok();
                ReviewEntry {
                    prompt: question.map(|q| q.prompt().to_string()),
                    correct_choice: question.map(|q| q.correct_choice().to_string()),
                    answer,
                }
            })
            .collect();

        Ok(QuizReview { quiz, entries })
    }
}
