//! The record store seam.
//!
//! Implemented by the backends in `tricky-store`. The scoring engine only
//! ever creates records through [`RecordStore::commit_attempt`], which is the
//! single all-or-nothing write of an attempt.

use async_trait::async_trait;

use crate::error::QuizError;
use crate::model::{Answer, Quiz, QuizId, UserId};

/// Durable storage for quiz attempts and their answers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Human-readable backend name (e.g. "memory").
    fn name(&self) -> &str;

    /// Persist a scored quiz together with all of its answers.
    ///
    /// Either every record is written or none is.
    async fn commit_attempt(&self, quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError>;

    /// Fetch one quiz, failing with `NotFound` if it does not exist.
    async fn quiz(&self, id: QuizId) -> Result<Quiz, QuizError>;

    /// All quizzes owned by `user`, oldest first.
    async fn quizzes_for(&self, user: &UserId) -> Result<Vec<Quiz>, QuizError>;

    /// All answers recorded for one quiz, in grading order.
    async fn answers_for(&self, quiz: QuizId) -> Result<Vec<Answer>, QuizError>;
}

/// Reject attempts a store must never persist.
///
/// Backends call this before writing anything.
pub fn check_attempt(quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError> {
    if !quiz.is_scored() {
        return Err(QuizError::Validation(format!(
            "quiz {} must be scored before it is stored",
            quiz.id
        )));
    }
    if let Some(stray) = answers.iter().find(|a| a.quiz_id != quiz.id) {
        return Err(QuizError::Validation(format!(
            "answer {} belongs to quiz {}, not {}",
            stray.id, stray.quiz_id, quiz.id
        )));
    }
    Ok(())
}
