//! The record set shared by the store backends.

use serde::{Deserialize, Serialize};

use tricky_core::error::QuizError;
use tricky_core::model::{Answer, Quiz, QuizId, UserId};
use tricky_core::traits::check_attempt;

/// Every stored quiz and answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Records {
    /// Add a scored quiz and its answers. Nothing changes if the attempt is rejected.
    pub fn apply(&mut self, quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError> {
        check_attempt(quiz, answers)?;
        if self.quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(QuizError::Validation(format!(
                "quiz {} is already stored",
                quiz.id
            )));
        }

        self.quizzes.push(quiz.clone());
        self.answers.extend_from_slice(answers);
        Ok(())
    }

    pub fn quiz(&self, id: QuizId) -> Result<Quiz, QuizError> {
        self.quizzes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| QuizError::quiz_not_found(id))
    }

    /// Quizzes owned by `user`, oldest first.
    pub fn quizzes_for(&self, user: &UserId) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .iter()
            .filter(|q| &q.user == user)
            .cloned()
            .collect();
        quizzes.sort_by_key(|q| q.taken_at);
        quizzes
    }

    pub fn answers_for(&self, quiz: QuizId) -> Vec<Answer> {
        self.answers
            .iter()
            .filter(|a| a.quiz_id == quiz)
            .cloned()
            .collect()
    }
}
