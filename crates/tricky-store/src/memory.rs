//! In-process record store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use tricky_core::error::QuizError;
use tricky_core::model::{Answer, Quiz, QuizId, UserId};
use tricky_core::traits::RecordStore;

use crate::records::Records;

/// A record store that keeps everything in memory.
///
/// Records are lost when the store is dropped. An attempt is applied under a
/// single lock, so readers never see a quiz without its answers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record set.
    pub fn with_records(records: Records) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Records>, QuizError> {
        self.records
            .lock()
            .map_err(|_| QuizError::Storage(anyhow::anyhow!("memory store lock poisoned")))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn commit_attempt(&self, quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError> {
        self.records()?.apply(quiz, answers)
    }

    async fn quiz(&self, id: QuizId) -> Result<Quiz, QuizError> {
        self.records()?.quiz(id)
    }

    async fn quizzes_for(&self, user: &UserId) -> Result<Vec<Quiz>, QuizError> {
        Ok(self.records()?.quizzes_for(user))
    }

    async fn answers_for(&self, quiz: QuizId) -> Result<Vec<Answer>, QuizError> {
        Ok(self.records()?.answers_for(quiz))
    }
}
