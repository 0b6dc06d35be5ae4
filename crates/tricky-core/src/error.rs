//! Domain error types.
//!
//! Callers branch on the variant: a missing quiz during review becomes a
//! user-visible "not found", while storage failures are passed through
//! unchanged so the caller can pick its own retry policy.

use std::fmt;

use thiserror::Error;

use crate::model::QuizId;

/// The kind of record a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Question,
    Quiz,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Question => write!(f, "question"),
            RecordKind::Quiz => write!(f, "quiz"),
        }
    }
}

/// Errors produced by the scoring engine, the reporter, and record stores.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A referenced question or quiz does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// The request was malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The quiz already carries a score and cannot be graded again.
    #[error("quiz {0} has already been scored")]
    AlreadyScored(QuizId),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl QuizError {
    pub fn question_not_found(id: impl fmt::Display) -> Self {
        QuizError::NotFound {
            kind: RecordKind::Question,
            id: id.to_string(),
        }
    }

    pub fn quiz_not_found(id: impl fmt::Display) -> Self {
        QuizError::NotFound {
            kind: RecordKind::Quiz,
            id: id.to_string(),
        }
    }

    /// Returns `true` if this error means a referenced record is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuizError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_record() {
        let err = QuizError::question_not_found("stop-shape");
        assert_eq!(err.to_string(), "question stop-shape not found");
        assert!(err.is_not_found());

        let err = QuizError::quiz_not_found(uuid::Uuid::nil());
        assert_eq!(
            err.to_string(),
            "quiz 00000000-0000-0000-0000-000000000000 not found"
        );
    }

    #[test]
    fn storage_errors_are_passed_through() {
        let err: QuizError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
        assert!(!err.is_not_found());
    }
}
