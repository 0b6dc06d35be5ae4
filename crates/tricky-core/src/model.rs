//! Core data model types for tricky.
//!
//! Questions live in the question bank; quizzes and answers are the records
//! a quiz attempt leaves behind in the record store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;

/// Identifier of a quiz attempt.
pub type QuizId = Uuid;

/// Identifier of a stored answer.
pub type AnswerId = Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a question in the bank (e.g. "stop-shape").
    QuestionId
);

string_id!(
    /// Opaque reference to the authenticated user, supplied by the caller.
    UserId
);

/// A bank question with its designated correct choice.
///
/// Immutable once built; [`Question::new`] guarantees the correct choice is
/// one of the choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    correct_choice: String,
}

impl Question {
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_choice: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let id = id.into();
        let correct_choice = correct_choice.into();

        if id.as_str().trim().is_empty() {
            return Err(QuizError::Validation("question id is empty".into()));
        }
        if !choices.contains(&correct_choice) {
            return Err(QuizError::Validation(format!(
                "question {id}: correct choice '{correct_choice}' is not one of its choices"
            )));
        }

        Ok(Self {
            id,
            prompt: prompt.into(),
            choices,
            correct_choice,
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_choice(&self) -> &str {
        &self.correct_choice
    }

    /// Exact comparison against the correct choice.
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_choice
    }
}

/// One quiz attempt by one user.
///
/// Starts unscored and becomes scored exactly once; there is no way back.
/// Deserialized scores go through the same range check as [`Quiz::record_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredQuiz")]
pub struct Quiz {
    pub id: QuizId,
    pub user: UserId,
    pub taken_at: DateTime<Utc>,
    score: Option<f64>,
}

impl Quiz {
    /// A fresh, unscored attempt.
    pub fn new(user: UserId, taken_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            taken_at,
            score: None,
        }
    }

    /// Score percentage, `None` until graded.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    /// Move the quiz into its terminal scored state.
    pub fn record_score(&mut self, score: f64) -> Result<(), QuizError> {
        if self.score.is_some() {
            return Err(QuizError::AlreadyScored(self.id));
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(QuizError::Validation(format!(
                "score {score} is outside 0..=100"
            )));
        }
        self.score = Some(score);
        Ok(())
    }
}

#[derive(Deserialize)]
struct StoredQuiz {
    id: QuizId,
    user: UserId,
    taken_at: DateTime<Utc>,
    score: Option<f64>,
}

impl TryFrom<StoredQuiz> for Quiz {
    type Error = QuizError;

    fn try_from(stored: StoredQuiz) -> Result<Self, Self::Error> {
        let mut quiz = Quiz {
            id: stored.id,
            user: stored.user,
            taken_at: stored.taken_at,
            score: None,
        };
        if let Some(score) = stored.score {
            quiz.record_score(score)?;
        }
        Ok(quiz)
    }
}

/// The choice a user selected for one question of one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub quiz_id: QuizId,
    pub question_id: QuestionId,
    /// Raw submitted value; may be empty or not one of the choices.
    pub selected_choice: String,
    /// Correctness as graded when the answer was recorded.
    pub is_correct: bool,
}

impl Answer {
    /// Grade `selected_choice` against `question` and record it for `quiz_id`.
    pub fn graded(quiz_id: QuizId, question: &Question, selected_choice: impl Into<String>) -> Self {
        let selected_choice = selected_choice.into();
        Self {
            id: Uuid::new_v4(),
            quiz_id,
            question_id: question.id().clone(),
            is_correct: question.is_correct(&selected_choice),
            selected_choice,
        }
    }
}

/// A submitted answer sheet: question id to selected choice, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    entries: Vec<(QuestionId, String)>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission, rejecting empty and repeated question ids.
    pub fn from_pairs<I, Q, C>(pairs: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = (Q, C)>,
        Q: Into<QuestionId>,
        C: Into<String>,
    {
        let mut submission = Self::new();
        for (question_id, choice) in pairs {
            submission.insert(question_id, choice)?;
        }
        Ok(submission)
    }

    /// Parse `ID=CHOICE` pairs. The id is trimmed; the choice is kept verbatim
    /// and may be empty.
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, QuizError> {
        let mut submission = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (question_id, choice) = pair.split_once('=').ok_or_else(|| {
                QuizError::Validation(format!("expected ID=CHOICE, got '{pair}'"))
            })?;
            submission.insert(question_id.trim(), choice)?;
        }
        Ok(submission)
    }

    pub fn insert(
        &mut self,
        question_id: impl Into<QuestionId>,
        choice: impl Into<String>,
    ) -> Result<(), QuizError> {
        let question_id = question_id.into();
        if question_id.as_str().is_empty() {
            return Err(QuizError::Validation("question id is empty".into()));
        }
        if self.entries.iter().any(|(id, _)| *id == question_id) {
            return Err(QuizError::Validation(format!(
                "question {question_id} answered more than once"
            )));
        }
        self.entries.push((question_id, choice.into()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.entries.iter().map(|(id, choice)| (id, choice.as_str()))
    }
}
