//! The question bank and its TOML loader.
//!
//! Banks are loaded from TOML files or directories of them, and can be
//! checked for common authoring mistakes with [`validate_bank`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::{Question, QuestionId};
use crate::sampling::{sample, Sample};

/// A random selection of questions for one attempt.
pub type QuestionSample<'a> = Sample<'a, Question>;

/// The full set of questions quizzes are drawn from.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    id: String,
    name: String,
    description: String,
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// An empty bank.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a bank from questions, rejecting repeated ids.
    pub fn from_questions(
        id: impl Into<String>,
        name: impl Into<String>,
        questions: impl IntoIterator<Item = Question>,
    ) -> Result<Self, QuizError> {
        let mut bank = Self::new(id, name);
        for q in questions {
            bank.add(q)?;
        }
        Ok(bank)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add(&mut self, question: Question) -> Result<(), QuizError> {
        if self.index.contains_key(question.id()) {
            return Err(QuizError::Validation(format!(
                "duplicate question id: {}",
                question.id()
            )));
        }
        self.index.insert(question.id().clone(), self.questions.len());
        self.questions.push(question);
        Ok(())
    }

    /// Combine several banks into one. Question ids must stay unique.
    pub fn merged(banks: Vec<QuestionBank>) -> Result<Self, QuizError> {
        let id = banks.iter().map(|b| b.id.as_str()).collect::<Vec<_>>().join("+");
        let name = banks
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut merged = Self::new(id, name);
        for bank in banks {
            for q in bank.questions {
                merged.add(q)?;
            }
        }
        Ok(merged)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question, failing with `NotFound`.
    pub fn get(&self, id: &QuestionId) -> Result<&Question, QuizError> {
        self.index
            .get(id)
            .map(|&i| &self.questions[i])
            .ok_or_else(|| QuizError::question_not_found(id))
    }

    /// Draw up to `k` distinct questions.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> QuestionSample<'_> {
        sample(&self.questions, rng, k)
    }
}

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    choices: Vec<String>,
    correct: String,
}

/// Parse a single TOML bank file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a bank. `source_path` is only used in messages.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question::new(q.id, q.prompt, q.choices, q.correct))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid question in {}", source_path.display()))?;

    let bank = QuestionBank::from_questions(parsed.bank.id, parsed.bank.name, questions)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?;

    Ok(bank.with_description(parsed.bank.description))
}

/// Recursively load every `.toml` bank under `dir`, in path order.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    let mut banks = Vec::new();
    for path in paths {
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank from a file, or merge every bank found under a directory.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let mut banks = load_bank_directory(path)?;
    if banks.is_empty() {
        anyhow::bail!("no question banks found in {}", path.display());
    }
    if banks.len() == 1 {
        return Ok(banks.remove(0));
    }
    QuestionBank::merged(banks)
        .with_context(|| format!("failed to merge question banks in {}", path.display()))
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Check a bank for issues that do not prevent loading it.
pub fn validate_bank(bank: &QuestionBank, quiz_size: usize) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    if bank.len() < quiz_size {
        warnings.push(BankWarning {
            question_id: None,
            message: format!(
                "bank has {} question(s), fewer than the quiz size of {quiz_size}",
                bank.len()
            ),
        });
    }

    for q in bank.questions() {
        if q.prompt().trim().is_empty() {
            warnings.push(BankWarning {
                question_id: Some(q.id().clone()),
                message: "prompt is empty".into(),
            });
        }

        if q.choices().len() < 2 {
            warnings.push(BankWarning {
                question_id: Some(q.id().clone()),
                message: "fewer than two choices".into(),
            });
        }

        let mut seen = HashSet::new();
        for choice in q.choices() {
            if !seen.insert(choice.as_str()) {
                warnings.push(BankWarning {
                    question_id: Some(q.id().clone()),
                    message: format!("choice '{choice}' appears more than once"),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VALID_TOML: &str = r#"
[bank]
id = "signs"
name = "Road Signs"
description = "Shapes and colours"

[[questions]]
id = "stop-shape"
prompt = "What shape is a stop sign?"
choices = ["Octagon", "Triangle", "Circle"]
correct = "Octagon"

[[questions]]
id = "yield-shape"
prompt = "What shape is a yield sign?"
choices = ["Octagon", "Triangle", "Circle"]
correct = "Triangle"
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("signs.toml")).unwrap();
        assert_eq!(bank.id(), "signs");
        assert_eq!(bank.name(), "Road Signs");
        assert_eq!(bank.description(), "Shapes and colours");
        assert_eq!(bank.len(), 2);

        let q = bank.get(&"yield-shape".into()).unwrap();
        assert_eq!(q.correct_choice(), "Triangle");
        assert_eq!(q.choices().len(), 3);
    }

    #[test]
    fn lookup_of_unknown_question_is_not_found() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("signs.toml")).unwrap();
        let err = bank.get(&"nope".into()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn correct_choice_must_be_listed() {
        let toml = r#"
[bank]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
prompt = "Pick"
choices = ["A", "B"]
correct = "C"
"#;
        let err = parse_bank_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("not one of its choices"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let toml = r#"
[bank]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
prompt = "First"
choices = ["A", "B"]
correct = "A"

[[questions]]
id = "same"
prompt = "Second"
choices = ["A", "B"]
correct = "B"
"#;
        let err = parse_bank_str(toml, &PathBuf::from("dupes.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate question id"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_small_banks_and_weak_questions() {
        let toml = r#"
[bank]
id = "weak"
name = "Weak"

[[questions]]
id = "lonely"
prompt = " "
choices = ["Only"]
correct = "Only"

[[questions]]
id = "repeated"
prompt = "Pick"
choices = ["A", "A", "B"]
correct = "A"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("weak.toml")).unwrap();
        let warnings = validate_bank(&bank, 5);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("fewer than the quiz size")));
        assert!(messages.iter().any(|m| m.contains("prompt is empty")));
        assert!(messages.iter().any(|m| m.contains("fewer than two choices")));
        assert!(messages.iter().any(|m| m.contains("more than once")));
    }

    #[test]
    fn load_directory_merges_banks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("more")).unwrap();
        std::fs::write(
            dir.path().join("more/b.toml"),
            r#"
[bank]
id = "lights"
name = "Traffic Lights"

[[questions]]
id = "amber"
prompt = "What follows green?"
choices = ["Amber", "Red"]
correct = "Amber"
"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 2);

        let bank = load_bank(dir.path()).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.id(), "signs+lights");
        assert!(bank.get(&"amber".into()).is_ok());
    }

    #[test]
    fn load_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_bank(dir.path()).is_err());
    }

    #[test]
    fn sample_draws_from_bank() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("signs.toml")).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let picked: Vec<_> = bank.sample(&mut rng, 5).map(|q| q.id().clone()).collect();
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
    }
}
