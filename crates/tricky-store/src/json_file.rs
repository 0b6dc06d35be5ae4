//! Record store backed by a single JSON file.
//!
//! Each commit rewrites the whole file while holding an exclusive lock on a
//! sibling `<file>.lock`, so commits from separate processes never interleave.
//! The new snapshot is written and synced to a uniquely named temporary file
//! in the same directory, which is then renamed over the record file. A crash
//! mid-commit leaves the previous snapshot in place.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use fd_lock::RwLock;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use tricky_core::error::QuizError;
use tricky_core::model::{Answer, Quiz, QuizId, UserId};
use tricky_core::traits::RecordStore;

use crate::records::Records;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Queues this handle's commits before they contend for the file lock.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a record file, creating nothing until the first commit.
    ///
    /// An existing file must parse.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        let records = store.load().await?;
        tracing::debug!(
            path = %store.path.display(),
            quizzes = records.quizzes.len(),
            "opened record file"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Records> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_records(&content, &self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Records::default()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read record file: {}", self.path.display())),
        }
    }
}

fn parse_records(content: &str, path: &Path) -> Result<Records> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse record file: {}", path.display()))
}

fn read_records(path: &Path) -> Result<Records> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_records(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Records::default()),
        Err(e) => {
            Err(e).with_context(|| format!("failed to read record file: {}", path.display()))
        }
    }
}

fn write_records(path: &Path, records: &Records) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("failed to serialize records")?;

    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace record file: {}", path.display()))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn lock_path(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .with_context(|| format!("record path has no file name: {}", path.display()))?
        .to_os_string();
    name.push(".lock");
    Ok(path.with_file_name(name))
}

/// Load, extend and rewrite the record file under the cross-process lock.
fn commit_locked(path: &Path, quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let lock_path = lock_path(path)?;
    let lock_file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file: {}", lock_path.display()))?;
    let mut lock = RwLock::new(lock_file);
    let _held = lock
        .write()
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;

    let mut records = read_records(path)?;
    records.apply(quiz, answers)?;
    write_records(path, &records)?;
    Ok(())
}

#[async_trait]
impl RecordStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn commit_attempt(&self, quiz: &Quiz, answers: &[Answer]) -> Result<(), QuizError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let quiz = quiz.clone();
        let answers = answers.to_vec();

        tokio::task::spawn_blocking(move || commit_locked(&path, &quiz, &answers))
            .await
            .context("record file commit task failed")??;
        Ok(())
    }

    async fn quiz(&self, id: QuizId) -> Result<Quiz, QuizError> {
        self.load().await?.quiz(id)
    }

    async fn quizzes_for(&self, user: &UserId) -> Result<Vec<Quiz>, QuizError> {
        Ok(self.load().await?.quizzes_for(user))
    }

    async fn answers_for(&self, quiz: QuizId) -> Result<Vec<Answer>, QuizError> {
        Ok(self.load().await?.answers_for(quiz))
    }
}
