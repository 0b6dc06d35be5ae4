//! Configuration file loading and the store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tricky_core::sampling::DEFAULT_QUIZ_SIZE;
use tricky_core::traits::RecordStore;

use crate::json_file::JsonFileStore;
use crate::memory::MemoryStore;

/// Which record store backend to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Records live only as long as the process.
    Memory,
    /// Records are kept in a JSON file.
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".tricky/records.json")
}

/// Top-level tricky configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrickyConfig {
    /// Question bank file or directory.
    #[serde(default = "default_bank")]
    pub bank: PathBuf,
    /// Number of questions drawn per quiz.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    /// Fixed seed for question selection (random when unset).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Record store backend.
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_bank() -> PathBuf {
    PathBuf::from("questions")
}
fn default_quiz_size() -> usize {
    DEFAULT_QUIZ_SIZE
}

impl Default for TrickyConfig {
    fn default() -> Self {
        Self {
            bank: default_bank(),
            quiz_size: default_quiz_size(),
            seed: None,
            store: StoreConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tricky.toml` in the current directory
/// 2. `~/.config/tricky/config.toml`
///
/// Environment variable overrides: `TRICKY_BANK`, `TRICKY_STORE_PATH`.
pub fn load_config() -> Result<TrickyConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TrickyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tricky.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TrickyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TrickyConfig::default(),
    };

    if let Ok(bank) = std::env::var("TRICKY_BANK") {
        config.bank = PathBuf::from(bank);
    }
    if let Ok(store_path) = std::env::var("TRICKY_STORE_PATH") {
        config.store = StoreConfig::Json {
            path: PathBuf::from(store_path),
        };
    }

    anyhow::ensure!(config.quiz_size >= 1, "quiz_size must be at least 1");

    config.bank = resolve_path(&config.bank);
    if let StoreConfig::Json { path } = &mut config.store {
        *path = resolve_path(path);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tricky"))
}

/// Create a record store from its configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Json { path } => Ok(Arc::new(JsonFileStore::open(path).await?)),
    }
}
