//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use tricky_core::bank::{load_bank, QuestionBank};
use tricky_core::engine::{EngineConfig, ScoringEngine};
use tricky_core::report::AggregationReporter;
use tricky_core::traits::RecordStore;
use tricky_store::{load_config_from, open_store, TrickyConfig};

pub mod init;
pub mod review;
pub mod score;
pub mod start;
pub mod submit;
pub mod validate;

/// Everything a quiz command needs: config, bank, and record store.
pub struct App {
    pub config: TrickyConfig,
    pub bank: Arc<QuestionBank>,
    pub store: Arc<dyn RecordStore>,
}

impl App {
    pub async fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let bank = load_bank(&config.bank).with_context(|| {
            format!("failed to load question bank: {}", config.bank.display())
        })?;
        let store = open_store(&config.store).await?;

        tracing::debug!(
            bank = bank.id(),
            questions = bank.len(),
            store = store.name(),
            "loaded app"
        );

        Ok(Self {
            config,
            bank: Arc::new(bank),
            store,
        })
    }

    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(
            Arc::clone(&self.bank),
            Arc::clone(&self.store),
            EngineConfig {
                quiz_size: self.config.quiz_size,
            },
        )
    }

    pub fn reporter(&self) -> AggregationReporter {
        AggregationReporter::new(Arc::clone(&self.store), Arc::clone(&self.bank))
    }
}
