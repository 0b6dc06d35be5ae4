//! The `tricky validate` command.

use std::path::PathBuf;

use anyhow::Result;

use tricky_core::bank::{load_bank, validate_bank};
use tricky_store::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank_path.unwrap_or(config.bank);

    let bank = load_bank(&bank_path)?;
    println!("Question bank: {} ({} questions)", bank.name(), bank.len());

    let warnings = validate_bank(&bank, config.quiz_size);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
