//! tricky-store — Record store backends and configuration.
//!
//! Implements the `RecordStore` trait for an in-process store and a JSON
//! record file, and loads the `tricky.toml` configuration that selects
//! between them.

pub mod config;
pub mod json_file;
pub mod memory;
pub mod records;

pub use config::{load_config, load_config_from, open_store, StoreConfig, TrickyConfig};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
