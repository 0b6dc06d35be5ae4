//! tricky-core — Question bank, scoring engine, and score aggregation.
//!
//! This crate holds the data model, the record store seam, and the logic for
//! drawing, grading, and summarizing quiz attempts. Storage backends live in
//! `tricky-store`.

pub mod bank;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod sampling;
pub mod statistics;
pub mod traits;

pub use error::QuizError;
