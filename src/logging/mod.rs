//! Structured logging and one-line JSON output records.

mod format;

pub use format::{ScoreRecord, StructuredLogger};
