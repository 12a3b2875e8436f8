//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use crate::config::LogConfig;
use crate::risk::ScoreResult;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output line for one analysis request: either a result or a rejection.
#[derive(Debug, Serialize)]
pub struct ScoreRecord<'a> {
    pub id: &'a str,
    pub ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Installs the process-wide tracing subscriber and writes output records.
pub struct StructuredLogger;

impl StructuredLogger {
    /// Diagnostics go to stderr so stdout stays a clean record stream.
    /// `RUST_LOG` overrides `config.level`. Returns false if a subscriber was already installed.
    pub fn init(config: &LogConfig) -> bool {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
        let base = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        let layer = if config.json {
            base.json().flatten_event(true).with_current_span(false).boxed()
        } else {
            base.compact().boxed()
        };
        tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok()
    }

    /// Emit a single JSON line without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
