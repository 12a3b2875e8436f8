//! Fraud Guard entrypoint: loads artifacts once, then scores one JSON request per stdin line.
//! Startup failures exit non-zero; a failed request is reported on its own output line
//! and never stops the loop.

use fraud_guard::{config::ScorerConfig, logging::StructuredLogger, scorer::FraudScorer, serve::serve_lines};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("FRAUD_GUARD_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = ScorerConfig::load(&config_path)?;

    StructuredLogger::init(&config.log);
    info!(config = %config_path.display(), "Fraud Guard starting");

    let scorer = FraudScorer::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = serve_lines(&scorer, config.report, stdin.lock(), stdout.lock())?;

    info!(scored = summary.scored, rejected = summary.rejected, "Fraud Guard stopping");
    Ok(())
}
