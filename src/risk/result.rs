//! Immutable per-request score result and its audit rendering.

use super::RiskLevel;
use crate::config::FeaturesConfig;
use crate::features::TransactionFeatures;
use crate::stats::FeatureStatistics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const AMOUNT_Z_SCORE: &str = "amount_z_score";
pub const ANOMALY_A_Z_SCORE: &str = "anomaly_a_z_score";
pub const ANOMALY_B_Z_SCORE: &str = "anomaly_b_z_score";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub base_probability: f64,
    pub final_probability: f64,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub metrics: BTreeMap<String, f64>,
}

impl ScoreResult {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn amount_z_score(&self) -> Option<f64> {
        self.metric(AMOUNT_Z_SCORE)
    }
}

/// Package one request's outcome. Z-scores are omitted for zero-variance features.
pub fn assemble(
    base: f64,
    final_probability: f64,
    level: RiskLevel,
    reasons: Vec<String>,
    features: &TransactionFeatures,
    stats: &FeatureStatistics,
    names: &FeaturesConfig,
) -> ScoreResult {
    let mut metrics = BTreeMap::new();
    for (metric, name, value) in [
        (AMOUNT_Z_SCORE, &names.amount_name, features.amount),
        (ANOMALY_A_Z_SCORE, &names.anomaly_a_name, features.anomaly_a),
        (ANOMALY_B_Z_SCORE, &names.anomaly_b_name, features.anomaly_b),
    ] {
        if let Some(z) = stats.get(name).and_then(|s| s.z_score(value)) {
            metrics.insert(metric.to_string(), z);
        }
    }
    ScoreResult {
        base_probability: base,
        final_probability,
        risk_level: level,
        reasons,
        metrics,
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall Risk: {}", self.risk_level)?;
        writeln!(f, "Exact Fraud Probability: {:.4}%", self.final_probability * 100.0)?;
        if let Some(z) = self.amount_z_score() {
            writeln!(f, "Amount Z-Score: {z:.2}σ")?;
        }
        if !self.reasons.is_empty() {
            writeln!(f, "Flags Triggered:")?;
            for r in &self.reasons {
                writeln!(f, "- {r}")?;
            }
        }
        Ok(())
    }
}
