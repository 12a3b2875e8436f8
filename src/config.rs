//! Scorer configuration. Every tunable constant of the scoring path lives here.

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Per-feature mean/std/min/max (JSON)
    pub stats_path: PathBuf,
    /// Fitted standard scaler (JSON)
    pub scaler_path: PathBuf,
    /// Trained probability model
    pub model: ModelConfig,
    /// Vector layout and statistics names
    pub features: FeaturesConfig,
    /// Danger threshold derivation
    pub thresholds: ThresholdConfig,
    /// Override rule floors
    pub rules: RulesConfig,
    /// Risk band boundaries
    pub risk: RiskConfig,
    /// Logging
    pub log: LogConfig,
    /// Output format of the binary
    pub report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Coefficients + intercept exported to JSON
    Logistic,
    /// ONNX graph with a `[1, 2]` probability output
    Onnx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Number of numerical features expected by the scaler and model
    pub dimensionality: usize,
    pub amount_position: usize,
    pub anomaly_a_position: usize,
    pub anomaly_b_position: usize,
    /// Names under which the statistics file stores each input
    pub amount_name: String,
    pub anomaly_a_name: String,
    pub anomaly_b_name: String,
    /// Reject anomaly inputs outside their statistics' [min, max]
    pub enforce_bounds: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Standard deviations from the mean that count as anomalous
    pub sigma: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub amount_floor: f64,
    pub pattern_floor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Probability at or above this is high risk (0.0–1.0)
    pub high_threshold: f64,
    /// Probability at or above this is medium risk
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from("feature_stats.json"),
            scaler_path: PathBuf::from("scaler.json"),
            model: ModelConfig::default(),
            features: FeaturesConfig::default(),
            thresholds: ThresholdConfig::default(),
            rules: RulesConfig::default(),
            risk: RiskConfig::default(),
            log: LogConfig::default(),
            report: ReportFormat::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::Logistic,
            path: PathBuf::from("fraud_model.json"),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            dimensionality: 30,
            amount_position: 29,
            anomaly_a_position: 14,
            anomaly_b_position: 17,
            amount_name: "Amount".to_string(),
            anomaly_a_name: "V14".to_string(),
            anomaly_b_name: "V17".to_string(),
            enforce_bounds: false,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { sigma: 2.2 }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            amount_floor: 0.95,
            pattern_floor: 0.85,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.60,
            medium_threshold: 0.15,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ScorerConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse is an error, not a silent default.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: ScorerConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sigma = self.thresholds.sigma;
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(ScoreError::Config(format!("sigma must be finite and >= 0, got {sigma}")));
        }
        for (name, floor) in [
            ("amount_floor", self.rules.amount_floor),
            ("pattern_floor", self.rules.pattern_floor),
        ] {
            if !(floor > 0.0 && floor <= 1.0) {
                return Err(ScoreError::Config(format!("{name} must be in (0, 1], got {floor}")));
            }
        }
        let RiskConfig {
            medium_threshold: medium,
            high_threshold: high,
        } = self.risk;
        if !(medium > 0.0 && medium < high && high <= 1.0) {
            return Err(ScoreError::Config(format!(
                "risk bands must satisfy 0 < medium < high <= 1, got medium={medium} high={high}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_constants() {
        let c = ScorerConfig::default();
        assert_eq!(c.thresholds.sigma, 2.2);
        assert_eq!(c.rules.amount_floor, 0.95);
        assert_eq!(c.rules.pattern_floor, 0.85);
        assert_eq!(c.risk.medium_threshold, 0.15);
        assert_eq!(c.risk.high_threshold, 0.60);
        assert_eq!(c.features.dimensionality, 30);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: ScorerConfig = serde_json::from_str(r#"{"thresholds": {"sigma": 3.0}}"#).unwrap();
        assert_eq!(c.thresholds.sigma, 3.0);
        assert_eq!(c.rules.amount_floor, 0.95);
        assert_eq!(c.features.amount_name, "Amount");
    }

    #[test]
    fn rejects_floor_out_of_range() {
        let mut c = ScorerConfig::default();
        c.rules.pattern_floor = 0.0;
        assert!(matches!(c.validate(), Err(ScoreError::Config(_))));
        c.rules.pattern_floor = 1.2;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_inverted_bands() {
        let mut c = ScorerConfig::default();
        c.risk.medium_threshold = 0.7;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_negative_sigma() {
        let mut c = ScorerConfig::default();
        c.thresholds.sigma = -1.0;
        assert!(c.validate().is_err());
    }
}
