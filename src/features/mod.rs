//! Transaction inputs and the fixed-width model input vector.

mod builder;

pub use builder::{build_vector, FeatureLayout};

use crate::config::FeaturesConfig;
use crate::error::{Result, ScoreError};
use crate::stats::FeatureStatistics;
use serde::{Deserialize, Serialize};

/// Named inputs of one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionFeatures {
    pub amount: f64,
    pub anomaly_a: f64,
    pub anomaly_b: f64,
}

/// Raw request as received at the boundary; omitted values default to the feature mean.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub anomaly_a: Option<f64>,
    #[serde(default)]
    pub anomaly_b: Option<f64>,
}

impl TransactionFeatures {
    pub fn new(amount: f64, anomaly_a: f64, anomaly_b: f64) -> Self {
        Self { amount, anomaly_a, anomaly_b }
    }

    /// The "untouched form" transaction: every input at its statistical mean.
    pub fn at_means(stats: &FeatureStatistics, names: &FeaturesConfig) -> Result<Self> {
        Ok(Self {
            amount: stats.require(&names.amount_name)?.mean,
            anomaly_a: stats.require(&names.anomaly_a_name)?.mean,
            anomaly_b: stats.require(&names.anomaly_b_name)?.mean,
        })
    }

    /// Resolve defaults for omitted fields and validate the result.
    pub fn from_request(
        request: &TransactionRequest,
        stats: &FeatureStatistics,
        config: &FeaturesConfig,
    ) -> Result<Self> {
        let means = Self::at_means(stats, config)?;
        let features = Self {
            amount: request.amount.unwrap_or(means.amount),
            anomaly_a: request.anomaly_a.unwrap_or(means.anomaly_a),
            anomaly_b: request.anomaly_b.unwrap_or(means.anomaly_b),
        };
        features.validate(stats, config)?;
        Ok(features)
    }

    /// Amount must be a finite non-negative number; anomaly values finite, and
    /// inside their observed range when `enforce_bounds` is set.
    pub fn validate(&self, stats: &FeatureStatistics, config: &FeaturesConfig) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ScoreError::InvalidInput(format!(
                "amount must be a finite value >= 0, got {}",
                self.amount
            )));
        }
        for (name, value) in [
            (&config.anomaly_a_name, self.anomaly_a),
            (&config.anomaly_b_name, self.anomaly_b),
        ] {
            if !value.is_finite() {
                return Err(ScoreError::InvalidInput(format!("{name} must be finite, got {value}")));
            }
            if config.enforce_bounds {
                let s = stats.require(name)?;
                if !s.contains(value) {
                    return Err(ScoreError::InvalidInput(format!(
                        "{name}={value} outside observed range [{}, {}]",
                        s.min, s.max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Fixed-size feature vector for model input (e.g. 30-dim)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeros(dim: usize) -> Self {
        Self { values: vec![0.0; dim] }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::FeatureStats;

    fn stats() -> FeatureStatistics {
        [
            ("Amount", FeatureStats { mean: 88.0, std: 250.0, min: 0.0, max: 25000.0 }),
            ("V14", FeatureStats { mean: 0.1, std: 0.9, min: -19.0, max: 10.0 }),
            ("V17", FeatureStats { mean: -0.1, std: 0.8, min: -25.0, max: 9.0 }),
        ]
        .into_iter()
        .map(|(n, s)| (n.to_string(), s))
        .collect()
    }

    #[test]
    fn omitted_fields_default_to_means() {
        let req = TransactionRequest { amount: Some(12.5), ..Default::default() };
        let f = TransactionFeatures::from_request(&req, &stats(), &FeaturesConfig::default()).unwrap();
        assert_eq!(f, TransactionFeatures::new(12.5, 0.1, -0.1));
    }

    #[test]
    fn negative_amount_rejected() {
        let f = TransactionFeatures::new(-1.0, 0.0, 0.0);
        let err = f.validate(&stats(), &FeaturesConfig::default()).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }

    #[test]
    fn nan_anomaly_rejected() {
        let f = TransactionFeatures::new(1.0, f64::NAN, 0.0);
        assert!(f.validate(&stats(), &FeaturesConfig::default()).is_err());
    }

    #[test]
    fn bounds_only_enforced_when_configured() {
        let f = TransactionFeatures::new(10.0, -40.0, 0.0);
        let mut config = FeaturesConfig::default();
        assert!(f.validate(&stats(), &config).is_ok());
        config.enforce_bounds = true;
        let err = f.validate(&stats(), &config).unwrap_err();
        assert!(err.to_string().contains("V14"));
    }

    #[test]
    fn request_parses_with_missing_fields() {
        let req: TransactionRequest = serde_json::from_str(r#"{"id": "tx-1", "anomaly_b": -3.5}"#).unwrap();
        assert_eq!(req.id.as_deref(), Some("tx-1"));
        assert_eq!(req.amount, None);
        assert_eq!(req.anomaly_b, Some(-3.5));
    }
}
