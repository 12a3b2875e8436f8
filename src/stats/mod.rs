//! Precomputed per-feature statistics, loaded once at startup.

mod thresholds;

pub use thresholds::{compute_thresholds, Thresholds};

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl FeatureStats {
    /// Number of standard deviations `value` lies from the mean; `None` when std is zero.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std > 0.0 {
            Some((value - self.mean) / self.std)
        } else {
            None
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Feature name -> statistics. Read-only after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureStatistics {
    features: BTreeMap<String, FeatureStats>,
}

impl FeatureStatistics {
    pub fn new(features: BTreeMap<String, FeatureStats>) -> Self {
        Self { features }
    }

    /// Load from a JSON object of `{"Name": {"mean", "std", "min", "max"}}`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let stats: FeatureStatistics = serde_json::from_str(&data)?;
        tracing::info!(path = %path.display(), features = stats.len(), "feature statistics loaded");
        Ok(stats)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureStats> {
        self.features.get(name)
    }

    /// Like [`get`](Self::get) but reports a missing feature as invalid input.
    pub fn require(&self, name: &str) -> Result<&FeatureStats> {
        self.features
            .get(name)
            .ok_or_else(|| ScoreError::InvalidInput(format!("no statistics for feature {name}")))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<(String, FeatureStats)> for FeatureStatistics {
    fn from_iter<I: IntoIterator<Item = (String, FeatureStats)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
