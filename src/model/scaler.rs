//! Standard scaler fitted offline: `(x - mean) / scale` per column.

use super::Scaler;
use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(alias = "mean_")]
    pub mean: Vec<f64>,
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(ScoreError::DimensionMismatch {
                context: "scaler parameters",
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        Ok(Self { mean, scale })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScoreError::ModelUnavailable(format!(
                "scaler artifact not found at {}",
                path.display()
            )));
        }
        let data = std::fs::read_to_string(path)?;
        let raw: StandardScaler = serde_json::from_str(&data)?;
        let scaler = Self::new(raw.mean, raw.scale)?;
        tracing::info!(path = %path.display(), dim = scaler.mean.len(), "scaler loaded");
        Ok(scaler)
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> Option<usize> {
        Some(self.mean.len())
    }

    fn transform(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.mean.len() {
            return Err(ScoreError::DimensionMismatch {
                context: "scaler input",
                expected: self.mean.len(),
                actual: input.len(),
            });
        }
        Ok(input
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| {
                // zero-variance columns are only centered
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect())
    }
}
