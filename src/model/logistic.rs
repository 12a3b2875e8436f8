//! Logistic regression exported as plain coefficients.

use super::ProbabilityModel;
use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScoreError::ModelUnavailable(format!(
                "model artifact not found at {}",
                path.display()
            )));
        }
        let data = std::fs::read_to_string(path)?;
        let model: LogisticModel = serde_json::from_str(&data)?;
        tracing::info!(path = %path.display(), dim = model.coefficients.len(), "logistic model loaded");
        Ok(model)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ProbabilityModel for LogisticModel {
    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict_probability(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.coefficients.len() {
            return Err(ScoreError::DimensionMismatch {
                context: "classifier input",
                expected: self.coefficients.len(),
                actual: input.len(),
            });
        }
        let z: f64 = self.intercept + input.iter().zip(&self.coefficients).map(|(x, w)| x * w).sum::<f64>();
        let p = sigmoid(z);
        Ok(vec![1.0 - p, p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_logit_is_even() {
        let m = LogisticModel { coefficients: vec![1.0, -1.0], intercept: 0.0 };
        let d = m.predict_probability(&[2.0, 2.0]).unwrap();
        assert!((d[0] - 0.5).abs() < 1e-12);
        assert!((d[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn distribution_sums_to_one() {
        let m = LogisticModel { coefficients: vec![0.8, 0.3], intercept: -2.0 };
        let d = m.predict_probability(&[1.5, -0.7]).unwrap();
        assert!((d[0] + d[1] - 1.0).abs() < 1e-12);
        assert!(d[1] < 0.5);
    }

    #[test]
    fn wrong_width_rejected() {
        let m = LogisticModel { coefficients: vec![1.0; 30], intercept: 0.0 };
        assert!(matches!(
            m.predict_probability(&[0.0; 29]),
            Err(ScoreError::DimensionMismatch { expected: 30, actual: 29, .. })
        ));
    }
}
