//! Danger thresholds derived from feature statistics with a sigma multiplier.
//!
//! Amount is suspicious when high (upper bound); the two anomaly indicators are
//! suspicious when abnormally low (lower bound). Computed once per process.

use super::FeatureStatistics;
use crate::config::FeaturesConfig;
use crate::error::{Result, ScoreError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub sigma: f64,
    /// mean + sigma * std
    pub amount_danger: f64,
    /// mean - sigma * std
    pub anomaly_a_danger: f64,
    /// mean - sigma * std
    pub anomaly_b_danger: f64,
}

pub fn compute_thresholds(
    stats: &FeatureStatistics,
    names: &FeaturesConfig,
    sigma: f64,
) -> Result<Thresholds> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ScoreError::InvalidInput(format!("sigma must be finite and >= 0, got {sigma}")));
    }
    let spread = |name: &str| -> Result<(f64, f64)> {
        let s = stats.require(name)?;
        if s.std < 0.0 || !s.std.is_finite() {
            return Err(ScoreError::InvalidInput(format!(
                "feature {name} has invalid standard deviation {}",
                s.std
            )));
        }
        Ok((s.mean, sigma * s.std))
    };

    let (amount_mean, amount_spread) = spread(&names.amount_name)?;
    let (a_mean, a_spread) = spread(&names.anomaly_a_name)?;
    let (b_mean, b_spread) = spread(&names.anomaly_b_name)?;

    Ok(Thresholds {
        sigma,
        amount_danger: amount_mean + amount_spread,
        anomaly_a_danger: a_mean - a_spread,
        anomaly_b_danger: b_mean - b_spread,
    })
}
