//! Feature vector builder: named inputs -> zero-filled fixed-width vector.
//!
//! Only three of the model's input positions are populated; the rest stay zero.

use super::{FeatureVector, TransactionFeatures};
use crate::config::FeaturesConfig;
use crate::error::{Result, ScoreError};

/// Positions of each named input inside the model vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub amount: usize,
    pub anomaly_a: usize,
    pub anomaly_b: usize,
}

impl FeatureLayout {
    pub fn from_config(config: &FeaturesConfig) -> Self {
        Self {
            amount: config.amount_position,
            anomaly_a: config.anomaly_a_position,
            anomaly_b: config.anomaly_b_position,
        }
    }

    /// Fails when any position does not fit in `dimensionality` or two inputs share one slot.
    pub fn check(&self, dimensionality: usize) -> Result<()> {
        let slots = [
            ("amount", self.amount),
            ("anomaly_a", self.anomaly_a),
            ("anomaly_b", self.anomaly_b),
        ];
        for (i, (name, pos)) in slots.iter().enumerate() {
            if *pos >= dimensionality {
                return Err(ScoreError::InvalidInput(format!(
                    "{name} position {pos} out of range for dimensionality {dimensionality}"
                )));
            }
            if let Some((other, _)) = slots[..i].iter().find(|(_, p)| p == pos) {
                return Err(ScoreError::InvalidInput(format!(
                    "{name} and {other} both map to position {pos}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::from_config(&FeaturesConfig::default())
    }
}

pub fn build_vector(
    features: &TransactionFeatures,
    dimensionality: usize,
    layout: &FeatureLayout,
) -> Result<FeatureVector> {
    layout.check(dimensionality)?;
    let mut vector = FeatureVector::zeros(dimensionality);
    vector.values[layout.anomaly_a] = features.anomaly_a;
    vector.values[layout.anomaly_b] = features.anomaly_b;
    vector.values[layout.amount] = features.amount;
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populates_only_configured_positions() {
        let f = TransactionFeatures::new(250.0, -1.5, 2.5);
        let v = build_vector(&f, 30, &FeatureLayout::default()).unwrap();
        assert_eq!(v.len(), 30);
        assert_eq!(v.values[29], 250.0);
        assert_eq!(v.values[14], -1.5);
        assert_eq!(v.values[17], 2.5);
        let nonzero = v.values.iter().filter(|x| **x != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn position_out_of_range_is_invalid_input() {
        let f = TransactionFeatures::new(1.0, 1.0, 1.0);
        let err = build_vector(&f, 29, &FeatureLayout::default()).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
        assert!(err.to_string().contains("amount position 29"));
    }

    #[test]
    fn custom_layout() {
        let layout = FeatureLayout { amount: 0, anomaly_a: 1, anomaly_b: 2 };
        let v = build_vector(&TransactionFeatures::new(3.0, 4.0, 5.0), 3, &layout).unwrap();
        assert_eq!(v.values, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn shared_position_is_rejected() {
        let layout = FeatureLayout { amount: 3, anomaly_a: 1, anomaly_b: 3 };
        let err = build_vector(&TransactionFeatures::new(1.0, 2.0, 3.0), 5, &layout).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
        assert!(err.to_string().contains("anomaly_b and amount both map to position 3"));
    }
}
