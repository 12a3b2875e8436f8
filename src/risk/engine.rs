//! Combines the classifier probability with override rules; maps the result to a risk level.

use super::rules::RuleSet;
use crate::config::{FeaturesConfig, RiskConfig, RulesConfig};
use crate::error::{Result, ScoreError};
use crate::features::TransactionFeatures;
use crate::stats::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bands are half-open and inclusive at the lower end:
    /// `[0, medium)` LOW, `[medium, high)` MEDIUM, `[high, 1]` HIGH.
    pub fn from_probability(probability: f64, config: &RiskConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ScoreError::InvalidInput(format!(
                "probability {probability} outside [0, 1]"
            )));
        }
        Ok(if probability >= config.high_threshold {
            RiskLevel::High
        } else if probability >= config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct RiskEngine {
    config: RiskConfig,
    rules: RuleSet,
}

impl RiskEngine {
    pub fn new(config: RiskConfig, rules: &RulesConfig, names: &FeaturesConfig) -> Self {
        Self {
            config,
            rules: RuleSet::new(rules, names),
        }
    }

    pub fn classify(&self, probability: f64) -> Result<RiskLevel> {
        RiskLevel::from_probability(probability, &self.config)
    }

    /// Raise `base` through every triggered rule; returns the final probability and reasons in rule order.
    pub fn apply_overrides(
        &self,
        base: f64,
        thresholds: &Thresholds,
        features: &TransactionFeatures,
    ) -> (f64, Vec<String>) {
        self.rules.apply(base, thresholds, features)
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
