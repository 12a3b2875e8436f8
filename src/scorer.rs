//! The per-process scoring engine.
//!
//! Built once at startup from statistics and collaborators; afterwards every
//! field is read-only, so a shared `&FraudScorer` is safe across threads.

use crate::config::{FeaturesConfig, ScorerConfig};
use crate::error::{Result, ScoreError};
use crate::features::{build_vector, FeatureLayout, TransactionFeatures, TransactionRequest};
use crate::model::ClassifierAdapter;
use crate::risk::{assemble, RiskEngine, ScoreResult};
use crate::stats::{compute_thresholds, FeatureStatistics, Thresholds};
use tracing::{debug, info};

pub struct FraudScorer {
    stats: FeatureStatistics,
    thresholds: Thresholds,
    features: FeaturesConfig,
    layout: FeatureLayout,
    classifier: ClassifierAdapter,
    risk: RiskEngine,
}

impl FraudScorer {
    pub fn new(config: &ScorerConfig, stats: FeatureStatistics, classifier: ClassifierAdapter) -> Result<Self> {
        config.validate()?;
        let dim = config.features.dimensionality;
        let layout = FeatureLayout::from_config(&config.features);
        layout.check(dim)?;
        if classifier.dim() != dim {
            return Err(ScoreError::DimensionMismatch {
                context: "classifier adapter",
                expected: dim,
                actual: classifier.dim(),
            });
        }

        let thresholds = compute_thresholds(&stats, &config.features, config.thresholds.sigma)?;
        info!(
            sigma = thresholds.sigma,
            amount_danger = thresholds.amount_danger,
            anomaly_a_danger = thresholds.anomaly_a_danger,
            anomaly_b_danger = thresholds.anomaly_b_danger,
            "danger thresholds computed"
        );

        Ok(Self {
            stats,
            thresholds,
            features: config.features.clone(),
            layout,
            classifier,
            risk: RiskEngine::new(config.risk.clone(), &config.rules, &config.features),
        })
    }

    /// Load statistics, scaler and model from the paths in `config`.
    pub fn from_config(config: &ScorerConfig) -> Result<Self> {
        let stats = FeatureStatistics::load(&config.stats_path)?;
        let classifier = ClassifierAdapter::from_config(config)?;
        Self::new(config, stats, classifier)
    }

    pub fn analyze(&self, features: &TransactionFeatures) -> Result<ScoreResult> {
        features.validate(&self.stats, &self.features)?;
        let vector = build_vector(features, self.features.dimensionality, &self.layout)?;
        let base = self.classifier.score(&vector)?;
        let (final_probability, reasons) = self.risk.apply_overrides(base, &self.thresholds, features);
        let level = self.risk.classify(final_probability)?;

        debug!(base, final_probability, level = %level, "transaction scored");
        if !reasons.is_empty() {
            info!(base, final_probability, overrides = ?reasons, "override rules triggered");
        }

        Ok(assemble(
            base,
            final_probability,
            level,
            reasons,
            features,
            &self.stats,
            &self.features,
        ))
    }

    /// Fill omitted inputs with their means, then [`analyze`](Self::analyze).
    pub fn analyze_request(&self, request: &TransactionRequest) -> Result<ScoreResult> {
        let features = TransactionFeatures::from_request(request, &self.stats, &self.features)?;
        self.analyze(&features)
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn stats(&self) -> &FeatureStatistics {
        &self.stats
    }

    pub fn risk_engine(&self) -> &RiskEngine {
        &self.risk
    }
}
