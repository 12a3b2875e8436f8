//! Classifier adapter over an externally trained scaler + probability model.
//!
//! The engine only ever calls `transform` then `predict_probability` and reads
//! the positive-class entry of a two-class distribution.

mod logistic;
mod onnx;
mod scaler;

pub use logistic::LogisticModel;
pub use onnx::OnnxClassifier;
pub use scaler::StandardScaler;

use crate::config::{ModelKind, ScorerConfig};
use crate::error::{Result, ScoreError};
use crate::features::FeatureVector;
use std::sync::Arc;

/// Index of the fraud class in the predicted distribution.
const POSITIVE_CLASS: usize = 1;

pub trait Scaler: Send + Sync {
    /// Width the scaler was fitted on, when known.
    fn n_features(&self) -> Option<usize>;
    fn transform(&self, input: &[f64]) -> Result<Vec<f64>>;
}

pub trait ProbabilityModel: Send + Sync {
    fn n_features(&self) -> Option<usize>;
    /// `[p(class 0), p(class 1)]` for one input row.
    fn predict_probability(&self, input: &[f64]) -> Result<Vec<f64>>;
}

pub struct ClassifierAdapter {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn ProbabilityModel>,
    dim: usize,
}

impl std::fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierAdapter").field("dim", &self.dim).finish_non_exhaustive()
    }
}

impl ClassifierAdapter {
    /// Both collaborators must be present and agree with `dim`.
    pub fn new(
        scaler: Option<Arc<dyn Scaler>>,
        model: Option<Arc<dyn ProbabilityModel>>,
        dim: usize,
    ) -> Result<Self> {
        let scaler = scaler.ok_or_else(|| ScoreError::ModelUnavailable("feature scaler not loaded".into()))?;
        let model = model.ok_or_else(|| ScoreError::ModelUnavailable("classifier not loaded".into()))?;

        if let Some(n) = scaler.n_features() {
            if n != dim {
                return Err(ScoreError::DimensionMismatch { context: "scaler", expected: dim, actual: n });
            }
        }
        if let Some(n) = model.n_features() {
            if n != dim {
                return Err(ScoreError::DimensionMismatch { context: "classifier", expected: dim, actual: n });
            }
        }
        Ok(Self { scaler, model, dim })
    }

    /// Load the scaler and model artifacts named in the config.
    pub fn from_config(config: &ScorerConfig) -> Result<Self> {
        let scaler: Arc<dyn Scaler> = Arc::new(StandardScaler::load(&config.scaler_path)?);
        let model: Arc<dyn ProbabilityModel> = match config.model.kind {
            ModelKind::Logistic => Arc::new(LogisticModel::load(&config.model.path)?),
            ModelKind::Onnx => Arc::new(OnnxClassifier::load(&config.model.path, config.features.dimensionality)?),
        };
        Self::new(Some(scaler), Some(model), config.features.dimensionality)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Base fraud probability for one vector.
    pub fn score(&self, vector: &FeatureVector) -> Result<f64> {
        if vector.len() != self.dim {
            return Err(ScoreError::DimensionMismatch {
                context: "feature vector",
                expected: self.dim,
                actual: vector.len(),
            });
        }
        let scaled = self.scaler.transform(vector.as_slice())?;
        if scaled.len() != self.dim {
            return Err(ScoreError::DimensionMismatch {
                context: "scaler output",
                expected: self.dim,
                actual: scaled.len(),
            });
        }
        let distribution = self.model.predict_probability(&scaled)?;
        if distribution.len() != 2 {
            return Err(ScoreError::DimensionMismatch {
                context: "class distribution",
                expected: 2,
                actual: distribution.len(),
            });
        }
        let p = distribution[POSITIVE_CLASS];
        if !(0.0..=1.0).contains(&p) {
            return Err(ScoreError::ModelContract(format!(
                "positive-class probability {p} outside [0, 1]"
            )));
        }
        Ok(p)
    }
}
