//! ONNX Runtime classifier. Input: [1, feature_dim] f32, Output: [1, 2] class probabilities.
//! The model is exercised once at load time; an export whose probability output is not a
//! plain two-class tensor (e.g. a ZipMap sequence) is rejected before any request is served.

use super::ProbabilityModel;
use crate::error::{Result, ScoreError};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Probability output names emitted by skl2onnx and hand-built graphs
const PROBABILITY_OUTPUTS: [&str; 2] = ["output_probability", "probabilities"];

fn onnx_err(e: impl std::fmt::Display) -> ScoreError {
    ScoreError::ModelUnavailable(format!("onnx runtime: {e}"))
}

pub struct OnnxClassifier {
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    dim: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path, dim: usize) -> Result<Self> {
        if !path.exists() {
            return Err(ScoreError::ModelUnavailable(format!(
                "ONNX model not found at {}",
                path.display()
            )));
        }
        let session = Session::builder()
            .map_err(onnx_err)?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(onnx_err)?
            .with_intra_threads(1)
            .map_err(onnx_err)?
            .commit_from_file(path)
            .map_err(onnx_err)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| ScoreError::ModelUnavailable("ONNX model declares no inputs".into()))?;
        let output_name = session
            .outputs
            .iter()
            .find(|o| PROBABILITY_OUTPUTS.contains(&o.name.as_str()))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| ScoreError::ModelUnavailable("ONNX model declares no outputs".into()))?;

        let classifier = Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            dim,
        };

        let warmup = classifier.run(&vec![0.0; dim]).map_err(|e| {
            ScoreError::ModelUnavailable(format!(
                "output {} is not a probability tensor: {e}",
                classifier.output_name
            ))
        })?;
        if warmup.len() != 2 {
            return Err(ScoreError::DimensionMismatch {
                context: "onnx class distribution",
                expected: 2,
                actual: warmup.len(),
            });
        }

        info!(
            path = %path.display(),
            input = %classifier.input_name,
            output = %classifier.output_name,
            dim,
            "ONNX classifier loaded"
        );
        Ok(classifier)
    }

    fn run(&self, input: &[f64]) -> Result<Vec<f64>> {
        let row: Vec<f32> = input.iter().map(|v| *v as f32).collect();
        let tensor = Tensor::from_array((vec![1_i64, row.len() as i64], row)).map_err(onnx_err)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ScoreError::ModelUnavailable("ONNX session lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(onnx_err)?;
        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ScoreError::ModelUnavailable(format!("model has no output {}", self.output_name)))?;
        let (_, data) = output.try_extract_tensor::<f32>().map_err(onnx_err)?;
        let probs: Vec<f64> = data.iter().map(|p| *p as f64).collect();
        Ok(probs)
    }
}

impl ProbabilityModel for OnnxClassifier {
    fn n_features(&self) -> Option<usize> {
        Some(self.dim)
    }

    fn predict_probability(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.dim {
            return Err(ScoreError::DimensionMismatch {
                context: "onnx input",
                expected: self.dim,
                actual: input.len(),
            });
        }
        self.run(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_unavailable() {
        let err = OnnxClassifier::load(Path::new("nonexistent.onnx"), 30).err().unwrap();
        assert!(matches!(err, ScoreError::ModelUnavailable(_)));
    }

    #[test]
    fn exporter_probability_names_recognised() {
        assert!(PROBABILITY_OUTPUTS.contains(&"output_probability"));
        assert!(!PROBABILITY_OUTPUTS.contains(&"output_label"));
    }
}
