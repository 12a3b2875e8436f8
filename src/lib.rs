//! Fraud Guard — transaction fraud-risk scorer.
//!
//! Modular structure:
//! - [`stats`] — Per-feature statistics and sigma danger thresholds
//! - [`features`] — Transaction inputs and model vector builder
//! - [`model`] — Scaler + classifier adapter (logistic JSON or ONNX)
//! - [`risk`] — Override rules, risk bands, result assembly
//! - [`scorer`] — The immutable scoring engine wiring the pipeline
//! - [`serve`] — Line-oriented request loop used by the binary
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod risk;
pub mod scorer;
pub mod serve;
pub mod stats;

pub use config::ScorerConfig;
pub use error::{Result, ScoreError};
pub use features::{FeatureVector, TransactionFeatures, TransactionRequest};
pub use logging::StructuredLogger;
pub use model::{ClassifierAdapter, ProbabilityModel, Scaler};
pub use risk::{RiskLevel, ScoreResult};
pub use scorer::FraudScorer;
pub use stats::{FeatureStatistics, FeatureStats, Thresholds};
