//! Override rules, risk banding and result assembly.

mod engine;
mod result;
mod rules;

pub use engine::{RiskEngine, RiskLevel};
pub use result::{assemble, ScoreResult, AMOUNT_Z_SCORE, ANOMALY_A_Z_SCORE, ANOMALY_B_Z_SCORE};
pub use rules::{format_currency, OverrideRule, RuleKind, RuleSet};
