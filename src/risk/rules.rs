//! Deterministic override rules. A rule can only raise the running probability
//! (`max(current, floor)`), so the final probability never drops below the base.

use crate::config::{FeaturesConfig, RulesConfig};
use crate::features::TransactionFeatures;
use crate::stats::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Amount above its upper danger threshold
    Amount,
    /// Either anomaly indicator below its lower danger threshold
    Pattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    pub kind: RuleKind,
    /// In (0, 1]
    pub floor: f64,
}

impl OverrideRule {
    pub fn triggered(&self, thresholds: &Thresholds, features: &TransactionFeatures) -> bool {
        match self.kind {
            RuleKind::Amount => features.amount > thresholds.amount_danger,
            RuleKind::Pattern => {
                features.anomaly_a < thresholds.anomaly_a_danger
                    || features.anomaly_b < thresholds.anomaly_b_danger
            }
        }
    }
}

/// The two fixed rules, evaluated amount first, then pattern.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: [OverrideRule; 2],
    pattern_label: String,
}

impl RuleSet {
    pub fn new(config: &RulesConfig, names: &FeaturesConfig) -> Self {
        Self {
            rules: [
                OverrideRule { kind: RuleKind::Amount, floor: config.amount_floor },
                OverrideRule { kind: RuleKind::Pattern, floor: config.pattern_floor },
            ],
            pattern_label: format!("{}/{}", names.anomaly_a_name, names.anomaly_b_name),
        }
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    fn reason(&self, rule: &OverrideRule, thresholds: &Thresholds) -> String {
        match rule.kind {
            RuleKind::Amount => format!(
                "Risky Amount Transacted given the other two metrics: (>$ {})",
                format_currency(thresholds.amount_danger)
            ),
            RuleKind::Pattern => format!("Statistical Pattern Anomaly ({})", self.pattern_label),
        }
    }

    pub fn apply(
        &self,
        base: f64,
        thresholds: &Thresholds,
        features: &TransactionFeatures,
    ) -> (f64, Vec<String>) {
        let mut probability = base;
        let mut reasons = Vec::new();
        for rule in &self.rules {
            if rule.triggered(thresholds, features) {
                probability = probability.max(rule.floor);
                reasons.push(self.reason(rule, thresholds));
            }
        }
        (probability, reasons)
    }
}

/// `1234567.891` -> `1,234,567.89`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds {
            sigma: 2.2,
            amount_danger: 1000.0,
            anomaly_a_danger: -5.0,
            anomaly_b_danger: -4.0,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new(&RulesConfig::default(), &FeaturesConfig::default())
    }

    #[test]
    fn nothing_fires_inside_thresholds() {
        let (p, reasons) = rules().apply(0.2, &thresholds(), &TransactionFeatures::new(500.0, 0.0, 0.0));
        assert_eq!(p, 0.2);
        assert!(reasons.is_empty());
    }

    #[test]
    fn amount_at_threshold_does_not_fire() {
        let (p, reasons) = rules().apply(0.2, &thresholds(), &TransactionFeatures::new(1000.0, 0.0, 0.0));
        assert_eq!(p, 0.2);
        assert!(reasons.is_empty());
    }

    #[test]
    fn amount_rule_names_threshold() {
        let (p, reasons) = rules().apply(0.1, &thresholds(), &TransactionFeatures::new(1000.01, 0.0, 0.0));
        assert_eq!(p, 0.95);
        assert_eq!(
            reasons,
            vec!["Risky Amount Transacted given the other two metrics: (>$ 1,000.00)".to_string()]
        );
    }

    #[test]
    fn either_anomaly_triggers_pattern() {
        let r = rules();
        let (pa, ra) = r.apply(0.0, &thresholds(), &TransactionFeatures::new(1.0, -5.1, 0.0));
        let (pb, rb) = r.apply(0.0, &thresholds(), &TransactionFeatures::new(1.0, 0.0, -4.1));
        assert_eq!(pa, 0.85);
        assert_eq!(pb, 0.85);
        assert_eq!(ra, vec!["Statistical Pattern Anomaly (V14/V17)".to_string()]);
        assert_eq!(ra, rb);
    }

    #[test]
    fn both_rules_keep_higher_floor_and_order() {
        let (p, reasons) = rules().apply(0.5, &thresholds(), &TransactionFeatures::new(5000.0, -9.0, -9.0));
        assert_eq!(p, 0.95);
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].starts_with("Risky Amount"));
        assert!(reasons[1].starts_with("Statistical Pattern"));
    }

    #[test]
    fn never_lowers_base() {
        let r = rules();
        for i in 0..=100 {
            let base = i as f64 / 100.0;
            for f in [
                TransactionFeatures::new(0.0, 0.0, 0.0),
                TransactionFeatures::new(2000.0, 0.0, 0.0),
                TransactionFeatures::new(0.0, -10.0, 0.0),
                TransactionFeatures::new(2000.0, -10.0, -10.0),
            ] {
                let (p, _) = r.apply(base, &thresholds(), &f);
                assert!(p >= base);
            }
        }
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(638.6434), "638.64");
        assert_eq!(format_currency(1234567.891), "1,234,567.89");
        assert_eq!(format_currency(-12345.5), "-12,345.50");
    }
}
