//! Ordered threshold tables shared by the evaluators.

use std::fmt::Display;

use report_core::{RiskFactor, RiskLevel};

/// One row of a threshold table. Rows are tried top-down and the first match wins.
pub(crate) struct Band<T> {
    pub applies: fn(T) -> bool,
    /// Finding label, rendered as `"{finding}: {reading}{unit}"`.
    pub finding: &'static str,
    pub recommendations: &'static [&'static str],
    pub risk: Option<(&'static str, RiskLevel)>,
    pub delta: i32,
}

/// Accumulated output of one evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutput {
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<RiskFactor>,
    pub score_delta: i32,
}

impl RuleOutput {
    /// Classifies `reading` against `bands` and records the matching row.
    ///
    /// Returns `false` when no row applies, leaving the output untouched.
    pub(crate) fn apply<T: Copy + Display>(
        &mut self,
        reading: T,
        unit: &str,
        bands: &[Band<T>],
    ) -> bool {
        let Some(band) = bands.iter().find(|band| (band.applies)(reading)) else {
            return false;
        };

        self.findings.push(format!("{}: {reading}{unit}", band.finding));
        self.recommendations
            .extend(band.recommendations.iter().map(|text| text.to_string()));
        if let Some((name, level)) = band.risk {
            self.risk_factors.push(RiskFactor::new(name, level));
        }
        self.score_delta += band.delta;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
            && self.recommendations.is_empty()
            && self.risk_factors.is_empty()
            && self.score_delta == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[Band<f64>] = &[
        Band {
            applies: |v| v > 10.0,
            finding: "High sample",
            recommendations: &["Lower it"],
            risk: Some(("Sample risk", RiskLevel::High)),
            delta: -2,
        },
        Band {
            applies: |v| v > 5.0,
            finding: "Raised sample",
            recommendations: &[],
            risk: None,
            delta: -1,
        },
    ];

    #[test]
    fn first_matching_row_wins() {
        let mut output = RuleOutput::default();
        assert!(output.apply(11.0, " u", SAMPLE));

        assert_eq!(output.findings, vec!["High sample: 11 u".to_string()]);
        assert_eq!(output.recommendations, vec!["Lower it".to_string()]);
        assert_eq!(
            output.risk_factors,
            vec![RiskFactor::new("Sample risk", RiskLevel::High)]
        );
        assert_eq!(output.score_delta, -2);
    }

    #[test]
    fn unmatched_reading_leaves_output_alone() {
        let mut output = RuleOutput::default();
        assert!(!output.apply(1.0, "", SAMPLE));
        assert!(output.is_empty());
    }
}
