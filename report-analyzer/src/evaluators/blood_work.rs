//! Blood panel rules: glucose, total cholesterol, HDL and hemoglobin.

use std::collections::BTreeMap;

use report_core::{RawValue, RiskLevel};

use crate::parse::parse_value;
use crate::rules::{Band, RuleOutput};

const MG_DL: &str = " mg/dL";
const G_DL: &str = " g/dL";

const GLUCOSE_ADVICE: &[&str] = &["Consider dietary adjustments to manage blood glucose"];
const CHOLESTEROL_ADVICE: &[&str] = &["Consider dietary changes to manage cholesterol"];

const GLUCOSE: &[Band<f64>] = &[
    Band {
        applies: |v| v > 125.0,
        finding: "Elevated glucose level",
        recommendations: GLUCOSE_ADVICE,
        risk: Some(("Elevated glucose", RiskLevel::High)),
        delta: -5,
    },
    Band {
        applies: |v| v > 100.0 && v <= 125.0,
        finding: "Elevated glucose level",
        recommendations: GLUCOSE_ADVICE,
        risk: Some(("Elevated glucose", RiskLevel::Medium)),
        delta: -5,
    },
    Band {
        applies: |v| v > 70.0 && v <= 100.0,
        finding: "Normal glucose level",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
    Band {
        applies: |v| v <= 70.0,
        finding: "Low glucose level",
        recommendations: &["Consult with healthcare provider about low glucose levels"],
        risk: Some(("Low blood glucose", RiskLevel::Medium)),
        delta: -3,
    },
];

const TOTAL_CHOLESTEROL: &[Band<f64>] = &[
    Band {
        applies: |v| v > 240.0,
        finding: "Elevated total cholesterol",
        recommendations: CHOLESTEROL_ADVICE,
        risk: Some(("High cholesterol", RiskLevel::High)),
        delta: -6,
    },
    Band {
        applies: |v| v > 200.0 && v <= 240.0,
        finding: "Elevated total cholesterol",
        recommendations: CHOLESTEROL_ADVICE,
        risk: Some(("High cholesterol", RiskLevel::Medium)),
        delta: -6,
    },
    Band {
        applies: |v| v <= 200.0,
        finding: "Healthy total cholesterol",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
];

const HDL: &[Band<f64>] = &[
    Band {
        applies: |v| v < 40.0,
        finding: "Low HDL (good) cholesterol",
        recommendations: &["Increase physical activity to improve HDL levels"],
        risk: None,
        delta: -4,
    },
    Band {
        applies: |v| v >= 40.0,
        finding: "Good HDL cholesterol level",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
];

const HEMOGLOBIN: &[Band<f64>] = &[
    Band {
        applies: |v| v < 12.0,
        finding: "Low hemoglobin",
        recommendations: &["Consider iron supplementation after consulting with doctor"],
        risk: Some(("Anemia risk", RiskLevel::Medium)),
        delta: -5,
    },
    Band {
        applies: |v| v > 18.0,
        finding: "Elevated hemoglobin",
        recommendations: &["Follow up with healthcare provider"],
        risk: None,
        delta: -3,
    },
    Band {
        applies: |v| (12.0..=18.0).contains(&v),
        finding: "Normal hemoglobin level",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
];

/// Measurement name, unit suffix and table, in evaluation order.
const PANEL: [(&str, &str, &[Band<f64>]); 4] = [
    ("glucose", MG_DL, GLUCOSE),
    ("totalCholesterol", MG_DL, TOTAL_CHOLESTEROL),
    ("hdl", MG_DL, HDL),
    ("hemoglobin", G_DL, HEMOGLOBIN),
];

/// Evaluates every blood marker present; absent markers are skipped.
pub fn evaluate(measurements: &BTreeMap<String, RawValue>) -> RuleOutput {
    let mut output = RuleOutput::default();

    for (name, unit, bands) in PANEL {
        let Some(value) = measurements.get(name).and_then(parse_value) else {
            continue;
        };
        output.apply(value, unit, bands);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glucose_band(value: f64) -> &'static str {
        GLUCOSE
            .iter()
            .find(|band| (band.applies)(value))
            .map(|band| band.finding)
            .unwrap_or("none")
    }

    #[test]
    fn glucose_table_covers_every_reading() {
        for value in [-10.0, 0.0, 70.0, 70.5, 100.0, 100.1, 125.0, 125.1, 900.0] {
            assert_ne!(glucose_band(value), "none", "no band for {value}");
        }
    }

    #[test]
    fn hemoglobin_bounds_are_inclusive() {
        let mut low_edge = RuleOutput::default();
        low_edge.apply(12.0, G_DL, HEMOGLOBIN);
        assert_eq!(low_edge.findings, vec!["Normal hemoglobin level: 12 g/dL"]);

        let mut high_edge = RuleOutput::default();
        high_edge.apply(18.0, G_DL, HEMOGLOBIN);
        assert_eq!(high_edge.findings, vec!["Normal hemoglobin level: 18 g/dL"]);
    }
}
