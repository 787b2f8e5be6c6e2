//! Physical exam rules: blood pressure and body mass index.

use std::collections::BTreeMap;
use std::fmt;

use report_core::{RawValue, RiskLevel};

use crate::parse::parse_value;
use crate::rules::{Band, RuleOutput};

/// Paired cuff reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

const HYPERTENSION_ADVICE: &[&str] = &[
    "Monitor blood pressure regularly",
    "Consider lifestyle modifications to help lower blood pressure",
];

const OBESITY_ADVICE: &[&str] = &["Consult with healthcare provider about weight management"];

const BLOOD_PRESSURE: &[Band<BloodPressure>] = &[
    Band {
        applies: |bp| bp.systolic >= 160.0 || bp.diastolic >= 100.0,
        finding: "Elevated blood pressure",
        recommendations: HYPERTENSION_ADVICE,
        risk: Some(("Hypertension", RiskLevel::High)),
        delta: -7,
    },
    Band {
        applies: |bp| bp.systolic >= 140.0 || bp.diastolic >= 90.0,
        finding: "Elevated blood pressure",
        recommendations: HYPERTENSION_ADVICE,
        risk: Some(("Hypertension", RiskLevel::Medium)),
        delta: -7,
    },
    Band {
        applies: |bp| bp.systolic >= 120.0 || bp.diastolic >= 80.0,
        finding: "Borderline blood pressure",
        recommendations: &["Monitor blood pressure periodically"],
        risk: None,
        delta: -3,
    },
    Band {
        applies: |_| true,
        finding: "Normal blood pressure",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
];

const BMI: &[Band<f64>] = &[
    Band {
        applies: |bmi| bmi < 18.5,
        finding: "BMI indicates underweight",
        recommendations: &["Consider nutritional consultation"],
        risk: None,
        delta: -3,
    },
    Band {
        applies: |bmi| bmi >= 18.5 && bmi < 25.0,
        finding: "Healthy BMI",
        recommendations: &[],
        risk: None,
        delta: 0,
    },
    Band {
        applies: |bmi| bmi >= 25.0 && bmi < 30.0,
        finding: "BMI indicates overweight",
        recommendations: &["Consider weight management strategies"],
        risk: None,
        delta: -4,
    },
    // Both obesity rows share the finding text and differ only in risk level.
    Band {
        applies: |bmi| bmi >= 35.0,
        finding: "BMI indicates obesity",
        recommendations: OBESITY_ADVICE,
        risk: Some(("Obesity", RiskLevel::High)),
        delta: -8,
    },
    Band {
        applies: |bmi| bmi >= 30.0 && bmi < 35.0,
        finding: "BMI indicates obesity",
        recommendations: OBESITY_ADVICE,
        risk: Some(("Obesity", RiskLevel::Medium)),
        delta: -8,
    },
];

/// Body mass index from centimetres and kilograms, rounded to one decimal.
///
/// `None` when the result is not a finite number (zero height, for one).
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> Option<f64> {
    let meters = height_cm / 100.0;
    let bmi = weight_kg / (meters * meters);
    let rounded = (bmi * 10.0).round() / 10.0;
    rounded.is_finite().then_some(rounded)
}

/// Evaluates blood pressure and BMI, each only when both of its inputs are present.
pub fn evaluate(measurements: &BTreeMap<String, RawValue>) -> RuleOutput {
    let mut output = RuleOutput::default();
    let reading = |name: &str| measurements.get(name).and_then(parse_value);

    if let (Some(systolic), Some(diastolic)) = (reading("systolicBP"), reading("diastolicBP")) {
        output.apply(
            BloodPressure {
                systolic,
                diastolic,
            },
            " mmHg",
            BLOOD_PRESSURE,
        );
    }

    if let (Some(height), Some(weight)) = (reading("height"), reading("weight")) {
        if let Some(bmi) = body_mass_index(height, weight) {
            output.apply(bmi, "", BMI);
        }
    }

    output
}
