use report_analyzer::analyze_payload;
use report_core::{
    AnalysisResult, AnalyzerConfig, RawValue, ReportPayload, ReportType, RiskFactor, RiskLevel,
};

fn blood(measurements: &[(&str, RawValue)]) -> AnalysisResult {
    let payload = measurements
        .iter()
        .cloned()
        .fold(ReportPayload::new(ReportType::BloodWork), |payload, (name, value)| {
            payload.with(name, value)
        });
    analyze_payload(&payload, &AnalyzerConfig::default())
}

fn glucose(value: f64) -> AnalysisResult {
    blood(&[("glucose", RawValue::Number(value))])
}

#[test]
fn glucose_at_100_is_normal() {
    let result = glucose(100.0);
    assert_eq!(result.findings, vec!["Normal glucose level: 100 mg/dL"]);
    assert!(result.risk_factors.is_empty());
    assert_eq!(result.health_score, 85);
}

#[test]
fn glucose_just_above_100_is_medium_risk() {
    let result = glucose(101.0);
    assert_eq!(result.findings, vec!["Elevated glucose level: 101 mg/dL"]);
    assert_eq!(
        result.risk_factors,
        vec![RiskFactor::new("Elevated glucose", RiskLevel::Medium)]
    );
    assert_eq!(
        result.recommendations,
        vec!["Consider dietary adjustments to manage blood glucose"]
    );
    assert_eq!(result.health_score, 80);
}

#[test]
fn glucose_125_is_medium_and_126_is_high() {
    assert_eq!(glucose(125.0).highest_risk(), Some(RiskLevel::Medium));

    let high = glucose(126.0);
    assert_eq!(high.highest_risk(), Some(RiskLevel::High));
    assert_eq!(high.health_score, 80);
}

#[test]
fn glucose_at_70_is_low() {
    let result = glucose(70.0);
    assert_eq!(result.findings, vec!["Low glucose level: 70 mg/dL"]);
    assert_eq!(
        result.risk_factors,
        vec![RiskFactor::new("Low blood glucose", RiskLevel::Medium)]
    );
    assert_eq!(result.health_score, 82);
}

#[test]
fn cholesterol_boundaries() {
    let healthy = blood(&[("totalCholesterol", RawValue::Number(200.0))]);
    assert_eq!(healthy.findings, vec!["Healthy total cholesterol: 200 mg/dL"]);

    let medium = blood(&[("totalCholesterol", RawValue::Number(240.0))]);
    assert_eq!(medium.findings, vec!["Elevated total cholesterol: 240 mg/dL"]);
    assert_eq!(medium.highest_risk(), Some(RiskLevel::Medium));
    assert_eq!(medium.health_score, 79);

    let high = blood(&[("totalCholesterol", RawValue::Number(241.0))]);
    assert_eq!(
        high.risk_factors,
        vec![RiskFactor::new("High cholesterol", RiskLevel::High)]
    );
}

#[test]
fn low_hdl_penalizes_without_risk_factor() {
    let result = blood(&[("hdl", RawValue::Number(39.5))]);
    assert_eq!(result.findings, vec!["Low HDL (good) cholesterol: 39.5 mg/dL"]);
    assert_eq!(
        result.recommendations,
        vec!["Increase physical activity to improve HDL levels"]
    );
    assert!(result.risk_factors.is_empty());
    assert_eq!(result.health_score, 81);

    let good = blood(&[("hdl", RawValue::Number(40.0))]);
    assert_eq!(good.findings, vec!["Good HDL cholesterol level: 40 mg/dL"]);
}

#[test]
fn hemoglobin_outside_range() {
    let low = blood(&[("hemoglobin", RawValue::quantity(11.9, "g/dL"))]);
    assert_eq!(low.findings, vec!["Low hemoglobin: 11.9 g/dL"]);
    assert_eq!(
        low.risk_factors,
        vec![RiskFactor::new("Anemia risk", RiskLevel::Medium)]
    );
    assert_eq!(low.health_score, 80);

    let high = blood(&[("hemoglobin", RawValue::from("18.1"))]);
    assert_eq!(high.findings, vec!["Elevated hemoglobin: 18.1 g/dL"]);
    assert_eq!(high.recommendations, vec!["Follow up with healthcare provider"]);
    assert!(high.risk_factors.is_empty());
    assert_eq!(high.health_score, 82);
}

#[test]
fn every_marker_abnormal_accumulates_in_table_order() {
    let result = blood(&[
        ("hemoglobin", RawValue::Number(10.0)),
        ("hdl", RawValue::Number(30.0)),
        ("totalCholesterol", RawValue::Number(260.0)),
        ("glucose", RawValue::Number(140.0)),
    ]);

    assert_eq!(
        result.findings,
        vec![
            "Elevated glucose level: 140 mg/dL",
            "Elevated total cholesterol: 260 mg/dL",
            "Low HDL (good) cholesterol: 30 mg/dL",
            "Low hemoglobin: 10 g/dL",
        ]
    );
    assert_eq!(
        result.risk_factors,
        vec![
            RiskFactor::new("Elevated glucose", RiskLevel::High),
            RiskFactor::new("High cholesterol", RiskLevel::High),
            RiskFactor::new("Anemia risk", RiskLevel::Medium),
        ]
    );
    assert_eq!(result.health_score, 65);
}

#[test]
fn absent_and_unreadable_markers_are_skipped() {
    let result = blood(&[
        ("glucose", RawValue::from("pending")),
        ("hdl", RawValue::Missing),
        ("hemoglobin", RawValue::from("")),
        ("systolicBP", RawValue::Number(180.0)),
    ]);

    assert_eq!(
        result.findings,
        vec!["No specific findings from the submitted data"]
    );
    assert_eq!(result.recommendations.len(), 2);
    assert_eq!(result.health_score, 85);
}
