//! Rule-based analysis of medical report measurements.
//!
//! [`analyze`] is pure: the same report type and measurements always give the same
//! [`AnalysisResult`]. The JSON entry points and the store driver wrap it for callers
//! that receive loosely shaped input or keep reports in a store.

use std::collections::BTreeMap;

use report_core::{AnalysisResult, AnalyzerConfig, RawValue, ReportError, ReportPayload, ReportType};
use serde_json::Value;

mod assemble;
pub mod evaluators;
mod ingest;
mod job;
mod parse;
mod rules;

pub use assemble::assemble;
pub use ingest::payload_from_value;
pub use job::{run_analysis, MemoryStore, ReportStore};
pub use parse::{parse_leading_float, parse_value};
pub use rules::RuleOutput;

/// Scores one report's measurements with the rule set for its type.
pub fn analyze(
    report_type: ReportType,
    measurements: &BTreeMap<String, RawValue>,
    config: &AnalyzerConfig,
) -> AnalysisResult {
    tracing::debug!(
        report_type = report_type.as_str(),
        measurements = measurements.len(),
        "Evaluating report"
    );

    let output = evaluators::evaluate(report_type, measurements);
    let result = assemble(output, config);

    tracing::debug!(
        health_score = result.health_score,
        findings = result.findings.len(),
        risk_factors = result.risk_factors.len(),
        "Analysis assembled"
    );
    result
}

/// Same as [`analyze`], taking a whole payload.
pub fn analyze_payload(payload: &ReportPayload, config: &AnalyzerConfig) -> AnalysisResult {
    analyze(payload.report_type, &payload.measurements, config)
}

/// Analyze a report submitted as a JSON string.
pub fn analyze_payload_str(
    payload_json: &str,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, ReportError> {
    let value: Value =
        serde_json::from_str(payload_json).map_err(|err| ReportError::Parse(err.to_string()))?;
    analyze_payload_value(&value, config)
}

/// Analyze a report submitted as a `serde_json::Value`.
pub fn analyze_payload_value(
    payload: &Value,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, ReportError> {
    let payload = payload_from_value(payload)?;
    Ok(analyze_payload(&payload, config))
}
