use report_core::{AnalysisResult, AnalyzerConfig};

use crate::rules::RuleOutput;

/// Folds evaluator output into a bounded result, filling in defaults where rules said nothing.
pub fn assemble(output: RuleOutput, config: &AnalyzerConfig) -> AnalysisResult {
    let RuleOutput {
        mut findings,
        mut recommendations,
        risk_factors,
        score_delta,
    } = output;

    let raw_score = config.baseline_score.saturating_add(score_delta);
    let health_score = raw_score.min(config.max_score).max(config.min_score);

    if findings.is_empty() {
        findings.push(config.no_findings_message.clone());
    }

    if recommendations.is_empty() {
        recommendations.extend(config.default_recommendations.iter().cloned());
    }

    AnalysisResult {
        health_score,
        findings,
        recommendations,
        risk_factors,
    }
}
