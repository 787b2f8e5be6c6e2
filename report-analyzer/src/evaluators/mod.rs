//! Per report type rule sets and their dispatch.

use std::collections::BTreeMap;

use report_core::{RawValue, ReportType};

use crate::rules::RuleOutput;

pub mod blood_work;
pub mod physical_exam;

/// Runs the single rule set selected by `report_type`.
pub fn evaluate(report_type: ReportType, measurements: &BTreeMap<String, RawValue>) -> RuleOutput {
    match report_type {
        ReportType::BloodWork => blood_work::evaluate(measurements),
        ReportType::PhysicalExam => physical_exam::evaluate(measurements),
        ReportType::Imaging => imaging(measurements),
        ReportType::Vaccination => vaccination(measurements),
        ReportType::Other => RuleOutput::default(),
    }
}

/// Imaging reports carry no rules yet; results come from the assembler defaults.
fn imaging(_measurements: &BTreeMap<String, RawValue>) -> RuleOutput {
    RuleOutput::default()
}

/// Vaccination records carry no rules yet; results come from the assembler defaults.
fn vaccination(_measurements: &BTreeMap<String, RawValue>) -> RuleOutput {
    RuleOutput::default()
}
