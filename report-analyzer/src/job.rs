//! Drives one report through analysis against a store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use report_core::{AnalysisResult, AnalyzerConfig, ReportError, ReportRecord, ReportStatus};

use crate::analyze_payload;

/// Persistence seam for reports and their analyses.
pub trait ReportStore {
    fn load(&self, id: &str) -> Result<ReportRecord, ReportError>;

    fn set_status(&mut self, id: &str, status: ReportStatus) -> Result<(), ReportError>;

    /// Stores the analysis and moves the report to `Analyzed`.
    fn save_analysis(
        &mut self,
        id: &str,
        analysis: AnalysisResult,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), ReportError>;
}

/// Store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: HashMap<String, ReportRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a report, replacing any previous one with the same id.
    pub fn insert(&mut self, record: ReportRecord) {
        self.reports.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<&ReportRecord> {
        self.reports.get(id)
    }

    /// All reports, newest first.
    pub fn records(&self) -> Vec<ReportRecord> {
        let mut records: Vec<ReportRecord> = self.reports.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        records
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ReportRecord, ReportError> {
        self.reports
            .get_mut(id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }
}

impl ReportStore for MemoryStore {
    fn load(&self, id: &str) -> Result<ReportRecord, ReportError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }

    fn set_status(&mut self, id: &str, status: ReportStatus) -> Result<(), ReportError> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    fn save_analysis(
        &mut self,
        id: &str,
        analysis: AnalysisResult,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let record = self.get_mut(id)?;
        record.analysis = Some(analysis);
        record.analyzed_at = Some(analyzed_at);
        record.status = ReportStatus::Analyzed;
        Ok(())
    }
}

/// Analyzes the stored report `id` and writes the result back.
///
/// Any failure after the report is loaded leaves it marked `Error` (best effort)
/// and returns the original error.
pub fn run_analysis<S>(
    store: &mut S,
    id: &str,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, ReportError>
where
    S: ReportStore + ?Sized,
{
    let record = store.load(id)?;

    match analyze_record(store, &record, config) {
        Ok(analysis) => {
            tracing::info!(
                report_id = id,
                health_score = analysis.health_score,
                "Report analyzed"
            );
            Ok(analysis)
        }
        Err(err) => {
            tracing::warn!(
                report_id = id,
                error = %err,
                "Analysis failed, marking report as error"
            );
            if let Err(status_err) = store.set_status(id, ReportStatus::Error) {
                tracing::warn!(
                    report_id = id,
                    error = %status_err,
                    "Could not record error status"
                );
            }
            Err(err)
        }
    }
}

fn analyze_record<S>(
    store: &mut S,
    record: &ReportRecord,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, ReportError>
where
    S: ReportStore + ?Sized,
{
    store.set_status(&record.id, ReportStatus::Processing)?;
    let analysis = analyze_payload(&record.payload, config);
    store.save_analysis(&record.id, analysis.clone(), Utc::now())?;
    Ok(analysis)
}
