use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AnalysisResult, ReportPayload, ReportType};

/// Trạng thái vòng đời của báo cáo đã lưu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Uploaded,
    Processing,
    Analyzed,
    Error,
}

/// Báo cáo trong kho, kèm kết quả phân tích khi đã có.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub title: String,
    pub status: ReportStatus,
    pub payload: ReportPayload,
    pub analysis: Option<AnalysisResult>,
    pub created_at: DateTime<Utc>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl ReportRecord {
    /// Báo cáo vừa tải lên, chưa phân tích.
    pub fn new(id: &str, title: &str, payload: ReportPayload) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status: ReportStatus::Uploaded,
            payload,
            analysis: None,
            created_at: Utc::now(),
            analyzed_at: None,
        }
    }

    /// Loại báo cáo, luôn lấy từ payload.
    pub fn report_type(&self) -> ReportType {
        self.payload.report_type
    }

    fn analyzed(&self) -> Option<&AnalysisResult> {
        match self.status {
            ReportStatus::Analyzed => self.analysis.as_ref(),
            _ => None,
        }
    }
}

/// Số liệu tổng hợp hiển thị trên bảng điều khiển của người dùng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_reports: usize,
    /// Điểm trung bình (làm tròn) của các báo cáo đã phân tích, 0 nếu chưa có.
    pub health_score: i32,
    /// Số yếu tố nguy cơ của báo cáo được phân tích gần nhất.
    pub risk_factors: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[ReportRecord]) -> Self {
        let scores: Vec<i32> = records
            .iter()
            .filter_map(ReportRecord::analyzed)
            .map(|analysis| analysis.health_score)
            .collect();

        if scores.is_empty() {
            return Self {
                total_reports: records.len(),
                ..Self::default()
            };
        }

        let total: i64 = scores.iter().map(|score| i64::from(*score)).sum();
        let health_score = (total as f64 / scores.len() as f64).round() as i32;

        let risk_factors = records
            .iter()
            .filter(|record| record.analyzed().is_some())
            .max_by_key(|record| record.analyzed_at)
            .and_then(|record| record.analysis.as_ref())
            .map(|analysis| analysis.risk_factors.len())
            .unwrap_or(0);

        Self {
            total_reports: records.len(),
            health_score,
            risk_factors,
        }
    }
}
