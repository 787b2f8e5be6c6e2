//! Kiểu dữ liệu lõi dùng chung cho bộ phân tích báo cáo, kho lưu trữ và các giao diện.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

mod record;

pub use record::{DashboardStats, ReportRecord, ReportStatus};

/// Cấu hình tổng hợp kết quả. Ngưỡng của các luật là cố định, nằm cùng các luật.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Điểm khởi đầu của mọi báo cáo trước khi trừ điểm.
    pub baseline_score: i32,
    /// Điểm thấp nhất một phân tích được phép trả về.
    pub min_score: i32,
    /// Điểm cao nhất một phân tích được phép trả về.
    pub max_score: i32,
    /// Nhận xét dùng khi không luật nào tạo ra nhận xét.
    pub no_findings_message: String,
    /// Khuyến nghị dùng khi không luật nào tạo ra khuyến nghị.
    pub default_recommendations: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            baseline_score: 85,
            min_score: 50,
            max_score: 99,
            no_findings_message: "No specific findings from the submitted data".to_string(),
            default_recommendations: vec![
                "Continue regular check-ups with healthcare provider".to_string(),
                "Maintain a balanced diet and regular exercise".to_string(),
            ],
        }
    }
}

/// Loại báo cáo y tế, quyết định bộ luật được áp dụng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    BloodWork,
    PhysicalExam,
    Imaging,
    Vaccination,
    #[serde(other)]
    Other,
}

impl ReportType {
    /// Chuyển nhãn sang loại báo cáo. Nhãn lạ thành `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "blood_work" => Self::BloodWork,
            "physical_exam" => Self::PhysicalExam,
            "imaging" => Self::Imaging,
            "vaccination" => Self::Vaccination,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodWork => "blood_work",
            Self::PhysicalExam => "physical_exam",
            Self::Imaging => "imaging",
            Self::Vaccination => "vaccination",
            Self::Other => "other",
        }
    }
}

/// Số đo như được gửi lên, chưa diễn giải thành số.
///
/// Deserialize không bao giờ thất bại vì hình dạng lạ: mọi dạng không hỗ trợ thành `Missing`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Quantity {
        value: Box<RawValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    Missing,
}

impl RawValue {
    /// Dựng cặp `{value, unit}` quanh một số.
    pub fn quantity(value: f64, unit: &str) -> Self {
        Self::Quantity {
            value: Box::new(Self::Number(value)),
            unit: Some(unit.to_string()),
        }
    }

    /// Ánh xạ một giá trị JSON sang các dạng số đo mà bộ phân tích hiểu được.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map(Self::Number).unwrap_or(Self::Missing),
            Value::String(text) => Self::Text(text.clone()),
            Value::Object(map) => match map.get("value") {
                Some(inner) => Self::Quantity {
                    value: Box::new(Self::from_json(inner)),
                    unit: map.get("unit").and_then(Value::as_str).map(str::to_string),
                },
                None => Self::Missing,
            },
            Value::Null | Value::Bool(_) | Value::Array(_) => Self::Missing,
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Đầu vào đã định kiểu của bộ phân tích.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub report_type: ReportType,
    #[serde(default)]
    pub measurements: BTreeMap<String, RawValue>,
}

impl ReportPayload {
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            measurements: BTreeMap::new(),
        }
    }

    /// Thêm hoặc thay thế một số đo.
    pub fn with(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.measurements.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.measurements.get(name)
    }
}

/// Mức độ nghiêm trọng (có thứ tự) của yếu tố nguy cơ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Mối lo ngại có tên do một luật đưa ra.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskFactor {
    pub name: String,
    pub level: RiskLevel,
}

impl RiskFactor {
    pub fn new(name: &str, level: RiskLevel) -> Self {
        Self {
            name: name.to_string(),
            level,
        }
    }
}

/// Kết quả phân tích một báo cáo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub health_score: i32,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<RiskFactor>,
}

impl AnalysisResult {
    /// Mức nguy cơ cao nhất, nếu có.
    pub fn highest_risk(&self) -> Option<RiskLevel> {
        self.risk_factors.iter().map(|risk| risk.level).max()
    }
}

/// Lỗi quanh bộ phân tích: đọc dữ liệu đầu vào và lưu trữ.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Dữ liệu đầu vào thiếu thông tin báo cáo bắt buộc")]
    MissingData,
    #[error("Không đọc được dữ liệu báo cáo: {0}")]
    Parse(String),
    #[error("Không tìm thấy báo cáo: {0}")]
    NotFound(String),
    #[error("Lỗi kho lưu trữ báo cáo: {0}")]
    Store(String),
}
