//! Bridge WASM <-> JavaScript cho bộ phân tích báo cáo.

use report_core::{AnalyzerConfig, ReportError};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Cấu hình gửi từ JavaScript; mọi trường đều có thể bỏ trống.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsAnalyzerConfig {
    #[serde(default)]
    baseline_score: Option<i32>,
    #[serde(default)]
    min_score: Option<i32>,
    #[serde(default)]
    max_score: Option<i32>,
    #[serde(default)]
    no_findings_message: Option<String>,
    #[serde(default)]
    default_recommendations: Option<Vec<String>>,
}

impl From<JsAnalyzerConfig> for AnalyzerConfig {
    fn from(cfg: JsAnalyzerConfig) -> Self {
        let mut base = AnalyzerConfig::default();
        if let Some(score) = cfg.baseline_score {
            base.baseline_score = score;
        }
        if let Some(score) = cfg.min_score {
            base.min_score = score;
        }
        if let Some(score) = cfg.max_score {
            base.max_score = score;
        }
        if let Some(message) = cfg.no_findings_message {
            base.no_findings_message = message;
        }
        if let Some(recommendations) = cfg.default_recommendations {
            base.default_recommendations = recommendations;
        }
        base
    }
}

#[wasm_bindgen(js_name = analyzeReport)]
pub fn analyze_report(payload: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload_value = from_value::<serde_json::Value>(payload)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu báo cáo: {err}")))?;

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsAnalyzerConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            AnalyzerConfig::from(cfg)
        }
        _ => AnalyzerConfig::default(),
    };

    let analysis = report_analyzer::analyze_payload_value(&payload_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_report_error(err)))?;

    to_value(&analysis).map_err(|err| {
        JsValue::from_str(&format!("Không serialize được kết quả phân tích: {err}"))
    })
}

fn format_report_error(err: ReportError) -> String {
    format!("Report error: {err}")
}
