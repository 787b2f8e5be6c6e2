use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use report_analyzer::{payload_from_value, run_analysis, MemoryStore};
use report_core::{AnalysisResult, AnalyzerConfig, ReportRecord};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "report-cli",
    about = "Phân tích báo cáo y tế từ file JSON."
)]
struct Args {
    /// Đường dẫn tới file JSON của báo cáo.
    #[arg(short, long)]
    input: PathBuf,

    /// File JSON cấu hình (tuỳ chọn) ghi đè giá trị mặc định.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// In kết quả dạng JSON thay vì bản tóm tắt.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let value: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("File {:?} không phải JSON hợp lệ", args.input))?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalyzerConfig::default(),
    };

    let title = value
        .get("title")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Untitled report")
        .to_string();
    let payload = payload_from_value(&value)?;

    let id = args.input.display().to_string();
    let mut store = MemoryStore::new();
    store.insert(ReportRecord::new(&id, &title, payload));

    let analysis = run_analysis(&mut store, &id, &config)?;
    let status = store.get(&id).map(|record| record.status);
    tracing::info!(
        report_id = %id,
        status = ?status,
        health_score = analysis.health_score,
        "Report processed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("Report: {title}");
        if let Some(status) = status {
            println!("Status: {status:?}");
        }
        print_summary(&analysis);
    }

    Ok(())
}

/// Đọc file cấu hình; trường nào bỏ trống giữ giá trị mặc định.
fn load_config(path: &Path) -> anyhow::Result<AnalyzerConfig> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được cấu hình {path:?}"))?;
    let overrides: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("Cấu hình {path:?} không phải JSON hợp lệ"))?;

    let mut merged = serde_json::to_value(AnalyzerConfig::default())?;
    if let (Some(base), Some(fields)) = (merged.as_object_mut(), overrides.as_object()) {
        for (key, value) in fields {
            base.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(merged)
        .with_context(|| format!("Cấu hình {path:?} có trường không hợp lệ"))
}

fn print_summary(analysis: &AnalysisResult) {
    println!("Health score: {}", analysis.health_score);

    println!("Findings:");
    for finding in &analysis.findings {
        println!("  - {finding}");
    }

    println!("Recommendations:");
    for recommendation in &analysis.recommendations {
        println!("  - {recommendation}");
    }

    if analysis.risk_factors.is_empty() {
        println!("Risk factors: none");
    } else {
        println!("Risk factors:");
        for risk in &analysis.risk_factors {
            println!("  - {} ({:?})", risk.name, risk.level);
        }
    }
}
