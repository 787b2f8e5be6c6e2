//! Normalizes loosely shaped JSON submissions into a `ReportPayload`.

use report_core::{RawValue, ReportError, ReportPayload, ReportType};
use serde_json::{Map, Value};

/// Form field names accepted in place of the canonical measurement names.
const ALIASES: [(&str, &str); 1] = [("cholesterol", "totalCholesterol")];

/// Builds a payload from `{reportType | type, measurements | biomarkers}`.
pub fn payload_from_value(value: &Value) -> Result<ReportPayload, ReportError> {
    let root = value.as_object().ok_or_else(|| {
        ReportError::Parse(format!(
            "Expected a report object, received {}",
            json_kind(value)
        ))
    })?;

    let tag = ["reportType", "type"]
        .into_iter()
        .find_map(|key| root.get(key).and_then(Value::as_str))
        .ok_or(ReportError::MissingData)?;

    let mut payload = ReportPayload::new(ReportType::from_tag(tag));

    let source = match root.get("measurements").or_else(|| root.get("biomarkers")) {
        None | Some(Value::Null) => return Ok(payload),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ReportError::Parse(format!(
                "Expected measurements to be an object, received {}",
                json_kind(other)
            )))
        }
    };

    for (name, raw) in source {
        if name == "bloodPressure" || ALIASES.iter().any(|(alias, _)| *alias == name.as_str()) {
            continue;
        }
        payload
            .measurements
            .insert(name.clone(), RawValue::from_json(raw));
    }

    for (alias, canonical) in ALIASES {
        if let Some(raw) = source.get(alias) {
            payload
                .measurements
                .entry(canonical.to_string())
                .or_insert_with(|| RawValue::from_json(raw));
        }
    }

    if let Some(Value::Object(pressure)) = source.get("bloodPressure") {
        flatten_blood_pressure(pressure, &mut payload);
    }

    Ok(payload)
}

fn flatten_blood_pressure(pressure: &Map<String, Value>, payload: &mut ReportPayload) {
    for (field, canonical) in [("systolic", "systolicBP"), ("diastolic", "diastolicBP")] {
        if let Some(raw) = pressure.get(field) {
            payload
                .measurements
                .entry(canonical.to_string())
                .or_insert_with(|| RawValue::from_json(raw));
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
