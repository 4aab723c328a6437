use crate::domain::model::ProbeReport;
use crate::utils::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders the header mapping as `{"name": "value", ...}` with JSON string escaping.
pub fn render_headers(headers: &[(String, String)]) -> Result<String> {
    let mut entries = Vec::with_capacity(headers.len());
    for (name, value) in headers {
        entries.push(format!(
            "{}: {}",
            serde_json::to_string(name)?,
            serde_json::to_string(value)?
        ));
    }
    Ok(format!("{{{}}}", entries.join(", ")))
}

pub fn render_report(report: &ProbeReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Headers received after {:.2}s\nHeaders: {}\nContent: {}",
            report.header_latency.as_secs_f64(),
            render_headers(&report.headers)?,
            report.body
        )),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

pub fn render_failure(error: &ProbeError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    fn sample_report() -> ProbeReport {
        ProbeReport {
            started_at: Utc::now(),
            endpoint: "http://localhost:8000/query".to_string(),
            status: 200,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("transfer-encoding".to_string(), "chunked".to_string()),
            ],
            header_latency: Duration::from_millis(31),
            first_chunk_latency: Some(Duration::from_millis(2010)),
            total_latency: Duration::from_millis(2012),
            body_bytes: 11,
            body: "{\"data\":[]}".to_string(),
            summary: None,
        }
    }

    #[test]
    fn test_text_output_has_three_lines() {
        let output = render_report(&sample_report(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Headers received after 0.03s",
                "Headers: {\"content-type\": \"application/json\", \"transfer-encoding\": \"chunked\"}",
                "Content: {\"data\":[]}",
            ]
        );
    }

    #[test]
    fn test_json_output_is_single_object() {
        let output = render_report(&sample_report(), OutputFormat::Json).unwrap();
        assert!(!output.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["body"], "{\"data\":[]}");
        assert_eq!(value["headers"][1][0], "transfer-encoding");
    }

    #[test]
    fn test_failure_output() {
        let error = ProbeError::ConfigError {
            message: "boom".to_string(),
        };
        assert_eq!(
            render_failure(&error, OutputFormat::Text),
            "Configuration error: boom"
        );
        let value: serde_json::Value =
            serde_json::from_str(&render_failure(&error, OutputFormat::Json)).unwrap();
        assert_eq!(value["error"], "Configuration error: boom");
    }

    #[test]
    fn test_empty_headers_render_as_empty_mapping() {
        assert_eq!(render_headers(&[]).unwrap(), "{}");
    }

    #[test]
    fn test_control_characters_use_json_escapes() {
        let headers = vec![
            ("x-note".to_string(), "a\u{1b}b \"quoted\"".to_string()),
        ];
        assert_eq!(
            render_headers(&headers).unwrap(),
            r#"{"x-note": "a\u001bb \"quoted\""}"#
        );
    }
}
