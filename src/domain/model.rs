use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

/// Body of `POST /query/cancel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub query_id: String,
}

/// Result shape returned by the query server. Every field is optional so
/// partial or error payloads still parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    pub data: Option<Vec<serde_json::Value>>,
    pub columns: Option<Vec<serde_json::Value>>,
    pub total_rows: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub rows: usize,
    pub columns: usize,
    pub total_rows: Option<u64>,
    pub error: Option<String>,
}

impl ResultSummary {
    /// Returns `None` for bodies that are not a JSON object.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        if !value.is_object() {
            return None;
        }
        let response: QueryResponse = serde_json::from_value(value).ok()?;

        Some(Self {
            rows: response.data.as_ref().map_or(0, Vec::len),
            columns: response.columns.as_ref().map_or(0, Vec::len),
            total_rows: response.total_rows,
            error: response.error,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub started_at: DateTime<Utc>,
    pub endpoint: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    #[serde(rename = "header_latency_secs", serialize_with = "as_secs")]
    pub header_latency: Duration,
    #[serde(rename = "first_chunk_latency_secs", serialize_with = "as_opt_secs")]
    pub first_chunk_latency: Option<Duration>,
    #[serde(rename = "total_latency_secs", serialize_with = "as_secs")]
    pub total_latency: Duration,
    pub body_bytes: usize,
    pub body: String,
    pub summary: Option<ResultSummary>,
}

impl ProbeReport {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn as_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

fn as_opt_secs<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
