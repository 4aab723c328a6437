use crate::config::toml_config::TomlConfig;
use crate::domain::model::QueryRequest;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/query";
pub const DEFAULT_QUERY: &str = "SELECT pg_sleep(2)";
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Fully resolved probe settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSettings {
    pub endpoint: String,
    pub query: String,
    pub limit: u64,
    pub offset: Option<u64>,
    pub query_id: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub cancel_after_ms: Option<u64>,
    pub headers: Vec<(String, String)>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: DEFAULT_QUERY.to_string(),
            limit: DEFAULT_LIMIT,
            offset: None,
            query_id: None,
            timeout_seconds: None,
            cancel_after_ms: None,
            headers: Vec::new(),
        }
    }
}

impl ProbeSettings {
    /// Overlays values present in the file; absent keys keep the current value.
    pub fn apply_file(mut self, file: &TomlConfig) -> Self {
        if let Some(target) = &file.target {
            if let Some(endpoint) = &target.endpoint {
                self.endpoint = endpoint.clone();
            }
            if target.timeout_seconds.is_some() {
                self.timeout_seconds = target.timeout_seconds;
            }
            if let Some(headers) = &target.headers {
                // BTreeMap keeps file headers in a stable order
                self.headers
                    .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        if let Some(request) = &file.request {
            if let Some(query) = &request.query {
                self.query = query.clone();
            }
            if let Some(limit) = request.limit {
                self.limit = limit;
            }
            if request.offset.is_some() {
                self.offset = request.offset;
            }
            if request.query_id.is_some() {
                self.query_id = request.query_id.clone();
            }
            if request.cancel_after_ms.is_some() {
                self.cancel_after_ms = request.cancel_after_ms;
            }
        }

        self
    }
}

/// Endpoint used to cancel the running query: `<endpoint>/cancel`.
pub fn cancel_endpoint_for(endpoint: &str) -> String {
    format!("{}/cancel", endpoint.trim_end_matches('/'))
}

impl Validate for ProbeSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("target.endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("request.query", &self.query)?;
        validation::validate_positive_number("request.limit", self.limit, 1)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("target.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        if let Some(delay) = self.cancel_after_ms {
            validation::validate_positive_number("request.cancel_after_ms", delay, 1)?;
        }

        for (name, _) in &self.headers {
            validation::validate_non_empty_string("target.headers", name)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ProbeSettings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_request(&self) -> QueryRequest {
        QueryRequest {
            query: self.query.clone(),
            limit: self.limit,
            offset: self.offset,
            query_id: self.query_id.clone(),
        }
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    fn cancel_after(&self) -> Option<Duration> {
        self.cancel_after_ms.map(Duration::from_millis)
    }
}
