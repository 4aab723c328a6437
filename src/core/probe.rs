use crate::config::settings::cancel_endpoint_for;
use crate::core::{ConfigProvider, Probe, ProbeReport, Result};
use crate::domain::model::{CancelRequest, QueryRequest, ResultSummary};
use crate::utils::error::ProbeError;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Posts the query once and times each stage of the streamed response.
pub struct HttpProbe<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> HttpProbe<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Cancellation addresses the query by id, so one is generated when missing.
    fn prepare_request(&self) -> QueryRequest {
        let mut payload = self.config.query_request();
        if self.config.cancel_after().is_some() && payload.query_id.is_none() {
            let query_id = format!("probe-{}", Utc::now().timestamp_millis());
            tracing::debug!("Generated query id {} for cancellation", query_id);
            payload.query_id = Some(query_id);
        }
        payload
    }

    fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ProbeError::InvalidHeaderError {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ProbeError::InvalidHeaderError {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.append(header_name, header_value);
        }
        Ok(headers)
    }

    fn spawn_cancel(&self, client: &Client, payload: &QueryRequest) -> Option<JoinHandle<()>> {
        let delay = self.config.cancel_after()?;
        let Some(query_id) = payload.query_id.clone() else {
            tracing::warn!("Cancellation requested without a query id, skipping");
            return None;
        };
        let client = client.clone();
        let url = cancel_endpoint_for(self.config.endpoint());

        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("Cancelling query {} via {}", query_id, url);
            match client.post(&url).json(&CancelRequest { query_id }).send().await {
                Ok(response) => tracing::info!("Cancel request answered with {}", response.status()),
                Err(e) => tracing::warn!("Cancel request failed: {}", e),
            }
        }))
    }

    async fn fetch(
        &self,
        client: &Client,
        payload: &QueryRequest,
        headers: HeaderMap,
    ) -> Result<ProbeReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut response = client
            .post(self.config.endpoint())
            .headers(headers)
            .json(payload)
            .send()
            .await?;
        let header_latency = start.elapsed();
        let status = response.status();
        tracing::debug!("Headers received after {:?} (status {})", header_latency, status);

        let response_headers = collect_headers(response.headers());

        let mut body = Vec::new();
        let mut first_chunk_latency: Option<Duration> = None;
        while let Some(chunk) = response.chunk().await? {
            if first_chunk_latency.is_none() {
                let elapsed = start.elapsed();
                tracing::debug!("First body chunk ({} bytes) after {:?}", chunk.len(), elapsed);
                first_chunk_latency = Some(elapsed);
            }
            body.extend_from_slice(&chunk);
        }
        let total_latency = start.elapsed();

        let text = String::from_utf8_lossy(&body).into_owned();
        let summary = ResultSummary::from_body(&text);

        Ok(ProbeReport {
            started_at,
            endpoint: self.config.endpoint().to_string(),
            status: status.as_u16(),
            headers: response_headers,
            header_latency,
            first_chunk_latency,
            total_latency,
            body_bytes: body.len(),
            body: text,
            summary,
        })
    }
}

#[async_trait]
impl<C: ConfigProvider> Probe for HttpProbe<C> {
    fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    async fn probe(&self) -> Result<ProbeReport> {
        let client = self.build_client()?;
        let payload = self.prepare_request();
        let headers = self.request_headers()?;
        tracing::debug!("POST {} with {:?}", self.config.endpoint(), payload);

        let cancel_task = self.spawn_cancel(&client, &payload);
        let result = self.fetch(&client, &payload, headers).await;
        if let Some(task) = cancel_task {
            task.abort();
        }

        result
    }
}

/// Header values that are not valid UTF-8 are rendered lossily.
pub fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ProbeSettings;

    #[test]
    fn test_collect_headers_keeps_duplicates_in_order() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));

        let collected = collect_headers(&headers);
        assert_eq!(collected.len(), 3);
        assert!(collected.contains(&("set-cookie".to_string(), "a=1".to_string())));
        assert!(collected.contains(&("set-cookie".to_string(), "b=2".to_string())));
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let settings = ProbeSettings {
            headers: vec![("bad header".to_string(), "x".to_string())],
            ..Default::default()
        };
        let probe = HttpProbe::new(settings);
        assert!(matches!(
            probe.request_headers(),
            Err(ProbeError::InvalidHeaderError { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_cancel_task_without_delay() {
        let probe = HttpProbe::new(ProbeSettings::default());
        let client = probe.build_client().unwrap();
        let payload = probe.prepare_request();
        assert!(payload.query_id.is_none());
        assert!(probe.spawn_cancel(&client, &payload).is_none());
    }

    #[test]
    fn test_query_id_generated_for_cancellation() {
        let probe = HttpProbe::new(ProbeSettings {
            cancel_after_ms: Some(500),
            ..Default::default()
        });
        let payload = probe.prepare_request();
        assert!(payload.query_id.unwrap().starts_with("probe-"));

        let explicit = HttpProbe::new(ProbeSettings {
            cancel_after_ms: Some(500),
            query_id: Some("mine".to_string()),
            ..Default::default()
        });
        assert_eq!(explicit.prepare_request().query_id.as_deref(), Some("mine"));
    }
}
