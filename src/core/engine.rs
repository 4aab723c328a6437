use crate::core::report::{render_failure, render_report, OutputFormat};
use crate::core::{Probe, ProbeReport};
use crate::utils::error::ProbeError;

#[derive(Debug)]
pub enum ProbeOutcome {
    Completed { report: ProbeReport, output: String },
    Failed { error: ProbeError, output: String },
}

impl ProbeOutcome {
    /// What gets printed on stdout.
    pub fn output(&self) -> &str {
        match self {
            ProbeOutcome::Completed { output, .. } | ProbeOutcome::Failed { output, .. } => output,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeOutcome::Failed { .. })
    }

    pub fn report(&self) -> Option<&ProbeReport> {
        match self {
            ProbeOutcome::Completed { report, .. } => Some(report),
            ProbeOutcome::Failed { .. } => None,
        }
    }
}

/// Runs a probe and turns every error into printable output.
pub struct ProbeEngine<P: Probe> {
    probe: P,
    format: OutputFormat,
}

impl<P: Probe> ProbeEngine<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub async fn run(&self) -> ProbeOutcome {
        tracing::info!("Probing {}", self.probe.endpoint());

        match self.probe.probe().await {
            Ok(report) => {
                tracing::info!(
                    "Status {} - headers {:.2}s, first chunk {}, total {:.2}s, {} bytes",
                    report.status,
                    report.header_latency.as_secs_f64(),
                    report
                        .first_chunk_latency
                        .map(|d| format!("{:.2}s", d.as_secs_f64()))
                        .unwrap_or_else(|| "n/a".to_string()),
                    report.total_latency.as_secs_f64(),
                    report.body_bytes
                );

                match report.header("transfer-encoding") {
                    Some(encoding) if encoding.eq_ignore_ascii_case("chunked") => {
                        tracing::info!("Response body was streamed (chunked transfer encoding)")
                    }
                    _ => tracing::info!(
                        "Response body was not chunked (content-length {})",
                        report.header("content-length").unwrap_or("unknown")
                    ),
                }

                if let Some(summary) = &report.summary {
                    match &summary.error {
                        Some(error) => tracing::warn!("Server reported an error: {}", error),
                        None => tracing::info!(
                            "Result: {} rows, {} columns, total rows {}",
                            summary.rows,
                            summary.columns,
                            summary
                                .total_rows
                                .map(|n| n.to_string())
                                .unwrap_or_else(|| "unknown".to_string())
                        ),
                    }
                }

                match render_report(&report, self.format) {
                    Ok(output) => ProbeOutcome::Completed { report, output },
                    Err(error) => self.failed(error),
                }
            }
            Err(error) => self.failed(error),
        }
    }

    fn failed(&self, error: ProbeError) -> ProbeOutcome {
        tracing::error!("Probe failed: {} (Category: {:?})", error, error.category());
        let output = render_failure(&error, self.format);
        ProbeOutcome::Failed { error, output }
    }
}
