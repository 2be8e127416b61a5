//! HTTP report forwarding
//!
//! Posts the JSON-encoded [`SchemaReport`] to a collector endpoint. Uses
//! ureq (sync HTTP), so no async runtime is needed; the scorer runs it on
//! a background thread.

use crate::error::{ScoreError, ScoreResult};
use crate::models::SchemaReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Where and how to forward reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    pub endpoint: String,
    /// Extra request headers (e.g. `Authorization`)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl ReporterConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ScoreResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ScoreError::Config(format!(
                "reporter endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScoreError::Config(
                "reporter timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors from forwarding a report
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, DNS failure or timeout
    #[error("failed to send report: {0}")]
    Request(String),

    /// Collector answered with a non-success status
    #[error("failed to send report: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to encode report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sends reports to a single configured endpoint
pub struct ReportSender {
    config: ReporterConfig,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status is mapped to TransportError::Status below
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl ReportSender {
    pub fn new(config: ReporterConfig) -> Self {
        let agent = make_agent(config.timeout());
        Self { config, agent }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// POST the report; returns the response status on success
    pub fn send(&self, report: &SchemaReport) -> Result<u16, TransportError> {
        let body = serde_json::to_vec(report)?;
        debug!(
            "Sending {} byte report to {}",
            body.len(),
            self.config.endpoint
        );

        let mut request = self
            .agent
            .post(self.config.endpoint.as_str())
            .header("Content-Type", "application/json");
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send(&body[..])
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        info!("Report sent to {} ({})", self.config.endpoint, status.as_u16());
        Ok(status.as_u16())
    }
}
