//! HTTP scoring client
//!
//! Implements the ScoringClient trait over reqwest. One attempt per call, no
//! retries: failures are classified and handed back to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{AnalysisRequest, AnalysisResponse, ClientError, ErrorBody, ScoringClient, SuggestResponse};
use crate::config::ScoringConfig;

/// Path of the analyze endpoint, relative to the service base URL
pub const ANALYZE_PATH: &str = "/api/tasks/analyze/";

/// Path of the suggest endpoint, relative to the service base URL
pub const SUGGEST_PATH: &str = "/api/tasks/suggest/";

/// reqwest-backed scoring client
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl HttpScoringClient {
    /// Create a new client from the scoring configuration
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ClientError> {
        debug!(?config, "from_config: called");
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into the expected body or a classified error
    async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = ErrorBody::parse_lenient(&text);
            debug!(status = status.as_u16(), ?body, "read_body: error status");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: body.error,
                details: body.details,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body_len = text.len(), "read_body: success body does not match contract");
            ClientError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ClientError> {
        let url = self.endpoint(ANALYZE_PATH);
        debug!(%url, strategy = %request.strategy, task_count = request.tasks.len(), "analyze: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "analyze: request failed");
                ClientError::Transport(e)
            })?;

        Self::read_body(response).await
    }

    async fn suggest(&self, strategy: &str, tasks: &[Value]) -> Result<SuggestResponse, ClientError> {
        let url = self.endpoint(SUGGEST_PATH);
        debug!(%url, %strategy, task_count = tasks.len(), "suggest: called");
        let tasks_json = serde_json::to_string(tasks)?;

        let response = self
            .http
            .get(&url)
            .query(&[("strategy", strategy), ("tasks_json", tasks_json.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "suggest: request failed");
                ClientError::Transport(e)
            })?;

        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpScoringClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint(ANALYZE_PATH), "http://localhost:8000/api/tasks/analyze/");
    }

    #[test]
    fn test_from_config() {
        let config = ScoringConfig {
            base_url: "http://scoring.internal:9000".to_string(),
            timeout_ms: 1500,
        };
        let client = HttpScoringClient::from_config(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1500));
        assert_eq!(client.endpoint(SUGGEST_PATH), "http://scoring.internal:9000/api/tasks/suggest/");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = HttpScoringClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let request = AnalysisRequest {
            strategy: "smart_balance".to_string(),
            tasks: vec![],
        };

        let err = client.analyze(&request).await.unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {err:?}");
    }
}
