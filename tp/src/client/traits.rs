//! ScoringClient trait definition

use async_trait::async_trait;
use serde_json::Value;

use super::{AnalysisRequest, AnalysisResponse, ClientError, SuggestResponse};

/// Client for the remote scoring service
///
/// Each call is a single best-effort attempt. Implementations never retry;
/// deciding what to do with a failure belongs to the caller.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Score a task list under the named strategy
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ClientError>;

    /// Ask for the service's top suggestions for a task list
    async fn suggest(&self, strategy: &str, tasks: &[Value]) -> Result<SuggestResponse, ClientError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock scoring client for unit tests
    ///
    /// Hands out queued results in order and records every request it sees.
    pub struct MockScoringClient {
        results: Mutex<VecDeque<Result<AnalysisResponse, ClientError>>>,
        requests: Mutex<Vec<AnalysisRequest>>,
        call_count: AtomicUsize,
    }

    impl MockScoringClient {
        pub fn new(results: Vec<Result<AnalysisResponse, ClientError>>) -> Self {
            debug!(result_count = %results.len(), "MockScoringClient::new: called");
            Self {
                results: Mutex::new(results.into()),
                requests: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<AnalysisRequest> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ScoringClient for MockScoringClient {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ClientError> {
            debug!(strategy = %request.strategy, "MockScoringClient::analyze: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            self.results
                .lock()
                .ok()
                .and_then(|mut results| results.pop_front())
                .unwrap_or_else(|| Err(ClientError::InvalidResponse("No more mock responses".to_string())))
        }

        async fn suggest(&self, strategy: &str, tasks: &[Value]) -> Result<SuggestResponse, ClientError> {
            debug!(%strategy, task_count = tasks.len(), "MockScoringClient::suggest: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(SuggestResponse {
                strategy: Some(strategy.to_string()),
                ..Default::default()
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::ScoredTask;

        fn request() -> AnalysisRequest {
            AnalysisRequest {
                strategy: "smart_balance".to_string(),
                tasks: vec![],
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_results_in_order() {
            let client = MockScoringClient::new(vec![
                Ok(AnalysisResponse {
                    tasks: Some(vec![ScoredTask::default()]),
                }),
                Ok(AnalysisResponse { tasks: Some(vec![]) }),
            ]);

            let first = client.analyze(&request()).await.unwrap();
            assert_eq!(first.task_count(), 1);

            let second = client.analyze(&request()).await.unwrap();
            assert_eq!(second.task_count(), 0);

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockScoringClient::new(vec![]);
            assert!(client.analyze(&request()).await.is_err());
        }
    }
}
