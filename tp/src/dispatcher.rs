//! Analysis dispatch
//!
//! The dispatcher owns the in-flight state of the single outstanding analysis.
//! A request runs in three steps so the panel can keep handling keys while it
//! is outstanding:
//!
//! 1. [`Dispatcher::begin`] parses the collection and claims a [`RequestToken`]
//! 2. [`Dispatcher::send`] performs the call (spawnable, holds no borrow)
//! 3. [`Dispatcher::finish`] applies the [`Completion`] if its token is current
//!
//! A second `begin` while a token is outstanding is refused.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{AnalysisRequest, AnalysisResponse, ClientError, ScoringClient, SuggestResponse};
use crate::collection::{ParseError, TaskCollection};
use crate::notice::Notice;
use crate::render::{Results, render};

/// Status while a request is outstanding
pub const ANALYZING_STATUS: &str = "Analyzing...";

/// Status after the service rejected a request
pub const HTTP_FAILURE_STATUS: &str = "Error analyzing tasks.";

/// Status after the service could not be reached
pub const TRANSPORT_FAILURE_STATUS: &str = "Error contacting server.";

/// Status after the collection text failed to parse
pub const PARSE_FAILURE_STATUS: &str = "Invalid task list.";

/// Notice text when a submission is refused because one is outstanding
pub const BUSY_MESSAGE: &str = "Analysis already in progress";

/// Identifier of an outstanding analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(Uuid);

impl RequestToken {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an analysis could not be started or completed
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Analysis already in progress")]
    Busy,

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<&DispatchError> for Notice {
    fn from(err: &DispatchError) -> Self {
        match err {
            DispatchError::Parse(e) => e.into(),
            DispatchError::Busy => Notice::info(BUSY_MESSAGE),
            DispatchError::Client(e) => e.into(),
        }
    }
}

/// A claimed request, ready to send
#[derive(Debug, Clone)]
pub struct PreparedAnalysis {
    pub token: RequestToken,
    pub request: AnalysisRequest,
}

/// Result of a sent request, tagged with the token it was claimed under
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub strategy: String,
    pub result: Result<AnalysisResponse, ClientError>,
}

/// What the user should see after a dispatch step
///
/// `None` fields leave the corresponding display untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: Option<String>,
    pub notice: Option<Notice>,
    pub results: Option<Results>,
}

impl DispatchOutcome {
    /// Outcome for a submission that never reached the network
    pub fn rejected(err: &DispatchError) -> Self {
        let status = match err {
            DispatchError::Parse(_) => Some(PARSE_FAILURE_STATUS.to_string()),
            DispatchError::Busy => None,
            DispatchError::Client(e) => Some(failure_status(e).to_string()),
        };
        Self {
            status,
            notice: Some(err.into()),
            results: None,
        }
    }
}

fn failure_status(err: &ClientError) -> &'static str {
    if err.is_transport() {
        TRANSPORT_FAILURE_STATUS
    } else {
        HTTP_FAILURE_STATUS
    }
}

/// Orchestrates analysis requests against a scoring client
pub struct Dispatcher {
    client: Arc<dyn ScoringClient>,
    in_flight: Option<RequestToken>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ScoringClient>) -> Self {
        debug!("Dispatcher::new: called");
        Self { client, in_flight: None }
    }

    /// Shared handle to the client, for spawned sends
    pub fn client(&self) -> Arc<dyn ScoringClient> {
        Arc::clone(&self.client)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Parse the collection and claim the in-flight slot
    ///
    /// Fails without touching the network when the collection does not parse
    /// or another analysis is outstanding.
    pub fn begin(&mut self, collection: &TaskCollection, strategy: &str) -> Result<PreparedAnalysis, DispatchError> {
        debug!(%strategy, "begin: called");

        if let Some(token) = self.in_flight {
            info!(%token, "begin: analysis already in flight, rejecting");
            return Err(DispatchError::Busy);
        }

        let tasks = collection.parse().inspect_err(|e| {
            debug!(error = %e, "begin: collection did not parse");
        })?;

        let token = RequestToken::new();
        self.in_flight = Some(token);
        debug!(%token, task_count = tasks.len(), "begin: claimed request token");

        Ok(PreparedAnalysis {
            token,
            request: AnalysisRequest {
                strategy: strategy.to_string(),
                tasks,
            },
        })
    }

    /// Perform the call for a prepared analysis
    pub async fn send(client: Arc<dyn ScoringClient>, prepared: PreparedAnalysis) -> Completion {
        debug!(token = %prepared.token, "send: called");
        let result = client.analyze(&prepared.request).await;
        Completion {
            token: prepared.token,
            strategy: prepared.request.strategy,
            result,
        }
    }

    /// Apply a completion
    ///
    /// Returns None for a completion whose token is not the outstanding one.
    pub fn finish(&mut self, completion: Completion) -> Option<DispatchOutcome> {
        let Completion { token, strategy, result } = completion;
        debug!(%token, "finish: called");

        if self.in_flight != Some(token) {
            warn!(%token, current = ?self.in_flight, "finish: dropping stale completion");
            return None;
        }
        self.in_flight = None;

        let outcome = match result {
            Ok(response) => {
                let count = response.task_count();
                info!(count, %strategy, "finish: analysis succeeded");
                DispatchOutcome {
                    status: Some(format!("Analyzed {} task(s) with \"{}\" strategy.", count, strategy)),
                    notice: None,
                    results: Some(render(response.tasks.as_deref())),
                }
            }
            Err(e) => {
                if e.is_transport() {
                    warn!(error = %e, "finish: could not reach scoring service");
                } else {
                    warn!(error = %e, status = ?e.status(), "finish: scoring service returned an error");
                }
                DispatchOutcome::rejected(&DispatchError::Client(e))
            }
        };

        Some(outcome)
    }

    /// Run one analysis to completion
    pub async fn analyze(&mut self, collection: &TaskCollection, strategy: &str) -> DispatchOutcome {
        debug!(%strategy, "analyze: called");
        let prepared = match self.begin(collection, strategy) {
            Ok(prepared) => prepared,
            Err(e) => return DispatchOutcome::rejected(&e),
        };

        let completion = Self::send(self.client(), prepared).await;
        self.finish(completion).unwrap_or_default()
    }
}

/// Ask the service for its top suggestions
///
/// Parses the collection strictly; a parse failure makes no request.
pub async fn suggest(
    client: &dyn ScoringClient,
    collection: &TaskCollection,
    strategy: &str,
) -> Result<SuggestResponse, DispatchError> {
    debug!(%strategy, "suggest: called");
    let tasks = collection.parse()?;
    Ok(client.suggest(strategy, &tasks).await?)
}
