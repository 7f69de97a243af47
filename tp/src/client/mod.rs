//! Scoring service client
//!
//! The [`ScoringClient`] trait is the network seam: the dispatcher and the
//! panel only ever talk to it, and [`HttpScoringClient`] is the reqwest-backed
//! implementation used at runtime.

use std::sync::Arc;

use tracing::debug;

mod error;
mod http;
pub mod traits;
mod types;

pub use error::ClientError;
pub use http::{ANALYZE_PATH, HttpScoringClient, SUGGEST_PATH};
pub use traits::ScoringClient;
pub use types::{AnalysisRequest, AnalysisResponse, ErrorBody, ErrorDetail, SuggestResponse, Suggestion};

use crate::config::ScoringConfig;

/// Create the scoring client described by the config
pub fn create_client(config: &ScoringConfig) -> Result<Arc<dyn ScoringClient>, ClientError> {
    debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "create_client: called");
    Ok(Arc::new(HttpScoringClient::from_config(config)?))
}
