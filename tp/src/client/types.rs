//! Wire types for the scoring service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ScoredTask;

/// Body of `POST /api/tasks/analyze/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub strategy: String,
    pub tasks: Vec<Value>,
}

/// Success body of the analyze endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub tasks: Option<Vec<ScoredTask>>,
}

impl AnalysisResponse {
    pub fn task_count(&self) -> usize {
        self.tasks.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Failure body, read tolerantly: anything unparseable becomes the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub details: Vec<ErrorDetail>,
}

impl ErrorBody {
    pub fn parse_lenient(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

/// Per-task validation failure reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub index: Option<usize>,
    pub errors: Vec<String>,
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(idx) => write!(f, "task {}: {}", idx + 1, self.errors.join(", ")),
            None => write!(f, "{}", self.errors.join(", ")),
        }
    }
}

/// Success body of `GET /api/tasks/suggest/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestResponse {
    pub today: Option<NaiveDate>,
    pub strategy: Option<String>,
    pub suggestions: Vec<Suggestion>,
}

/// One of the service's top picks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub score: Option<f64>,
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = AnalysisRequest {
            strategy: "eisenhower".to_string(),
            tasks: vec![],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"strategy": "eisenhower", "tasks": []})
        );
    }

    #[test]
    fn test_response_without_tasks() {
        let response: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.tasks, None);
        assert_eq!(response.task_count(), 0);
    }

    #[test]
    fn test_error_body_lenient() {
        assert_eq!(ErrorBody::parse_lenient(""), ErrorBody::default());
        assert_eq!(ErrorBody::parse_lenient("<html>502</html>"), ErrorBody::default());
        assert_eq!(
            ErrorBody::parse_lenient(r#"{"error": "Only POST allowed"}"#).error.as_deref(),
            Some("Only POST allowed")
        );
    }

    #[test]
    fn test_error_body_with_details() {
        let body = ErrorBody::parse_lenient(
            r#"{"error": "Validation failed", "details": [{"index": 1, "errors": ["due_date is required (YYYY-MM-DD)"]}]}"#,
        );
        assert_eq!(body.details.len(), 1);
        assert_eq!(body.details[0].to_string(), "task 2: due_date is required (YYYY-MM-DD)");
    }

    #[test]
    fn test_suggest_response() {
        let json = r#"{
            "today": "2024-03-01",
            "strategy": "smart_balance",
            "suggestions": [
                {"title": "A", "due_date": "2024-03-02", "score": 120.5, "explanation": "Urgency: x | Importance: y | Effort: z | Dependencies: w"}
            ]
        }"#;
        let response: SuggestResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.today, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].score, Some(120.5));
    }
}
