//! Scoring client error types

use thiserror::Error;

use super::ErrorDetail;

/// Errors from a single scoring service call
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status
    #[error("Scoring service returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Http {
        status: u16,
        message: Option<String>,
        details: Vec<ErrorDetail>,
    },

    /// No response was obtained
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status came back with a body that does not match the contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request itself could not be encoded
    #[error("JSON serialization error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Check if the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// HTTP status, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error text with per-task details appended
    pub fn server_message(&self) -> Option<String> {
        let ClientError::Http { message, details, .. } = self else {
            return None;
        };
        let message = message.as_ref().filter(|m| !m.trim().is_empty())?;

        if details.is_empty() {
            return Some(message.clone());
        }

        let detail_lines: Vec<String> = details.iter().map(|d| d.to_string()).collect();
        Some(format!("{} ({})", message, detail_lines.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(message: Option<&str>, details: Vec<ErrorDetail>) -> ClientError {
        ClientError::Http {
            status: 400,
            message: message.map(String::from),
            details,
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(http(None, vec![]).status(), Some(400));
        assert_eq!(ClientError::InvalidResponse("x".to_string()).status(), None);
    }

    #[test]
    fn test_is_transport() {
        assert!(!http(None, vec![]).is_transport());
        assert!(!ClientError::InvalidResponse("bad".to_string()).is_transport());
    }

    #[test]
    fn test_server_message_plain() {
        assert_eq!(
            http(Some("Invalid JSON body"), vec![]).server_message().as_deref(),
            Some("Invalid JSON body")
        );
    }

    #[test]
    fn test_server_message_with_details() {
        let details = vec![ErrorDetail {
            index: Some(0),
            errors: vec!["title is required".to_string(), "importance is required (1-10)".to_string()],
        }];
        assert_eq!(
            http(Some("Validation failed"), details).server_message().as_deref(),
            Some("Validation failed (task 1: title is required, importance is required (1-10))")
        );
    }

    #[test]
    fn test_server_message_absent_or_blank() {
        assert_eq!(http(None, vec![]).server_message(), None);
        assert_eq!(http(Some("  "), vec![]).server_message(), None);
        assert_eq!(ClientError::InvalidResponse("x".to_string()).server_message(), None);
    }

    #[test]
    fn test_display() {
        let err = http(None, vec![]);
        assert_eq!(err.to_string(), "Scoring service returned 400: no error message");
    }
}
