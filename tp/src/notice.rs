//! User-visible notifications
//!
//! Every failure the panel reports goes through a [`Notice`]. The kind keeps
//! validation, parse, HTTP and transport failures distinguishable no matter
//! where the notice is shown.

use crate::client::ClientError;
use crate::collection::ParseError;
use crate::normalizer::{NormalizeError, ValidationError};

/// Generic message when the service rejects a request without saying why
pub const HTTP_FALLBACK_MESSAGE: &str = "Failed to analyze tasks.";

/// Generic message when the service cannot be reached
pub const TRANSPORT_MESSAGE: &str = "Error contacting server. Check the log for details.";

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational, not an error
    Info,
    /// Task form is missing required input
    Validation,
    /// Task list text is not a JSON array
    Parse,
    /// Scoring service answered with a failure
    Http,
    /// Scoring service could not be reached
    Transport,
}

impl NoticeKind {
    /// Title used by dialogs and CLI prefixes
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Notice",
            Self::Validation => "Invalid Task",
            Self::Parse => "Invalid Task List",
            Self::Http => "Scoring Service Error",
            Self::Transport => "Connection Error",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Info)
    }
}

/// A message to surface to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.title(), self.message)
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        Self::new(NoticeKind::Validation, err.to_string())
    }
}

impl From<&NormalizeError> for Notice {
    fn from(err: &NormalizeError) -> Self {
        match err {
            NormalizeError::Invalid(e) => e.into(),
            NormalizeError::Encode(_) => Self::new(NoticeKind::Validation, err.to_string()),
        }
    }
}

impl From<&ParseError> for Notice {
    fn from(err: &ParseError) -> Self {
        Self::new(NoticeKind::Parse, err.to_string())
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) => Self::new(NoticeKind::Transport, TRANSPORT_MESSAGE),
            ClientError::Http { .. } => Self::new(
                NoticeKind::Http,
                err.server_message().unwrap_or_else(|| HTTP_FALLBACK_MESSAGE.to_string()),
            ),
            ClientError::InvalidResponse(detail) => Self::new(
                NoticeKind::Http,
                format!("Unexpected response from scoring service: {}", detail),
            ),
            ClientError::Encode(e) => Self::new(NoticeKind::Parse, format!("Could not encode task list: {}", e)),
        }
    }
}
