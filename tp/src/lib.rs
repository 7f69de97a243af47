//! TaskPanel - terminal client for a task scoring service
//!
//! TaskPanel lets a user author a list of work items, submit them to a remote
//! scoring service under a named prioritization strategy, and browse the
//! results as ranked, explained cards.
//!
//! # Core Concepts
//!
//! - **Editable Collection**: Tasks live in a single re-parseable JSON text blob
//!   that the user can edit directly or grow through the task form
//! - **Server-side Scoring**: Scores are never computed locally; the panel only
//!   forwards the strategy name and renders what comes back
//! - **Tiers**: Every returned score maps to low, medium or high
//! - **One Request at a Time**: A second analysis is refused while one is in flight
//!
//! # Modules
//!
//! - [`domain`] - Task records, scored tasks, tiers and strategies
//! - [`collection`] - The editable task collection
//! - [`normalizer`] - Form input to task record conversion
//! - [`client`] - Scoring service client trait and HTTP implementation
//! - [`dispatcher`] - Analysis request orchestration and failure handling
//! - [`render`] - Scored task to card rendering
//! - [`tui`] - Interactive terminal panel

pub mod cli;
pub mod client;
pub mod collection;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod normalizer;
pub mod notice;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use client::{
    AnalysisRequest, AnalysisResponse, ClientError, HttpScoringClient, ScoringClient, SuggestResponse, Suggestion,
};
pub use collection::{ParseError, TaskCollection};
pub use config::{Config, PanelConfig, ScoringConfig};
pub use dispatcher::{Completion, DispatchError, DispatchOutcome, Dispatcher, PreparedAnalysis, RequestToken};
pub use domain::{Explanations, ScoredTask, Strategy, Task, Tier, classify};
pub use normalizer::{FormField, NormalizeError, TaskForm, ValidationError, add_task, build_task};
pub use notice::{Notice, NoticeKind};
pub use render::{Card, Results, render};
