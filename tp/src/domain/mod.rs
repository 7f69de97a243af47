//! Domain types for TaskPanel
//!
//! Task records as entered by the user, scored tasks as returned by the
//! scoring service, priority tiers and strategy names.

mod strategy;
mod task;
mod tier;

pub use strategy::{DEFAULT_STRATEGY, KNOWN_STRATEGIES, Strategy};
pub use task::{Explanations, ScoredTask, Task};
pub use tier::{HIGH_THRESHOLD, MEDIUM_THRESHOLD, Tier, classify};
