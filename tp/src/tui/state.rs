//! TUI application state
//!
//! Pure data structures for the panel. No rendering logic here.

use crate::collection::TaskCollection;
use crate::dispatcher::DispatchOutcome;
use crate::domain::Strategy;
use crate::normalizer::{FormField, TaskForm};
use crate::notice::Notice;
use crate::render::Results;

/// Status shown before anything has happened
pub const READY_STATUS: &str = "Ready";

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Task entry form
    #[default]
    Form,
    /// Editable collection text
    Collection,
    /// Rendered cards
    Results,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Self::Form => Self::Collection,
            Self::Collection => Self::Results,
            Self::Results => Self::Form,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Form => Self::Results,
            Self::Collection => Self::Form,
            Self::Results => Self::Collection,
        }
    }

    /// Whether the pane accepts text input
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Form | Self::Collection)
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Navigation keys
    #[default]
    Normal,
    /// Typing into the focused pane
    Editing,
    /// Help overlay
    Help,
}

/// Action pending execution by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Analyze,
}

/// Complete panel state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Task entry form
    pub form: TaskForm,
    /// Form field receiving input
    pub focused_field: FormField,
    /// Editable task collection
    pub collection: TaskCollection,
    /// Byte offset of the editing cursor in the collection text
    pub collection_cursor: usize,
    /// Strategy sent with the next analysis
    pub strategy: Strategy,
    /// Status indicator text
    pub status: String,
    /// Last rendered results; None until the first successful analysis
    pub results: Option<Results>,
    /// Notice awaiting dismissal
    pub notice: Option<Notice>,
    /// Focused pane
    pub pane: Pane,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Work for the runner
    pub pending_action: Option<PendingAction>,
    /// An analysis is outstanding
    pub busy: bool,
    /// First visible card
    pub results_scroll: usize,
    /// Ticks since start, drives the busy spinner
    pub tick_count: u64,
    /// Exit requested
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl AppState {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            form: TaskForm::default(),
            focused_field: FormField::Title,
            collection: TaskCollection::default(),
            collection_cursor: 0,
            strategy,
            status: READY_STATUS.to_string(),
            results: None,
            notice: None,
            pane: Pane::default(),
            interaction_mode: InteractionMode::default(),
            pending_action: None,
            busy: false,
            results_scroll: 0,
            tick_count: 0,
            should_quit: false,
        }
    }

    pub fn set_notice(&mut self, notice: impl Into<Notice>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Fold a dispatch outcome into the display
    ///
    /// New results replace the old ones wholesale.
    pub fn apply_outcome(&mut self, outcome: DispatchOutcome) {
        if let Some(status) = outcome.status {
            self.status = status;
        }
        if let Some(notice) = outcome.notice {
            self.notice = Some(notice);
        }
        if let Some(results) = outcome.results {
            self.results = Some(results);
            self.results_scroll = 0;
        }
    }

    /// Cursor clamped to the text and snapped back to a char boundary
    ///
    /// The text can be rewritten under the cursor when a task is appended.
    pub fn collection_cursor(&self) -> usize {
        let text = self.collection.text();
        let mut pos = self.collection_cursor.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    /// Zero-based line holding the collection cursor
    pub fn collection_cursor_line(&self) -> usize {
        let pos = self.collection_cursor();
        self.collection.text()[..pos].matches('\n').count()
    }

    pub fn card_count(&self) -> usize {
        self.results.as_ref().map(Results::card_count).unwrap_or(0)
    }

    pub fn scroll_results_down(&mut self) {
        if self.results_scroll + 1 < self.card_count() {
            self.results_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    /// Periodic update
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }
}
