//! TUI Runner - main loop that owns the terminal and the dispatcher
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App for handling
//! - Starting analyses the App leaves in `pending_action`
//! - Applying analysis completions as they arrive

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views;
use crate::client::ScoringClient;
use crate::dispatcher::{ANALYZING_STATUS, Completion, DispatchOutcome, Dispatcher};
use crate::domain::Strategy;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Owns the in-flight guard
    dispatcher: Dispatcher,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, client: Arc<dyn ScoringClient>, strategy: Strategy, tick_rate: Duration) -> Self {
        debug!(%strategy, ?tick_rate, "TuiRunner::new: called");
        let (completion_tx, completion_rx) = mpsc::channel(4);
        Self {
            app: App::new(strategy),
            terminal,
            event_handler: EventHandler::new(tick_rate),
            dispatcher: Dispatcher::new(client),
            completion_tx,
            completion_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => self.app.state_mut().tick(),
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
            }

            if let Some(action) = self.app.state_mut().pending_action.take() {
                self.execute_action(action);
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        Ok(())
    }

    fn execute_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Analyze => self.start_analysis(),
        }
    }

    /// Claim the in-flight slot and spawn the request
    fn start_analysis(&mut self) {
        let state = self.app.state_mut();
        let strategy = state.strategy.name().to_string();

        let prepared = match self.dispatcher.begin(&state.collection, &strategy) {
            Ok(prepared) => prepared,
            Err(e) => {
                debug!(error = %e, "start_analysis: not started");
                state.apply_outcome(DispatchOutcome::rejected(&e));
                return;
            }
        };

        state.status = ANALYZING_STATUS.to_string();
        state.busy = true;

        let client = self.dispatcher.client();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = Dispatcher::send(client, prepared).await;
            if tx.send(completion).await.is_err() {
                warn!("start_analysis: runner gone, dropping completion");
            }
        });
    }

    fn handle_completion(&mut self, completion: Completion) {
        let state = self.app.state_mut();
        if let Some(outcome) = self.dispatcher.finish(completion) {
            state.apply_outcome(outcome);
        }
        state.busy = self.dispatcher.is_busy();
    }
}
