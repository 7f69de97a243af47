//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering or networking: analysis requests are left in
//! `pending_action` for the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, InteractionMode, Pane, PendingAction};
use crate::domain::Strategy;
use crate::normalizer::{self, FormField};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(strategy: Strategy) -> Self {
        Self {
            state: AppState::new(strategy),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true; // Force quit
        }

        // Any key dismisses an open notice
        if self.state.notice.is_some() {
            self.state.clear_notice();
            return false;
        }

        match self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Editing => self.handle_editing_key(key),
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            // === Quit ===
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }

            // === Help ===
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Pane focus ===
            KeyCode::Tab => {
                self.state.pane = self.state.pane.next();
            }
            KeyCode::BackTab => {
                self.state.pane = self.state.pane.prev();
            }

            // === Start editing ===
            KeyCode::Enter | KeyCode::Char('i') if self.state.pane.is_editable() => {
                self.state.interaction_mode = InteractionMode::Editing;
            }

            // === Navigation ===
            KeyCode::Down | KeyCode::Char('j') => match self.state.pane {
                Pane::Form => self.state.focused_field = self.state.focused_field.next(),
                Pane::Results => self.state.scroll_results_down(),
                Pane::Collection => {}
            },
            KeyCode::Up | KeyCode::Char('k') => match self.state.pane {
                Pane::Form => self.state.focused_field = self.state.focused_field.prev(),
                Pane::Results => self.state.scroll_results_up(),
                Pane::Collection => {}
            },

            // === Actions ===
            KeyCode::Char('a') => {
                self.submit_form();
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                debug!("handle_normal_key: analyze requested");
                self.state.pending_action = Some(PendingAction::Analyze);
            }
            KeyCode::Char('s') => {
                self.state.strategy = self.state.strategy.next();
                debug!(strategy = %self.state.strategy, "handle_normal_key: strategy cycled");
            }

            _ => {}
        }

        false
    }

    /// Handle key while typing into a pane
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            self.state.interaction_mode = InteractionMode::Normal;
            return false;
        }

        match self.state.pane {
            Pane::Form => self.handle_form_key(key),
            Pane::Collection => self.handle_collection_key(key),
            Pane::Results => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
        }

        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.submit_form();
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.focused_field = self.state.focused_field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focused_field = self.state.focused_field.prev();
            }
            KeyCode::Backspace => {
                let field = self.state.focused_field;
                self.state.form.field_mut(field).pop();
            }
            KeyCode::Char(c) => {
                let field = self.state.focused_field;
                self.state.form.field_mut(field).push(c);
            }
            _ => {}
        }
    }

    /// Edit the collection text at the cursor
    fn handle_collection_key(&mut self, key: KeyEvent) {
        let mut pos = self.state.collection_cursor();
        let text = self.state.collection.text_mut();
        match key.code {
            KeyCode::Enter => {
                text.insert(pos, '\n');
                pos += 1;
            }
            KeyCode::Tab => {
                text.insert_str(pos, "  ");
                pos += 2;
            }
            KeyCode::Backspace if pos > 0 => {
                let start = prev_char_boundary(text, pos);
                text.drain(start..pos);
                pos = start;
            }
            KeyCode::Delete if pos < text.len() => {
                let end = next_char_boundary(text, pos);
                text.drain(pos..end);
            }
            KeyCode::Left => pos = prev_char_boundary(text, pos),
            KeyCode::Right => pos = next_char_boundary(text, pos),
            KeyCode::Home => pos = line_start(text, pos),
            KeyCode::End => pos = line_end(text, pos),
            KeyCode::Up => pos = line_above(text, pos),
            KeyCode::Down => pos = line_below(text, pos),
            KeyCode::Char(c) => {
                text.insert(pos, c);
                pos += c.len_utf8();
            }
            _ => {}
        }
        self.state.collection_cursor = pos;
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            self.state.interaction_mode = InteractionMode::Normal;
        }
        false
    }

    /// Add the form contents to the collection
    fn submit_form(&mut self) {
        let state = &mut self.state;
        match normalizer::add_task(&mut state.form, &mut state.collection) {
            Ok(task) => {
                state.focused_field = FormField::Title;
                state.collection_cursor = state.collection.text().len();
                state.status = format!("Added \"{}\".", task.title);
            }
            Err(e) => {
                debug!(error = %e, "submit_form: rejected");
                state.set_notice(&e);
            }
        }
    }
}

/// Previous character boundary, or 0
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    let mut new_pos = pos.saturating_sub(1);
    while new_pos > 0 && !text.is_char_boundary(new_pos) {
        new_pos -= 1;
    }
    new_pos
}

/// Next character boundary, or the text length
fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut new_pos = pos + 1;
    while new_pos < text.len() && !text.is_char_boundary(new_pos) {
        new_pos += 1;
    }
    new_pos.min(text.len())
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len())
}

/// Offset `column` chars into the line starting at `start`, stopping at its end
fn column_offset(text: &str, start: usize, column: usize) -> usize {
    let end = line_end(text, start);
    text[start..end]
        .char_indices()
        .nth(column)
        .map(|(i, _)| start + i)
        .unwrap_or(end)
}

fn line_above(text: &str, pos: usize) -> usize {
    let start = line_start(text, pos);
    if start == 0 {
        return pos;
    }
    let column = text[start..pos].chars().count();
    column_offset(text, line_start(text, start - 1), column)
}

fn line_below(text: &str, pos: usize) -> usize {
    let end = line_end(text, pos);
    if end == text.len() {
        return pos;
    }
    let column = text[line_start(text, pos)..pos].chars().count();
    column_offset(text, end + 1, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{Notice, NoticeKind};

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::from(code))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_app_new() {
        let app = App::new(Strategy::new("deadline_driven"));
        assert_eq!(app.state().strategy.name(), "deadline_driven");
        assert_eq!(app.state().pane, Pane::Form);
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }

    #[test]
    fn test_app_quit_keys() {
        let mut app = App::default();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));

        let mut app = App::default();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_app_help_toggle() {
        let mut app = App::default();

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state().interaction_mode, InteractionMode::Help);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }

    #[test]
    fn test_form_entry_adds_task() {
        let mut app = App::default();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().interaction_mode, InteractionMode::Editing);

        type_text(&mut app, "Write report");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2024-01-01");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1, 2");
        press(&mut app, KeyCode::Enter);

        let state = app.state();
        assert_eq!(state.interaction_mode, InteractionMode::Normal);
        assert_eq!(state.form.title, "");
        assert_eq!(state.focused_field, FormField::Title);
        assert_eq!(state.collection.task_count(), Some(1));
        let items = state.collection.parse().unwrap();
        assert_eq!(items[0]["title"], "Write report");
        assert_eq!(items[0]["dependencies"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_invalid_form_shows_validation_notice() {
        let mut app = App::default();
        app.state_mut().form.title = "No date".to_string();

        press(&mut app, KeyCode::Char('a'));

        let notice = app.state().notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "Title and Due Date are required.");
        assert_eq!(app.state().form.title, "No date");
        assert!(app.state().collection.is_blank());
    }

    #[test]
    fn test_any_key_dismisses_notice() {
        let mut app = App::default();
        app.state_mut().set_notice(Notice::info("hello"));

        press(&mut app, KeyCode::Char('r'));

        assert!(app.state().notice.is_none());
        assert_eq!(app.state().pending_action, None);
    }

    #[test]
    fn test_analyze_key_sets_pending_action() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state().pending_action, Some(PendingAction::Analyze));
    }

    #[test]
    fn test_strategy_cycling() {
        let mut app = App::default();
        assert_eq!(app.state().strategy.name(), "smart_balance");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.state().strategy.name(), "fastest_wins");

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('s'));
        }
        assert_eq!(app.state().strategy.name(), "smart_balance");
    }

    #[test]
    fn test_collection_editing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state().pane, Pane::Collection);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "[]x");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state().collection.text(), "[]");
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }

    fn edit_collection(text: &str) -> App {
        let mut app = App::default();
        app.state_mut().collection.replace(text);
        app.state_mut().pane = Pane::Collection;
        app.state_mut().interaction_mode = InteractionMode::Editing;
        app
    }

    #[test]
    fn test_collection_typo_fixed_mid_text() {
        let mut app = edit_collection("[{\"title\": \"Rpeort\"}]");

        press(&mut app, KeyCode::End);
        for _ in 0.."eort\"}]".len() {
            press(&mut app, KeyCode::Left);
        }
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Left);
        type_text(&mut app, "e");

        assert_eq!(app.state().collection.text(), "[{\"title\": \"Report\"}]");
    }

    #[test]
    fn test_collection_line_navigation_keeps_column() {
        let mut app = edit_collection("[\n  1,\n  2\n]");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::End);
        assert_eq!(app.state().collection_cursor(), 6);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.state().collection_cursor(), 10);
        type_text(&mut app, "0");
        assert_eq!(app.state().collection.text(), "[\n  1,\n  20\n]");

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state().collection_cursor(), 0);
    }

    #[test]
    fn test_collection_edits_multibyte_text() {
        let mut app = edit_collection("é");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Left);
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.state().collection.text(), "x");
    }

    #[test]
    fn test_added_task_moves_cursor_to_end() {
        let mut app = App::default();
        app.state_mut().form.title = "A".to_string();
        app.state_mut().form.due_date = "2024-01-01".to_string();

        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.state().collection_cursor(), app.state().collection.text().len());
    }

    #[test]
    fn test_results_pane_is_not_editable() {
        let mut app = App::default();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state().pane, Pane::Results);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }
}
