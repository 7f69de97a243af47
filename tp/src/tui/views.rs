//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{AppState, InteractionMode, Pane};
use crate::domain::Tier;
use crate::normalizer::FormField;
use crate::notice::Notice;
use crate::render::{Card, PLACEHOLDER, Results};

/// Rows taken by one card, borders included
const CARD_HEIGHT: u16 = 6;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FormField::ALL.len() as u16 + 2), Constraint::Min(0)])
        .split(main[0]);

    render_form(state, frame, left[0]);
    render_collection(state, frame, left[1]);
    render_results(state, frame, main[1]);

    render_footer(state, frame, chunks[2]);

    if state.interaction_mode == InteractionMode::Help {
        render_help_overlay(frame, chunks[1]);
    }
    if let Some(notice) = &state.notice {
        render_notice(notice, frame, chunks[1]);
    }
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Red,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Green,
    }
}

fn pane_block(state: &AppState, pane: Pane, title: String) -> Block<'static> {
    let focused = state.pane == pane;
    let editing = focused && state.interaction_mode == InteractionMode::Editing;
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "TaskPanel ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            format!("{} ({})", state.strategy.label(), state.strategy.name()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" │ "),
    ];
    if state.busy {
        let frame_idx = (state.tick_count % SPINNER.len() as u64) as usize;
        spans.push(Span::styled(
            format!("{} ", SPINNER[frame_idx]),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::raw(state.status.as_str()));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(header, area);
}

fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    let editing = state.pane == Pane::Form && state.interaction_mode == InteractionMode::Editing;

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let selected = state.pane == Pane::Form && field == state.focused_field;
            let label_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let value = state.form.field(field);
            let mut spans = vec![Span::styled(format!("{:<16}", field.label()), label_style)];
            if value.is_empty() && !(editing && selected) {
                spans.push(Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(value.to_string()));
            }
            if editing && selected {
                spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();

    let form = Paragraph::new(lines).block(pane_block(state, Pane::Form, " New Task ".to_string()));
    frame.render_widget(form, area);
}

fn render_collection(state: &AppState, frame: &mut Frame, area: Rect) {
    let title = match state.collection.task_count() {
        Some(n) => format!(" Task List ({}) ", n),
        None => " Task List (invalid JSON) ".to_string(),
    };

    let editing = state.pane == Pane::Collection && state.interaction_mode == InteractionMode::Editing;
    let text = state.collection.text();
    let lines: Vec<Line> = if editing {
        collection_lines_with_cursor(text, state.collection_cursor())
    } else {
        text.split('\n').map(Line::raw).collect()
    };

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = collection_scroll(state.collection_cursor_line(), visible);

    let collection = Paragraph::new(lines)
        .block(pane_block(state, Pane::Collection, title))
        .scroll((scroll, 0));
    frame.render_widget(collection, area);
}

/// Lines of the collection with the character under the cursor highlighted
fn collection_lines_with_cursor(text: &str, cursor: usize) -> Vec<Line<'_>> {
    let cursor_style = Style::default().fg(Color::Black).bg(Color::Yellow);
    let mut offset = 0;
    text.split('\n')
        .map(|line| {
            let start = offset;
            offset += line.len() + 1;
            if cursor < start || cursor > start + line.len() {
                return Line::raw(line);
            }

            let (before, after) = line.split_at(cursor - start);
            let mut chars = after.chars();
            let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
            Line::from(vec![
                Span::raw(before),
                Span::styled(under, cursor_style),
                Span::raw(chars.as_str()),
            ])
        })
        .collect()
}

/// First visible line so the cursor line stays on screen
fn collection_scroll(cursor_line: usize, visible: usize) -> u16 {
    (cursor_line + 1).saturating_sub(visible.max(1)) as u16
}

fn render_results(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = pane_block(state, Pane::Results, " Results ".to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = match &state.results {
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Press r to analyze the task list.",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(hint, inner);
            return;
        }
        Some(Results::Placeholder) => {
            frame.render_widget(Paragraph::new(PLACEHOLDER), inner);
            return;
        }
        Some(Results::Cards(cards)) => cards,
    };

    let fit = (inner.height / CARD_HEIGHT).max(1) as usize;
    let shown: Vec<&Card> = cards.iter().skip(state.results_scroll).take(fit).collect();
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(shown.iter().map(|_| Constraint::Length(CARD_HEIGHT)).collect::<Vec<_>>())
        .split(inner);

    for (card, slot) in shown.iter().zip(slots.iter()) {
        render_card(card, frame, *slot);
    }
}

fn render_card(card: &Card, frame: &mut Frame, area: Rect) {
    let color = tier_color(card.tier);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", card.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title(Line::from(format!(" {} ", card.tier.style_class())).right_aligned());

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Due: ", bold),
            Span::raw(card.due_date.as_str()),
            Span::styled("  Importance: ", bold),
            Span::raw(card.importance.as_str()),
            Span::styled("  Hours: ", bold),
            Span::raw(card.estimated_hours.as_str()),
            Span::styled("  Score: ", bold),
            Span::styled(card.score.as_str(), Style::default().fg(color)),
        ]),
        Line::from(Span::styled(card.explanation.as_str(), Style::default().fg(Color::Gray))),
    ];
    if card.in_cycle {
        lines.push(Line::from(Span::styled(
            "circular dependency",
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_notice(notice: &Notice, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let color = if notice.kind.is_error() { Color::Red } else { Color::Cyan };
    let text = vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", notice.kind.title())),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<12}", k), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };
    let section = |name: &'static str| Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD)));

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        key("q, Ctrl+c", "Quit"),
        key("?, F1", "Toggle help"),
        key("Tab", "Next pane"),
        key("Shift+Tab", "Previous pane"),
        Line::from(""),
        section("Panes"),
        key("Enter, i", "Edit form or task list"),
        key("Esc", "Stop editing"),
        key("Arrows", "Move cursor in task list"),
        key("Home/End", "Line start / end"),
        key("j/k", "Select field / scroll cards"),
        Line::from(""),
        section("Actions"),
        key("a", "Add form task to the list"),
        key("r, F5", "Analyze the task list"),
        key("s", "Cycle strategy"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(help, popup_area);
}

/// Render the footer bar
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let spans = match state.interaction_mode {
        InteractionMode::Editing => vec![
            Span::styled(" Esc", key_style),
            Span::raw(" Done "),
            Span::styled(" Enter", key_style),
            Span::raw(if state.pane == Pane::Form { " Add task " } else { " Newline " }),
        ],
        _ => vec![
            Span::styled(" q", key_style),
            Span::raw(" Quit "),
            Span::styled(" ?", key_style),
            Span::raw(" Help "),
            Span::styled(" Tab", key_style),
            Span::raw(" Pane "),
            Span::styled(" a", key_style),
            Span::raw(" Add "),
            Span::styled(" r", key_style),
            Span::raw(" Analyze "),
            Span::styled(" s", key_style),
            Span::raw(" Strategy "),
        ],
    };

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
