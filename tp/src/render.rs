//! Scored task rendering
//!
//! [`render`] turns a service response into a display model. Presenters (the
//! terminal panel and `tp analyze`) only draw what the model holds, so each
//! call fully replaces whatever was shown before.

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Explanations, ScoredTask, Tier, classify};

/// Shown instead of cards when the service returned no tasks
pub const PLACEHOLDER: &str = "No tasks returned.";

/// Card title when a task has none
pub const UNTITLED: &str = "Untitled Task";

/// Due date text when a task has none
pub const NO_DUE_DATE: &str = "N/A";

const EXPLANATION_SEPARATOR: &str = " | ";

/// One rendered task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    pub score: String,
    pub explanation: String,
    pub tier: Tier,
    pub in_cycle: bool,
}

/// Display model for the results area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results {
    Placeholder,
    Cards(Vec<Card>),
}

impl Results {
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Placeholder => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn card_count(&self) -> usize {
        self.cards().len()
    }
}

/// Build the display model for a response's task list
pub fn render(tasks: Option<&[ScoredTask]>) -> Results {
    match tasks {
        None | Some([]) => Results::Placeholder,
        Some(tasks) => Results::Cards(tasks.iter().map(card).collect()),
    }
}

/// Build one card
///
/// The tier falls back to `classify(0)` when the score is missing, while the
/// displayed score stays empty.
pub fn card(task: &ScoredTask) -> Card {
    Card {
        title: task
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        due_date: task
            .due_date
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DUE_DATE.to_string()),
        importance: value_text(task.importance.as_ref()),
        estimated_hours: value_text(task.estimated_hours.as_ref()),
        score: task.score.map(|s| s.to_string()).unwrap_or_default(),
        explanation: explanation_line(task.explanations.as_ref()),
        tier: classify(task.score.unwrap_or(0.0)),
        in_cycle: task.in_cycle,
    }
}

/// `Urgency: u | Importance: i | Effort: e | Dependencies: d`
pub fn explanation_line(explanations: Option<&Explanations>) -> String {
    let empty = Explanations::default();
    let e = explanations.unwrap_or(&empty);
    let text = |part: &Option<String>| part.clone().unwrap_or_default();

    [
        format!("Urgency: {}", text(&e.urgency)),
        format!("Importance: {}", text(&e.importance)),
        format!("Effort: {}", text(&e.effort)),
        format!("Dependencies: {}", text(&e.dependencies)),
    ]
    .join(EXPLANATION_SEPARATOR)
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Plain terminal presentation used by `tp analyze`
pub fn present_plain(results: &Results) -> String {
    let cards = match results {
        Results::Placeholder => return PLACEHOLDER.dimmed().to_string(),
        Results::Cards(cards) => cards,
    };

    let mut out = String::new();
    for (idx, card) in cards.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let badge = format!("[{}]", card.tier);
        let badge = match card.tier {
            Tier::High => badge.red().bold(),
            Tier::Medium => badge.yellow().bold(),
            Tier::Low => badge.green(),
        };
        out.push_str(&format!("{} {}\n", badge, card.title.bold()));
        out.push_str(&format!(
            "  Due: {}  Importance: {}  Hours: {}  Score: {}\n",
            card.due_date, card.importance, card.estimated_hours, card.score
        ));
        out.push_str(&format!("  {}\n", card.explanation.dimmed()));
        if card.in_cycle {
            out.push_str(&format!("  {}\n", "circular dependency".red()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_or_empty_is_placeholder() {
        assert_eq!(render(None), Results::Placeholder);
        assert_eq!(render(Some(&[])), Results::Placeholder);
        assert_eq!(render(None).card_count(), 0);
    }

    #[test]
    fn test_high_score_card_with_partial_explanations() {
        let task = ScoredTask {
            title: Some("Ship release".to_string()),
            due_date: Some("2024-05-01".to_string()),
            importance: Some(json!(9)),
            estimated_hours: Some(json!(0.5)),
            score: Some(150.0),
            explanations: Some(Explanations {
                urgency: Some("Overdue: +100".to_string()),
                effort: Some("Quick win: +10".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let results = render(Some(&[task]));
        assert_eq!(results.card_count(), 1);

        let card = &results.cards()[0];
        assert_eq!(card.tier, Tier::High);
        assert_eq!(card.score, "150");
        assert_eq!(card.importance, "9");
        assert_eq!(card.estimated_hours, "0.5");
        assert_eq!(
            card.explanation,
            "Urgency: Overdue: +100 | Importance:  | Effort: Quick win: +10 | Dependencies: "
        );
    }

    #[test]
    fn test_fallbacks_for_missing_fields() {
        let card = card(&ScoredTask::default());

        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.due_date, NO_DUE_DATE);
        assert_eq!(card.importance, "");
        assert_eq!(card.estimated_hours, "");
        assert_eq!(card.score, "");
        assert_eq!(card.tier, Tier::Low);
        assert_eq!(card.explanation, "Urgency:  | Importance:  | Effort:  | Dependencies: ");
    }

    #[test]
    fn test_cards_keep_input_order() {
        let tasks: Vec<ScoredTask> = ["B", "A", "C"]
            .iter()
            .map(|t| ScoredTask {
                title: Some(t.to_string()),
                ..Default::default()
            })
            .collect();

        let titles: Vec<String> = render(Some(&tasks)).cards().iter().map(|c| c.title.clone()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let tasks = vec![ScoredTask {
            score: Some(95.0),
            ..Default::default()
        }];
        assert_eq!(render(Some(&tasks)), render(Some(&tasks)));
    }

    #[test]
    fn test_string_values_are_unquoted() {
        assert_eq!(value_text(Some(&json!("7"))), "7");
        assert_eq!(value_text(Some(&Value::Null)), "");
    }

    #[test]
    fn test_present_plain() {
        assert!(present_plain(&Results::Placeholder).contains(PLACEHOLDER));

        let results = render(Some(&[ScoredTask {
            title: Some("Loop".to_string()),
            score: Some(85.0),
            in_cycle: true,
            ..Default::default()
        }]));
        let text = present_plain(&results);
        assert!(text.contains("Loop"));
        assert!(text.contains("[medium]"));
        assert!(text.contains("circular dependency"));
    }
}
