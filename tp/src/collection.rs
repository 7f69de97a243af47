//! The editable task collection
//!
//! Tasks are held as one JSON text blob the user can edit freely. The blob is
//! the source of truth: it is re-parsed whenever the tasks are needed, so
//! hand edits and form additions go through the same path.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::Task;

/// Why the collection text could not be read as a task sequence
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON in task list. Please fix it. ({0})")]
    Syntax(#[from] serde_json::Error),

    #[error("Task list must be a JSON array of tasks.")]
    NotASequence,
}

/// Editable task collection owned by the application state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    text: String,
}

impl TaskCollection {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current text as the user sees it
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable text for in-place editing
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Overwrite the whole collection
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when the text holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Parse the text as a sequence of task objects
    ///
    /// Blank text is an empty sequence. Items are returned as raw JSON so that
    /// fields the client does not model survive a round trip.
    pub fn parse(&self) -> Result<Vec<Value>, ParseError> {
        if self.is_blank() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&self.text)? {
            Value::Array(items) => Ok(items),
            other => {
                debug!(kind = value_kind(&other), "TaskCollection::parse: not an array");
                Err(ParseError::NotASequence)
            }
        }
    }

    /// Number of tasks, or None when the text does not parse
    pub fn task_count(&self) -> Option<usize> {
        self.parse().ok().map(|items| items.len())
    }

    /// Append a task and re-serialize the collection
    ///
    /// Text that does not parse as a sequence is discarded and the task becomes
    /// the only entry. Returns the new task count.
    pub fn append(&mut self, task: &Task) -> Result<usize, serde_json::Error> {
        let mut items = match self.parse() {
            Ok(items) => items,
            Err(e) => {
                debug!(error = %e, "TaskCollection::append: existing text unusable, starting empty");
                Vec::new()
            }
        };

        items.push(serde_json::to_value(task)?);
        self.text = serde_json::to_string_pretty(&items)?;
        Ok(items.len())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str) -> Task {
        Task {
            title: title.to_string(),
            due_date: "2024-01-01".to_string(),
            importance: 5,
            estimated_hours: 1.0,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_blank_text_is_empty_sequence() {
        assert!(TaskCollection::default().parse().unwrap().is_empty());
        assert!(TaskCollection::new("  \n\t").parse().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_text_is_syntax_error() {
        let collection = TaskCollection::new("[{\"title\": ");
        assert!(matches!(collection.parse(), Err(ParseError::Syntax(_))));
        assert_eq!(collection.task_count(), None);
    }

    #[test]
    fn test_non_array_is_rejected() {
        let collection = TaskCollection::new(r#"{"title": "A"}"#);
        assert!(matches!(collection.parse(), Err(ParseError::NotASequence)));

        let collection = TaskCollection::new("42");
        assert!(matches!(collection.parse(), Err(ParseError::NotASequence)));
    }

    #[test]
    fn test_append_to_empty() {
        let mut collection = TaskCollection::default();
        let count = collection.append(&task("A")).unwrap();

        assert_eq!(count, 1);
        let items = collection.parse().unwrap();
        assert_eq!(items[0]["title"], "A");
        assert_eq!(items[0]["dependencies"], serde_json::json!([]));
    }

    #[test]
    fn test_append_uses_two_space_indent() {
        let mut collection = TaskCollection::default();
        collection.append(&task("A")).unwrap();
        assert!(collection.text().starts_with("[\n  {\n    \"title\": \"A\""));
    }

    #[test]
    fn test_append_preserves_existing_order_and_fields() {
        let mut collection = TaskCollection::new(r#"[{"id": 7, "title": "First", "due_date": "2024-02-01", "note": "x"}]"#);
        let count = collection.append(&task("Second")).unwrap();

        assert_eq!(count, 2);
        let items = collection.parse().unwrap();
        assert_eq!(items[0]["title"], "First");
        assert_eq!(items[0]["id"], 7);
        assert_eq!(items[0]["note"], "x");
        assert_eq!(items[1]["title"], "Second");
    }

    #[test]
    fn test_append_replaces_malformed_text() {
        let mut collection = TaskCollection::new("this is not json");
        assert_eq!(collection.append(&task("A")).unwrap(), 1);
        assert_eq!(collection.task_count(), Some(1));
    }

    #[test]
    fn test_append_replaces_non_array() {
        let mut collection = TaskCollection::new(r#"{"tasks": []}"#);
        assert_eq!(collection.append(&task("A")).unwrap(), 1);
        assert_eq!(collection.parse().unwrap()[0]["title"], "A");
    }

    #[test]
    fn test_replace_overwrites() {
        let mut collection = TaskCollection::new("[]");
        collection.replace("[1, 2]");
        assert_eq!(collection.task_count(), Some(2));
    }
}
