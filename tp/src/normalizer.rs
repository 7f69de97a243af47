//! Task form normalization
//!
//! Turns the five free-text form fields into a [`Task`] and merges it into the
//! editable collection.

use thiserror::Error;
use tracing::{debug, info};

use crate::collection::TaskCollection;
use crate::domain::Task;

/// Form input that cannot become a task record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and Due Date are required.")]
    MissingRequired,

    #[error("{field} must be a number, got '{value}'.")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Dependencies must be comma-separated task ids, got '{value}'.")]
    InvalidDependency { value: String },
}

/// Failure adding a task to the collection
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Failed to update task list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Fields of the task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    DueDate,
    Importance,
    EstimatedHours,
    Dependencies,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Title,
        Self::DueDate,
        Self::Importance,
        Self::EstimatedHours,
        Self::Dependencies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::DueDate => "Due Date",
            Self::Importance => "Importance",
            Self::EstimatedHours => "Estimated Hours",
            Self::Dependencies => "Dependencies",
        }
    }

    /// Hint shown when the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "required",
            Self::DueDate => "YYYY-MM-DD (required)",
            Self::Importance => "1-10, default 5",
            Self::EstimatedHours => "default 1",
            Self::Dependencies => "ids, e.g. 1, 2",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::DueDate,
            Self::DueDate => Self::Importance,
            Self::Importance => Self::EstimatedHours,
            Self::EstimatedHours => Self::Dependencies,
            Self::Dependencies => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Dependencies,
            Self::DueDate => Self::Title,
            Self::Importance => Self::DueDate,
            Self::EstimatedHours => Self::Importance,
            Self::Dependencies => Self::EstimatedHours,
        }
    }
}

/// Raw form state, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    pub dependencies: String,
}

impl TaskForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::DueDate => &self.due_date,
            FormField::Importance => &self.importance,
            FormField::EstimatedHours => &self.estimated_hours,
            FormField::Dependencies => &self.dependencies,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::DueDate => &mut self.due_date,
            FormField::Importance => &mut self.importance,
            FormField::EstimatedHours => &mut self.estimated_hours,
            FormField::Dependencies => &mut self.dependencies,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Build a task record from the form without touching any state
pub fn build_task(form: &TaskForm) -> Result<Task, ValidationError> {
    debug!(?form, "build_task: called");
    let title = form.title.trim();
    let due_date = form.due_date.trim();

    if title.is_empty() || due_date.is_empty() {
        debug!("build_task: missing title or due date");
        return Err(ValidationError::MissingRequired);
    }

    let importance = parse_or_default(&form.importance, "Importance", Task::DEFAULT_IMPORTANCE)?;
    let estimated_hours = parse_hours(&form.estimated_hours)?;
    let dependencies = parse_dependencies(&form.dependencies)?;

    Ok(Task {
        title: title.to_string(),
        due_date: due_date.to_string(),
        importance,
        estimated_hours,
        dependencies,
    })
}

/// Split dependency text on commas into task ids
///
/// Pieces are trimmed and empty pieces dropped, so `"1, 2,,3"` yields
/// `[1, 2, 3]` and blank text yields `[]`.
pub fn parse_dependencies(raw: &str) -> Result<Vec<i64>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            piece.parse::<i64>().map_err(|_| ValidationError::InvalidDependency {
                value: piece.to_string(),
            })
        })
        .collect()
}

/// Validate the form, append the task to the collection and clear the form
///
/// On any error neither the form nor the collection is modified.
pub fn add_task(form: &mut TaskForm, collection: &mut TaskCollection) -> Result<Task, NormalizeError> {
    let task = build_task(form)?;
    let count = collection.append(&task)?;
    info!(title = %task.title, count, "add_task: task added to collection");
    form.clear();
    Ok(task)
}

fn parse_or_default<T: std::str::FromStr>(raw: &str, field: &'static str, default: T) -> Result<T, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse::<T>().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: trimmed.to_string(),
    })
}

/// Hours must be finite: `f64` parsing accepts "NaN" and "inf", which JSON cannot carry
fn parse_hours(raw: &str) -> Result<f64, ValidationError> {
    let field = "Estimated Hours";
    let hours = parse_or_default(raw, field, Task::DEFAULT_ESTIMATED_HOURS)?;
    if !hours.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        });
    }
    Ok(hours)
}
