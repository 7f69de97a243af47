//! Task records and scored tasks

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A unit of work as authored by the user
///
/// Field order matches the wire format so serialized collections read the same
/// way the service documents them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub due_date: String,
    pub importance: i64,
    pub estimated_hours: f64,
    pub dependencies: Vec<i64>,
}

impl Task {
    /// Default importance when the form field is blank
    pub const DEFAULT_IMPORTANCE: i64 = 5;

    /// Default effort estimate (hours) when the form field is blank
    pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;
}

/// Per-component justification returned with every score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Explanations {
    #[serde(deserialize_with = "lenient_text")]
    pub urgency: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub importance: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub effort: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub dependencies: Option<String>,
}

/// A task as returned by the scoring service
///
/// Every field is optional: the service echoes back whatever the collection
/// held, so nothing here is guaranteed beyond what the user typed.
/// Fields the client only displays or passes along stay as raw JSON values,
/// and text fields accept any scalar so an odd echo never sinks the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoredTask {
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub due_date: Option<String>,
    pub importance: Option<Value>,
    pub estimated_hours: Option<Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub dependencies: Vec<Value>,
    pub score: Option<f64>,
    pub explanations: Option<Explanations>,
    #[serde(deserialize_with = "null_as_default")]
    pub in_cycle: bool,
}

/// Any JSON value as display text; `null` is absent, strings are unquoted
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// `null` is an empty list, a lone value a list of one
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
