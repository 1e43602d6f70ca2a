//! Input validation for form entries and pasted JSON batches.
//!
//! The form path is strict: blank fields, malformed dates, negative or
//! non-numeric hours and out-of-range importance are all rejected. The JSON
//! path only checks that the required fields are present and coerces the
//! numbers permissively, so a whole batch can be imported in one go.

mod coerce;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::TaskError;
use crate::task::{stringify, Task};

pub use coerce::{is_truthy, to_number};

/// Date format accepted by the form path.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, untrimmed form field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Task title.
    pub title: String,
    /// Due date, `YYYY-MM-DD`.
    pub due_date: String,
    /// Estimated effort in hours.
    pub estimated_hours: String,
    /// Importance, an integer from 1 to 10.
    pub importance: String,
    /// Comma-separated dependency identifiers.
    pub dependencies: String,
}

/// Validates a form entry and produces a task.
///
/// # Errors
///
/// Returns [`TaskError::Validation`] when a required field is blank, the due
/// date is not a calendar date, the hours are not a non-negative number, or
/// the importance is not an integer between 1 and 10.
pub fn validate_form(form: &TaskForm) -> Result<Task, TaskError> {
    let title = form.title.trim();
    let due_date = form.due_date.trim();
    let hours = form.estimated_hours.trim();
    let importance = form.importance.trim();

    if title.is_empty() || due_date.is_empty() || hours.is_empty() || importance.is_empty() {
        return Err(TaskError::Validation("Please fill all required fields.".into()));
    }

    if NaiveDate::parse_from_str(due_date, DATE_FORMAT).is_err() {
        return Err(TaskError::Validation("Due date must be a date in YYYY-MM-DD format.".into()));
    }

    let estimated_hours = match hours.parse::<f64>() {
        Ok(h) if h.is_finite() && h >= 0.0 => h,
        _ => {
            return Err(TaskError::Validation(
                "Estimated hours must be a non-negative number.".into(),
            ))
        }
    };

    let importance = match importance.parse::<f64>() {
        Ok(i) if i.fract() == 0.0 && (1.0..=10.0).contains(&i) => i,
        _ => {
            return Err(TaskError::Validation(
                "Importance must be an integer between 1 and 10.".into(),
            ))
        }
    };

    Ok(Task {
        title: title.to_string(),
        due_date: due_date.to_string(),
        estimated_hours,
        importance,
        dependencies: split_dependencies(&form.dependencies),
    })
}

/// Splits a comma-separated dependency list, dropping empty tokens.
#[must_use]
pub fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|d| !d.is_empty()).map(String::from).collect()
}

/// Parses a pasted JSON array into tasks.
///
/// The batch is atomic: the first element missing a required field fails
/// the whole import and nothing is returned.
///
/// # Errors
///
/// Returns [`TaskError::Validation`] for blank input or a missing field and
/// [`TaskError::Parse`] when the text is not a JSON array.
pub fn parse_json_batch(raw: &str) -> Result<Vec<Task>, TaskError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TaskError::Validation("Please paste a JSON array of tasks.".into()));
    }

    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| TaskError::Parse(format!("Invalid JSON input: {e}")))?;
    let Value::Array(items) = parsed else {
        return Err(TaskError::Parse("JSON must be an array of task objects.".into()));
    };

    items.iter().enumerate().map(|(idx, item)| coerce_task(idx, item)).collect()
}

fn coerce_task(idx: usize, item: &Value) -> Result<Task, TaskError> {
    let missing =
        || TaskError::Validation(format!("Task at index {idx} is missing required fields."));

    let Value::Object(fields) = item else {
        return Err(missing());
    };
    let title = fields.get("title").filter(|v| is_truthy(v)).ok_or_else(missing)?;
    let due_date = fields.get("due_date").filter(|v| is_truthy(v)).ok_or_else(missing)?;
    let hours = fields.get("estimated_hours").ok_or_else(missing)?;
    let importance = fields.get("importance").ok_or_else(missing)?;

    let dependencies = match fields.get("dependencies") {
        Some(Value::Array(deps)) => deps.iter().map(stringify).collect(),
        _ => Vec::new(),
    };

    Ok(Task {
        title: stringify(title),
        due_date: stringify(due_date),
        estimated_hours: to_number(hours),
        importance: to_number(importance),
        dependencies,
    })
}
