//! Task records exchanged with the analysis service.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A task waiting in the pending list.
///
/// `estimated_hours` and `importance` are floats because the JSON import
/// path coerces them permissively; the form path only ever produces
/// non-negative hours and integral importance in `1..=10`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Short task title.
    pub title: String,
    /// Due date as entered, normally `YYYY-MM-DD`.
    pub due_date: String,
    /// Estimated effort in hours.
    #[serde(serialize_with = "serialize_number")]
    pub estimated_hours: f64,
    /// Importance on a 1-10 scale.
    #[serde(serialize_with = "serialize_number")]
    pub importance: f64,
    /// Identifiers of tasks this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A task returned by the service with its computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Short task title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Due date as reported by the service.
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: String,
    /// Estimated effort in hours.
    #[serde(default, deserialize_with = "lenient_number")]
    pub estimated_hours: Option<f64>,
    /// Importance on a 1-10 scale.
    #[serde(default, deserialize_with = "lenient_number")]
    pub importance: Option<f64>,
    /// Identifiers of tasks this one depends on.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub dependencies: Vec<String>,
    /// Priority score; anything non-numeric counts as zero.
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
    /// Service-provided reasoning for the score.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ScoredTask {
    /// Score used for tiering, with missing scores treated as zero.
    #[must_use]
    pub fn effective_score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// Dependency cycle metadata attached to an analysis response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Whether the submitted tasks contain a dependency cycle.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_cycle: bool,
    /// Titles of the tasks participating in the cycle.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cycle_nodes: Vec<String>,
}

/// Body returned by `POST {base}/analyze/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    /// Scored tasks in service order; absent or `null` means none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<ScoredTask>,
    /// Cycle metadata, flattened into the top-level object.
    #[serde(flatten)]
    pub cycle: CycleReport,
}

/// Body returned by `POST {base}/suggest/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestResponse {
    /// The top suggestions, highest score first.
    pub suggested_tasks: Vec<ScoredTask>,
}

/// Scoring strategy understood by the analysis service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Balanced urgency, importance and effort.
    #[default]
    Smart,
    /// Low-effort tasks first.
    Fastest,
    /// Most important tasks first.
    #[value(alias = "high_impact")]
    HighImpact,
    /// Earliest due dates first.
    Deadline,
}

impl Strategy {
    /// Query-string value sent to the service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Fastest => "fastest",
            Self::HighImpact => "high_impact",
            Self::Deadline => "deadline",
        }
    }

    /// Parses a strategy name, accepting `-` or `_` as separator.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "smart" => Some(Self::Smart),
            "fastest" => Some(Self::Fastest),
            "high_impact" => Some(Self::HighImpact),
            "deadline" => Some(Self::Deadline),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes integral values as JSON integers and non-finite values as `null`.
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Reads `null` as the type's default; any other value must still decode.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| stringify(&value)))
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.iter().map(stringify).collect(),
        _ => Vec::new(),
    })
}

/// String form of a JSON value: strings verbatim, everything else as JSON text.
#[must_use]
pub fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
