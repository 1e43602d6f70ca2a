//! Projection of pending tasks and analysis results into view models.
//!
//! Each view is plain data built from application state, with a `Display`
//! impl producing the terminal rendering. Classification itself lives in
//! [`crate::classify`].

mod matrix;

use std::fmt;

use colored::Colorize;

use crate::classify::{format_score, tier_for_score, PriorityTier};
use crate::store::PendingStore;
use crate::task::{CycleReport, ScoredTask};

pub use matrix::{matrix_view, MatrixView};

/// Placeholder for an empty pending list.
pub const EMPTY_PENDING: &str = "No tasks added yet. Start with `add`, `paste` or `load <file>`.";
/// Placeholder before any analysis has run.
pub const NO_RESULTS_YET: &str = "No results yet. Add some tasks and run `analyze`.";
/// Placeholder for an empty result array.
pub const EMPTY_RESULTS: &str = "No results. The API returned an empty list. Try adding more tasks.";

/// A compact summary of one pending task.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    /// Task title.
    pub title: String,
    /// Due date as entered.
    pub due_date: String,
    /// Estimated hours.
    pub hours: f64,
    /// Importance.
    pub importance: f64,
}

/// The pending-task panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingView {
    /// Nothing pending.
    Empty,
    /// One chip per task, in store order.
    Chips(Vec<Chip>),
}

/// Builds the pending view from the store.
#[must_use]
pub fn pending_view(store: &PendingStore) -> PendingView {
    if store.is_empty() {
        return PendingView::Empty;
    }
    PendingView::Chips(
        store
            .tasks()
            .iter()
            .map(|t| Chip {
                title: t.title.clone(),
                due_date: t.due_date.clone(),
                hours: t.estimated_hours,
                importance: t.importance,
            })
            .collect(),
    )
}

impl fmt::Display for PendingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                writeln!(f, "Pending tasks (0)")?;
                writeln!(f, "  {EMPTY_PENDING}")
            }
            Self::Chips(chips) => {
                writeln!(f, "Pending tasks ({})", chips.len())?;
                for chip in chips {
                    writeln!(
                        f,
                        "  • {}  Due: {}  Hrs: {}  Imp: {}",
                        chip.title.bold(),
                        chip.due_date,
                        chip.hours,
                        chip.importance
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// One result card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Task title.
    pub title: String,
    /// Tier derived from the score.
    pub tier: PriorityTier,
    /// Rounded score text, or `-`.
    pub score_text: String,
    /// Due date.
    pub due_date: String,
    /// Estimated hours, when reported.
    pub hours: Option<f64>,
    /// Importance, when reported.
    pub importance: Option<f64>,
    /// Dependency identifiers.
    pub dependencies: Vec<String>,
    /// Service reasoning, when present.
    pub explanation: Option<String>,
    /// Whether the task was named in the last cycle report.
    pub in_cycle: bool,
}

impl Card {
    fn from_scored(task: &ScoredTask, cycle_nodes: &[String]) -> Self {
        let score = task.effective_score();
        Self {
            title: task.title.clone(),
            tier: tier_for_score(score),
            score_text: format_score(score),
            due_date: task.due_date.clone(),
            hours: task.estimated_hours,
            importance: task.importance,
            dependencies: task.dependencies.clone(),
            explanation: task.explanation.clone().filter(|e| !e.is_empty()),
            in_cycle: cycle_nodes.iter().any(|n| *n == task.title),
        }
    }
}

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.tier.to_string();
        let label = match self.tier {
            PriorityTier::High => label.red().bold(),
            PriorityTier::Medium => label.yellow(),
            PriorityTier::Low => label.green(),
        };
        write!(f, "  {}  [{label}]  Score: {}", self.title.bold(), self.score_text)?;
        if self.in_cycle {
            write!(f, "  {}", "(in dependency cycle)".magenta())?;
        }
        writeln!(f)?;
        write!(
            f,
            "      Due: {}  Effort: {}h  Importance: {}/10",
            self.due_date,
            or_dash(self.hours),
            or_dash(self.importance)
        )?;
        if !self.dependencies.is_empty() {
            write!(f, "  Deps: {}", self.dependencies.join(", "))?;
        }
        writeln!(f)?;
        if let Some(explanation) = &self.explanation {
            writeln!(f, "      Reasoning: {explanation}")?;
        }
        Ok(())
    }
}

/// Body of the results panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    /// Nothing analyzed since start or the last clear.
    NotYet,
    /// The service returned an empty list.
    Empty,
    /// One card per scored task, replacing any earlier cards.
    Cards(Vec<Card>),
}

/// The results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// Cycle participants to warn about, when the last analysis found one.
    pub cycle_warning: Option<Vec<String>>,
    /// Cards or placeholder.
    pub body: ResultsBody,
}

/// Builds the results view from the last received list and cycle report.
#[must_use]
pub fn results_view(results: Option<&[ScoredTask]>, cycle: &CycleReport) -> ResultsView {
    let body = match results {
        None => ResultsBody::NotYet,
        Some([]) => ResultsBody::Empty,
        Some(tasks) => ResultsBody::Cards(
            tasks.iter().map(|t| Card::from_scored(t, &cycle.cycle_nodes)).collect(),
        ),
    };
    let cycle_warning = (cycle.has_cycle && body != ResultsBody::NotYet)
        .then(|| cycle.cycle_nodes.clone());
    ResultsView { cycle_warning, body }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(nodes) = &self.cycle_warning {
            let warning = format!("Circular dependency detected: {}", nodes.join(", "));
            writeln!(f, "{}", warning.yellow().bold())?;
        }
        match &self.body {
            ResultsBody::NotYet => writeln!(f, "Results\n  {NO_RESULTS_YET}"),
            ResultsBody::Empty => writeln!(f, "Results (0)\n  {EMPTY_RESULTS}"),
            ResultsBody::Cards(cards) => {
                writeln!(f, "Results ({})", cards.len())?;
                for card in cards {
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}
