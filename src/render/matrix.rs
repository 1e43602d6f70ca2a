//! Eisenhower matrix view.

use std::fmt;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::classify::{classify_quadrant, days_until, Quadrant};
use crate::task::ScoredTask;

/// Four quadrant lists, or hidden when there is nothing to classify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixView {
    /// Entries per quadrant in [`Quadrant::ALL`] order; `None` when hidden.
    pub quadrants: Option<[Vec<String>; 4]>,
}

impl MatrixView {
    /// Entries filed under one quadrant.
    #[must_use]
    pub fn entries(&self, quadrant: Quadrant) -> &[String] {
        self.quadrants.as_ref().map_or(&[][..], |q| q[quadrant.index()].as_slice())
    }

    /// Whether the matrix is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.quadrants.is_none()
    }
}

/// Classifies each scored task into a quadrant relative to `now`.
#[must_use]
pub fn matrix_view(tasks: Option<&[ScoredTask]>, now: DateTime<Utc>) -> MatrixView {
    let Some(tasks) = tasks.filter(|t| !t.is_empty()) else {
        return MatrixView::default();
    };

    let mut quadrants: [Vec<String>; 4] = Default::default();
    for task in tasks {
        let quadrant = classify_quadrant(
            days_until(&task.due_date, now),
            task.importance.unwrap_or(f64::NAN),
        );
        quadrants[quadrant.index()].push(format!("{} ({})", task.title, task.due_date));
    }
    MatrixView { quadrants: Some(quadrants) }
}

impl fmt::Display for MatrixView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(quadrants) = &self.quadrants else {
            return Ok(());
        };
        writeln!(f, "Eisenhower matrix")?;
        for quadrant in Quadrant::ALL {
            writeln!(f, "  {}:", quadrant.title().bold())?;
            let entries = &quadrants[quadrant.index()];
            if entries.is_empty() {
                writeln!(f, "    (none)")?;
            }
            for entry in entries {
                writeln!(f, "    - {entry}")?;
            }
        }
        Ok(())
    }
}
