//! Pending-task store: the ordered list of tasks not yet sent for analysis.
//!
//! The store only holds data. Callers re-render the pending view after
//! every mutation.

use crate::task::Task;

/// In-memory, insertion-ordered list of pending tasks.
///
/// Titles are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingStore {
    tasks: Vec<Task>,
}

impl PendingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the end of the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replaces the whole list. Prior contents are discarded, not merged.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Pending tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
