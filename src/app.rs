//! Application state and the user actions that mutate it.
//!
//! Every action catches its own failure: the notifier gets an error toast
//! and a status line, and the error is also returned so one-shot commands
//! can exit non-zero.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::context::ServiceContext;
use crate::error::TaskError;
use crate::notify::{Notifier, Severity, STATUS_IDLE};
use crate::render::{matrix_view, pending_view, results_view, MatrixView, PendingView, ResultsView};
use crate::store::PendingStore;
use crate::task::{CycleReport, ScoredTask, Strategy};
use crate::validate::{parse_json_batch, validate_form, TaskForm};

const ANALYZING: &str = "Analyzing tasks...";
const SUGGESTING: &str = "Fetching suggestions...";

/// Everything the client remembers between actions.
#[derive(Debug, Clone)]
pub struct AppState {
    api_base: String,
    strategy: Strategy,
    store: PendingStore,
    results: Option<Vec<ScoredTask>>,
    last_cycle: CycleReport,
    notifier: Notifier,
}

impl AppState {
    /// Creates an empty state targeting the service at `api_base`.
    #[must_use]
    pub fn new(api_base: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            api_base: api_base.into(),
            strategy,
            store: PendingStore::new(),
            results: None,
            last_cycle: CycleReport::default(),
            notifier: Notifier::new(),
        }
    }

    /// Pending tasks.
    #[must_use]
    pub fn store(&self) -> &PendingStore {
        &self.store
    }

    /// Toasts, status and loading flag.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Last received result list; `None` before any result or after a clear.
    #[must_use]
    pub fn results(&self) -> Option<&[ScoredTask]> {
        self.results.as_deref()
    }

    /// Cycle report from the most recent successful analysis.
    #[must_use]
    pub fn last_cycle(&self) -> &CycleReport {
        &self.last_cycle
    }

    /// Strategy used when `analyze` is given none.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Changes the default strategy.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Validates a form entry and appends it to the pending list.
    ///
    /// # Errors
    ///
    /// Returns the validation error after surfacing it; the store is left
    /// untouched.
    pub fn add_from_form(&mut self, form: &TaskForm, now: DateTime<Utc>) -> Result<(), TaskError> {
        match validate_form(form) {
            Ok(task) => {
                info!(title = %task.title, "task added");
                self.store.add(task);
                self.notifier.show_toast("Task added.", Severity::Success, now);
                self.notifier.set_status("Tasks added. Ready to analyze.");
                self.notifier.show_hint(now);
                Ok(())
            }
            Err(err) => Err(self.fail(err, "Task not added.", now)),
        }
    }

    /// Replaces the pending list with a pasted JSON array.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error after surfacing it; the
    /// previous pending list survives intact.
    pub fn load_json(&mut self, raw: &str, now: DateTime<Utc>) -> Result<(), TaskError> {
        match parse_json_batch(raw) {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded from JSON");
                self.store.replace_all(tasks);
                self.notifier.show_toast("Tasks loaded from JSON.", Severity::Success, now);
                self.notifier.set_status("Tasks loaded. Ready to analyze.");
                self.notifier.show_hint(now);
                Ok(())
            }
            Err(err) => Err(self.fail(err, "JSON import failed.", now)),
        }
    }

    /// Drops pending tasks and shown results.
    ///
    /// The last cycle report is kept until a new analysis replaces it.
    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.store.clear();
        self.results = None;
        self.notifier.set_loading(false, STATUS_IDLE);
        self.notifier.show_toast("All tasks cleared.", Severity::Info, now);
    }

    /// Sends the pending list for analysis and keeps the scored result.
    ///
    /// `on_loading` runs once the loading indicator is up, before the
    /// request goes out; it is skipped when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns the failure after surfacing it. Earlier results stay shown.
    pub async fn analyze<F>(
        &mut self,
        ctx: &ServiceContext,
        strategy: Option<Strategy>,
        on_loading: F,
    ) -> Result<(), TaskError>
    where
        F: FnOnce(&Notifier),
    {
        let strategy = strategy.unwrap_or(self.strategy);
        if !self.store.is_empty() {
            self.notifier.set_loading(true, ANALYZING);
            on_loading(&self.notifier);
        }

        let result = ApiClient::new(ctx.transport.as_ref(), &self.api_base)
            .analyze(self.store.tasks(), Some(strategy))
            .await;
        let now = ctx.clock.now();

        match result {
            Ok(response) => {
                self.last_cycle = response.cycle;
                self.notifier.set_loading(false, "Analysis complete.");
                self.show_results(response.tasks, "Tasks analyzed successfully!", now);
                Ok(())
            }
            Err(err) => {
                let status = if matches!(err, TaskError::EmptyInput(_)) {
                    "Nothing to analyze yet."
                } else {
                    "Error while analyzing."
                };
                Err(self.fail(err, status, now))
            }
        }
    }

    /// Fetches the service's top suggestions for the pending list.
    ///
    /// Suggestions do not touch the stored cycle report.
    ///
    /// # Errors
    ///
    /// Returns the failure after surfacing it. Earlier results stay shown.
    pub async fn suggest<F>(&mut self, ctx: &ServiceContext, on_loading: F) -> Result<(), TaskError>
    where
        F: FnOnce(&Notifier),
    {
        if !self.store.is_empty() {
            self.notifier.set_loading(true, SUGGESTING);
            on_loading(&self.notifier);
        }

        let result =
            ApiClient::new(ctx.transport.as_ref(), &self.api_base).suggest(self.store.tasks()).await;
        let now = ctx.clock.now();

        match result {
            Ok(response) => {
                self.notifier.set_loading(false, "Top 3 suggestions loaded.");
                self.show_results(response.suggested_tasks, "Loaded today's top 3 tasks.", now);
                Ok(())
            }
            Err(err) => {
                let status = if matches!(err, TaskError::EmptyInput(_)) {
                    "Nothing to suggest yet."
                } else {
                    "Error while fetching suggestions."
                };
                Err(self.fail(err, status, now))
            }
        }
    }

    /// The pending panel.
    #[must_use]
    pub fn pending_view(&self) -> PendingView {
        pending_view(&self.store)
    }

    /// The results panel.
    #[must_use]
    pub fn results_view(&self) -> ResultsView {
        results_view(self.results(), &self.last_cycle)
    }

    /// The Eisenhower matrix relative to `now`.
    #[must_use]
    pub fn matrix_view(&self, now: DateTime<Utc>) -> MatrixView {
        matrix_view(self.results(), now)
    }

    fn show_results(&mut self, tasks: Vec<ScoredTask>, success: &str, now: DateTime<Utc>) {
        if tasks.is_empty() {
            self.notifier.show_toast("The service returned no tasks.", Severity::Info, now);
        } else {
            self.notifier.show_toast(success, Severity::Success, now);
        }
        self.results = Some(tasks);
    }

    fn fail(&mut self, err: TaskError, status: &str, now: DateTime<Utc>) -> TaskError {
        warn!(kind = err.kind(), error = %err, "action failed");
        self.notifier.set_loading(false, status);
        self.notifier.show_toast(err.to_string(), Severity::Error, now);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Quadrant;
    use crate::render::{PendingView, ResultsBody};
    use crate::testing::{replay_context, reply, test_now, transport_failure};
    use serde_json::json;

    fn state() -> AppState {
        AppState::new("http://svc/api/tasks", Strategy::Smart)
    }

    fn form(title: &str, importance: &str) -> TaskForm {
        TaskForm {
            title: title.into(),
            due_date: "2099-01-01".into(),
            estimated_hours: "2".into(),
            importance: importance.into(),
            dependencies: String::new(),
        }
    }

    const ONE_TASK: &str = r#"[{"title": "A", "due_date": "2099-01-01", "estimated_hours": 2,
                               "importance": 5, "dependencies": []}]"#;

    #[test]
    fn add_surfaces_success_and_hint() {
        let mut app = state();
        app.add_from_form(&form("A", "5"), test_now()).unwrap();
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.notifier().status(), "Tasks added. Ready to analyze.");
        assert_eq!(app.notifier().active_toast(test_now()).unwrap().severity, Severity::Success);
        assert!(app.notifier().hint_visible(test_now()));
    }

    #[test]
    fn rejected_form_leaves_store_untouched() {
        let mut app = state();
        app.add_from_form(&form("A", "5"), test_now()).unwrap();
        let err = app.add_from_form(&form("B", "11"), test_now()).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert_eq!(app.store().len(), 1);
        let toast = app.notifier().active_toast(test_now()).unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert!(toast.message.contains("between 1 and 10"));
    }

    #[test]
    fn failed_json_import_keeps_previous_tasks() {
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();
        let err = app
            .load_json(
                r#"[{"title": "X", "due_date": "2099-01-01", "estimated_hours": 1, "importance": 1},
                    {"title": "Y", "due_date": "2099-01-01", "estimated_hours": 1}]"#,
                test_now(),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Task at index 1 is missing required fields.");
        assert_eq!(app.store().tasks()[0].title, "A");
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.results_view().body, ResultsBody::NotYet);
    }

    #[test]
    fn json_reload_replaces_rather_than_merges() {
        let mut app = state();
        app.add_from_form(&form("Old", "5"), test_now()).unwrap();
        app.load_json(ONE_TASK, test_now()).unwrap();
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.store().tasks()[0].title, "A");
    }

    #[tokio::test]
    async fn analyze_renders_high_priority_card() {
        let ctx = replay_context(vec![reply(
            200,
            &json!({
                "tasks": [{"title": "A", "due_date": "2099-01-01", "estimated_hours": 2,
                           "importance": 5, "dependencies": [], "score": 8.456}],
                "has_cycle": false,
                "cycle_nodes": []
            }),
        )]);
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();

        let mut loading_seen = None;
        app.analyze(&ctx, None, |n| loading_seen = Some((n.is_loading(), n.status().to_string())))
            .await
            .unwrap();

        assert_eq!(loading_seen, Some((true, ANALYZING.to_string())));
        assert!(!app.notifier().is_loading());
        assert_eq!(app.notifier().status(), "Analysis complete.");
        let text = app.results_view().to_string();
        assert!(text.contains("8.46"));
        assert!(text.contains("High priority"));
        assert_eq!(app.matrix_view(test_now()).entries(Quadrant::Eliminate).len(), 1);
    }

    #[tokio::test]
    async fn empty_results_show_placeholder() {
        let ctx = replay_context(vec![
            reply(200, &json!({"tasks": []})),
            reply(200, &json!({"suggested_tasks": []})),
        ]);
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();

        app.analyze(&ctx, None, |_| {}).await.unwrap();
        assert_eq!(app.results_view().body, ResultsBody::Empty);
        assert!(app.matrix_view(test_now()).is_hidden());
        assert_eq!(
            app.notifier().active_toast(test_now()).unwrap().message,
            "The service returned no tasks."
        );

        app.suggest(&ctx, |_| {}).await.unwrap();
        assert_eq!(app.results_view().body, ResultsBody::Empty);
    }

    #[tokio::test]
    async fn empty_store_skips_loading_and_request() {
        // No recorded replies: any request would panic the replayer.
        let ctx = replay_context(vec![]);
        let mut app = state();
        let mut called = false;
        let err = app.analyze(&ctx, None, |_| called = true).await.unwrap_err();
        assert!(matches!(err, TaskError::EmptyInput(_)));
        assert!(!called);
        assert_eq!(app.notifier().status(), "Nothing to analyze yet.");

        let err = app.suggest(&ctx, |_| {}).await.unwrap_err();
        assert_eq!(err.to_string(), "Add at least one task before getting suggestions.");
    }

    #[tokio::test]
    async fn cycle_nodes_persist_through_suggest() {
        let ctx = replay_context(vec![
            reply(
                200,
                &json!({
                    "tasks": [{"title": "A", "score": 5}, {"title": "B", "score": 4}],
                    "has_cycle": true,
                    "cycle_nodes": ["A", "B"]
                }),
            ),
            reply(200, &json!({"suggested_tasks": [{"title": "B", "score": 4}]})),
        ]);
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();
        app.analyze(&ctx, Some(Strategy::Deadline), |_| {}).await.unwrap();
        app.suggest(&ctx, |_| {}).await.unwrap();

        assert_eq!(app.last_cycle().cycle_nodes, vec!["A", "B"]);
        let view = app.results_view();
        let ResultsBody::Cards(cards) = &view.body else { panic!("expected cards") };
        assert_eq!(cards.len(), 1);
        assert!(cards[0].in_cycle);
        assert_eq!(app.notifier().status(), "Top 3 suggestions loaded.");
    }

    #[tokio::test]
    async fn service_error_keeps_previous_results() {
        let ctx = replay_context(vec![
            reply(200, &json!({"tasks": [{"title": "A", "score": 9}]})),
            json!({"Ok": {"status": 400, "status_text": "Bad Request", "body": "bad dates"}}),
            transport_failure("connection refused"),
        ]);
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();
        app.analyze(&ctx, None, |_| {}).await.unwrap();

        let err = app.analyze(&ctx, None, |_| {}).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (400): bad dates");
        assert_eq!(app.notifier().status(), "Error while analyzing.");
        assert!(!app.notifier().is_loading());
        assert!(matches!(app.results_view().body, ResultsBody::Cards(_)));

        let err = app.suggest(&ctx, |_| {}).await.unwrap_err();
        assert!(matches!(err, TaskError::Transport(_)));
        assert_eq!(app.notifier().status(), "Error while fetching suggestions.");
    }

    #[tokio::test]
    async fn clear_resets_views_but_not_cycle_report() {
        let ctx = replay_context(vec![reply(
            200,
            &json!({"tasks": [{"title": "A", "score": 1}], "has_cycle": true, "cycle_nodes": ["A"]}),
        )]);
        let mut app = state();
        app.load_json(ONE_TASK, test_now()).unwrap();
        app.analyze(&ctx, None, |_| {}).await.unwrap();

        app.clear(test_now());
        assert_eq!(app.pending_view(), PendingView::Empty);
        assert_eq!(app.results_view().body, ResultsBody::NotYet);
        assert!(app.results_view().cycle_warning.is_none());
        assert!(app.matrix_view(test_now()).is_hidden());
        assert_eq!(app.notifier().status(), STATUS_IDLE);
        assert_eq!(app.last_cycle().cycle_nodes, vec!["A"]);
    }
}
