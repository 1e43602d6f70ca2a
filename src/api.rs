//! Client for the remote analysis service.
//!
//! Builds request URLs, posts the pending tasks through the
//! [`HttpTransport`] port and maps status codes and bodies onto
//! [`TaskError`] variants.

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::error::TaskError;
use crate::ports::transport::{HttpReply, HttpRequest, HttpTransport};
use crate::task::{AnalyzeResponse, Strategy, SuggestResponse, Task};

const ANALYZE_FORMAT_ERROR: &str = "Unexpected response format from analyze API.";
const SUGGEST_FORMAT_ERROR: &str = "Unexpected response format from suggest API.";

/// Talks to `<base>/analyze/` and `<base>/suggest/`.
pub struct ApiClient<'a> {
    transport: &'a dyn HttpTransport,
    base: String,
}

impl<'a> ApiClient<'a> {
    /// Creates a client for the service rooted at `base`.
    #[must_use]
    pub fn new(transport: &'a dyn HttpTransport, base: &str) -> Self {
        Self { transport, base: base.trim_end_matches('/').to_string() }
    }

    /// `<base>/analyze/?strategy=<strategy>`, with the strategy URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Transport`] when the base is not a valid URL.
    pub fn analyze_url(&self, strategy: Strategy) -> Result<Url, TaskError> {
        let mut url = self.endpoint("analyze/")?;
        url.query_pairs_mut().append_pair("strategy", strategy.as_str());
        Ok(url)
    }

    /// `<base>/suggest/`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Transport`] when the base is not a valid URL.
    pub fn suggest_url(&self) -> Result<Url, TaskError> {
        self.endpoint("suggest/")
    }

    /// Sends `tasks` for scoring. A missing strategy means `smart`.
    ///
    /// # Errors
    ///
    /// - [`TaskError::EmptyInput`] when `tasks` is empty; nothing is sent.
    /// - [`TaskError::Service`] for a non-2xx answer.
    /// - [`TaskError::Format`] when the body is not an analysis object.
    /// - [`TaskError::Transport`] when no answer arrives.
    pub async fn analyze(
        &self,
        tasks: &[Task],
        strategy: Option<Strategy>,
    ) -> Result<AnalyzeResponse, TaskError> {
        if tasks.is_empty() {
            return Err(TaskError::EmptyInput("Add at least one task before analyzing.".into()));
        }
        let strategy = strategy.unwrap_or_default();
        let reply = self.post(self.analyze_url(strategy)?, tasks).await?;

        let response: AnalyzeResponse = serde_json::from_str(&reply.body).map_err(|e| {
            warn!(error = %e, "analyze response did not match the expected shape");
            TaskError::Format(ANALYZE_FORMAT_ERROR.into())
        })?;
        info!(
            %strategy,
            scored = response.tasks.len(),
            has_cycle = response.cycle.has_cycle,
            "analysis received"
        );
        Ok(response)
    }

    /// Asks the service for its top suggestions.
    ///
    /// # Errors
    ///
    /// - [`TaskError::EmptyInput`] when `tasks` is empty; nothing is sent.
    /// - [`TaskError::Service`] for a non-2xx answer.
    /// - [`TaskError::Format`] when `suggested_tasks` is absent or not an array.
    /// - [`TaskError::Transport`] when no answer arrives.
    pub async fn suggest(&self, tasks: &[Task]) -> Result<SuggestResponse, TaskError> {
        if tasks.is_empty() {
            return Err(TaskError::EmptyInput(
                "Add at least one task before getting suggestions.".into(),
            ));
        }
        let reply = self.post(self.suggest_url()?, tasks).await?;

        let response: SuggestResponse = serde_json::from_str(&reply.body).map_err(|e| {
            warn!(error = %e, "suggest response did not match the expected shape");
            TaskError::Format(SUGGEST_FORMAT_ERROR.into())
        })?;
        info!(suggested = response.suggested_tasks.len(), "suggestions received");
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url, TaskError> {
        let raw = format!("{}/{path}", self.base);
        Url::parse(&raw).map_err(|e| TaskError::Transport(format!("invalid service URL {raw}: {e}")))
    }

    async fn post(&self, url: Url, tasks: &[Task]) -> Result<HttpReply, TaskError> {
        let body = serde_json::to_value(tasks)
            .map_err(|e| TaskError::Validation(format!("Tasks could not be encoded: {e}")))?;
        let request = HttpRequest { url: url.to_string(), body };
        debug!(url = %request.url, tasks = tasks.len(), "posting tasks");

        let reply = self
            .transport
            .post_json(&request)
            .await
            .map_err(|e| TaskError::Transport(e.to_string()))?;

        if !reply.is_success() {
            warn!(url = %request.url, status = reply.status, "service returned an error");
            let detail = if reply.body.is_empty() { reply.status_text } else { reply.body };
            return Err(TaskError::Service { status: reply.status, detail });
        }
        Ok(reply)
    }
}
