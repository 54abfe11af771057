//! Search executor - debounced, cancellable search sessions.
//!
//! The executor is owned by whoever drives the search box. It keeps at most
//! one pending task (a debounce timer that turns into a search) and the
//! cancellation token for it. Every new query replaces both.
//!
//! ```text
//! Idle ──input──▶ Debouncing ──quiet period──▶ Searching ──▶ Idle
//!                    │  ▲                          │
//!                    └──┘ new input resets timer   └─ new input cancels
//! ```
//!
//! Results come back through [`SearchExecutor::next_outcome`], which never
//! yields anything from a superseded search.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::backend::{RawSearch, SearchRequest};
use super::classify::SearchType;
use super::error::SearchError;
use super::validation::{self, ValidatedQuery};
use crate::model::SearchResult;

/// Default quiet period before a typed query is searched
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Where the current session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Debouncing,
    Searching,
}

/// How a search attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Completed {
        generation: u64,
        query: String,
        search_type: SearchType,
        results: Vec<SearchResult>,
    },
    Cancelled {
        generation: u64,
    },
    Failed {
        generation: u64,
        error: SearchError,
    },
}

impl SearchOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            SearchOutcome::Completed { generation, .. }
            | SearchOutcome::Cancelled { generation }
            | SearchOutcome::Failed { generation, .. } => *generation,
        }
    }
}

struct PendingSearch {
    token: CancellationToken,
    state: watch::Receiver<SearchState>,
    handle: JoinHandle<()>,
}

/// Caller-owned search session.
pub struct SearchExecutor<R: RawSearch> {
    backend: Arc<R>,
    language: String,
    quiet_period: Duration,
    generation: u64,
    pending: Option<PendingSearch>,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl<R: RawSearch> SearchExecutor<R> {
    pub fn new(backend: Arc<R>, language: impl Into<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            language: language.into(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            generation: 0,
            pending: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Override the debounce quiet period.
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Change the result language used for subsequent searches.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current state of the session.
    pub fn state(&self) -> SearchState {
        match &self.pending {
            Some(pending) if !pending.handle.is_finished() => *pending.state.borrow(),
            _ => SearchState::Idle,
        }
    }

    /// Feed typed input. Restarts the quiet period and cancels anything in
    /// flight. Blank input just cancels and leaves the session idle.
    pub fn on_input(&mut self, query: &str) {
        self.cancel();

        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.spawn(query.to_string(), self.quiet_period);
    }

    /// Search right away, skipping the quiet period.
    ///
    /// Validation errors are returned here, before any network call.
    pub fn submit(&mut self, query: &str) -> Result<u64, SearchError> {
        let validated = validation::validate(query)?;
        self.cancel();
        Ok(self.spawn(validated.raw, Duration::ZERO))
    }

    /// Cancel whatever is pending. A search that already reached the
    /// backend reports [`SearchOutcome::Cancelled`]; a debounce timer is
    /// dropped silently.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }

    /// Wait for the outcome of the active search.
    ///
    /// Outcomes of superseded searches are discarded. Returns `None` only if
    /// the outcome channel is closed, which cannot happen while the executor
    /// is alive.
    pub async fn next_outcome(&mut self) -> Option<SearchOutcome> {
        while let Some(outcome) = self.outcome_rx.recv().await {
            if outcome.generation() == self.generation {
                return Some(outcome);
            }
            tracing::debug!(
                target: "search",
                stale = outcome.generation(),
                active = self.generation,
                "Discarding outcome of superseded search"
            );
        }
        None
    }

    /// Submit `query` and wait for its outcome.
    pub async fn run(&mut self, query: &str) -> Result<(SearchType, Vec<SearchResult>), SearchError> {
        self.submit(query)?;
        match self.next_outcome().await {
            Some(SearchOutcome::Completed {
                search_type,
                results,
                ..
            }) => Ok((search_type, results)),
            Some(SearchOutcome::Failed { error, .. }) => Err(error),
            Some(SearchOutcome::Cancelled { .. }) | None => Err(SearchError::Cancelled),
        }
    }

    fn spawn(&mut self, query: String, delay: Duration) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        let token = CancellationToken::new();
        let initial = if delay.is_zero() {
            SearchState::Searching
        } else {
            SearchState::Debouncing
        };
        let (state_tx, state_rx) = watch::channel(initial);

        let task = SearchTask {
            backend: Arc::clone(&self.backend),
            language: self.language.clone(),
            query,
            delay,
            generation,
            token: token.clone(),
            state: state_tx,
            outcomes: self.outcome_tx.clone(),
        };
        let handle = tokio::spawn(task.run());

        self.pending = Some(PendingSearch {
            token,
            state: state_rx,
            handle,
        });
        generation
    }
}

impl<R: RawSearch> Drop for SearchExecutor<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct SearchTask<R> {
    backend: Arc<R>,
    language: String,
    query: String,
    delay: Duration,
    generation: u64,
    token: CancellationToken,
    state: watch::Sender<SearchState>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
}

impl<R: RawSearch> SearchTask<R> {
    async fn run(self) {
        if !self.delay.is_zero() {
            tokio::select! {
                _ = self.token.cancelled() => {
                    self.state.send_replace(SearchState::Idle);
                    return;
                }
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        let outcome = match validation::validate(&self.query) {
            Ok(validated) => self.search(validated).await,
            Err(error) => SearchOutcome::Failed {
                generation: self.generation,
                error,
            },
        };

        self.state.send_replace(SearchState::Idle);
        // Receiver is gone only when the executor was dropped
        let _ = self.outcomes.send(outcome);
    }

    async fn search(&self, validated: ValidatedQuery) -> SearchOutcome {
        self.state.send_replace(SearchState::Searching);

        let request = SearchRequest {
            query: validated.backend_query,
            search_type: validated.search_type,
            language: self.language.clone(),
        };

        tracing::info!(
            target: "search",
            query = %request.query,
            search_type = %request.search_type,
            language = %request.language,
            "Searching"
        );

        let result = tokio::select! {
            _ = self.token.cancelled() => Err(SearchError::Cancelled),
            result = self.backend.search(request, self.token.clone()) => result,
        };

        let generation = self.generation;
        match result {
            _ if self.token.is_cancelled() => SearchOutcome::Cancelled { generation },
            Ok(results) => {
                tracing::info!(target: "search", count = results.len(), "Search complete");
                SearchOutcome::Completed {
                    generation,
                    query: validated.raw,
                    search_type: validated.search_type,
                    results,
                }
            }
            Err(SearchError::Cancelled) => SearchOutcome::Cancelled { generation },
            Err(error) => {
                tracing::warn!(target: "search", error = %error, "Search failed");
                SearchOutcome::Failed { generation, error }
            }
        }
    }
}
