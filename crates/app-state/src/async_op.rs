//! Async operation state machine
//!
//! Every screen drives its loading/refresh/pagination lifecycle through one
//! [`AsyncController`] instead of ad-hoc flags. The controller enforces the
//! state machine invariants: at most one fetch in flight, stale responses
//! discarded by a monotonic request id, last-known-good data preserved across
//! failed refreshes, and no state writes after the screen detaches.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::ErrorInfo;

/// Lifecycle status of an async operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsyncStatus {
    /// Nothing has been requested yet
    Idle,

    /// First fetch in flight
    Loading,

    /// Re-fetch in flight; existing data still shown
    Refreshing,

    /// Next-page fetch in flight; existing data still shown
    LoadingMore,

    /// Last fetch applied successfully
    Success,

    /// Last fetch failed and there is no data to fall back to
    Error,
}

impl AsyncStatus {
    /// Whether a fetch is currently in flight
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            AsyncStatus::Loading | AsyncStatus::Refreshing | AsyncStatus::LoadingMore
        )
    }
}

/// Snapshot of a screen's async state
///
/// `data` holds the last-known-good value through refreshes and failed
/// fetches (stale-while-revalidate); it is cleared only by a hard reset.
/// `page` is 1-based and stays 0 until the first page applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncState<T> {
    /// Current lifecycle status
    pub status: AsyncStatus,

    /// Last successfully applied value, if any
    pub data: Option<T>,

    /// Most recent error, if the last fetch failed
    pub error: Option<ErrorInfo>,

    /// Highest applied page number
    pub page: u32,

    /// Whether another page is available
    pub has_more: bool,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            status: AsyncStatus::Idle,
            data: None,
            error: None,
            page: 0,
            has_more: false,
        }
    }
}

impl<T> AsyncState<T> {
    /// Whether the state holds displayable data
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// What a `run` call is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First load (or reload after a hard reset)
    Initial,

    /// Pull-to-refresh; replaces the result set on success
    Refresh,

    /// Infinite scroll; appends on success
    LoadMore,
}

impl FetchMode {
    fn in_flight_status(self) -> AsyncStatus {
        match self {
            FetchMode::Initial => AsyncStatus::Loading,
            FetchMode::Refresh => AsyncStatus::Refreshing,
            FetchMode::LoadMore => AsyncStatus::LoadingMore,
        }
    }
}

/// How a `run` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum RunOutcome {
    /// The response (success or error) was applied to state
    Applied,

    /// The call was rejected up front: a fetch was already in flight, or a
    /// load-more had nothing to do
    Ignored,

    /// The response arrived after a newer request took over and was dropped
    Superseded,

    /// The controller was detached before the response could apply
    Detached,
}

/// Controller configuration
#[derive(Debug, Clone)]
pub struct AsyncConfig {
    /// Deadline for a single fetch; exceeding it yields a `TimedOut` error
    pub timeout: Option<Duration>,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

struct Inner<T> {
    state: AsyncState<T>,
    /// (request id, mode) of the fetch currently in flight
    in_flight: Option<(u64, FetchMode)>,
    /// Monotonic request id; responses with a stale id are discarded
    seq: u64,
    detached: bool,
}

/// Driver for one screen's async state
///
/// Clones share the same state instance. Exactly one fetch is triggered per
/// accepted `run` call; retries are a caller concern.
pub struct AsyncController<T> {
    inner: Arc<Mutex<Inner<T>>>,
    config: AsyncConfig,
}

impl<T> Clone for AsyncController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}

impl<T> Default for AsyncController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncController<T> {
    /// Create a controller with the default configuration
    pub fn new() -> Self {
        Self::with_config(AsyncConfig::default())
    }

    /// Create a controller with an explicit configuration
    pub fn with_config(config: AsyncConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: AsyncState::default(),
                in_flight: None,
                seq: 0,
                detached: false,
            })),
            config,
        }
    }

    /// Run a fetch, replacing `data` with the result on success
    pub async fn run<Fut>(&self, mode: FetchMode, fut: Fut) -> RunOutcome
    where
        Fut: Future<Output = Result<T, ErrorInfo>>,
    {
        self.run_with(mode, fut, |state, value| state.data = Some(value))
            .await
    }

    /// Run a fetch with a custom apply step
    ///
    /// The response type `R` need not match the stored data: `apply` folds
    /// the response into state under the lock, only if it is still current.
    /// Pagination uses this to fold a fetched page into the accumulated
    /// list atomically with the status transition.
    pub async fn run_with<R, Fut, A>(&self, mode: FetchMode, fut: Fut, apply: A) -> RunOutcome
    where
        Fut: Future<Output = Result<R, ErrorInfo>>,
        A: FnOnce(&mut AsyncState<T>, R),
    {
        let id = match self.begin(mode) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        let result = match self.config.timeout {
            Some(deadline) => match tokio::time::timeout(deadline, fut).await {
                Ok(result) => result,
                Err(_) => Err(ErrorInfo::timed_out("The request took too long.")),
            },
            None => fut.await,
        };

        self.complete(id, result, apply)
    }

    /// Admission control: decides whether this `run` may issue a fetch
    fn begin(&self, mode: FetchMode) -> Result<u64, RunOutcome> {
        let mut inner = self.inner.lock();

        if inner.detached {
            return Err(RunOutcome::Detached);
        }

        match inner.in_flight {
            Some((stale_id, FetchMode::LoadMore)) if mode == FetchMode::Refresh => {
                // Newer request wins: a refresh supersedes a stale load-more.
                tracing::debug!(stale_id, "refresh superseding in-flight load-more");
            }
            Some(_) => return Err(RunOutcome::Ignored),
            None => {
                if mode == FetchMode::LoadMore
                    && !(inner.state.status == AsyncStatus::Success && inner.state.has_more)
                {
                    return Err(RunOutcome::Ignored);
                }
            }
        }

        inner.seq += 1;
        let id = inner.seq;
        inner.in_flight = Some((id, mode));
        inner.state.status = mode.in_flight_status();
        tracing::debug!(id, ?mode, "fetch started");
        Ok(id)
    }

    /// Apply a response if it is still the current request
    fn complete<R, A>(&self, id: u64, result: Result<R, ErrorInfo>, apply: A) -> RunOutcome
    where
        A: FnOnce(&mut AsyncState<T>, R),
    {
        let mut inner = self.inner.lock();

        if inner.detached {
            tracing::debug!(id, "discarding response after detach");
            return RunOutcome::Detached;
        }

        match inner.in_flight {
            Some((current, _)) if current == id => inner.in_flight = None,
            _ => {
                tracing::debug!(id, "discarding superseded response");
                return RunOutcome::Superseded;
            }
        }

        match result {
            Ok(value) => {
                apply(&mut inner.state, value);
                inner.state.error = None;
                inner.state.status = AsyncStatus::Success;
                tracing::debug!(id, "fetch applied");
            }
            Err(err) => {
                tracing::debug!(id, kind = ?err.kind, "fetch failed");
                inner.state.error = Some(err);
                // A failed refresh or load-more never clears existing data.
                inner.state.status = if inner.state.data.is_some() {
                    AsyncStatus::Success
                } else {
                    AsyncStatus::Error
                };
            }
        }
        RunOutcome::Applied
    }

    /// Discard all state and invalidate any in-flight fetch
    ///
    /// This is the only transition that clears `data`; used when filters or
    /// search change and result sets must not mix.
    pub fn hard_reset(&self) {
        let mut inner = self.inner.lock();
        inner.in_flight = None;
        inner.state = AsyncState::default();
        tracing::debug!("state hard reset");
    }

    /// Mark the owning screen as unmounted
    ///
    /// Any fetch still in flight resolves into a silent discard.
    pub fn detach(&self) {
        let mut inner = self.inner.lock();
        inner.detached = true;
        inner.in_flight = None;
    }

    /// Whether a fetch is currently in flight
    pub fn is_in_flight(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }
}

impl<T: Clone> AsyncController<T> {
    /// Snapshot of the current state
    pub fn state(&self) -> AsyncState<T> {
        self.inner.lock().state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    type Ctl = AsyncController<Vec<u32>>;

    async fn ready(value: Vec<u32>) -> Result<Vec<u32>, ErrorInfo> {
        Ok(value)
    }

    #[tokio::test]
    async fn test_initial_success() {
        let ctl = Ctl::new();
        assert_eq!(ctl.state().status, AsyncStatus::Idle);

        let outcome = ctl.run(FetchMode::Initial, ready(vec![1, 2])).await;
        assert_eq!(outcome, RunOutcome::Applied);

        let state = ctl.state();
        assert_eq!(state.status, AsyncStatus::Success);
        assert_eq!(state.data, Some(vec![1, 2]));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_run_with_folds_response_into_state() {
        // The response type differs from the stored data; the apply step
        // folds it in. This is how a fetched page becomes the cumulative
        // list without the controller knowing about pages.
        struct Chunk {
            items: Vec<u32>,
            total: usize,
        }

        let ctl = Ctl::new();
        let outcome = ctl
            .run_with(
                FetchMode::Initial,
                async {
                    Ok(Chunk {
                        items: vec![1, 2],
                        total: 4,
                    })
                },
                |state, chunk: Chunk| {
                    state.has_more = chunk.items.len() < chunk.total;
                    state.data = Some(chunk.items);
                },
            )
            .await;
        assert_eq!(outcome, RunOutcome::Applied);

        let state = ctl.state();
        assert_eq!(state.data, Some(vec![1, 2]));
        assert!(state.has_more);
    }

    #[tokio::test]
    async fn test_initial_failure_without_data_is_error() {
        let ctl = Ctl::new();
        let outcome = ctl
            .run(FetchMode::Initial, async { Err(ErrorInfo::fetch("down")) })
            .await;
        assert_eq!(outcome, RunOutcome::Applied);

        let state = ctl.state();
        assert_eq!(state.status, AsyncStatus::Error);
        assert!(state.data.is_none());
        assert_eq!(state.error.unwrap().message, "down");
    }

    #[tokio::test]
    async fn test_failed_refresh_preserves_data() {
        let ctl = Ctl::new();
        let _ = ctl.run(FetchMode::Initial, ready(vec![1])).await;

        let outcome = ctl
            .run(FetchMode::Refresh, async { Err(ErrorInfo::fetch("down")) })
            .await;
        assert_eq!(outcome, RunOutcome::Applied);

        let state = ctl.state();
        // Stale data survives; status reverts to Success with the error set.
        assert_eq!(state.status, AsyncStatus::Success);
        assert_eq!(state.data, Some(vec![1]));
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_load_more_requires_has_more() {
        let ctl = Ctl::new();
        let _ = ctl.run(FetchMode::Initial, ready(vec![1])).await;
        assert!(!ctl.state().has_more);

        let outcome = ctl.run(FetchMode::LoadMore, ready(vec![2])).await;
        assert_eq!(outcome, RunOutcome::Ignored);
        assert_eq!(ctl.state().data, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_second_run_while_in_flight_is_ignored() {
        let ctl = Ctl::new();
        let (tx, rx) = oneshot::channel::<Result<Vec<u32>, ErrorInfo>>();

        let first = {
            let ctl = ctl.clone();
            tokio::spawn(async move {
                ctl.run(FetchMode::Initial, async move { rx.await.unwrap() })
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert!(ctl.is_in_flight());

        let second = ctl.run(FetchMode::Initial, ready(vec![9])).await;
        assert_eq!(second, RunOutcome::Ignored);

        tx.send(Ok(vec![1])).unwrap();
        assert_eq!(first.await.unwrap(), RunOutcome::Applied);
        assert_eq!(ctl.state().data, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_refresh_supersedes_stale_load_more() {
        let ctl = Ctl::new();
        let _ = ctl
            .run_with(FetchMode::Initial, ready(vec![1]), |state, value| {
                state.data = Some(value);
                state.has_more = true;
            })
            .await;

        let (more_tx, more_rx) = oneshot::channel::<Result<Vec<u32>, ErrorInfo>>();
        let load_more = {
            let ctl = ctl.clone();
            tokio::spawn(async move {
                ctl.run(FetchMode::LoadMore, async move { more_rx.await.unwrap() })
                    .await
            })
        };
        tokio::task::yield_now().await;

        let (refresh_tx, refresh_rx) = oneshot::channel::<Result<Vec<u32>, ErrorInfo>>();
        let refresh = {
            let ctl = ctl.clone();
            tokio::spawn(async move {
                ctl.run(FetchMode::Refresh, async move { refresh_rx.await.unwrap() })
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert_eq!(ctl.state().status, AsyncStatus::Refreshing);

        // The stale load-more resolves first and must be dropped.
        more_tx.send(Ok(vec![1, 2])).unwrap();
        assert_eq!(load_more.await.unwrap(), RunOutcome::Superseded);
        assert_eq!(ctl.state().data, Some(vec![1]));

        refresh_tx.send(Ok(vec![7])).unwrap();
        assert_eq!(refresh.await.unwrap(), RunOutcome::Applied);
        assert_eq!(ctl.state().data, Some(vec![7]));
        assert_eq!(ctl.state().status, AsyncStatus::Success);
    }

    #[tokio::test]
    async fn test_detach_discards_pending_response() {
        let ctl = Ctl::new();
        let (tx, rx) = oneshot::channel::<Result<Vec<u32>, ErrorInfo>>();

        let pending = {
            let ctl = ctl.clone();
            tokio::spawn(async move {
                ctl.run(FetchMode::Initial, async move { rx.await.unwrap() })
                    .await
            })
        };
        tokio::task::yield_now().await;

        ctl.detach();
        tx.send(Ok(vec![1])).unwrap();

        assert_eq!(pending.await.unwrap(), RunOutcome::Detached);
        // No write after unmount: state never saw the response.
        assert!(ctl.state().data.is_none());
    }

    #[tokio::test]
    async fn test_run_after_detach_is_rejected() {
        let ctl = Ctl::new();
        ctl.detach();
        let outcome = ctl.run(FetchMode::Initial, ready(vec![1])).await;
        assert_eq!(outcome, RunOutcome::Detached);
    }

    #[tokio::test]
    async fn test_hard_reset_clears_data_and_invalidates_in_flight() {
        let ctl = Ctl::new();
        let _ = ctl.run(FetchMode::Initial, ready(vec![1])).await;

        let (tx, rx) = oneshot::channel::<Result<Vec<u32>, ErrorInfo>>();
        let pending = {
            let ctl = ctl.clone();
            tokio::spawn(async move {
                ctl.run(FetchMode::Refresh, async move { rx.await.unwrap() })
                    .await
            })
        };
        tokio::task::yield_now().await;

        ctl.hard_reset();
        assert_eq!(ctl.state().status, AsyncStatus::Idle);
        assert!(ctl.state().data.is_none());

        // The response from before the reset must not leak in.
        tx.send(Ok(vec![99])).unwrap();
        assert_eq!(pending.await.unwrap(), RunOutcome::Superseded);
        assert!(ctl.state().data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_yields_timed_out_error() {
        let ctl = Ctl::with_config(AsyncConfig {
            timeout: Some(Duration::from_secs(5)),
        });

        let outcome = ctl
            .run(FetchMode::Initial, async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(vec![1])
            })
            .await;

        assert_eq!(outcome, RunOutcome::Applied);
        let state = ctl.state();
        assert_eq!(state.status, AsyncStatus::Error);
        assert_eq!(state.error.unwrap().kind, crate::ErrorKind::TimedOut);
    }
}
