//! Polling scan controller.
//!
//! Drives one backend scan cycle: fire `/scan/start`, then poll
//! `/scan/results` on a fixed cadence until a terminal status arrives. The
//! loop is a cancellable task rather than a bare interval timer, so teardown
//! is guaranteed on every exit path -- terminal state, transport error, or
//! caller cancellation -- never just the happy path.

use std::sync::RwLock;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::types::{ScanSnapshot, ScanStatus};

/// Default cadence for `/scan/results` polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Controller lifecycle state, republished to subscribers on every
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No scan running and no result held from the current cycle.
    #[default]
    Idle,
    /// Start accepted; polling for a terminal status.
    Scanning,
    /// Terminal: a successful snapshot is available via `last_result`.
    Done,
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("scan failed on the backend: {0}")]
    Backend(String),

    #[error("a scan is already in flight")]
    AlreadyRunning,

    #[error("scan cancelled")]
    Cancelled,
}

/// Runs scan cycles and exposes their state and latest terminal snapshot.
#[derive(Debug)]
pub struct ScanController {
    api: ApiClient,
    poll_interval: Duration,
    state_tx: watch::Sender<ScanState>,
    result: RwLock<Option<ScanSnapshot>>,
    // Held for the duration of a cycle; try_lock failure means overlap.
    running: Mutex<()>,
}

impl ScanController {
    pub fn new(api: ApiClient, poll_interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(ScanState::Idle);
        Self {
            api,
            poll_interval,
            state_tx,
            result: RwLock::new(None),
            running: Mutex::new(()),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        *self.state_tx.borrow()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state_tx.subscribe()
    }

    /// Snapshot from the most recent successful cycle, if any.
    pub fn last_result(&self) -> Option<ScanSnapshot> {
        self.result.read().expect("result lock poisoned").clone()
    }

    /// Run one full scan cycle to a terminal state.
    ///
    /// Clears any previous snapshot, starts a backend scan, and polls until
    /// `SUCCESS`. Exactly one in-flight cycle is allowed; concurrent calls
    /// fail fast with [`ScanError::AlreadyRunning`]. Any error or a
    /// cancellation returns the controller to `Idle` with no result, and no
    /// poll fires after this function returns.
    ///
    /// # Errors
    ///
    /// [`ScanError::Api`] on transport failure (never retried here),
    /// [`ScanError::Backend`] when the backend reports a failed scan,
    /// [`ScanError::Cancelled`] when `cancel` fires first.
    pub async fn run_scan(&self, cancel: &CancellationToken) -> Result<ScanSnapshot, ScanError> {
        let _running = self.running.try_lock().map_err(|_| ScanError::AlreadyRunning)?;

        self.clear_result();
        self.state_tx.send_replace(ScanState::Scanning);

        match self.scan_cycle(cancel).await {
            Ok(snapshot) => {
                *self.result.write().expect("result lock poisoned") = Some(snapshot.clone());
                self.state_tx.send_replace(ScanState::Done);
                Ok(snapshot)
            }
            Err(err) => {
                self.state_tx.send_replace(ScanState::Idle);
                Err(err)
            }
        }
    }

    async fn scan_cycle(&self, cancel: &CancellationToken) -> Result<ScanSnapshot, ScanError> {
        let ticket = self.api.start_scan().await?;
        debug!(scan_id = %ticket.scan_id, "scan accepted");

        let mut ticks = tokio::time::interval(self.poll_interval);
        // One await per tick: a slow response delays the next poll instead
        // of stacking a second in-flight request behind it.
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval fires immediately; skip straight to the first delay.
        ticks.tick().await;

        loop {
            tokio::select! {
                () = cancel.cancelled() => return Err(ScanError::Cancelled),
                _ = ticks.tick() => {}
            }

            // Each snapshot replaces the previous wholesale.
            let snapshot = self.api.scan_results().await?;
            match snapshot.status {
                ScanStatus::Success => return Ok(snapshot),
                ScanStatus::Error => {
                    let reason = snapshot
                        .error
                        .unwrap_or_else(|| "no error detail".to_string());
                    warn!(%reason, "backend scan failed");
                    return Err(ScanError::Backend(reason));
                }
                ScanStatus::Pending => {
                    debug!("scan still pending");
                }
            }
        }
    }

    fn clear_result(&self) {
        *self.result.write().expect("result lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FAST_POLL: Duration = Duration::from_millis(20);

    fn controller(server: &mockito::Server) -> ScanController {
        let api = ApiClient::new(server.url(), Arc::new(StaticToken::new("t")));
        ScanController::new(api, FAST_POLL)
    }

    const SUCCESS_BODY: &str = r#"{
        "status": "SUCCESS",
        "scan_results": [
            {"path": "/tmp/a.log", "name": "a.log", "size": 1024, "type": "TEMP_FILES"}
        ],
        "total_scannable_size": 1024
    }"#;

    #[tokio::test]
    async fn pending_three_times_then_success_reaches_done() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;

        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                    br#"{"status":"PENDING"}"#.to_vec()
                } else {
                    SUCCESS_BODY.as_bytes().to_vec()
                }
            })
            .expect(4)
            .create_async()
            .await;

        let controller = controller(&server);
        let cancel = CancellationToken::new();
        let snapshot = controller.run_scan(&cancel).await.unwrap();

        assert_eq!(controller.state(), ScanState::Done);
        assert_eq!(snapshot.scan_results.len(), 1);
        assert_eq!(snapshot.scan_results[0].path, "/tmp/a.log");
        assert_eq!(snapshot.total_scannable_size, 1024);

        // Terminal transition is exactly-once: no poll fires after success.
        tokio::time::sleep(FAST_POLL * 4).await;
        assert_eq!(polls.load(Ordering::SeqCst), 4);
        results.assert_async().await;
    }

    #[tokio::test]
    async fn start_failure_returns_to_idle_without_polling() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(500)
            .with_body(r#"{"detail":"scan engine init failed"}"#)
            .create_async()
            .await;
        let results = server
            .mock("GET", "/scan/results")
            .expect(0)
            .create_async()
            .await;

        let controller = controller(&server);
        let err = controller
            .run_scan(&CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::Api(_)));
        assert_eq!(controller.state(), ScanState::Idle);
        assert!(controller.last_result().is_none());
        results.assert_async().await;
    }

    #[tokio::test]
    async fn backend_error_status_surfaces_reason() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;
        let _results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_body(r#"{"status":"ERROR","error":"disk unreadable"}"#)
            .create_async()
            .await;

        let controller = controller(&server);
        let err = controller
            .run_scan(&CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            ScanError::Backend(reason) => assert_eq!(reason, "disk unreadable"),
            other => panic!("expected Backend, got {other:?}"),
        }
        assert_eq!(controller.state(), ScanState::Idle);
    }

    #[tokio::test]
    async fn cancellation_stops_polling_and_restores_idle() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;
        let _results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_body(r#"{"status":"PENDING"}"#)
            .create_async()
            .await;

        let controller = controller(&server);
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(FAST_POLL * 3).await;
            canceller.cancel();
        });

        let err = controller.run_scan(&cancel).await.unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
        assert_eq!(controller.state(), ScanState::Idle);
    }

    #[tokio::test]
    async fn overlapping_run_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;
        let _results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_body(r#"{"status":"PENDING"}"#)
            .create_async()
            .await;

        let controller = Arc::new(controller(&server));
        let cancel = CancellationToken::new();

        let background = controller.clone();
        let background_cancel = cancel.clone();
        let first = tokio::spawn(async move { background.run_scan(&background_cancel).await });

        // Let the first cycle take the slot, then contend.
        tokio::time::sleep(FAST_POLL).await;
        let err = controller.run_scan(&cancel).await.unwrap_err();
        assert!(matches!(err, ScanError::AlreadyRunning));

        cancel.cancel();
        let _ = first.await.unwrap();
    }

    #[tokio::test]
    async fn new_cycle_clears_previous_snapshot() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;
        let results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SUCCESS_BODY)
            .create_async()
            .await;

        let controller = controller(&server);
        let cancel = CancellationToken::new();
        controller.run_scan(&cancel).await.unwrap();
        assert!(controller.last_result().is_some());

        // Swap the results endpoint for a hang-forever pending response and
        // observe the stale snapshot is gone as soon as a new cycle starts.
        results.remove_async().await;
        let _pending = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_body(r#"{"status":"PENDING"}"#)
            .create_async()
            .await;

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(FAST_POLL * 2).await;
            canceller.cancel();
        });
        let _ = controller.run_scan(&cancel).await;
        assert!(controller.last_result().is_none());
        assert_eq!(controller.state(), ScanState::Idle);
    }
}
