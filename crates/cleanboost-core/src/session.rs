//! Single state container for the scan-clean workflow.
//!
//! The original client scattered this state across several near-duplicate
//! UI components, each with its own drifting copy of the toggle and clean
//! logic. Here everything lives in one place with explicit transitions: one
//! selection per workflow, results replaced wholesale, and no background
//! task ever mutating a selection.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::clean::{CleanError, CleanupExecutor, Confirmation};
use crate::scan::{ScanController, ScanError};
use crate::selection::SelectionSet;
use crate::types::{CleanOutcome, ItemKind, RemainsReport, ScanItem, ScanSnapshot};

/// Delay between a successful cleanup and the follow-up rescan.
pub const DEFAULT_RESCAN_DELAY: Duration = Duration::from_millis(2000);

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("program name must not be empty")]
    EmptyProgramName,
}

/// Owns the selections and latest backend read models for one user session.
#[derive(Debug)]
pub struct CleanerSession {
    api: ApiClient,
    scanner: ScanController,
    executor: CleanupExecutor,
    rescan_delay: Duration,

    selection: SelectionSet,
    remains_selection: SelectionSet,
    remains: Option<RemainsReport>,
    program_query: String,
    last_clean: Option<CleanOutcome>,
}

impl CleanerSession {
    pub fn new(api: ApiClient, poll_interval: Duration, rescan_delay: Duration) -> Self {
        Self {
            scanner: ScanController::new(api.clone(), poll_interval),
            executor: CleanupExecutor::new(api.clone()),
            api,
            rescan_delay,
            selection: SelectionSet::new(),
            remains_selection: SelectionSet::new(),
            remains: None,
            program_query: String::new(),
            last_clean: None,
        }
    }

    /// The scan controller, for state subscriptions.
    pub fn scanner(&self) -> &ScanController {
        &self.scanner
    }

    /// Scan selection, mutated only through the toggle methods below.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Remnant selection.
    pub fn remains_selection(&self) -> &SelectionSet {
        &self.remains_selection
    }

    /// Latest remnant search report, if a search has run.
    pub fn remains(&self) -> Option<&RemainsReport> {
        self.remains.as_ref()
    }

    /// Program name behind the latest remnant search; empty until a search
    /// runs and again after a successful remnant cleanup.
    pub fn program_query(&self) -> &str {
        &self.program_query
    }

    /// Outcome of the most recent cleanup in this session.
    pub fn last_clean(&self) -> Option<&CleanOutcome> {
        self.last_clean.as_ref()
    }

    /// Run a scan cycle to completion.
    ///
    /// Starting a new scan resets the selection and discards the previous
    /// scan and clean results before the start request goes out.
    pub async fn start_scan(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<ScanSnapshot, SessionError> {
        self.selection.clear();
        self.last_clean = None;
        Ok(self.scanner.run_scan(cancel).await?)
    }

    /// Toggle one scan item in or out of the selection.
    pub fn toggle(&mut self, item: &ScanItem) -> bool {
        self.selection.toggle(item)
    }

    /// Toggle every scan item of `kind` from the latest snapshot.
    pub fn toggle_all_of_kind(&mut self, kind: ItemKind) {
        if let Some(snapshot) = self.scanner.last_result() {
            self.selection
                .toggle_all_of_kind(kind, &snapshot.scan_results);
        }
    }

    /// Delete the confirmed selection, then rescan after the configured
    /// delay. The rescan is scheduled exactly once per successful clean.
    pub async fn clean_and_rescan(
        &mut self,
        confirmation: Confirmation,
        cancel: &CancellationToken,
    ) -> Result<CleanOutcome, SessionError> {
        let outcome = self
            .executor
            .execute(&mut self.selection, confirmation)
            .await?;
        self.last_clean = Some(outcome.clone());

        info!(delay_ms = self.rescan_delay.as_millis() as u64, "scheduling rescan");
        tokio::select! {
            () = cancel.cancelled() => return Ok(outcome),
            () = tokio::time::sleep(self.rescan_delay) => {}
        }
        // The follow-up scan resets selection state like any other; its
        // result is observable through the scanner. A failed rescan does not
        // invalidate the completed cleanup.
        self.selection.clear();
        if let Err(err) = self.scanner.run_scan(cancel).await {
            tracing::warn!(error = %err, "post-clean rescan failed");
        }
        Ok(outcome)
    }

    /// Search for remnants of `program_name`.
    ///
    /// An empty or whitespace name is rejected before any request is sent.
    /// A new search resets the remnant selection.
    pub async fn search_remains(
        &mut self,
        program_name: &str,
    ) -> Result<&RemainsReport, SessionError> {
        let trimmed = program_name.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyProgramName);
        }

        self.remains = None;
        self.remains_selection.clear();
        self.program_query = trimmed.to_string();

        let report = self.api.search_remains(trimmed).await?;
        Ok(&*self.remains.insert(report))
    }

    /// Toggle one remnant item.
    pub fn toggle_remains(&mut self, item: &ScanItem) -> bool {
        self.remains_selection.toggle(item)
    }

    /// Toggle the whole AppData or registry section of the latest report.
    pub fn toggle_all_remains(&mut self, registry: bool) {
        if let Some(report) = &self.remains {
            let candidates = if registry {
                &report.registry_items
            } else {
                &report.appdata_items
            };
            self.remains_selection.toggle_all(candidates);
        }
    }

    /// Delete the confirmed remnant selection. Success resets the entire
    /// remnant search state: report, selection, and query.
    pub async fn clean_remains(
        &mut self,
        confirmation: Confirmation,
    ) -> Result<CleanOutcome, SessionError> {
        let outcome = self
            .executor
            .execute_remains(&mut self.remains_selection, confirmation)
            .await?;
        self.remains = None;
        self.program_query.clear();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FAST: Duration = Duration::from_millis(20);

    fn session(server: &mockito::Server) -> CleanerSession {
        let api = ApiClient::new(server.url(), Arc::new(StaticToken::new("t")));
        CleanerSession::new(api, FAST, FAST)
    }

    async fn mock_scan(server: &mut mockito::Server, body: &str) -> (mockito::Mock, mockito::Mock) {
        let start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_body(r#"{"message":"ok","scan_id":"1"}"#)
            .create_async()
            .await;
        let results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        (start, results)
    }

    const SCAN_BODY: &str = r#"{
        "status": "SUCCESS",
        "scan_results": [
            {"path": "/tmp/a.log", "name": "a.log", "size": 1024, "type": "TEMP_FILES"},
            {"path": "/tmp/b.tmp", "name": "b.tmp", "size": 2048, "type": "TEMP_FILES"},
            {"path": "/prog/x.dll", "name": "x.dll", "size": 512, "type": "PROGRAM_REMAINS"}
        ],
        "total_scannable_size": 3584
    }"#;

    #[tokio::test]
    async fn scan_resets_selection_and_prior_outcome() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_scan(&mut server, SCAN_BODY).await;

        let mut session = session(&server);
        let cancel = CancellationToken::new();
        session.start_scan(&cancel).await.unwrap();

        session.toggle_all_of_kind(ItemKind::TempFiles);
        assert_eq!(session.selection().len(), 2);
        assert_eq!(session.selection().total_size(), 3072);

        session.start_scan(&cancel).await.unwrap();
        assert!(session.selection().is_empty());
        assert!(session.last_clean().is_none());
    }

    #[tokio::test]
    async fn clean_schedules_exactly_one_rescan() {
        let mut server = mockito::Server::new_async().await;
        let starts = Arc::new(AtomicUsize::new(0));
        let counter = starts.clone();
        let _start = server
            .mock("POST", "/scan/start")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                br#"{"message":"ok","scan_id":"1"}"#.to_vec()
            })
            .expect(2)
            .create_async()
            .await;
        let _results = server
            .mock("GET", "/scan/results")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SCAN_BODY)
            .create_async()
            .await;
        let _clean = server
            .mock("POST", "/clean/execute")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message":"done","deleted_count":2,"total_cleaned_size":3072,"error_count":0}"#,
            )
            .create_async()
            .await;

        let mut session = session(&server);
        let cancel = CancellationToken::new();
        session.start_scan(&cancel).await.unwrap();
        session.toggle_all_of_kind(ItemKind::TempFiles);

        let confirmation = Confirmation::acknowledge(session.selection()).unwrap();
        let outcome = session
            .clean_and_rescan(confirmation, &cancel)
            .await
            .unwrap();

        assert_eq!(outcome.deleted_count, 2);
        assert!(session.selection().is_empty());
        // One start for the user scan, one for the scheduled rescan.
        assert_eq!(starts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_program_name_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/scan/remains")
            .expect(0)
            .create_async()
            .await;

        let mut session = session(&server);
        let err = session.search_remains("   ").await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyProgramName));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn remains_clean_resets_search_state() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("POST", "/scan/remains")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"appdata_items":[{"path":"C:\\AppData\\Old","name":"Old","size":4096,"type":"folder"}],
                    "registry_items":[{"path":"HKCU\\Software\\Old","name":"Old","size":0,"type":"registry_key"}],
                    "total_size":4096}"#,
            )
            .create_async()
            .await;
        let _clean = server
            .mock("POST", "/clean/remains")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message":"done","deleted_count":2,"total_cleaned_size":4096,"error_count":0}"#,
            )
            .create_async()
            .await;

        let mut session = session(&server);
        let report = session.search_remains("  Old ").await.unwrap();
        assert_eq!(report.appdata_items.len(), 1);
        assert_eq!(session.program_query(), "Old");

        session.toggle_all_remains(false);
        session.toggle_all_remains(true);
        assert_eq!(session.remains_selection().len(), 2);

        let confirmation = Confirmation::acknowledge(session.remains_selection()).unwrap();
        session.clean_remains(confirmation).await.unwrap();

        assert!(session.remains().is_none());
        assert!(session.remains_selection().is_empty());
        assert!(session.program_query().is_empty());
    }
}
