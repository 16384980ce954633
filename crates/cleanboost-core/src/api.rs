//! HTTP client for the CleanBoost backend (`/api/v1`).
//!
//! Thin request/response layer: every method is one endpoint, errors carry
//! the backend's FastAPI `detail` message where one is present, and no call
//! is ever retried here. Retry policy belongs to the user.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{AuthError, TokenSource};
use crate::types::{
    CleanOutcome, RemainsReport, ScanItem, ScanSnapshot, ScanTicket, SystemStatus,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected request ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the backend API, cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000/api/v1`).
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenSource>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorization(&self) -> Result<String, ApiError> {
        Ok(format!("Bearer {}", self.token.bearer_token()?))
    }

    /// Fetch the current system utilization snapshot.
    ///
    /// Unauthenticated, matching the backend: the status endpoint is the one
    /// read-only surface exposed without a token.
    pub async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        let resp = self
            .http
            .get(self.url("/system/status"))
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Kick off a backend scan. The returned ticket is an acceptance ack;
    /// progress is observed by polling [`scan_results`](Self::scan_results).
    pub async fn start_scan(&self) -> Result<ScanTicket, ApiError> {
        let resp = self
            .http
            .post(self.url("/scan/start"))
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, self.authorization()?)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Poll the scan results endpoint.
    ///
    /// A 404 means the backend has no cached results yet for an in-flight
    /// scan; that is a pending snapshot, not an error.
    pub async fn scan_results(&self) -> Result<ScanSnapshot, ApiError> {
        let resp = self
            .http
            .get(self.url("/scan/results"))
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, self.authorization()?)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ScanSnapshot::pending());
        }
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Search AppData and the registry for remnants of `program_name`.
    pub async fn search_remains(&self, program_name: &str) -> Result<RemainsReport, ApiError> {
        let resp = self
            .http
            .post(self.url("/scan/remains"))
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, self.authorization()?)
            .json(&serde_json::json!({ "program_name": program_name }))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Submit scan items for deletion.
    pub async fn execute_clean(&self, items: &[ScanItem]) -> Result<CleanOutcome, ApiError> {
        self.post_clean("/clean/execute", items).await
    }

    /// Submit remnant items for deletion.
    pub async fn clean_remains(&self, items: &[ScanItem]) -> Result<CleanOutcome, ApiError> {
        self.post_clean("/clean/remains", items).await
    }

    async fn post_clean(&self, path: &str, items: &[ScanItem]) -> Result<CleanOutcome, ApiError> {
        let resp = self
            .http
            .post(self.url(path))
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, self.authorization()?)
            .json(&serde_json::json!({ "items_to_delete": items }))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Map a non-2xx response to [`ApiError::Rejected`], salvaging the
    /// FastAPI `detail` message when the body carries one.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ApiError::Rejected { status, detail })
    }
}
