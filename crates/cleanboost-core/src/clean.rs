//! Cleanup executor.
//!
//! Deletion is irreversible, so the executor refuses to run without a
//! [`Confirmation`] minted from the exact selection being submitted. The
//! token is consumed by value and fingerprints the selection contents, which
//! rules out both unconfirmed calls and a confirmation cached from an
//! earlier, different selection.

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::selection::SelectionSet;
use crate::types::CleanOutcome;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("nothing selected for deletion")]
    EmptySelection,

    #[error("confirmation does not match the current selection; confirm again")]
    StaleConfirmation,
}

/// Proof that the user acknowledged deleting one specific selection.
///
/// Not clonable and consumed per invocation: every call to
/// [`CleanupExecutor::execute`] needs a freshly acknowledged token, and a
/// token minted for one selection is rejected for any other.
#[derive(Debug)]
pub struct Confirmation {
    fingerprint: String,
}

impl Confirmation {
    /// Acknowledge deletion of the given selection.
    ///
    /// Returns `None` for an empty selection; there is nothing to confirm.
    pub fn acknowledge(selection: &SelectionSet) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        Some(Self {
            fingerprint: fingerprint(selection),
        })
    }
}

fn fingerprint(selection: &SelectionSet) -> String {
    let mut hasher = Sha256::new();
    for item in selection.items() {
        hasher.update(item.path.as_bytes());
        hasher.update([0]);
    }
    hex::encode(hasher.finalize())
}

/// Submits confirmed selections to the backend deletion endpoints.
#[derive(Debug, Clone)]
pub struct CleanupExecutor {
    api: ApiClient,
}

impl CleanupExecutor {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Delete the selected scan items via `/clean/execute`.
    ///
    /// On success the selection is cleared unconditionally -- the backend's
    /// outcome is authoritative even when `deleted_count` is short of the
    /// submitted count. On failure nothing is touched and the caller may
    /// retry with a fresh confirmation.
    pub async fn execute(
        &self,
        selection: &mut SelectionSet,
        confirmation: Confirmation,
    ) -> Result<CleanOutcome, CleanError> {
        self.run(selection, confirmation, false).await
    }

    /// Delete the selected remnant items via `/clean/remains`.
    pub async fn execute_remains(
        &self,
        selection: &mut SelectionSet,
        confirmation: Confirmation,
    ) -> Result<CleanOutcome, CleanError> {
        self.run(selection, confirmation, true).await
    }

    async fn run(
        &self,
        selection: &mut SelectionSet,
        confirmation: Confirmation,
        remains: bool,
    ) -> Result<CleanOutcome, CleanError> {
        // Rejected client-side before any request goes out.
        if selection.is_empty() {
            return Err(CleanError::EmptySelection);
        }
        if confirmation.fingerprint != fingerprint(selection) {
            return Err(CleanError::StaleConfirmation);
        }

        let outcome = if remains {
            self.api.clean_remains(selection.items()).await?
        } else {
            self.api.execute_clean(selection.items()).await?
        };

        info!(
            deleted = outcome.deleted_count,
            errors = outcome.error_count,
            bytes = outcome.total_cleaned_size,
            "cleanup finished"
        );
        selection.clear();
        Ok(outcome)
    }
}
