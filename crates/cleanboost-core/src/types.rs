//! Wire types for the CleanBoost backend API.
//!
//! These are transient read models rebuilt wholesale from each backend
//! response; nothing here is persisted client-side. The backend is the sole
//! source of truth for what exists on disk and what got deleted.

use serde::{Deserialize, Serialize};

/// Category tag attached to every discoverable item.
///
/// Scan results use the upper-case categories; program-remnant searches use
/// the lower-case entry kinds. The vocabulary is closed: an unknown tag from
/// the backend is a protocol error, not something we silently pass through
/// to a deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Temporary files (system/user temp directories).
    #[serde(rename = "TEMP_FILES")]
    TempFiles,
    /// Leftovers from installed or uninstalled programs.
    #[serde(rename = "PROGRAM_REMAINS")]
    ProgramRemains,
    /// Stale browser cache entries.
    #[serde(rename = "BROWSER_CACHE")]
    BrowserCache,
    /// Recycle-bin contents.
    #[serde(rename = "RECYCLE_BIN")]
    RecycleBin,
    /// A single file found by a remnant search.
    #[serde(rename = "file")]
    File,
    /// A directory found by a remnant search.
    #[serde(rename = "folder")]
    Folder,
    /// A registry key associated with a program (size is always zero).
    #[serde(rename = "registry_key")]
    RegistryKey,
}

impl ItemKind {
    /// Human-readable label for listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::TempFiles => "Temporary files",
            Self::ProgramRemains => "Program remains",
            Self::BrowserCache => "Browser cache",
            Self::RecycleBin => "Recycle bin",
            Self::File => "File",
            Self::Folder => "Folder",
            Self::RegistryKey => "Registry key",
        }
    }
}

/// One discoverable, deletable unit reported by the backend.
///
/// `path` is the natural key: two items are the same item iff their paths
/// are equal, regardless of any other field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanItem {
    /// Unique filesystem (or registry) identifier.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Byte count. Zero for registry entries.
    #[serde(default)]
    pub size: u64,
    /// Category tag, serialized as the backend's `type` field.
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Terminal and non-terminal scan states reported by `/scan/results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    /// Scan still running; results not yet available.
    #[serde(rename = "PENDING")]
    Pending,
    /// Scan finished; `scan_results` is complete.
    #[serde(rename = "SUCCESS")]
    Success,
    /// Scan aborted server-side; see the snapshot's `error` field.
    #[serde(rename = "ERROR")]
    Error,
}

/// Snapshot returned by `GET /scan/results`.
///
/// While a scan is in flight the backend either returns `PENDING` or has no
/// cached results at all (HTTP 404); the client maps both to a pending
/// snapshot. `total_scannable_size` is backend-aggregated and is not
/// guaranteed to equal the sum of `scan_results` sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSnapshot {
    /// Scan progress state.
    pub status: ScanStatus,
    /// Discovered items; empty until the scan succeeds.
    #[serde(default)]
    pub scan_results: Vec<ScanItem>,
    /// Total reclaimable bytes as computed by the backend.
    #[serde(default)]
    pub total_scannable_size: u64,
    /// Backend error message when `status` is `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanSnapshot {
    /// Snapshot equivalent to "scan still running".
    pub fn pending() -> Self {
        Self {
            status: ScanStatus::Pending,
            scan_results: Vec::new(),
            total_scannable_size: 0,
            error: None,
        }
    }
}

/// Acceptance ack for `POST /scan/start`. The id is opaque; results are
/// polled from a fixed endpoint regardless.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanTicket {
    /// Backend acceptance message.
    #[serde(default)]
    pub message: String,
    /// Opaque scan/job identifier. Both spellings exist across backend
    /// revisions.
    #[serde(alias = "scanId", alias = "scan_id", default)]
    pub scan_id: String,
}

/// Result of a program-remnant search (`POST /scan/remains`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemainsReport {
    /// Entries rooted in per-user application data.
    #[serde(default)]
    pub appdata_items: Vec<ScanItem>,
    /// Registry keys/values associated with the program.
    #[serde(default)]
    pub registry_items: Vec<ScanItem>,
    /// Backend-aggregated byte total across both lists.
    #[serde(default)]
    pub total_size: u64,
}

impl RemainsReport {
    /// True when the search found nothing in either location.
    pub fn is_empty(&self) -> bool {
        self.appdata_items.is_empty() && self.registry_items.is_empty()
    }
}

/// Outcome of a deletion request.
///
/// `deleted_count` may be smaller than the number of items submitted: the
/// backend skips protected paths. Partial success is not an error and the
/// remainder is never retried automatically.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanOutcome {
    /// Backend completion message.
    #[serde(default)]
    pub message: String,
    /// Number of items actually removed.
    pub deleted_count: u64,
    /// Bytes reclaimed.
    pub total_cleaned_size: u64,
    /// Number of items that failed to delete server-side.
    #[serde(default)]
    pub error_count: u64,
}

/// Periodic system utilization snapshot from `GET /system/status`.
///
/// Percentages are clamped by the producer; the client displays raw values
/// and never re-validates the range.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemStatus {
    /// CPU utilization, percent.
    pub cpu_percent: f64,
    /// RAM utilization, percent.
    pub ram_percent: f64,
    /// RAM in use, gigabytes.
    #[serde(default)]
    pub ram_used_gb: f64,
    /// Total RAM, gigabytes.
    #[serde(default)]
    pub ram_total_gb: f64,
    /// GPU utilization, percent. Present on the wire but unused here.
    #[serde(default)]
    pub gpu_percent: f64,
    /// Storage utilization, percent.
    pub storage_percent: f64,
    /// Storage in use, gigabytes.
    #[serde(default)]
    pub storage_used_gb: f64,
    /// Total storage, gigabytes.
    #[serde(default)]
    pub storage_total_gb: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_item_deserializes_backend_type_tag() {
        let json = r#"{"path":"/tmp/a.log","name":"a.log","size":1024,"type":"TEMP_FILES"}"#;
        let item: ScanItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::TempFiles);
        assert_eq!(item.size, 1024);
    }

    #[test]
    fn registry_item_defaults_size_to_zero() {
        let json = r#"{"path":"HKCU\\Software\\Foo","name":"Foo","type":"registry_key"}"#;
        let item: ScanItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::RegistryKey);
        assert_eq!(item.size, 0);
    }

    #[test]
    fn scan_ticket_accepts_both_id_spellings() {
        let camel: ScanTicket = serde_json::from_str(r#"{"message":"ok","scanId":"abc"}"#).unwrap();
        let snake: ScanTicket =
            serde_json::from_str(r#"{"message":"ok","scan_id":"abc"}"#).unwrap();
        assert_eq!(camel.scan_id, "abc");
        assert_eq!(snake.scan_id, "abc");
    }

    #[test]
    fn pending_snapshot_has_no_results() {
        let snap: ScanSnapshot = serde_json::from_str(r#"{"status":"PENDING"}"#).unwrap();
        assert_eq!(snap.status, ScanStatus::Pending);
        assert!(snap.scan_results.is_empty());
        assert_eq!(snap.total_scannable_size, 0);
    }

    #[test]
    fn clean_item_round_trips_for_deletion_request() {
        let item = ScanItem {
            path: "/tmp/a.log".to_string(),
            name: "a.log".to_string(),
            size: 1024,
            kind: ItemKind::TempFiles,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "TEMP_FILES");
        assert_eq!(json["size"], 1024);
    }
}
