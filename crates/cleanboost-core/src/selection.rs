//! User-curated set of items slated for deletion.
//!
//! Membership is keyed by `path`, never by object identity, and the set
//! holds at most one entry per path. Only user-initiated toggles mutate it;
//! background pollers read but never write.

use std::collections::{BTreeMap, HashSet};

use crate::types::{ItemKind, ScanItem};

/// Sentinel group for items whose name carries no `.` extension.
pub const NO_EXTENSION: &str = "no-extension";

/// Ordered, path-unique collection of [`ScanItem`] chosen for deletion.
#[derive(Debug, Default)]
pub struct SelectionSet {
    items: Vec<ScanItem>,
    paths: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the item if absent, remove it if present. Returns `true` when the
    /// item is selected after the call.
    pub fn toggle(&mut self, item: &ScanItem) -> bool {
        if self.paths.remove(&item.path) {
            self.items.retain(|selected| selected.path != item.path);
            false
        } else {
            self.paths.insert(item.path.clone());
            self.items.push(item.clone());
            true
        }
    }

    /// Toggle a whole candidate subset at once.
    ///
    /// If every candidate is already selected, deselect exactly that subset
    /// and leave unrelated selections alone. Otherwise add the missing
    /// candidates without duplicating the ones already present.
    pub fn toggle_all(&mut self, candidates: &[ScanItem]) {
        let all_selected = candidates
            .iter()
            .all(|candidate| self.paths.contains(&candidate.path));

        if all_selected {
            for candidate in candidates {
                self.paths.remove(&candidate.path);
            }
            self.items.retain(|selected| self.paths.contains(&selected.path));
        } else {
            for candidate in candidates {
                if self.paths.insert(candidate.path.clone()) {
                    self.items.push(candidate.clone());
                }
            }
        }
    }

    /// [`toggle_all`](Self::toggle_all) over the items of one category.
    pub fn toggle_all_of_kind(&mut self, kind: ItemKind, items: &[ScanItem]) {
        let candidates: Vec<ScanItem> = items
            .iter()
            .filter(|item| item.kind == kind)
            .cloned()
            .collect();
        if !candidates.is_empty() {
            self.toggle_all(&candidates);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Sum of sizes over the live set. Computed on every read so it can
    /// never drift from the actual selection.
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|item| item.size).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected items in insertion order.
    pub fn items(&self) -> &[ScanItem] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.paths.clear();
    }
}

/// Display aggregation of one extension bucket.
#[derive(Debug, Default)]
pub struct ExtensionGroup {
    /// Items in this bucket, in input order.
    pub items: Vec<ScanItem>,
    /// Sum of sizes in this bucket.
    pub total_size: u64,
}

impl ExtensionGroup {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Partition items by the lowercase substring after the last `.` in `name`.
///
/// Items without a dot land in the [`NO_EXTENSION`] group. This is a pure
/// display aggregation; it has no bearing on what may be selected or
/// deleted.
pub fn group_by_extension(items: &[ScanItem]) -> BTreeMap<String, ExtensionGroup> {
    let mut groups: BTreeMap<String, ExtensionGroup> = BTreeMap::new();
    for item in items {
        let extension = match item.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => NO_EXTENSION.to_string(),
        };
        let group = groups.entry(extension).or_default();
        group.total_size += item.size;
        group.items.push(item.clone());
    }
    groups
}
