//! Scan result rendering.

use std::collections::BTreeMap;

use comfy_table::{presets, Cell, CellAlignment, Table};

use cleanboost_core::selection::{group_by_extension, ExtensionGroup};
use cleanboost_core::types::{ItemKind, ScanItem, ScanSnapshot};

use super::theme::format_size;

/// Scan categories in display order.
const SCAN_KINDS: [ItemKind; 4] = [
    ItemKind::TempFiles,
    ItemKind::ProgramRemains,
    ItemKind::BrowserCache,
    ItemKind::RecycleBin,
];

/// Render the per-category summary table for a completed scan.
pub fn render_scan_summary(snapshot: &ScanSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["Category", "Items", "Size"]);

    for kind in SCAN_KINDS {
        let items: Vec<&ScanItem> = snapshot
            .scan_results
            .iter()
            .filter(|item| item.kind == kind)
            .collect();
        if items.is_empty() {
            continue;
        }
        let size: u64 = items.iter().map(|item| item.size).sum();
        table.add_row(vec![
            Cell::new(kind.label()),
            Cell::new(items.len()).set_alignment(CellAlignment::Right),
            Cell::new(format_size(size)).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(snapshot.scan_results.len()).set_alignment(CellAlignment::Right),
        Cell::new(format_size(snapshot.total_scannable_size)).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// Render the extension breakdown for one list of items.
pub fn render_extension_groups(items: &[ScanItem]) -> Table {
    let groups: BTreeMap<String, ExtensionGroup> = group_by_extension(items);

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["Extension", "Files", "Size"]);

    for (extension, group) in &groups {
        table.add_row(vec![
            Cell::new(format!(".{extension}")),
            Cell::new(group.count()).set_alignment(CellAlignment::Right),
            Cell::new(format_size(group.total_size)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Render a flat item listing (used for remnant sections).
pub fn render_items(items: &[ScanItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["Name", "Kind", "Size", "Path"]);

    for item in items {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(item.kind.label()),
            Cell::new(format_size(item.size)).set_alignment(CellAlignment::Right),
            Cell::new(&item.path),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, size: u64, kind: ItemKind) -> ScanItem {
        ScanItem {
            path: format!("/tmp/{name}"),
            name: name.to_string(),
            size,
            kind,
        }
    }

    #[test]
    fn summary_skips_empty_categories() {
        let snapshot = ScanSnapshot {
            status: cleanboost_core::types::ScanStatus::Success,
            scan_results: vec![item("a.log", 10, ItemKind::TempFiles)],
            total_scannable_size: 10,
            error: None,
        };
        let rendered = render_scan_summary(&snapshot).to_string();
        assert!(rendered.contains("Temporary files"));
        assert!(!rendered.contains("Recycle bin"));
        assert!(rendered.contains("Total"));
    }

    #[test]
    fn extension_table_includes_sentinel_group() {
        let items = vec![
            item("a.log", 10, ItemKind::TempFiles),
            item("noext", 5, ItemKind::TempFiles),
        ];
        let rendered = render_extension_groups(&items).to_string();
        assert!(rendered.contains(".log"));
        assert!(rendered.contains(".no-extension"));
    }
}
