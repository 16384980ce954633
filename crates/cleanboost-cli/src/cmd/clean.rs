//! Clean command: scan, select, confirm, delete, rescan.

use anyhow::{Context, Result};
use clap::ValueEnum;

use cleanboost_core::clean::Confirmation;
use cleanboost_core::types::ItemKind;
use cleanboost_core::CleanerSession;

use crate::ui::theme::format_size;
use crate::ui::{list, Output};

/// Scan categories selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Temporary files
    Temp,
    /// Program remains
    Remains,
    /// Browser cache
    Browser,
    /// Recycle bin
    Recycle,
}

impl KindArg {
    fn kind(self) -> ItemKind {
        match self {
            Self::Temp => ItemKind::TempFiles,
            Self::Remains => ItemKind::ProgramRemains,
            Self::Browser => ItemKind::BrowserCache,
            Self::Recycle => ItemKind::RecycleBin,
        }
    }

    const ALL: [Self; 4] = [Self::Temp, Self::Remains, Self::Browser, Self::Recycle];
}

/// Scan, select everything in the requested categories, and delete it after
/// an explicit confirmation. A successful clean is followed by one rescan.
pub async fn clean(api_url: Option<String>, kinds: &[KindArg], yes: bool) -> Result<()> {
    let config = super::load_config(api_url)?;
    let api = super::api_client(&config);
    let output = Output::new();

    let mut session = CleanerSession::new(api, config.poll_interval(), config.rescan_delay());
    let cancel = super::cancel_on_ctrl_c();

    output.info("Scanning (Ctrl-C to abort)...");
    let snapshot = session
        .start_scan(&cancel)
        .await
        .context("Scan did not complete")?;

    if snapshot.scan_results.is_empty() {
        output.success("Nothing to clean up.");
        return Ok(());
    }

    let kinds: &[KindArg] = if kinds.is_empty() { &KindArg::ALL } else { kinds };
    for kind in kinds {
        session.toggle_all_of_kind(kind.kind());
    }

    if session.selection().is_empty() {
        output.info("No items in the requested categories.");
        return Ok(());
    }

    output.section("Scan results");
    println!("{}", list::render_scan_summary(&snapshot));
    output.info(&format!(
        "Selected for deletion: {} items, {}",
        session.selection().len(),
        format_size(session.selection().total_size())
    ));

    if !yes
        && !super::confirm_prompt(&format!(
            "Delete {} items ({})? This cannot be undone.",
            session.selection().len(),
            format_size(session.selection().total_size())
        ))?
    {
        output.error("Operation cancelled");
        return Ok(());
    }

    // Minted from the exact selection we are about to submit; a selection
    // changed after the prompt would be rejected by the executor.
    let confirmation = Confirmation::acknowledge(session.selection())
        .context("Selection emptied before confirmation")?;

    let outcome = session
        .clean_and_rescan(confirmation, &cancel)
        .await
        .context("Cleanup failed")?;

    output.success(&format!(
        "Deleted {} items, reclaimed {}",
        outcome.deleted_count,
        format_size(outcome.total_cleaned_size)
    ));
    if outcome.error_count > 0 {
        output.warning(&format!(
            "{} items could not be deleted (protected or in use)",
            outcome.error_count
        ));
    }

    if let Some(rescan) = session.scanner().last_result() {
        output.info(&format!(
            "Rescan: {} still reclaimable",
            format_size(rescan.total_scannable_size)
        ));
    }

    Ok(())
}
