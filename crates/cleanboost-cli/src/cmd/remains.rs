//! Remains command: search for (and optionally delete) program leftovers.

use anyhow::{Context, Result};

use cleanboost_core::clean::Confirmation;
use cleanboost_core::CleanerSession;

use crate::ui::theme::format_size;
use crate::ui::{list, Output};

/// Search AppData and the registry for remnants of `program`.
pub async fn remains(
    api_url: Option<String>,
    program: &str,
    clean: bool,
    yes: bool,
) -> Result<()> {
    let config = super::load_config(api_url)?;
    let api = super::api_client(&config);
    let output = Output::new();

    let mut session = CleanerSession::new(api, config.poll_interval(), config.rescan_delay());

    output.info(&format!("Searching for remnants of '{program}'..."));
    let report = session
        .search_remains(program)
        .await
        .context("Remnant search failed")?;

    if report.is_empty() {
        output.info(&format!(
            "No remnants of '{program}' found. Try another program name."
        ));
        return Ok(());
    }

    let (appdata, registry) = (report.appdata_items.clone(), report.registry_items.clone());

    if !appdata.is_empty() {
        output.section(&format!("AppData remnants ({})", appdata.len()));
        println!("{}", list::render_items(&appdata));
    }
    if !registry.is_empty() {
        output.section(&format!("Registry remnants ({})", registry.len()));
        println!("{}", list::render_items(&registry));
    }
    output.info(&format!("Total: {}", format_size(report.total_size)));

    if !clean {
        return Ok(());
    }

    session.toggle_all_remains(false);
    session.toggle_all_remains(true);

    let count = session.remains_selection().len();
    if !yes
        && !super::confirm_prompt(&format!(
            "Delete {count} remnants? This cannot be undone."
        ))?
    {
        output.error("Operation cancelled");
        return Ok(());
    }

    let confirmation = Confirmation::acknowledge(session.remains_selection())
        .context("Nothing selected for deletion")?;
    let outcome = session
        .clean_remains(confirmation)
        .await
        .context("Remnant cleanup failed")?;

    output.success(&format!(
        "Deleted {} items, reclaimed {}",
        outcome.deleted_count,
        format_size(outcome.total_cleaned_size)
    ));
    if outcome.error_count > 0 {
        output.warning(&format!(
            "{} items could not be deleted",
            outcome.error_count
        ));
    }

    Ok(())
}
