//! Scan command: discover cleanup candidates and list them.

use anyhow::{Context, Result};

use cleanboost_core::CleanerSession;

use crate::ui::{list, Output};

/// Run a scan to completion and render the results.
pub async fn scan(api_url: Option<String>) -> Result<()> {
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

    output.section("Scan results");
    println!("{}", list::render_scan_summary(&snapshot));

    output.section("By extension");
    println!("{}", list::render_extension_groups(&snapshot.scan_results));

    Ok(())
}
