//! Status command: system utilization readout.

use anyhow::{Context, Result};

use cleanboost_core::telemetry::TelemetryPoller;
use cleanboost_core::types::SystemStatus;

use crate::ui::theme::format_gauge;
use crate::ui::Output;

/// Show the current system status, or keep watching it.
pub async fn status(api_url: Option<String>, watch: bool) -> Result<()> {
    let config = super::load_config(api_url)?;
    let api = super::api_client(&config);
    let output = Output::new();

    if !watch {
        let snapshot = api
            .system_status()
            .await
            .context("Failed to fetch system status")?;
        output.section("System status");
        render(&snapshot);
        return Ok(());
    }

    let cancel = super::cancel_on_ctrl_c();
    let poller = TelemetryPoller::new(api, config.telemetry_interval());
    let (mut rx, handle) = poller.spawn(cancel.clone());

    output.section("System status (Ctrl-C to stop)");
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
        let latest = rx.borrow_and_update().clone();
        if let Some(snapshot) = latest {
            render(&snapshot);
            println!();
        }
    }

    handle.await.ok();
    Ok(())
}

fn render(status: &SystemStatus) {
    let label_width = 10;
    println!(
        "{:<width$}{}",
        "CPU:",
        format_gauge(status.cpu_percent),
        width = label_width
    );
    println!(
        "{:<width$}{}  {:.1}/{:.1} GB",
        "RAM:",
        format_gauge(status.ram_percent),
        status.ram_used_gb,
        status.ram_total_gb,
        width = label_width
    );
    println!(
        "{:<width$}{}  {:.1}/{:.1} GB",
        "Storage:",
        format_gauge(status.storage_percent),
        status.storage_used_gb,
        status.storage_total_gb,
        width = label_width
    );
}
