//! Background telemetry poller.
//!
//! Fetches `/system/status` on a fixed cadence and republishes the latest
//! snapshot through a watch channel. Its lifecycle is fully independent of
//! the scan controller: starting or stopping a scan never pauses telemetry.
//!
//! On a failed tick the last-known-good value is retained. The original
//! client zeroed the display on error, which made the gauges flicker; that
//! behavior was judged a bug, not a contract.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::types::SystemStatus;

/// Default cadence for status polls. Observed variants range 500-2000 ms.
pub const DEFAULT_TELEMETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// Periodically publishes [`SystemStatus`] snapshots to subscribers.
#[derive(Debug)]
pub struct TelemetryPoller {
    api: ApiClient,
    interval: Duration,
}

impl TelemetryPoller {
    pub fn new(api: ApiClient, interval: Duration) -> Self {
        Self { api, interval }
    }

    /// Start polling until `cancel` fires.
    ///
    /// The receiver holds `None` until the first successful fetch. A missed
    /// tick is simply retried on the next one; the loop itself never gives
    /// up. Dropping every receiver does not stop the task -- cancel the
    /// token on teardown.
    pub fn spawn(
        self,
        cancel: CancellationToken,
    ) -> (watch::Receiver<Option<SystemStatus>>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(self.interval);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("telemetry poller stopped");
                        return;
                    }
                    _ = ticks.tick() => {}
                }

                match self.api.system_status().await {
                    Ok(status) => {
                        tx.send_replace(Some(status));
                    }
                    Err(err) => {
                        // Keep the last-known-good value on the channel.
                        warn!(error = %err, "telemetry fetch failed; retaining last value");
                    }
                }
            }
        });

        (rx, handle)
    }
}
