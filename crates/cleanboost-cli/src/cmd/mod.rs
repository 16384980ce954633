//! Command implementations.

pub mod clean;
pub mod completions;
pub mod remains;
pub mod scan;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use cleanboost_core::auth::{EnvToken, StaticToken, TokenSource};
use cleanboost_core::config::Config;
use cleanboost_core::ApiClient;

/// Load config and apply the CLI-level URL override.
pub(crate) fn load_config(api_url: Option<String>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.base_url = url;
    }
    Ok(config)
}

/// Build the API client the way the config dictates: a configured token
/// wins, otherwise the environment is consulted per request.
pub(crate) fn api_client(config: &Config) -> ApiClient {
    let token: Arc<dyn TokenSource> = match &config.token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(EnvToken),
    };
    ApiClient::new(config.base_url.clone(), token)
}

/// Token cancelled on Ctrl-C, so poll loops tear down cleanly.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling");
            trigger.cancel();
        }
    });
    cancel
}

/// y/N confirmation prompt; anything but an explicit `y` declines.
pub(crate) fn confirm_prompt(question: &str) -> Result<bool> {
    use crossterm::style::Stylize;
    use std::io::Write;

    println!();
    print!("  {} {question} (y/N) ", "WARNING:".bold().red());
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
