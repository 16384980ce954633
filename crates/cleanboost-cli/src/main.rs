//! cleanboost - disk cleanup CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cleanboost_cli::cmd;
use cleanboost_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status { watch } => cmd::status::status(cli.api_url, watch).await,
        Commands::Scan => cmd::scan::scan(cli.api_url).await,
        Commands::Clean { kind, yes } => cmd::clean::clean(cli.api_url, &kind, yes).await,
        Commands::Remains {
            program,
            clean,
            yes,
        } => cmd::remains::remains(cli.api_url, &program, clean, yes).await,
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
