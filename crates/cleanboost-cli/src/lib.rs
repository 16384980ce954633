//! cleanboost - system cleanup client
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Command-line client for the CleanBoost backend: live system telemetry,
//! disk scans, and confirmed cleanup of temp files, program remains, and
//! per-program remnants.
//!
//! All discovery and deletion happens server-side; this binary only drives
//! the protocol and renders the results.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cleanboost")]
#[command(author, version, about = "cleanboost - disk cleanup client for the CleanBoost backend")]
pub struct Cli {
    /// Backend API base URL (overrides config)
    #[arg(long, global = true, env = "CLEANBOOST_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show system utilization (CPU/RAM/storage)
    Status {
        /// Keep polling and updating until interrupted
        #[arg(long, short = 'w')]
        watch: bool,
    },
    /// Scan for cleanup candidates and list them
    Scan,
    /// Scan, select, and delete cleanup candidates
    Clean {
        /// Categories to clean (default: all)
        #[arg(long, short = 'k', value_enum)]
        kind: Vec<cmd::clean::KindArg>,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Search for leftovers of a named program
    Remains {
        /// Program name to search for
        program: String,
        /// Delete everything the search finds (after confirmation)
        #[arg(long)]
        clean: bool,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
