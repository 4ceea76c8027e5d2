//! Main entry point for the `ruls` CLI application.
//!
//! `ruls` is a Rust-powered take on the traditional `ls` command. It lists
//! files and directories, optionally recursively and optionally in a long
//! format with permissions, link count, owner, group, size and mtime.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Resolves them once into a [`ListingConfig`]
//! - Delegates expansion, collection and printing to [`ruls::list`]
//!
//! # Flags of Interest
//! - `-a`: include entries starting with `.`
//! - `-l` / `-n`: long listing with names / numeric ids
//! - `-R`: walk directory trees
//! - `-1`: one name per line
//!
//! Set `RULS_LOG` (e.g. `RULS_LOG=debug`) to trace the pipeline on stderr.

use anyhow::Result;
use clap::Parser;
use ruls::utils::SystemNames;
use ruls::{Args, ListingConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("RULS_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = ListingConfig::from_args(&args);
    tracing::debug!(?config, files = ?args.files, "starting listing");

    let mut names = SystemNames::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Parse args → expand_paths → collect_groups → render_terminal
    ruls::list(&args.files, &config, &mut names, &mut out)
}
