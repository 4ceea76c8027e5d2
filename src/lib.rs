//! Library crate for ruls
//!
//! This exposes the modules needed for testing and potential library usage.
//!
//! # Pipeline
//!
//! Arguments are expanded into files and directories ([`expand`]), collected
//! into per-directory groups ([`scan`]), then sorted, formatted and printed
//! ([`output`]).
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Listing configuration resolved from the CLI
//! - [`data`]: Core data structures (`Group`, `Entry`, `Metadata`)
//! - [`expand`]: Pathname expansion
//! - [`scan`]: Directory listing and walking
//! - [`output`]: Formatting and terminal printing
//! - [`utils`]: Hidden-name filter and owner/group name resolution

pub mod cli;
pub mod config;
pub mod data;
pub mod expand;
pub mod output;
pub mod scan;
pub mod utils;

pub use cli::Args;
pub use config::{DisplayMode, ListingConfig, NameDecoding};
pub use data::{Entry, Group, Metadata};

use anyhow::Result;
use std::io::Write;

/// Runs the whole listing pipeline for `patterns`, writing to `out`.
pub fn list<S: AsRef<str>, W: Write>(
    patterns: &[S],
    config: &ListingConfig,
    names: &mut dyn utils::NameResolver,
    out: &mut W,
) -> Result<()> {
    let paths = expand::expand_paths(patterns);
    let groups = scan::collect_groups(&paths, config)?;
    output::render_terminal(groups, config, names, out)
}
