//! CLI interface definitions for the `ruls` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes
//! [`Args`], the struct parsed from CLI inputs. `main.rs` resolves it into a
//! [`ListingConfig`](crate::config::ListingConfig) before listing anything.
//!
//! # Example
//!
//! ```bash
//! ruls -laR src 'tests/*.rs'
//! ```

use clap::Parser;

/// Command-line arguments for the `ruls` directory lister.
#[derive(Parser, Debug)]
#[command(name = "ruls", author = "Sam Green", version, about = "List directory contents")]
pub struct Args {
    /// Files or patterns to list (defaults to current directory)
    #[arg(value_name = "FILE", default_value = ".")]
    pub files: Vec<String>,

    /// Do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Use a long listing format
    #[arg(short = 'l')]
    pub long: bool,

    /// Like -l, but list numeric user and group IDs
    #[arg(short = 'n', long = "numeric-uid-gid")]
    pub numeric_uid_gid: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    pub recursive: bool,

    /// List one file per line
    #[arg(short = '1')]
    pub one_per_line: bool,
}
