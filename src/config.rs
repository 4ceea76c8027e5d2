//! Resolved listing configuration.
//!
//! The raw CLI flags are folded once into a [`ListingConfig`] which is then
//! passed explicitly to the collector, formatter and printer.

use anyhow::{Result, anyhow};
use chrono::{FixedOffset, Local, Offset};
use std::ffi::OsStr;

use crate::cli::Args;

/// How entries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Names only, joined by two spaces or newlines.
    Compact,
    /// One record per line with mode, links, owner, group, size and mtime.
    Detailed { numeric_ids: bool },
}

impl DisplayMode {
    /// `-n` implies a long listing even without `-l`.
    pub fn from_flags(long: bool, numeric_ids: bool) -> Self {
        if numeric_ids {
            DisplayMode::Detailed { numeric_ids: true }
        } else if long {
            DisplayMode::Detailed { numeric_ids: false }
        } else {
            DisplayMode::Compact
        }
    }
}

/// How file names that are not valid UTF-8 are turned into text.
///
/// The `ruls` binary always uses [`NameDecoding::Lossy`]; `Strict` is for
/// library callers that would rather fail than show replacement characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameDecoding {
    /// Invalid sequences become U+FFFD.
    #[default]
    Lossy,
    /// Invalid sequences are an error.
    Strict,
}

impl NameDecoding {
    pub fn decode(self, name: &OsStr) -> Result<String> {
        match self {
            NameDecoding::Lossy => Ok(name.to_string_lossy().into_owned()),
            NameDecoding::Strict => name
                .to_str()
                .map(str::to_owned)
                .ok_or_else(|| anyhow!("File name is not valid UTF-8: {:?}", name)),
        }
    }
}

/// Everything the listing pipeline needs to know, resolved once.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub include_hidden: bool,
    pub recursive: bool,
    pub display: DisplayMode,
    pub one_per_line: bool,
    pub decoding: NameDecoding,
    pub utc_offset: FixedOffset,
}

impl ListingConfig {
    /// Builds the configuration from parsed arguments, sampling the local UTC offset.
    pub fn from_args(args: &Args) -> Self {
        ListingConfig {
            include_hidden: args.all,
            recursive: args.recursive,
            display: DisplayMode::from_flags(args.long, args.numeric_uid_gid),
            one_per_line: args.one_per_line,
            decoding: NameDecoding::default(),
            utc_offset: Local::now().offset().fix(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        ListingConfig {
            include_hidden: false,
            recursive: false,
            display: DisplayMode::Compact,
            one_per_line: false,
            decoding: NameDecoding::Lossy,
            utc_offset: Local::now().offset().fix(),
        }
    }
}
