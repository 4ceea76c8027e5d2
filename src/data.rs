//! Data structures for representing listed file system entries.
//!
//! This module defines the value types that flow from the collector to the
//! printer: a [`Group`] per listed directory (or the synthetic loose-files
//! bucket), each holding [`Entry`] values with a [`Metadata`] snapshot.

use std::fs;
use std::os::unix::fs::MetadataExt;

/// Raw stat record for a single entry.
///
/// # Fields
/// * `mode` - File type and permission bits (`st_mode`)
/// * `nlink` - Hard link count
/// * `uid` - Owner user id
/// * `gid` - Owner group id
/// * `size` - Size in bytes
/// * `mtime` - Modification time in seconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub mtime: i64,
}

impl From<&fs::Metadata> for Metadata {
    fn from(meta: &fs::Metadata) -> Self {
        Metadata {
            mode: meta.mode(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            mtime: meta.mtime(),
        }
    }
}

/// A single named file system object with its metadata snapshot.
///
/// `name` is always a base name; the owning [`Group`] supplies the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub metadata: Metadata,
}

/// The unit of output: one directory, or the loose-files bucket.
///
/// `path` is empty for loose files named directly on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub path: String,
    pub entries: Vec<Entry>,
}

impl Group {
    /// Returns `true` for the synthetic group of directly named files.
    pub fn is_loose(&self) -> bool {
        self.path.is_empty()
    }
}

/// Sorts items in place by a case-insensitive key, keeping equal keys in order.
pub fn sort_case_insensitive<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| key(item).to_lowercase());
}
