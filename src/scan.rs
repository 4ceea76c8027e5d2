//! Entry collection for `ruls`.
//!
//! This module turns expanded command-line paths into [`Group`]s:
//! - Loose files named directly become one group with an empty path
//! - Each directory becomes one group of its immediate children, or, in
//!   recursive mode, one group per visited directory using `WalkDir`
//!
//! Hidden names are filtered with [`is_listed`]; in recursive mode a hidden
//! subdirectory is pruned before descent, so nothing below it is visited.
//!
//! Every entry is stat'ed once with `lstat`. Any I/O failure, including an
//! entry vanishing between listing and stat, aborts the whole collection.

use crate::config::ListingConfig;
use crate::data::{Entry, Group, Metadata};
use crate::expand::ExpandedPaths;
use crate::utils::is_listed;
use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Collects one group for the loose files and one or more per directory.
///
/// Groups come back in discovery order; sorting is the printer's job.
///
/// # Errors
/// Returns an error if a directory cannot be read or an entry cannot be stat'ed.
pub fn collect_groups(paths: &ExpandedPaths, config: &ListingConfig) -> Result<Vec<Group>> {
    let mut groups = Vec::new();

    if !paths.files.is_empty() {
        groups.push(loose_files_group(&paths.files, config)?);
    }

    for dir in &paths.dirs {
        if config.recursive {
            groups.extend(walk_directory(dir, config)?);
        } else {
            groups.push(list_directory(dir, config)?);
        }
    }

    debug!(groups = groups.len(), "collected groups");
    Ok(groups)
}

/// Directly named files are never hidden, whatever their name.
fn loose_files_group(files: &[PathBuf], config: &ListingConfig) -> Result<Group> {
    let entries = files
        .iter()
        .map(|path| {
            let name = path.file_name().unwrap_or(path.as_os_str());
            Ok(Entry {
                name: config.decoding.decode(name)?,
                metadata: stat(path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Group {
        path: String::new(),
        entries,
    })
}

fn list_directory(dir: &Path, config: &ListingConfig) -> Result<Group> {
    let mut entries = Vec::new();

    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for child in read_dir {
        let child =
            child.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let name = config.decoding.decode(&child.file_name())?;
        if !is_listed(&name, config.include_hidden) {
            continue;
        }
        entries.push(Entry {
            name,
            metadata: stat(&child.path())?,
        });
    }

    Ok(Group {
        path: config.decoding.decode(dir.as_os_str())?,
        entries,
    })
}

/// Walks `root` top-down, emitting one group per visited directory.
///
/// The root itself is always visited, even if its own name starts with a dot.
fn walk_directory(root: &Path, config: &ListingConfig) -> Result<Vec<Group>> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || is_listed(&e.file_name().to_string_lossy(), config.include_hidden)
        });

    for entry in walker {
        // walkdir errors already name the failing path
        let entry = entry?;

        if entry.depth() > 0 {
            let parent = entry.path().parent().unwrap_or(root);
            // Parents are always yielded before their children.
            let &slot = index.get(parent).ok_or_else(|| {
                anyhow!("Walked into {} before its parent", entry.path().display())
            })?;
            groups[slot].entries.push(Entry {
                name: config.decoding.decode(entry.file_name())?,
                metadata: stat(entry.path())?,
            });
        }

        // The root may be a symlink to a directory; walkdir descends into it.
        if entry.depth() == 0 || entry.file_type().is_dir() {
            index.insert(entry.path().to_path_buf(), groups.len());
            groups.push(Group {
                path: config.decoding.decode(entry.path().as_os_str())?,
                entries: Vec::new(),
            });
        }
    }

    debug!(root = %root.display(), groups = groups.len(), "walked directory");
    Ok(groups)
}

fn stat(path: &Path) -> Result<Metadata> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to stat: {}", path.display()))?;
    Ok(Metadata::from(&meta))
}
