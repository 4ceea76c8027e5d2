//! Pathname expansion for command-line arguments.
//!
//! Each argument is expanded independently with [`glob`] and every match is
//! classified as a file or a directory. Patterns that match nothing, or whose
//! matches cannot be read, contribute nothing.

use glob::{MatchOptions, glob_with};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Expanded arguments, partitioned by file type.
///
/// Order is the order of the arguments, then match order within each
/// argument. Duplicates are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpandedPaths {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

// Leading dots are checked afterwards by `spells_out_dots`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expands every pattern and splits the matches into files and directories.
///
/// Type checks follow symlinks, so a link to a directory is listed as one.
/// Anything that is neither (sockets, fifos, dangling links) is dropped.
pub fn expand_paths<S: AsRef<str>>(patterns: &[S]) -> ExpandedPaths {
    let mut expanded = ExpandedPaths::default();

    for pattern in patterns {
        for path in expand_pattern(pattern.as_ref()) {
            if path.is_dir() {
                expanded.dirs.push(path);
            } else if path.is_file() {
                expanded.files.push(path);
            } else {
                trace!(path = %path.display(), "skipping non-regular match");
            }
        }
    }

    debug!(
        files = expanded.files.len(),
        dirs = expanded.dirs.len(),
        "expanded arguments"
    );
    expanded
}

fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    match glob_with(pattern, MATCH_OPTIONS) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) if spells_out_dots(pattern, &path) => Some(path),
                Ok(path) => {
                    trace!(path = %path.display(), "dot name matched by a wildcard");
                    None
                }
                Err(e) => {
                    trace!(path = %e.path().display(), error = %e, "unreadable match");
                    None
                }
            })
            .collect(),
        Err(e) => {
            // Not valid glob syntax: take the argument literally.
            debug!(pattern, error = %e, "invalid pattern, using it as a path");
            let path = Path::new(pattern);
            if path.symlink_metadata().is_ok() {
                vec![path.to_path_buf()]
            } else {
                Vec::new()
            }
        }
    }
}

/// Checks that every dot-led name in `path` was asked for by a dot in `pattern`.
///
/// Components are compared from the end, up to the first `**`. A name
/// starting with `.` must come from a component that does not start with a
/// wildcard, and `.` / `..` must be spelled out exactly.
fn spells_out_dots(pattern: &str, path: &Path) -> bool {
    let path = path.to_string_lossy();
    let wanted = pattern.split('/').filter(|c| !c.is_empty()).rev();
    let found = path.split('/').filter(|c| !c.is_empty()).rev();

    for (want, got) in wanted.zip(found) {
        if want == "**" {
            break;
        }
        if !got.starts_with('.') || want == got {
            continue;
        }
        if got == "." || got == ".." || want.starts_with(['*', '?', '[']) {
            return false;
        }
    }
    true
}
