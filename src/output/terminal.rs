//! Terminal output for collected groups.
//!
//! Groups are ordered by path and entries by name, both case-insensitively.
//! A `path:` title precedes each directory group when the listing is
//! recursive or spans more than one group, and a blank line separates
//! consecutive groups.

use super::format::format_group;
use crate::config::ListingConfig;
use crate::data::{Group, sort_case_insensitive};
use crate::utils::NameResolver;
use anyhow::Result;
use std::io::Write;
use tracing::trace;

/// Renders groups to `out`.
///
/// # Arguments
/// * `groups` - Groups in discovery order; they are sorted here
/// * `config` - Display flags, recursion and time offset
/// * `names` - Owner/group name lookup for non-numeric detailed mode
/// * `out` - Destination, normally locked stdout
///
/// # Errors
/// Returns an error if a name cannot be resolved or writing fails.
pub fn render<W: Write>(
    mut groups: Vec<Group>,
    config: &ListingConfig,
    names: &mut dyn NameResolver,
    out: &mut W,
) -> Result<()> {
    sort_case_insensitive(&mut groups, |g| g.path.as_str());
    let has_title = config.recursive || groups.len() > 1;
    let count = groups.len();

    for (i, mut group) in groups.into_iter().enumerate() {
        trace!(path = %group.path, entries = group.entries.len(), "rendering group");

        if has_title && !group.is_loose() {
            writeln!(out, "{}:", group.path)?;
        }

        sort_case_insensitive(&mut group.entries, |e| e.name.as_str());
        writeln!(out, "{}", format_group(&group.entries, config, names)?)?;

        if i + 1 < count {
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
