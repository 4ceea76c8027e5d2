//! Formatting of a single group's entries.
//!
//! Compact mode joins names; detailed mode renders one record per entry:
//!
//! ```text
//! -rw-r--r--  1  sam  staff       7  Mar 04 09:15  a.txt
//! ```

use crate::config::{DisplayMode, ListingConfig};
use crate::data::{Entry, Metadata};
use crate::utils::NameResolver;
use anyhow::Result;
use chrono::{DateTime, FixedOffset};

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFLNK: u32 = 0o120000;
const S_IFCHR: u32 = 0o020000;
const S_IFBLK: u32 = 0o060000;

/// Permission bits in display order: owner, group, other; read, write, execute.
const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Returns the file type character for a raw mode.
pub fn file_type_char(mode: u32) -> char {
    match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        _ => '-',
    }
}

/// Renders a raw mode as a 10-character string such as `drwxr-xr-x`.
pub fn symbolic_mode(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(file_type_char(mode));
    for (bit, ch) in PERMISSION_BITS {
        out.push(if mode & bit != 0 { ch } else { '-' });
    }
    out
}

/// Renders an mtime shifted by `offset` as `Mon DD HH:MM`.
pub fn format_mtime(mtime: i64, offset: &FixedOffset) -> String {
    match DateTime::from_timestamp(mtime, 0) {
        Some(utc) => utc.with_timezone(offset).format("%b %d %H:%M").to_string(),
        // Out of chrono's range; not reachable from a real stat.
        None => "??? ?? ??:??".to_string(),
    }
}

fn detail_line(
    entry: &Entry,
    numeric_ids: bool,
    offset: &FixedOffset,
    names: &mut dyn NameResolver,
) -> Result<String> {
    let Metadata {
        mode,
        nlink,
        uid,
        gid,
        size,
        mtime,
    } = entry.metadata;

    let (owner, group) = if numeric_ids {
        (uid.to_string(), gid.to_string())
    } else {
        (names.user_name(uid)?, names.group_name(gid)?)
    };

    Ok(format!(
        "{}  {}  {}  {}  {:>6}  {}  {}",
        symbolic_mode(mode),
        nlink,
        owner,
        group,
        size,
        format_mtime(mtime, offset),
        entry.name
    ))
}

/// Formats already-sorted entries into one block without a trailing separator.
///
/// # Errors
/// Returns an error if an owner or group name cannot be resolved in
/// non-numeric detailed mode.
pub fn format_group(
    entries: &[Entry],
    config: &ListingConfig,
    names: &mut dyn NameResolver,
) -> Result<String> {
    match config.display {
        DisplayMode::Detailed { numeric_ids } => {
            let lines = entries
                .iter()
                .map(|e| detail_line(e, numeric_ids, &config.utc_offset, &mut *names))
                .collect::<Result<Vec<_>>>()?;
            Ok(lines.join("\n"))
        }
        DisplayMode::Compact => {
            let sep = if config.one_per_line { "\n" } else { "  " };
            Ok(entries
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(sep))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::TimeZone;

    struct FixedNames;

    impl NameResolver for FixedNames {
        fn user_name(&mut self, uid: u32) -> Result<String> {
            match uid {
                1000 => Ok("sam".to_string()),
                _ => bail!("No user name found for uid {}", uid),
            }
        }

        fn group_name(&mut self, gid: u32) -> Result<String> {
            match gid {
                1000 => Ok("staff".to_string()),
                _ => bail!("No group name found for gid {}", gid),
            }
        }
    }

    /// Inverse of [`symbolic_mode`]: type char plus nine permission flags.
    fn parse_symbolic(s: &str) -> Option<(char, [bool; 9])> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 10 {
            return None;
        }
        let mut perms = [false; 9];
        for (i, (_, ch)) in PERMISSION_BITS.iter().enumerate() {
            perms[i] = match chars[i + 1] {
                c if c == *ch => true,
                '-' => false,
                _ => return None,
            };
        }
        Some((chars[0], perms))
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn entry(name: &str, mode: u32, size: u64) -> Entry {
        Entry {
            name: name.to_string(),
            metadata: Metadata {
                mode,
                nlink: 1,
                uid: 1000,
                gid: 1000,
                size,
                mtime: mar_04_0915(),
            },
        }
    }

    fn mar_04_0915() -> i64 {
        chrono::Utc
            .with_ymd_and_hms(2024, 3, 4, 9, 15, 0)
            .unwrap()
            .timestamp()
    }

    fn config(display: DisplayMode, one_per_line: bool) -> ListingConfig {
        ListingConfig {
            display,
            one_per_line,
            utc_offset: utc(),
            ..ListingConfig::default()
        }
    }

    #[test]
    fn test_symbolic_mode_types() {
        assert_eq!(symbolic_mode(0o040755), "drwxr-xr-x");
        assert_eq!(symbolic_mode(0o100644), "-rw-r--r--");
        assert_eq!(symbolic_mode(0o120777), "lrwxrwxrwx");
        assert_eq!(symbolic_mode(0o020620), "crw--w----");
        assert_eq!(symbolic_mode(0o060660), "brw-rw----");
        assert_eq!(symbolic_mode(0o010644), "-rw-r--r--");
        assert_eq!(symbolic_mode(0o140755), "-rwxr-xr-x");
    }

    #[test]
    fn test_symbolic_mode_is_always_ten_chars() {
        for mode in [0, 0o777, 0o4755, 0o040000, 0o177777] {
            assert_eq!(symbolic_mode(mode).chars().count(), 10);
        }
    }

    #[test]
    fn test_symbolic_mode_reparses() {
        for ftype in [S_IFDIR, S_IFLNK, S_IFCHR, S_IFBLK, 0o100000] {
            for perms in 0..=0o777u32 {
                let mode = ftype | perms;
                let (kind, bits) = parse_symbolic(&symbolic_mode(mode)).unwrap();
                assert_eq!(kind, file_type_char(mode));
                for (i, (bit, _)) in PERMISSION_BITS.iter().enumerate() {
                    assert_eq!(bits[i], perms & bit != 0);
                }
            }
        }
    }

    #[test]
    fn test_format_mtime_applies_offset() {
        let ts = mar_04_0915();
        assert_eq!(format_mtime(ts, &utc()), "Mar 04 09:15");
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_mtime(ts, &plus_two), "Mar 04 11:15");
        let minus_ten = FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(format_mtime(ts, &minus_ten), "Mar 03 23:15");
    }

    #[test]
    fn test_compact_join() {
        let entries = vec![entry("a", 0o100644, 1), entry("B", 0o100644, 1)];
        let cfg = config(DisplayMode::Compact, false);
        assert_eq!(format_group(&entries, &cfg, &mut FixedNames).unwrap(), "a  B");

        let cfg = config(DisplayMode::Compact, true);
        assert_eq!(format_group(&entries, &cfg, &mut FixedNames).unwrap(), "a\nB");

        assert_eq!(format_group(&[], &cfg, &mut FixedNames).unwrap(), "");
    }

    #[test]
    fn test_detailed_line_with_names() {
        let entries = vec![entry("a.txt", 0o100644, 7)];
        let cfg = config(DisplayMode::Detailed { numeric_ids: false }, false);
        assert_eq!(
            format_group(&entries, &cfg, &mut FixedNames).unwrap(),
            "-rw-r--r--  1  sam  staff       7  Mar 04 09:15  a.txt"
        );
    }

    #[test]
    fn test_detailed_line_numeric() {
        let entries = vec![entry("a.txt", 0o100644, 42), entry("d", 0o040755, 4096)];
        let cfg = config(DisplayMode::Detailed { numeric_ids: true }, true);
        assert_eq!(
            format_group(&entries, &cfg, &mut FixedNames).unwrap(),
            "-rw-r--r--  1  1000  1000      42  Mar 04 09:15  a.txt\n\
             drwxr-xr-x  1  1000  1000    4096  Mar 04 09:15  d"
        );
    }

    #[test]
    fn test_size_wider_than_column_is_not_truncated() {
        let entries = vec![entry("big", 0o100644, 12_345_678)];
        let cfg = config(DisplayMode::Detailed { numeric_ids: true }, false);
        let line = format_group(&entries, &cfg, &mut FixedNames).unwrap();
        assert!(line.contains("  12345678  "));
    }

    #[test]
    fn test_unresolvable_owner_is_an_error() {
        let mut e = entry("a.txt", 0o100644, 7);
        e.metadata.uid = 4242;
        let cfg = config(DisplayMode::Detailed { numeric_ids: false }, false);
        assert!(format_group(&[e.clone()], &cfg, &mut FixedNames).is_err());

        // numeric mode never consults the resolver
        let cfg = config(DisplayMode::Detailed { numeric_ids: true }, false);
        assert!(format_group(&[e], &cfg, &mut FixedNames).is_ok());
    }
}
