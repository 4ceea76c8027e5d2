//! Utility functions for the `ruls` listing tool.
//!
//! This module provides:
//! - The hidden-entry filter applied during listing and walking
//! - User and group name resolution via `libc::getpwuid_r` / `libc::getgrgid_r`
//!
//! Name lookups are exposed through the [`NameResolver`] trait so the
//! formatter can be driven by a fixed table in tests.

use anyhow::{Result, bail};
use libc::{c_char, getgrgid_r, getpwuid_r, group, passwd};
use std::collections::HashMap;
use std::ffi::CStr;
use std::mem::MaybeUninit;

/// Returns whether an entry named `name` should be listed.
///
/// A name is excluded iff it starts with `.` and hidden entries were not requested.
pub fn is_listed(name: &str, include_hidden: bool) -> bool {
    include_hidden || !name.starts_with('.')
}

/// Maps numeric owner and group ids to account names.
pub trait NameResolver {
    fn user_name(&mut self, uid: u32) -> Result<String>;
    fn group_name(&mut self, gid: u32) -> Result<String>;
}

const INITIAL_BUF_LEN: usize = 4096;
const MAX_BUF_LEN: usize = 1 << 20;

/// Resolves names from the system account databases, caching each id once seen.
#[derive(Debug, Default)]
pub struct SystemNames {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl SystemNames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameResolver for SystemNames {
    fn user_name(&mut self, uid: u32) -> Result<String> {
        if let Some(name) = self.users.get(&uid) {
            return Ok(name.clone());
        }
        let name = lookup_user(uid)?;
        self.users.insert(uid, name.clone());
        Ok(name)
    }

    fn group_name(&mut self, gid: u32) -> Result<String> {
        if let Some(name) = self.groups.get(&gid) {
            return Ok(name.clone());
        }
        let name = lookup_group(gid)?;
        self.groups.insert(gid, name.clone());
        Ok(name)
    }
}

fn lookup_user(uid: u32) -> Result<String> {
    let mut buf = vec![0u8; INITIAL_BUF_LEN];
    loop {
        let mut pwd = MaybeUninit::<passwd>::uninit();
        let mut result: *mut passwd = std::ptr::null_mut();

        let ret = unsafe {
            getpwuid_r(
                uid,
                pwd.as_mut_ptr(),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut result,
            )
        };

        if ret == libc::ERANGE && buf.len() < MAX_BUF_LEN {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 {
            bail!(
                "Failed to look up user {}: {}",
                uid,
                std::io::Error::from_raw_os_error(ret)
            );
        }
        if result.is_null() {
            bail!("No user name found for uid {}", uid);
        }

        // result points into pwd/buf, both still alive here
        let name = unsafe { CStr::from_ptr((*result).pw_name) };
        return Ok(name.to_string_lossy().into_owned());
    }
}

fn lookup_group(gid: u32) -> Result<String> {
    let mut buf = vec![0u8; INITIAL_BUF_LEN];
    loop {
        let mut grp = MaybeUninit::<group>::uninit();
        let mut result: *mut group = std::ptr::null_mut();

        let ret = unsafe {
            getgrgid_r(
                gid,
                grp.as_mut_ptr(),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut result,
            )
        };

        if ret == libc::ERANGE && buf.len() < MAX_BUF_LEN {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 {
            bail!(
                "Failed to look up group {}: {}",
                gid,
                std::io::Error::from_raw_os_error(ret)
            );
        }
        if result.is_null() {
            bail!("No group name found for gid {}", gid);
        }

        let name = unsafe { CStr::from_ptr((*result).gr_name) };
        return Ok(name.to_string_lossy().into_owned());
    }
}
