//! Windows bindings shared by the registry accessor and shortcut creation.

pub mod registry;
pub mod shortcut;

use anyhow::{bail, Result};
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use windows_sys::Win32::UI::Shell::IsUserAnAdmin;

/// NUL-terminated UTF-16 for the W-suffixed API family.
pub(crate) fn encode_wide(s: &str) -> Vec<u16> {
    OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Registry-writing operations require an elevated console.
pub fn ensure_elevated() -> Result<()> {
    if unsafe { IsUserAnAdmin() } == 0 {
        bail!("registry patching requires administrator privileges; re-run from an elevated console");
    }
    Ok(())
}
