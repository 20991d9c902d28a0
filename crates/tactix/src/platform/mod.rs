//! OS integration: registry accessor, privilege check, shortcut creation.
//!
//! Everything Windows-specific lives behind this module so the rest of the
//! binary (CLI, menu, report rendering) builds and tests on any platform.

#[cfg(windows)]
pub mod windows;

use anyhow::Result;
use regpatch::RegistryAccess;
use std::path::PathBuf;

#[cfg(windows)]
pub fn registry_access() -> Result<Box<dyn RegistryAccess>> {
    Ok(Box::new(windows::registry::WinRegistry))
}

#[cfg(windows)]
pub fn ensure_elevated() -> Result<()> {
    windows::ensure_elevated()
}

#[cfg(windows)]
pub fn create_game_shortcut(process_name: &str) -> Result<PathBuf> {
    windows::shortcut::create_exclusive_shortcut(process_name)
}

#[cfg(not(windows))]
pub fn registry_access() -> Result<Box<dyn RegistryAccess>> {
    anyhow::bail!("this tool patches the Windows registry and must run on Windows")
}

#[cfg(not(windows))]
pub fn ensure_elevated() -> Result<()> {
    anyhow::bail!("this tool patches the Windows registry and must run on Windows")
}

#[cfg(not(windows))]
pub fn create_game_shortcut(_process_name: &str) -> Result<PathBuf> {
    anyhow::bail!("desktop shortcuts are only supported on Windows")
}
