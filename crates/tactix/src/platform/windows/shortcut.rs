//! Exclusive-fullscreen desktop shortcut.
//!
//! Locates the running game process, resolves its executable path, and
//! writes a `.lnk` on the desktop that relaunches the game with the
//! exclusive-fullscreen window mode arguments.

use anyhow::{bail, Context, Result};
use std::os::windows::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE};
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_QUERY_LIMITED_INFORMATION,
};

const CREATE_NO_WINDOW: u32 = 0x08000000;
const INVALID_HANDLE_VALUE: HANDLE = -1isize as HANDLE;

/// Window-mode arguments the client accepts for exclusive fullscreen.
const SHORTCUT_ARGUMENTS: &str = "-window-mode exclusive 5";
const SHORTCUT_NAME: &str = "CODM Exclusive Fullscreen";

/// Create the shortcut on the desktop, returning its path.
///
/// The game must be running: its process is how we learn where the
/// executable lives.
pub fn create_exclusive_shortcut(process_name: &str) -> Result<PathBuf> {
    let pid = find_process(process_name)
        .with_context(|| format!("no running {process_name} process found; start the game first"))?;
    let target = process_image_path(pid)?;
    info!("found game process: {}", target.display());

    let desktop = desktop_dir()?;
    let lnk_path = desktop.join(format!("{SHORTCUT_NAME}.lnk"));
    let working_dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| desktop.clone());

    write_shortcut(&lnk_path, &target, SHORTCUT_ARGUMENTS, &working_dir)?;
    Ok(lnk_path)
}

/// PID of the first process whose image name matches, case-insensitively.
fn find_process(process_name: &str) -> Option<u32> {
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
        if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
            return None;
        }

        let mut entry: PROCESSENTRY32W = std::mem::zeroed();
        entry.dwSize = std::mem::size_of::<PROCESSENTRY32W>() as u32;
        let mut found = None;

        if Process32FirstW(snapshot, &mut entry) != 0 {
            loop {
                let name_len = entry
                    .szExeFile
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(entry.szExeFile.len());
                let name = String::from_utf16_lossy(&entry.szExeFile[..name_len]);
                if name.eq_ignore_ascii_case(process_name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry) == 0 {
                    break;
                }
            }
        }
        CloseHandle(snapshot);
        found
    }
}

/// Full executable path of a process.
fn process_image_path(pid: u32) -> Result<PathBuf> {
    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            bail!("failed to open process {pid}");
        }
        let mut buf = vec![0u16; 1024];
        let mut len = buf.len() as u32;
        let ok = QueryFullProcessImageNameW(handle, 0, buf.as_mut_ptr(), &mut len);
        CloseHandle(handle);
        if ok == 0 {
            bail!("failed to query image path of process {pid}");
        }
        Ok(PathBuf::from(String::from_utf16_lossy(&buf[..len as usize])))
    }
}

fn desktop_dir() -> Result<PathBuf> {
    let profile = std::env::var_os("USERPROFILE")
        .context("USERPROFILE is not set; cannot locate the desktop")?;
    Ok(PathBuf::from(profile).join("Desktop"))
}

/// Write the `.lnk` through the WScript.Shell COM object.
fn write_shortcut(lnk: &Path, target: &Path, arguments: &str, working_dir: &Path) -> Result<()> {
    let script = format!(
        "$ws = New-Object -ComObject WScript.Shell; \
         $s = $ws.CreateShortcut('{}'); \
         $s.TargetPath = '{}'; \
         $s.Arguments = '{}'; \
         $s.WorkingDirectory = '{}'; \
         $s.IconLocation = '{},0'; \
         $s.Save()",
        ps_quote(lnk),
        ps_quote(target),
        arguments,
        ps_quote(working_dir),
        ps_quote(target),
    );

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", &script])
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .context("failed to launch powershell to create the shortcut")?;

    if !output.status.success() {
        bail!(
            "shortcut creation failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Escape a path for a single-quoted PowerShell string literal.
fn ps_quote(path: &Path) -> String {
    path.display().to_string().replace('\'', "''")
}
