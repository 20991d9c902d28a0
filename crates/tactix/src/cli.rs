//! Command-line interface.

use clap::{Parser, Subcommand};

/// Registry subtree where the CODM client persists its settings.
pub const DEFAULT_SUBKEY: &str = r"SOFTWARE\Tencent\Call-of-Duty";

/// Game process name used to locate the running client.
pub const DEFAULT_PROCESS: &str = "CODM.exe";

#[derive(Debug, Parser)]
#[command(name = "tactix", version, about = "CODM registry optimization tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Registry subtree holding the CODM values (under HKEY_CURRENT_USER).
    #[arg(long, global = true, default_value = DEFAULT_SUBKEY)]
    pub subkey: String,

    /// Emit scan reports as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Game process name used when creating the shortcut.
    #[arg(long, global = true, default_value = DEFAULT_PROCESS)]
    pub process: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Zero out aim smoothing across all game modes
    Sensitivity,
    /// Remove the frame-rate cap
    Fps,
    /// Set the weapon field-of-view byte
    Fov {
        #[arg(long, value_name = "0-255", value_parser = clap::value_parser!(u32).range(0..=255))]
        value: u32,
    },
    /// Create the exclusive-fullscreen desktop shortcut
    Shortcut,
    /// Run everything: sensitivity, frame rate, FOV, then the shortcut
    All {
        #[arg(long, value_name = "0-255", value_parser = clap::value_parser!(u32).range(0..=255))]
        fov: u32,
    },
}
