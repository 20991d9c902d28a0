//! tactix: CODM registry optimization tool.
//!
//! Scans the client's settings subtree under HKEY_CURRENT_USER and patches
//! the values that control aim smoothing, the frame-rate cap, and the
//! weapon FOV byte; optionally drops an exclusive-fullscreen shortcut on
//! the desktop. Run with a subcommand, or with none for the interactive
//! menu.

mod cli;
mod menu;
mod platform;
mod report;

use clap::Parser;
use cli::{Cli, Command};
use regpatch::{Operation, RootKey, ScanDispatcher};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Cli::parse();
    let command = match args.command.clone() {
        Some(command) => command,
        None => match menu::prompt()? {
            Some(command) => command,
            None => return Ok(()),
        },
    };

    run(&args, command)
}

fn run(args: &Cli, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Sensitivity => scan(args, &[Operation::Sensitivity]),
        Command::Fps => scan(args, &[Operation::FrameRateUnlock]),
        Command::Fov { value } => scan(args, &[Operation::FieldOfViewUnlock { fov: value }]),
        Command::Shortcut => shortcut(args),
        // Fixed order: sensitivity, frame rate, FOV, then the shortcut.
        Command::All { fov } => {
            scan(
                args,
                &[
                    Operation::Sensitivity,
                    Operation::FrameRateUnlock,
                    Operation::FieldOfViewUnlock { fov },
                ],
            )?;
            shortcut(args)
        }
    }
}

fn scan(args: &Cli, operations: &[Operation]) -> anyhow::Result<()> {
    platform::ensure_elevated()?;
    let access = platform::registry_access()?;
    let dispatcher = ScanDispatcher::new(access.as_ref(), RootKey::CurrentUser, args.subkey.clone());
    for operation in operations {
        let scan_report = dispatcher.run(operation)?;
        report::render(&scan_report, args.json)?;
    }
    Ok(())
}

fn shortcut(args: &Cli) -> anyhow::Result<()> {
    let path = platform::create_game_shortcut(&args.process)?;
    println!("shortcut created: {}", path.display());
    Ok(())
}
