//! Interactive menu, shown when no subcommand is given.

use crate::cli::Command;
use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

fn banner() {
    println!("CODM Tactix - registry optimization tool");
    println!("  1. zero sensitivity");
    println!("  2. unlock frame rate");
    println!("  3. unlock weapon FOV");
    println!("  4. create exclusive-fullscreen shortcut");
    println!("  5. run everything");
    println!("  0. exit");
}

/// Loop until the operator picks a valid function. `Ok(None)` means exit.
pub fn prompt() -> Result<Option<Command>> {
    banner();
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!(">>> select a function: ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("stdin closed before a function was selected");
        }
        match line.trim() {
            "0" => return Ok(None),
            "1" => return Ok(Some(Command::Sensitivity)),
            "2" => return Ok(Some(Command::Fps)),
            "3" => {
                let value = prompt_fov()?;
                return Ok(Some(Command::Fov { value }));
            }
            "4" => return Ok(Some(Command::Shortcut)),
            "5" => {
                let fov = prompt_fov()?;
                return Ok(Some(Command::All { fov }));
            }
            other => println!("invalid choice: {other:?}"),
        }
    }
}

fn prompt_fov() -> Result<u32> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!(">>> FOV byte value (0-255): ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("stdin closed before a FOV value was entered");
        }
        match parse_fov(line.trim()) {
            Ok(value) => return Ok(value),
            Err(msg) => println!("{msg}"),
        }
    }
}

fn parse_fov(input: &str) -> Result<u32, String> {
    match input.parse::<u32>() {
        Ok(value) if value <= 255 => Ok(value),
        Ok(value) => Err(format!("{value} is outside 0-255")),
        Err(_) => Err(format!("not a number: {input:?}")),
    }
}
