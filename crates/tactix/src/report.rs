//! Scan report rendering.
//!
//! Reports go to stdout; diagnostics stay on stderr via tracing so the
//! JSON surface is clean for piping.

use anyhow::Result;
use regpatch::{PatchOutcome, ScanReport};
use tracing::warn;

pub fn render(report: &ScanReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}: {} value(s) processed, {} changed, {} failed",
        report.path,
        report.outcomes.len(),
        report.changed_count(),
        report.failures.len()
    );
    for outcome in &report.outcomes {
        println!("  {}", outcome_line(outcome));
    }
    for failure in &report.failures {
        warn!("{}: {}", failure.key, failure.error);
        println!("  {}: FAILED ({})", failure.key.name, failure.error);
    }
    Ok(())
}

fn outcome_line(outcome: &PatchOutcome) -> String {
    match &outcome.modified {
        Some(new) => format!("{}: {} -> {}", outcome.key.name, outcome.original, new),
        None => format!(
            "{}: no change needed ({})",
            outcome.key.name, outcome.original
        ),
    }
}
