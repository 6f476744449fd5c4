// src/commands.rs

//! Command handlers for the assetfix CLI

use anyhow::Result;
use assetfix::db;
use assetfix::progress::{CliProgress, ProgressTracker, SilentProgress};
use assetfix::repair::{AssetRepair, RepairConfig, SeedOutcome};
use std::path::PathBuf;
use tracing::info;

/// Handle the `run` command
pub fn cmd_run(db_path: &str, seed: &str, fail_on_missing_seed: bool, quiet: bool) -> Result<()> {
    let conn = db::open(db_path)?;

    let config = RepairConfig {
        seed_path: PathBuf::from(seed),
        fail_on_missing_seed,
    };

    let progress: Box<dyn ProgressTracker> = if quiet {
        Box::new(SilentProgress::new())
    } else {
        Box::new(CliProgress::new("Repairing assets"))
    };

    let report = match AssetRepair::new(&conn, config, progress.as_ref()).run() {
        Ok(report) => report,
        Err(err) => {
            progress.finish_with_error(&err.to_string());
            return Err(err.into());
        }
    };

    info!(
        backups = report.backups_created,
        extensions = report.extensions,
        categories = report.categories,
        content = report.content,
        "asset repair complete"
    );

    if let SeedOutcome::Missing = report.seed {
        println!("Baseline seed was skipped (script missing or empty)");
    }
    println!(
        "Finished asset repair: {} extensions, {} categories, {} content items",
        report.extensions, report.categories, report.content
    );

    Ok(())
}
