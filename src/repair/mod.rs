// src/repair/mod.rs

//! Asset tree repair driver
//!
//! Sequences a full repair run: back up the affected tables, reseed the
//! baseline asset table, then rebuild extension, category and content
//! nodes in that order. The ordering is load-bearing: category nodes
//! parent onto extension nodes and content nodes parent onto category
//! nodes, so each pass depends on the one before it.
//!
//! The run is synchronous and assumes exclusive access to the database; a
//! failed run is recovered by restoring the `*_backup` tables, not by
//! internal retries.

pub mod parents;
pub mod passes;
pub mod rules;
pub mod upsert;

use crate::db::{backup, seed};
use crate::error::Result;
use crate::progress::ProgressTracker;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::info;

pub use crate::db::seed::SeedOutcome;

/// Tables backed up before the repair mutates anything
pub const BACKED_UP_TABLES: [&str; 3] = ["assets", "categories", "content"];

/// Repair run configuration, threaded explicitly through the driver
#[derive(Debug, Clone)]
pub struct RepairConfig {
    /// Baseline asset table SQL script
    pub seed_path: PathBuf,
    /// Fail the run instead of continuing when the seed script is missing
    pub fail_on_missing_seed: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("sql/assets.sql"),
            fail_on_missing_seed: false,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, Copy)]
pub struct RepairReport {
    pub backups_created: usize,
    pub seed: SeedOutcome,
    pub extensions: usize,
    pub categories: usize,
    pub content: usize,
}

/// Drives a full asset repair run
pub struct AssetRepair<'a> {
    conn: &'a Connection,
    config: RepairConfig,
    progress: &'a dyn ProgressTracker,
}

impl<'a> AssetRepair<'a> {
    pub fn new(
        conn: &'a Connection,
        config: RepairConfig,
        progress: &'a dyn ProgressTracker,
    ) -> Self {
        Self {
            conn,
            config,
            progress,
        }
    }

    /// Run every stage in order, stopping at the first failure
    pub fn run(&self) -> Result<RepairReport> {
        self.progress.set_message("Creating backup");
        info!("Backing up tables: {:?}", BACKED_UP_TABLES);
        let backups_created = backup::backup_tables(self.conn, &BACKED_UP_TABLES)?;

        self.progress.set_message("Populating default assets");
        info!("Seeding baseline assets from {}", self.config.seed_path.display());
        let seed = seed::seed_assets(
            self.conn,
            &self.config.seed_path,
            self.config.fail_on_missing_seed,
        )?;

        self.progress.set_message("Creating extension assets");
        let extensions = passes::repair_extensions(self.conn, self.progress)?;
        info!("Extension pass processed {} rows", extensions);

        self.progress.set_message("Creating category assets");
        let categories = passes::repair_categories(self.conn, self.progress)?;
        info!("Category pass processed {} rows", categories);

        self.progress.set_message("Creating content assets");
        let content = passes::repair_content(self.conn, self.progress)?;
        info!("Content pass processed {} rows", content);

        self.progress.finish_with_message("Finished asset repair");

        Ok(RepairReport {
            backups_created,
            seed,
            extensions,
            categories,
            content,
        })
    }
}
