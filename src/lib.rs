// src/lib.rs

//! Assetfix
//!
//! Repairs a corrupted nested-set asset table in a CMS database and relinks
//! extensions, categories and content items to valid nodes in it.
//!
//! # Architecture
//!
//! - Backup-first: every mutated table is snapshotted to `{table}_backup`
//!   before the run touches it; the snapshot is also the source of
//!   previously granted permissions
//! - Nested-set tree: asset ancestry lives in `lft`/`rgt` boundary values,
//!   maintained exclusively by the asset model
//! - Three ordered passes (extensions, then categories, then content):
//!   each later pass resolves parents through nodes the earlier ones built
//! - Single synchronous connection, threaded explicitly; the run assumes
//!   exclusive access to the database

pub mod db;
mod error;
pub mod progress;
pub mod repair;

pub use error::{Error, Result};
pub use progress::{CliProgress, LogProgress, ProgressTracker, SilentProgress};
pub use repair::{AssetRepair, RepairConfig, RepairReport, SeedOutcome};
