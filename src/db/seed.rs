// src/db/seed.rs

//! Baseline asset table seeding
//!
//! The seed script restores the stock asset table (root node plus default
//! component nodes) before the repair passes rebuild everything else. The
//! script is split into individual statements; legacy dump artifacts
//! (`#`-style comments) are stripped so scripts exported from other engines
//! still apply.

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// What the seeding stage did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Script applied; carries the number of statements executed
    Applied(usize),
    /// Script missing or empty, tolerated and skipped
    Missing,
}

/// Apply the baseline seed script.
///
/// A missing or empty script is skipped with a warning unless
/// `fail_on_missing` is set, in which case it fails the run.
pub fn seed_assets(conn: &Connection, path: &Path, fail_on_missing: bool) -> Result<SeedOutcome> {
    let script = match fs::read_to_string(path) {
        Ok(script) if !script.trim().is_empty() => script,
        Ok(_) => return missing(path, fail_on_missing),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return missing(path, fail_on_missing),
        Err(err) => return Err(err.into()),
    };

    let mut applied = 0;

    for statement in split_sql(&script) {
        conn.execute_batch(&statement)?;
        applied += 1;
    }

    info!("Applied {} seed statements from {}", applied, path.display());
    Ok(SeedOutcome::Applied(applied))
}

fn missing(path: &Path, fail_on_missing: bool) -> Result<SeedOutcome> {
    if fail_on_missing {
        return Err(Error::SeedMissing(path.to_path_buf()));
    }

    warn!("Seed script {} missing or empty, skipping", path.display());
    Ok(SeedOutcome::Missing)
}

/// Split an SQL script into executable statements.
///
/// Splits on `;` outside string literals and comments. `--` comments are
/// kept (valid SQL); `#` comments are stripped. Empty statements are
/// dropped.
pub fn split_sql(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(c) = chars.next() {
        if in_single {
            current.push(c);
            if c == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            current.push(c);
            if c == '"' {
                in_double = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_single = true;
                current.push(c);
            }
            '"' => {
                in_double = true;
                current.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                current.push(c);
                for c in chars.by_ref() {
                    current.push(c);
                    if c == '\n' {
                        break;
                    }
                }
            }
            '#' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        current.push(c);
                        break;
                    }
                }
            }
            ';' => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(format!("{statement};"));
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }

    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(format!("{statement};"));
    }

    statements
}
