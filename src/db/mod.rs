// src/db/mod.rs

//! Database access for the asset repair tool
//!
//! The repair runs against an existing CMS database over a single
//! synchronous connection. The connection is opened read-write without
//! create: pointing the tool at a missing file is an operator error, not a
//! reason to make an empty database.

pub mod backup;
pub mod models;
pub mod seed;

use crate::error::Result;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

/// Open an existing CMS database
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    conn.pragma_update(None, "foreign_keys", "ON")?;
    debug!("Opened database at {}", db_path);

    Ok(conn)
}
