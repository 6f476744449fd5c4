// src/error.rs

//! Error types for the asset repair tool

use std::path::PathBuf;
use thiserror::Error;

/// Result type for repair operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while repairing the asset tree
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error reading the seed script
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Baseline seed script missing or empty under strict seeding
    #[error("seed script missing or empty: {}", .0.display())]
    SeedMissing(PathBuf),

    /// The asset tree has no root node to attach to
    #[error("asset tree has no root node")]
    RootMissing,

    /// A table expected by the repair is not present
    #[error("table not found: {0}")]
    TableMissing(String),

    /// Attempted to move an asset under its own subtree
    #[error("cannot move asset {id} under asset {parent_id} inside its own subtree")]
    InvalidMove { id: i64, parent_id: i64 },

    /// Generic repair error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// SQLite failures surface their extended result code so a failed run
    /// exits with the originating store error; everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Database(rusqlite::Error::SqliteFailure(err, _)) => err.extended_code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_defaults_to_one() {
        assert_eq!(Error::RootMissing.exit_code(), 1);
        assert_eq!(Error::other("boom").exit_code(), 1);
    }

    #[test]
    fn test_exit_code_uses_sqlite_extended_code() {
        let err = Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed".to_string()),
        ));
        assert_eq!(err.exit_code(), rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE);
    }
}
