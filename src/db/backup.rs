// src/db/backup.rs

//! Pre-run table backups
//!
//! Every table the repair mutates is copied to `{table}_backup` before any
//! change: structure first (DDL rewritten from the catalog), then rows. A
//! backup that already exists is left untouched, so re-running the repair
//! keeps the snapshot taken before the first run. The backup doubles as the
//! source of previously granted permissions.

use crate::error::{Error, Result};
use rusqlite::{Connection, params};
use tracing::{debug, info};

/// Suffix appended to a table name to form its backup table name
pub const BACKUP_SUFFIX: &str = "_backup";

/// Backup table name for `table`
pub fn backup_name(table: &str) -> String {
    format!("{table}{BACKUP_SUFFIX}")
}

/// Check whether a table exists
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

/// Back up each table in turn; returns how many backups were created
pub fn backup_tables(conn: &Connection, tables: &[&str]) -> Result<usize> {
    let mut created = 0;

    for table in tables {
        if backup_table(conn, table)? {
            created += 1;
        }
    }

    Ok(created)
}

/// Back up a single table.
///
/// Returns `false` when the backup already exists and was skipped.
pub fn backup_table(conn: &Connection, table: &str) -> Result<bool> {
    let target = backup_name(table);

    if table_exists(conn, &target)? {
        debug!("Backup table {} already exists, skipping", target);
        return Ok(false);
    }

    if !table_exists(conn, table)? {
        return Err(Error::TableMissing(table.to_string()));
    }

    clone_structure(conn, table, &target)?;
    conn.execute_batch(&format!(r#"INSERT INTO "{target}" SELECT * FROM "{table}""#))?;
    info!("Backed up {} to {}", table, target);

    Ok(true)
}

/// Create `to` with the same structure as `from`
fn clone_structure(conn: &Connection, from: &str, to: &str) -> Result<()> {
    let ddl: String = conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![from],
        |row| row.get(0),
    )?;

    let ddl = rewrite_table_name(&ddl, from, to)
        .ok_or_else(|| Error::other(format!("unrecognized table definition for {from}")))?;

    conn.execute_batch(&ddl)?;
    Ok(())
}

/// Swap the table name in a `CREATE TABLE` statement.
///
/// The catalog stores the statement as originally written, so the name may
/// appear bare or wrapped in any of the quoting styles SQLite accepts.
fn rewrite_table_name(ddl: &str, from: &str, to: &str) -> Option<String> {
    let prefixes = [
        format!("CREATE TABLE {from}"),
        format!("CREATE TABLE \"{from}\""),
        format!("CREATE TABLE `{from}`"),
        format!("CREATE TABLE [{from}]"),
    ];

    for prefix in &prefixes {
        if ddl.len() >= prefix.len() && ddl[..prefix.len()].eq_ignore_ascii_case(prefix) {
            return Some(format!("CREATE TABLE \"{to}\"{}", &ddl[prefix.len()..]));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_name() {
        assert_eq!(backup_name("assets"), "assets_backup");
    }

    #[test]
    fn test_rewrite_table_name_bare() {
        let ddl = "CREATE TABLE assets (id INTEGER PRIMARY KEY)";
        assert_eq!(
            rewrite_table_name(ddl, "assets", "assets_backup").unwrap(),
            "CREATE TABLE \"assets_backup\" (id INTEGER PRIMARY KEY)"
        );
    }

    #[test]
    fn test_rewrite_table_name_quoted() {
        let ddl = "CREATE TABLE \"assets\" (id INTEGER PRIMARY KEY)";
        assert_eq!(
            rewrite_table_name(ddl, "assets", "assets_backup").unwrap(),
            "CREATE TABLE \"assets_backup\" (id INTEGER PRIMARY KEY)"
        );
    }

    #[test]
    fn test_rewrite_table_name_no_match() {
        assert!(rewrite_table_name("CREATE VIEW v AS SELECT 1", "v", "v2").is_none());
    }

    #[test]
    fn test_backup_skips_existing() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE assets (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO assets (id, name) VALUES (1, 'root.1');",
        )
        .unwrap();

        assert!(backup_table(&conn, "assets").unwrap());

        // Mutate the source; the second run must not refresh the snapshot.
        conn.execute("INSERT INTO assets (id, name) VALUES (2, 'com_content')", [])
            .unwrap();
        assert!(!backup_table(&conn, "assets").unwrap());

        let backed_up: i64 = conn
            .query_row("SELECT COUNT(*) FROM assets_backup", [], |row| row.get(0))
            .unwrap();
        assert_eq!(backed_up, 1);
    }

    #[test]
    fn test_backup_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = backup_table(&conn, "nonexistent").unwrap_err();
        assert!(matches!(err, Error::TableMissing(_)));
    }
}
