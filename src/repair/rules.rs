// src/repair/rules.rs

//! Permission rule lookup
//!
//! Repaired nodes keep the rules they had before corruption. The backup
//! snapshot of the asset table is the source of truth: an exact name match
//! there wins, otherwise the node gets its type's default payload. A missing
//! backup row is the expected case for entities that never had a correct
//! asset, so it is never an error.

use crate::db::backup::backup_name;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};

/// Default payload for extension nodes created by the repair
pub const EXTENSION_DEFAULT_RULES: &str = r#"{"core.admin":{"7":1},"core.manage":{"6":1},"core.create":[],"core.delete":[],"core.edit":[],"core.edit.state":[],"core.edit.own":[]}"#;

/// Default payload for category nodes
pub const CATEGORY_DEFAULT_RULES: &str = r#"{"core.admin":{"7":1},"core.manage":{"6":1},"core.create":[],"core.delete":[],"core.edit":[],"core.edit.state":[]}"#;

/// Default payload for content nodes
pub const CONTENT_DEFAULT_RULES: &str = r#"{"core.delete":{"6":1},"core.edit":{"6":1,"4":1},"core.edit.state":{"6":1,"5":1}}"#;

/// Look up the pre-corruption rules for `name` in the backup snapshot.
///
/// Returns `None` when no backup row exists, or when the backup row carries
/// no payload.
pub fn backup_rules(conn: &Connection, name: &str) -> Result<Option<String>> {
    let sql = format!(
        "SELECT rules FROM \"{}\" WHERE name = ?1",
        backup_name("assets")
    );

    let rules: Option<Option<String>> = conn
        .query_row(&sql, params![name], |row| row.get(0))
        .optional()?;

    Ok(rules.flatten())
}

/// Backup rules for `name`, falling back to `default` on a miss
pub fn rules_or_default(conn: &Connection, name: &str, default: &str) -> Result<String> {
    Ok(backup_rules(conn, name)?.unwrap_or_else(|| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_backup_snapshot() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE assets_backup (name TEXT PRIMARY KEY, rules TEXT);
             INSERT INTO assets_backup (name, rules)
             VALUES ('com_content.article.42', '{\"core.edit\":{\"4\":1}}');
             INSERT INTO assets_backup (name, rules) VALUES ('com_orphan', NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_backup_hit() {
        let conn = create_backup_snapshot();
        assert_eq!(
            backup_rules(&conn, "com_content.article.42").unwrap().as_deref(),
            Some("{\"core.edit\":{\"4\":1}}")
        );
    }

    #[test]
    fn test_backup_miss_is_none() {
        let conn = create_backup_snapshot();
        assert_eq!(backup_rules(&conn, "com_content.article.7").unwrap(), None);
    }

    #[test]
    fn test_null_payload_counts_as_miss() {
        let conn = create_backup_snapshot();
        assert_eq!(
            rules_or_default(&conn, "com_orphan", EXTENSION_DEFAULT_RULES).unwrap(),
            EXTENSION_DEFAULT_RULES
        );
    }

    #[test]
    fn test_default_payloads_are_valid_json() {
        for payload in [
            EXTENSION_DEFAULT_RULES,
            CATEGORY_DEFAULT_RULES,
            CONTENT_DEFAULT_RULES,
        ] {
            serde_json::from_str::<serde_json::Value>(payload).unwrap();
        }
    }
}
