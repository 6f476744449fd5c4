// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use rusqlite::{Connection, params};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a throwaway CMS database with the tables the repair touches.
///
/// The asset tree starts with just the root node; the category tree starts
/// with just the root category. Returns (TempDir, db_path, Connection);
/// keep the TempDir alive to prevent cleanup.
pub fn cms_db() -> (TempDir, String, Connection) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("site.db")
        .to_str()
        .unwrap()
        .to_string();

    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL DEFAULT 0,
            lft INTEGER NOT NULL DEFAULT 0,
            rgt INTEGER NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 0,
            name TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL DEFAULT '',
            rules TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE extensions (
            extension_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            element TEXT NOT NULL,
            protected INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            asset_id INTEGER NOT NULL DEFAULT 0,
            parent_id INTEGER,
            title TEXT NOT NULL,
            extension TEXT NOT NULL
        );

        CREATE TABLE content (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            asset_id INTEGER NOT NULL DEFAULT 0,
            title TEXT NOT NULL,
            catid INTEGER
        );

        INSERT INTO assets (id, parent_id, lft, rgt, level, name, title, rules)
        VALUES (1, 0, 0, 1, 0, 'root.1', 'Root Asset', '{}');

        INSERT INTO categories (id, asset_id, parent_id, title, extension)
        VALUES (1, 0, 0, 'ROOT', 'system');",
    )
    .unwrap();

    (temp_dir, db_path, conn)
}

/// Write a seed script into the temp dir and return its path
pub fn write_seed(temp_dir: &TempDir, sql: &str) -> PathBuf {
    let path = temp_dir.path().join("assets.sql");
    std::fs::write(&path, sql).unwrap();
    path
}

/// A minimal baseline: root node plus a com_content node with stable ids
pub const BASELINE_SEED: &str = "DELETE FROM assets;
INSERT INTO assets (id, parent_id, lft, rgt, level, name, title, rules) VALUES
(1, 0, 0, 3, 0, 'root.1', 'Root Asset', '{}'),
(2, 1, 1, 2, 1, 'com_content', 'com_content', '{\"core.admin\":{\"7\":1}}');
";

pub fn add_extension(conn: &Connection, name: &str, element: &str) {
    conn.execute(
        "INSERT INTO extensions (name, type, element, protected) VALUES (?1, 'component', ?2, 0)",
        params![name, element],
    )
    .unwrap();
}

pub fn add_protected_extension(conn: &Connection, name: &str, element: &str) {
    conn.execute(
        "INSERT INTO extensions (name, type, element, protected) VALUES (?1, 'component', ?2, 1)",
        params![name, element],
    )
    .unwrap();
}

pub fn add_plugin_extension(conn: &Connection, name: &str, element: &str) {
    conn.execute(
        "INSERT INTO extensions (name, type, element, protected) VALUES (?1, 'plugin', ?2, 0)",
        params![name, element],
    )
    .unwrap();
}

pub fn add_category(
    conn: &Connection,
    id: i64,
    parent_id: Option<i64>,
    title: &str,
    extension: &str,
) {
    conn.execute(
        "INSERT INTO categories (id, parent_id, title, extension) VALUES (?1, ?2, ?3, ?4)",
        params![id, parent_id, title, extension],
    )
    .unwrap();
}

pub fn set_category_parent(conn: &Connection, id: i64, parent_id: Option<i64>) {
    conn.execute(
        "UPDATE categories SET parent_id = ?1 WHERE id = ?2",
        params![parent_id, id],
    )
    .unwrap();
}

pub fn add_article(conn: &Connection, id: i64, title: &str, catid: Option<i64>) {
    conn.execute(
        "INSERT INTO content (id, title, catid) VALUES (?1, ?2, ?3)",
        params![id, title, catid],
    )
    .unwrap();
}

pub fn set_article_category(conn: &Connection, id: i64, catid: Option<i64>) {
    conn.execute(
        "UPDATE content SET catid = ?1 WHERE id = ?2",
        params![catid, id],
    )
    .unwrap();
}

/// Insert a pre-corruption asset row directly, with explicit boundaries
pub fn add_raw_asset(
    conn: &Connection,
    id: i64,
    parent_id: i64,
    lft: i64,
    rgt: i64,
    level: i64,
    name: &str,
    title: &str,
    rules: &str,
) {
    conn.execute(
        "INSERT INTO assets (id, parent_id, lft, rgt, level, name, title, rules)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![id, parent_id, lft, rgt, level, name, title, rules],
    )
    .unwrap();
}

/// Reset the asset table to just the root node, as the baseline seed would
pub fn reset_assets_to_root(conn: &Connection) {
    conn.execute_batch(
        "DELETE FROM assets;
         INSERT INTO assets (id, parent_id, lft, rgt, level, name, title, rules)
         VALUES (1, 0, 0, 1, 0, 'root.1', 'Root Asset', '{}');",
    )
    .unwrap();
}

pub fn category_asset_id(conn: &Connection, id: i64) -> i64 {
    conn.query_row(
        "SELECT asset_id FROM categories WHERE id = ?1",
        [id],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn article_asset_id(conn: &Connection, id: i64) -> i64 {
    conn.query_row("SELECT asset_id FROM content WHERE id = ?1", [id], |row| {
        row.get(0)
    })
    .unwrap()
}

pub fn table_exists(conn: &Connection, name: &str) -> bool {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .unwrap();
    count > 0
}
