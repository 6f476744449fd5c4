// src/db/models/asset.rs

//! Nested-set asset model
//!
//! The `assets` table stores one node per access-controlled object. Ancestry
//! is encoded in `lft`/`rgt` boundary values: A is an ancestor of B iff
//! `A.lft < B.lft AND B.rgt < A.rgt`. The boundary arithmetic lives entirely
//! in this module; callers position nodes through [`Asset::insert_as_last_child`]
//! and [`Asset::move_as_last_child`] and never hand-compute boundaries.

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A node in the nested-set permission tree
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: Option<i64>,
    pub parent_id: i64,
    pub lft: i64,
    pub rgt: i64,
    pub level: i64,
    pub name: String,
    pub title: String,
    pub rules: String,
}

impl Asset {
    /// Find an asset by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, parent_id, lft, rgt, level, name, title, rules
             FROM assets WHERE id = ?1",
        )?;

        let asset = stmt.query_row([id], Self::from_row).optional()?;
        Ok(asset)
    }

    /// Find an asset by its unique logical name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, parent_id, lft, rgt, level, name, title, rules
             FROM assets WHERE name = ?1",
        )?;

        let asset = stmt.query_row([name], Self::from_row).optional()?;
        Ok(asset)
    }

    /// Get the id of the tree root (the only node without a parent)
    pub fn root_id(conn: &Connection) -> Result<i64> {
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM assets WHERE parent_id = 0 ORDER BY lft LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        id.ok_or(Error::RootMissing)
    }

    /// List every asset ordered by tree position
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, parent_id, lft, rgt, level, name, title, rules
             FROM assets ORDER BY lft",
        )?;

        let assets = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(assets)
    }

    /// True when `other` lies inside this node's subtree (self included)
    pub fn contains(&self, other: &Asset) -> bool {
        self.lft <= other.lft && other.rgt <= self.rgt
    }

    /// Update title and rules without touching tree position
    pub fn update_payload(&self, conn: &Connection) -> Result<i64> {
        let id = self
            .id
            .ok_or_else(|| Error::other("cannot update an asset without an id"))?;

        conn.execute(
            "UPDATE assets SET title = ?1, rules = ?2 WHERE id = ?3",
            params![&self.title, &self.rules, id],
        )?;

        Ok(id)
    }

    /// Insert a new node as the last child of `parent_id`.
    ///
    /// Opens a two-wide gap at the parent's right boundary, shifting every
    /// affected boundary value, then inserts the node into the gap. Returns
    /// the new node's id.
    pub fn insert_as_last_child(
        conn: &Connection,
        parent_id: i64,
        name: &str,
        title: &str,
        rules: &str,
    ) -> Result<i64> {
        let tx = conn.unchecked_transaction()?;

        let parent = Self::find_by_id(&tx, parent_id)?
            .ok_or_else(|| Error::other(format!("parent asset {parent_id} not found")))?;

        tx.execute(
            "UPDATE assets SET rgt = rgt + 2 WHERE rgt >= ?1",
            params![parent.rgt],
        )?;
        tx.execute(
            "UPDATE assets SET lft = lft + 2 WHERE lft > ?1",
            params![parent.rgt],
        )?;

        tx.execute(
            "INSERT INTO assets (parent_id, lft, rgt, level, name, title, rules)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                parent_id,
                parent.rgt,
                parent.rgt + 1,
                parent.level + 1,
                name,
                title,
                rules
            ],
        )?;

        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// Move this node (and its subtree) to become the last child of `parent_id`.
    ///
    /// The subtree is detached by negating its boundaries, the gap it leaves
    /// is closed, a new gap is opened at the parent's right boundary, and the
    /// subtree is re-attached with shifted boundaries and levels. Boundary
    /// values of the in-memory struct are refreshed afterwards.
    pub fn move_as_last_child(&mut self, conn: &Connection, parent_id: i64) -> Result<()> {
        let id = self
            .id
            .ok_or_else(|| Error::other("cannot move an asset without an id"))?;

        let parent = Self::find_by_id(conn, parent_id)?
            .ok_or_else(|| Error::other(format!("parent asset {parent_id} not found")))?;

        if self.contains(&parent) {
            return Err(Error::InvalidMove { id, parent_id });
        }

        let width = self.rgt - self.lft + 1;
        let tx = conn.unchecked_transaction()?;

        // Detach the subtree by flipping its boundaries negative.
        tx.execute(
            "UPDATE assets SET lft = -lft, rgt = -rgt WHERE lft >= ?1 AND rgt <= ?2",
            params![self.lft, self.rgt],
        )?;

        // Close the gap the subtree left behind.
        tx.execute(
            "UPDATE assets SET lft = lft - ?1 WHERE lft > ?2",
            params![width, self.rgt],
        )?;
        tx.execute(
            "UPDATE assets SET rgt = rgt - ?1 WHERE rgt > ?2",
            params![width, self.rgt],
        )?;

        // The parent's boundaries may have shifted while closing the gap.
        let parent = Self::find_by_id(&tx, parent_id)?
            .ok_or_else(|| Error::other(format!("parent asset {parent_id} not found")))?;

        // Open a gap at the parent's right boundary.
        tx.execute(
            "UPDATE assets SET lft = lft + ?1 WHERE lft >= ?2",
            params![width, parent.rgt],
        )?;
        tx.execute(
            "UPDATE assets SET rgt = rgt + ?1 WHERE rgt >= ?2",
            params![width, parent.rgt],
        )?;

        // Re-attach the subtree into the gap.
        let offset = parent.rgt - self.lft;
        let level_offset = parent.level + 1 - self.level;
        tx.execute(
            "UPDATE assets SET lft = -lft + ?1, rgt = -rgt + ?1, level = level + ?2
             WHERE lft < 0",
            params![offset, level_offset],
        )?;

        tx.execute(
            "UPDATE assets SET parent_id = ?1 WHERE id = ?2",
            params![parent_id, id],
        )?;

        tx.commit()?;

        *self = Self::find_by_id(conn, id)?
            .ok_or_else(|| Error::other(format!("asset {id} vanished during move")))?;

        Ok(())
    }

    /// Convert a database row to an Asset
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            parent_id: row.get(1)?,
            lft: row.get(2)?,
            rgt: row.get(3)?,
            level: row.get(4)?,
            name: row.get(5)?,
            title: row.get(6)?,
            rules: row.get(7)?,
        })
    }
}
