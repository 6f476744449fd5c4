// src/db/models/content.rs

//! Content item rows

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// A row of the `content` table
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub catid: Option<i64>,
    pub asset_id: i64,
}

impl ContentItem {
    /// Count all content rows
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Load one page of content rows in ascending id order.
    ///
    /// Pagination bounds memory on large tables; ids are stable across the
    /// repair so offset paging never skips or repeats a row.
    pub fn page(conn: &Connection, limit: i64, offset: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, catid, asset_id
             FROM content ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;

        let items = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Rewire this content item's asset foreign key
    pub fn set_asset_id(conn: &Connection, id: i64, asset_id: i64) -> Result<()> {
        conn.execute(
            "UPDATE content SET asset_id = ?1 WHERE id = ?2",
            params![asset_id, id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            catid: row.get(2)?,
            asset_id: row.get(3)?,
        })
    }
}
