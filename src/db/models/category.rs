// src/db/models/category.rs

//! Category rows
//!
//! Categories form their own self-referential tree through `parent_id`, with
//! a single root row (id 1) that is never repaired. `asset_id` links each
//! category to its node in the asset tree.

use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// Id of the synthetic root category
pub const ROOT_CATEGORY_ID: i64 = 1;

/// A row of the `categories` table
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub title: String,
    pub extension: String,
    pub asset_id: i64,
}

impl Category {
    /// List every category except the root, in ascending id order
    pub fn all_below_root(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, parent_id, title, extension, asset_id
             FROM categories WHERE id != ?1 ORDER BY id",
        )?;

        let categories = stmt
            .query_map([ROOT_CATEGORY_ID], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Rewire this category's asset foreign key
    pub fn set_asset_id(conn: &Connection, id: i64, asset_id: i64) -> Result<()> {
        conn.execute(
            "UPDATE categories SET asset_id = ?1 WHERE id = ?2",
            params![asset_id, id],
        )?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            title: row.get(2)?,
            extension: row.get(3)?,
            asset_id: row.get(4)?,
        })
    }
}
