// src/db/models/extension.rs

//! Component extension rows

use crate::error::Result;
use rusqlite::{Connection, Row};

/// A component extension as listed in the `extensions` table.
///
/// Only the columns the repair needs are loaded; `element` doubles as the
/// extension's asset node name.
#[derive(Debug, Clone)]
pub struct ComponentExtension {
    pub name: String,
    pub element: String,
}

impl ComponentExtension {
    /// List distinct, non-protected component extensions.
    ///
    /// Protected (system) components never get repaired assets.
    pub fn unprotected_components(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT name, element FROM extensions
             WHERE type = 'component' AND protected = 0
             GROUP BY element",
        )?;

        let extensions = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(extensions)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            element: row.get(1)?,
        })
    }
}
