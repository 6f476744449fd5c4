// src/repair/upsert.rs

//! Asset upsert
//!
//! One entry point turns "this entity should have this node" into tree
//! mutations: create the node if the name is unknown, otherwise refresh its
//! payload and reposition it. Re-running an upsert for an already-correct
//! row returns the same id.

use crate::db::models::Asset;
use crate::error::Result;
use rusqlite::Connection;

/// Create or update the asset named `name` and return its id.
///
/// `parent` follows the resolver convention: `None` keeps the current
/// placement, `Some(0)` places at the tree root, `Some(id)` places as the
/// last child of `id`. New nodes without a usable parent also land at the
/// root.
pub fn upsert_asset(
    conn: &Connection,
    name: &str,
    title: &str,
    rules: &str,
    parent: Option<i64>,
) -> Result<i64> {
    match Asset::find_by_name(conn, name)? {
        Some(mut asset) => {
            asset.title = title.to_string();
            asset.rules = rules.to_string();
            let id = asset.update_payload(conn)?;

            if let Some(parent_id) = parent {
                let target = if parent_id == 0 {
                    Asset::root_id(conn)?
                } else {
                    parent_id
                };
                asset.move_as_last_child(conn, target)?;
            }

            Ok(id)
        }
        None => {
            let target = match parent {
                Some(parent_id) if parent_id > 0 => parent_id,
                _ => Asset::root_id(conn)?,
            };

            Asset::insert_as_last_child(conn, target, name, title, rules)
        }
    }
}
