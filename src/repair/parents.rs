// src/repair/parents.rs

//! Parent resolution
//!
//! Determines which asset node a repaired entity hangs under. Extensions
//! always attach to the tree root. Categories and content items attach to
//! their owning extension's node when they sit directly under the root
//! category, and otherwise to the asset matching their parent category's
//! title. Category ids and asset ids are independent numbering spaces, so
//! the title is the only usable join key in the legacy data.
//!
//! Resolution semantics:
//! - `None`: the entity has no parent reference at all; keep the node's
//!   current placement.
//! - `Some(0)`: the parent reference dangles; the upsert places the node at
//!   the tree root.
//! - `Some(id)`: place the node as the last child of asset `id`.

use crate::db::models::{Asset, Category, ContentItem, ROOT_CATEGORY_ID};
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};

/// Rewrite legacy extension aliases to their canonical key
pub fn normalize_extension(extension: &str) -> &str {
    if extension == "com_contact_details" {
        "com_contact"
    } else {
        extension
    }
}

/// Resolve the parent asset for a category
pub fn category_parent(conn: &Connection, category: &Category) -> Result<Option<i64>> {
    let Some(parent_id) = category.parent_id else {
        return Ok(None);
    };

    if parent_id == ROOT_CATEGORY_ID {
        let extension = normalize_extension(&category.extension);
        return extension_node_id(conn, extension).map(Some);
    }

    if parent_id > ROOT_CATEGORY_ID {
        return asset_id_by_category_title(conn, parent_id).map(Some);
    }

    Ok(Some(0))
}

/// Resolve the parent asset for a content item
pub fn content_parent(conn: &Connection, item: &ContentItem) -> Result<Option<i64>> {
    let Some(catid) = item.catid else {
        return Ok(None);
    };

    if catid == ROOT_CATEGORY_ID {
        return extension_node_id(conn, "com_content").map(Some);
    }

    if catid > ROOT_CATEGORY_ID {
        return asset_id_by_category_title(conn, catid).map(Some);
    }

    Ok(Some(0))
}

fn extension_node_id(conn: &Connection, extension: &str) -> Result<i64> {
    let node = Asset::find_by_name(conn, extension)?;
    Ok(node.and_then(|asset| asset.id).unwrap_or(0))
}

/// Title-based join from a category id to its asset node id.
///
/// Titles are not guaranteed unique; the lowest matching asset id wins to
/// keep re-runs deterministic. A dangling category or an unmatched title
/// resolves to 0.
fn asset_id_by_category_title(conn: &Connection, category_id: i64) -> Result<i64> {
    let id: Option<Option<i64>> = conn
        .query_row(
            "SELECT a.id FROM categories c
             LEFT JOIN assets a ON a.title = c.title
             WHERE c.id = ?1 ORDER BY a.id LIMIT 1",
            params![category_id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(id.flatten().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension_rewrites_contact_alias() {
        assert_eq!(normalize_extension("com_contact_details"), "com_contact");
    }

    #[test]
    fn test_normalize_extension_passes_others_through() {
        assert_eq!(normalize_extension("com_content"), "com_content");
        assert_eq!(normalize_extension("com_weblinks"), "com_weblinks");
    }
}
