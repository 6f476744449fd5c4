// src/repair/passes.rs

//! Per-table repair passes
//!
//! Each pass walks one entity table, resolves the semantic parent, pulls the
//! pre-corruption rules, upserts the asset node and rewires the owning
//! row's foreign key. The passes must run in dependency order: extensions
//! first (categories parent onto extension nodes), then categories (content
//! parents onto category nodes), then content.

use crate::db::models::{Asset, Category, ComponentExtension, ContentItem};
use crate::error::Result;
use crate::progress::ProgressTracker;
use crate::repair::{parents, rules, upsert};
use rusqlite::Connection;
use tracing::debug;

/// Window size for the content pass
pub const CONTENT_PAGE_SIZE: i64 = 100;

/// Seed asset nodes for non-protected component extensions.
///
/// Extensions that already have a node are left untouched: the baseline
/// seed positions the stock components, and repositioning them would reorder
/// the whole tree on every run. Returns the number of rows examined.
pub fn repair_extensions(conn: &Connection, progress: &dyn ProgressTracker) -> Result<usize> {
    let extensions = ComponentExtension::unprotected_components(conn)?;
    progress.set_position(0);
    progress.set_length(extensions.len() as u64);

    let root = Asset::root_id(conn)?;
    let mut processed = 0;

    for extension in &extensions {
        if Asset::find_by_name(conn, &extension.element)?.is_none() {
            let payload =
                rules::rules_or_default(conn, &extension.element, rules::EXTENSION_DEFAULT_RULES)?;
            let id = upsert::upsert_asset(
                conn,
                &extension.element,
                &extension.name,
                &payload,
                Some(root),
            )?;
            debug!("Created asset {} for extension {}", id, extension.element);
        }

        processed += 1;
        progress.increment(1);
    }

    Ok(processed)
}

/// Rebuild asset nodes for every category below the root.
///
/// Categories are always upserted: corrupted parent links are exactly what
/// triggers re-runs, so each run repositions every category node to match
/// its current `parent_id`. Returns the number of rows processed.
pub fn repair_categories(conn: &Connection, progress: &dyn ProgressTracker) -> Result<usize> {
    let categories = Category::all_below_root(conn)?;
    progress.set_position(0);
    progress.set_length(categories.len() as u64);

    let mut processed = 0;

    for category in &categories {
        let extension = parents::normalize_extension(&category.extension);
        let name = format!("{}.category.{}", extension, category.id);
        let payload = rules::rules_or_default(conn, &name, rules::CATEGORY_DEFAULT_RULES)?;
        let parent = parents::category_parent(conn, category)?;

        let asset_id = upsert::upsert_asset(conn, &name, &category.title, &payload, parent)?;
        Category::set_asset_id(conn, category.id, asset_id)?;

        processed += 1;
        progress.increment(1);
    }

    Ok(processed)
}

/// Rebuild asset nodes for every content item, one page at a time.
///
/// Returns the number of rows processed.
pub fn repair_content(conn: &Connection, progress: &dyn ProgressTracker) -> Result<usize> {
    let total = ContentItem::count(conn)?;
    progress.set_position(0);
    progress.set_length(total as u64);

    let mut processed = 0;
    let mut offset = 0;

    loop {
        let page = ContentItem::page(conn, CONTENT_PAGE_SIZE, offset)?;
        if page.is_empty() {
            break;
        }

        for item in &page {
            let name = format!("com_content.article.{}", item.id);
            let payload = rules::rules_or_default(conn, &name, rules::CONTENT_DEFAULT_RULES)?;
            let parent = parents::content_parent(conn, item)?;

            let asset_id = upsert::upsert_asset(conn, &name, &item.title, &payload, parent)?;
            ContentItem::set_asset_id(conn, item.id, asset_id)?;

            processed += 1;
            progress.increment(1);
        }

        if (page.len() as i64) < CONTENT_PAGE_SIZE {
            break;
        }
        offset += CONTENT_PAGE_SIZE;
    }

    Ok(processed)
}
