//! Resource extraction per mount shape.
//!
//! Turns a mount shape plus the mount-relative remainder into the MongoDB
//! target: database, collection, what may be created or deleted at this
//! level, and the canonical `/database/collection/...` path.

use crate::routing::matcher::ROOT;
use crate::routing::mount::ResourceShape;
use crate::routing::tenant::substitute;

/// What a request points at, before the request-wide flags are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub database: Option<String>,
    pub collection: Option<String>,
    pub can_create_sibling_database: bool,
    pub can_create_collection: bool,
    pub can_delete_database: bool,
    pub can_delete_collection: bool,
    pub canonical_resource_path: String,
}

/// Resolve `relative` under a mount of the given shape.
pub fn extract(shape: &ResourceShape, tenant_id: Option<&str>, relative: &str) -> Target {
    match shape {
        ResourceShape::WildcardAtRoot => wildcard_at_root(&format!("{}{}", ROOT, relative)),
        ResourceShape::DatabaseAnyCollection { database } => {
            database_mount(&substitute(tenant_id, database), relative)
        }
        ResourceShape::Database { database } => {
            database_mount(&substitute(tenant_id, database), relative)
        }
        ResourceShape::FixedCollection {
            database,
            collection,
        } => fixed_collection(
            &substitute(tenant_id, database),
            &substitute(tenant_id, collection),
            relative,
        ),
    }
}

/// Database and collection are the first two segments of `path`.
///
/// `path` must start with `/`; it is used verbatim as the canonical path.
pub fn wildcard_at_root(path: &str) -> Target {
    let mut parts = path.strip_prefix(ROOT).unwrap_or(path).splitn(3, ROOT);
    let database = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    let collection = parts
        .next()
        .filter(|s| !s.is_empty() && database.is_some())
        .map(str::to_string);

    let has_db = database.is_some();
    let has_coll = collection.is_some();

    Target {
        can_create_sibling_database: !has_db,
        can_create_collection: has_db && !has_coll,
        can_delete_database: has_db && !has_coll,
        can_delete_collection: has_db && has_coll,
        database,
        collection,
        canonical_resource_path: path.to_string(),
    }
}

/// Fixed database; the first remainder segment, if any, is the collection.
///
/// Shared by database-only and database-with-any-collection mounts.
fn database_mount(database: &str, relative: &str) -> Target {
    let (first, rest) = match relative.split_once(ROOT) {
        Some((first, rest)) => (first, rest),
        None => (relative, ""),
    };
    let collection = Some(first).filter(|s| !s.is_empty()).map(str::to_string);

    let mut canonical = format!("{}{}", ROOT, database);
    if let Some(coll) = &collection {
        canonical.push_str(ROOT);
        canonical.push_str(coll);
        if !rest.is_empty() {
            canonical.push_str(ROOT);
            canonical.push_str(rest);
        }
    }

    let has_coll = collection.is_some();

    Target {
        database: Some(database.to_string()),
        collection,
        can_create_sibling_database: false,
        can_create_collection: !has_coll,
        can_delete_database: false,
        can_delete_collection: has_coll,
        canonical_resource_path: canonical,
    }
}

/// Both pinned; the whole remainder is a document id.
fn fixed_collection(database: &str, collection: &str, relative: &str) -> Target {
    let mut canonical = format!("{}{}{}{}", ROOT, database, ROOT, collection);
    if !relative.is_empty() {
        canonical.push_str(ROOT);
        canonical.push_str(relative);
    }

    Target {
        database: Some(database.to_string()),
        collection: Some(collection.to_string()),
        can_create_sibling_database: false,
        can_create_collection: false,
        can_delete_database: false,
        can_delete_collection: false,
        canonical_resource_path: canonical,
    }
}
