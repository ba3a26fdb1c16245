//! Request path resolution.
//!
//! # Responsibilities
//! - Walk the mount table in order, first match wins
//! - Substitute the tenant id into each mount before matching
//! - Skip tenant mounts when no valid tenant id is available
//! - Fall back to a wildcard mount at root when nothing matches
//! - Attach the request-wide flags (parametric table, extra segments)
//!
//! # Design Decisions
//! - Total: every path resolves, over-deep paths are flagged, not rejected
//! - Pure: no caching, no I/O, no locks; share via `Arc` across tasks
//! - Specificity is the operator's concern, table order is authoritative

use serde::Serialize;

use crate::routing::depth::has_extra_path_segments;
use crate::routing::matcher::{matches_prefix, normalize, relative_path};
use crate::routing::mount::{MountTable, ResourceShape};
use crate::routing::shape::{extract, wildcard_at_root, Target};
use crate::routing::tenant::{is_parametric, substitute};

/// The MongoDB context a request path maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContext {
    /// `None` at root.
    pub database: Option<String>,
    /// `None` unless the path reaches into a collection. Never set without
    /// `database`.
    pub collection: Option<String>,
    pub can_create_sibling_database: bool,
    pub can_create_collection: bool,
    pub can_delete_database: bool,
    pub can_delete_collection: bool,
    /// `/database/collection/...`, independent of how the mount was written.
    pub canonical_resource_path: String,
    /// Shape of the mount that resolved the path.
    pub shape: &'static str,
    pub has_parametric_mounts: bool,
    pub has_extra_path_segments: bool,
}

impl ResolvedContext {
    fn new(
        target: Target,
        shape: &'static str,
        has_parametric_mounts: bool,
        has_extra_path_segments: bool,
    ) -> Self {
        Self {
            database: target.database,
            collection: target.collection,
            can_create_sibling_database: target.can_create_sibling_database,
            can_create_collection: target.can_create_collection,
            can_delete_database: target.can_delete_database,
            can_delete_collection: target.can_delete_collection,
            canonical_resource_path: target.canonical_resource_path,
            shape,
            has_parametric_mounts,
            has_extra_path_segments,
        }
    }

    /// True when the path addresses the root (no database).
    pub fn is_root(&self) -> bool {
        self.database.is_none()
    }
}

/// Maps request paths onto MongoDB resources using a frozen mount table.
#[derive(Debug, Clone, Default)]
pub struct MountResolver {
    table: MountTable,
}

impl MountResolver {
    pub fn new(table: MountTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MountTable {
        &self.table
    }

    /// Resolve a request path with no tenant.
    pub fn resolve_path(&self, path: &str) -> ResolvedContext {
        self.resolve(path, None)
    }

    /// Resolve a request path, substituting `tenant_id` into parametric
    /// mounts when it is valid.
    pub fn resolve(&self, path: &str, tenant_id: Option<&str>) -> ResolvedContext {
        let path = normalize(path);
        let has_parametric = self.table.has_parametric_mounts();
        let has_extra = has_extra_path_segments(self.table.rules(), &path);

        tracing::debug!(path = %path, mounts = self.table.len(), "Resolving request path");

        for rule in self.table.rules() {
            tracing::debug!(what = rule.resource(), uri = rule.uri(), "Checking mount");

            let prefix = substitute(tenant_id, rule.prefix());
            if !matches_prefix(&path, &prefix) {
                continue;
            }
            // Without a usable tenant the placeholder would leak into the
            // resolved names.
            if is_parametric(&substitute(tenant_id, rule.resource())) {
                tracing::debug!(what = rule.resource(), "Skipping tenant mount, no valid tenant");
                continue;
            }

            let shape = rule.shape();
            let target = extract(shape, tenant_id, relative_path(&path, &prefix));
            tracing::debug!(
                shape = shape.kind(),
                resource_path = %target.canonical_resource_path,
                "Mount matched"
            );
            return ResolvedContext::new(target, shape.kind(), has_parametric, has_extra);
        }

        let target = wildcard_at_root(&path);
        ResolvedContext::new(target, ResourceShape::WildcardAtRoot.kind(), has_parametric, has_extra)
    }
}
