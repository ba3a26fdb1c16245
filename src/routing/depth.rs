//! Path depth validation.
//!
//! A MongoDB path is at most `/database/collection/document`. How much of
//! that the request path supplies depends on the mount shape, so the limit
//! is counted on the mount-relative remainder.

use crate::routing::matcher::{matches_prefix, relative_path, segment_count, ROOT};
use crate::routing::mount::{MountRule, ResourceShape};

/// Segments a remainder may have under each shape.
pub fn max_segments(shape: &ResourceShape) -> usize {
    match shape {
        ResourceShape::WildcardAtRoot => 3,
        ResourceShape::FixedCollection { .. } => 1,
        ResourceShape::Database { .. } | ResourceShape::DatabaseAnyCollection { .. } => 2,
    }
}

/// True if `path` goes deeper than its mount allows.
///
/// Matches against the configured prefixes with the tenant placeholder left
/// in place, so a tenant mount only takes part here for paths that spell the
/// placeholder literally. Unmatched paths use the wildcard-at-root limit.
///
/// A remainder with an empty first segment (`//x/y`) is flagged too: it
/// names no resource at its first level.
pub fn has_extra_path_segments(rules: &[MountRule], path: &str) -> bool {
    let (relative, shape) = match rules.iter().find(|rule| matches_prefix(path, rule.prefix())) {
        Some(rule) => (relative_path(path, rule.prefix()), rule.shape()),
        None => (relative_path(path, ROOT), &ResourceShape::WildcardAtRoot),
    };
    let segments = segment_count(relative);
    segments > max_segments(shape) || (relative.starts_with(ROOT) && segments > 0)
}
