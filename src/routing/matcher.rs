//! Path matching against mount prefixes.
//!
//! # Responsibilities
//! - Normalize request paths (leading slash only)
//! - Match a path against a bare mount prefix
//! - Extract the mount-relative remainder
//!
//! # Design Decisions
//! - Prefix matching is segment-aware: `/api` matches `/api` and `/api/x`,
//!   never `/apiv2`
//! - Trailing slashes are kept; they only matter for comparison
//! - Segment counting drops trailing empty segments so `/db/coll/` counts
//!   as two

use std::borrow::Cow;

/// The root path, also the segment separator.
pub const ROOT: &str = "/";

/// Ensure a path starts with `/`. Empty input yields `/`.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if path.starts_with(ROOT) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{}{}", ROOT, path))
    }
}

/// True if `path` falls under the bare mount `prefix`.
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == ROOT {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(ROOT) || prefix.ends_with(ROOT),
        None => false,
    }
}

/// The part of `path` below `prefix`, without its leading slash.
///
/// Callers must have checked [`matches_prefix`] first.
pub fn relative_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix == ROOT {
        return path.strip_prefix(ROOT).unwrap_or(path);
    }
    let rest = path.strip_prefix(prefix).unwrap_or("");
    rest.strip_prefix(ROOT).unwrap_or(rest)
}

/// Number of `/`-separated segments, ignoring trailing empty ones.
///
/// `""` has none; interior empty segments (`a//b`) still count.
pub fn segment_count(relative: &str) -> usize {
    let mut segments: Vec<&str> = relative.split(ROOT).collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("db/coll"), "/db/coll");
        assert_eq!(normalize("/db/coll/"), "/db/coll/");
    }

    #[test]
    fn test_prefix_matching() {
        assert!(matches_prefix("/anything", "/"));
        assert!(matches_prefix("/api", "/api"));
        assert!(matches_prefix("/api/orders", "/api"));
        assert!(matches_prefix("/api/", "/api"));
        assert!(!matches_prefix("/apiv2/data", "/api"));
        assert!(!matches_prefix("/other", "/api"));
        assert!(!matches_prefix("/ap", "/api"));
        assert!(matches_prefix("/api/v1/data/mydb", "/api/v1/data"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("/", "/"), "");
        assert_eq!(relative_path("/db/coll", "/"), "db/coll");
        assert_eq!(relative_path("/api", "/api"), "");
        assert_eq!(relative_path("/api/", "/api"), "");
        assert_eq!(relative_path("/api/orders/1", "/api"), "orders/1");
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(""), 0);
        assert_eq!(segment_count("db"), 1);
        assert_eq!(segment_count("db/coll/"), 2);
        assert_eq!(segment_count("db//doc"), 3);
        assert_eq!(segment_count("a/b/c/d"), 4);
    }
}
