//! Tenant placeholder substitution.
//!
//! Mount patterns may embed `{host[0]}`, the first label of the request host.
//! The HTTP layer extracts a tenant id; this module only validates it and
//! rewrites patterns.

use std::borrow::Cow;

/// Placeholder replaced by the tenant id.
pub const HOST_0: &str = "{host[0]}";

/// Longest valid tenant id (a DNS label).
pub const MAX_TENANT_ID_LEN: usize = 63;

/// Check a tenant id against DNS label rules.
///
/// 1 to 63 ASCII letters, digits or hyphens, neither starting nor ending with
/// a hyphen. Anything else could smuggle path or query syntax into a mount
/// pattern.
pub fn is_valid_tenant_id(tenant_id: &str) -> bool {
    let bytes = tenant_id.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_TENANT_ID_LEN {
        return false;
    }
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// True if the pattern uses the tenant placeholder.
pub fn is_parametric(pattern: &str) -> bool {
    pattern.contains(HOST_0)
}

/// Replace the placeholder in `pattern` with `tenant_id`.
///
/// The pattern comes back untouched (placeholder included) when there is no
/// tenant id, no placeholder, or the tenant id is invalid.
pub fn substitute<'a>(tenant_id: Option<&str>, pattern: &'a str) -> Cow<'a, str> {
    match tenant_id {
        Some(tid) if is_parametric(pattern) && is_valid_tenant_id(tid) => {
            Cow::Owned(pattern.replace(HOST_0, tid))
        }
        _ => Cow::Borrowed(pattern),
    }
}
