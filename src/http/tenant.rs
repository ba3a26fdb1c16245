//! Tenant identification.
//!
//! Picks the tenant id handed to the resolver: the configured header first,
//! then the first label of the `Host` header. Invalid values are dropped so
//! they never reach a mount pattern.

use axum::http::{header::HOST, HeaderMap};

use crate::config::TenancyConfig;
use crate::routing::tenant::is_valid_tenant_id;

/// Extract a valid tenant id from request headers, if tenancy is enabled.
pub fn extract_tenant_id(headers: &HeaderMap, config: &TenancyConfig) -> Option<String> {
    if !config.enabled {
        return None;
    }

    let from_header = config
        .header
        .as_deref()
        .and_then(|name| headers.get(name))
        .and_then(|v| v.to_str().ok())
        .filter(|v| is_valid_tenant_id(v));

    if let Some(tenant) = from_header {
        tracing::debug!(tenant_id = %tenant, "Tenant from header");
        return Some(tenant.to_string());
    }

    if config.from_host {
        let tenant = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .and_then(host_first_label)
            .filter(|label| is_valid_tenant_id(label));
        if let Some(tenant) = tenant {
            tracing::debug!(tenant_id = %tenant, "Tenant from host");
            return Some(tenant.to_string());
        }
    }

    None
}

/// `acme.example.com:8080` → `acme`.
fn host_first_label(host: &str) -> Option<&str> {
    let host = host.rsplit_once(':').map_or(host, |(name, _port)| name);
    host.split('.').next().filter(|label| !label.is_empty())
}
