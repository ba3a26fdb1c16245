//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every mount entry, rejecting malformed `what`/`where`
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, DEFAULT_ADMIN_API_KEY};
use crate::routing::{MountError, MountRule};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mount #{index}: {source}")]
    Mount { index: usize, source: MountError },

    #[error("invalid {field} address: {value}")]
    Address { field: &'static str, value: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("admin API enabled with the default api key")]
    DefaultAdminKey,

    #[error("tenancy enabled but neither a header nor the host is a tenant source")]
    NoTenantSource,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, mount) in config.mounts.iter().enumerate() {
        if let Err(source) = MountRule::try_from(mount) {
            errors.push(ValidationError::Mount { index, source });
        }
    }

    check_address(&mut errors, "listener", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(&mut errors, "metrics", &config.observability.metrics_address);
    }
    if config.admin.enabled {
        check_address(&mut errors, "admin", &config.admin.bind_address);
        if config.admin.api_key == DEFAULT_ADMIN_API_KEY {
            errors.push(ValidationError::DefaultAdminKey);
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.tenancy.enabled && config.tenancy.header.is_none() && !config.tenancy.from_host {
        errors.push(ValidationError::NoTenantSource);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field,
            value: value.to_string(),
        });
    }
}
