//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, mount compilation)
//!     → GatewayConfig (validated, immutable)
//!     → MountTable built once and shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the mount table never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    AdminConfig, GatewayConfig, ListenerConfig, MountConfig, ObservabilityConfig, TenancyConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
