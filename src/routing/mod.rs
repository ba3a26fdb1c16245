//! Mount resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Mount Compilation (at startup):
//!     MountConfig[] (what, where)
//!     → mount.rs (classify resource shape, reject malformed entries)
//!     → Freeze as immutable MountTable
//!
//! Incoming Request (path, optional tenant id)
//!     → matcher.rs (normalize path, prefix match, relative remainder)
//!     → tenant.rs (substitute {host[0]} in each mount pattern)
//!     → shape.rs (database, collection, capabilities, canonical path)
//!     → depth.rs (flag paths deeper than the shape allows)
//!     → Return: ResolvedContext (never an error)
//! ```
//!
//! # Design Decisions
//! - Mount shapes classified once at startup, not per request
//! - Table immutable at runtime, resolution is a pure function
//! - First match wins (table order is the priority)
//! - No regex in hot path (prefix matching only)

pub mod depth;
pub mod matcher;
pub mod mount;
pub mod resolver;
pub mod shape;
pub mod tenant;

pub use mount::{MountError, MountRule, MountTable, ResourceShape};
pub use resolver::{MountResolver, ResolvedContext};
